//! 出勤统计、仪表盘与系统探测

use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::{absences, lessons, occupations, staff};
use crate::errors::{Result, SchoolSystemError};
use crate::models::dashboard::responses::{AdminStats, NextLesson};
use crate::models::users::entities::UserRole;
use sea_orm::{
    ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};

impl SeaOrmStorage {
    /// (已上课次数, 缺勤次数)
    pub async fn attendance_counts_impl(
        &self,
        class_id: i64,
        student_id: i64,
        from: i64,
        to: i64,
    ) -> Result<(i64, i64)> {
        let conducted = Lessons::find()
            .filter(lessons::Column::ClassId.eq(class_id))
            .filter(lessons::Column::StartTime.gte(from))
            .filter(lessons::Column::StartTime.lte(to))
            .count(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("统计课次失败: {e}")))?;

        let absent = Absences::find()
            .filter(absences::Column::StudentId.eq(student_id))
            .join(JoinType::InnerJoin, absences::Relation::Lesson.def())
            .filter(lessons::Column::ClassId.eq(class_id))
            .filter(lessons::Column::StartTime.gte(from))
            .filter(lessons::Column::StartTime.lte(to))
            .count(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("统计缺勤失败: {e}")))?;

        Ok((conducted as i64, absent as i64))
    }

    /// 班级的下一节课
    pub async fn next_class_lesson_impl(
        &self,
        class_id: i64,
        now: i64,
    ) -> Result<Option<NextLesson>> {
        let lesson = Lessons::find()
            .filter(lessons::Column::ClassId.eq(class_id))
            .filter(lessons::Column::StartTime.gte(now))
            .order_by_asc(lessons::Column::StartTime)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询下一节课失败: {e}")))?;

        self.build_next_lesson(lesson, now).await
    }

    /// 教师的下一节课
    pub async fn next_teaching_lesson_impl(
        &self,
        staff_id: i64,
        now: i64,
    ) -> Result<Option<NextLesson>> {
        let lesson = Lessons::find()
            .filter(lessons::Column::TeacherId.eq(staff_id))
            .filter(lessons::Column::StartTime.gte(now))
            .order_by_asc(lessons::Column::StartTime)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询下一节课失败: {e}")))?;

        self.build_next_lesson(lesson, now).await
    }

    async fn build_next_lesson(
        &self,
        lesson: Option<crate::entity::lessons::Model>,
        now: i64,
    ) -> Result<Option<NextLesson>> {
        use crate::utils::schedule::{relative_day, time_slot_for};

        let Some(lesson) = lesson else {
            return Ok(None);
        };

        let course = self
            .course_name_map(vec![lesson.course_id])
            .await?
            .remove(&lesson.course_id)
            .unwrap_or_default();
        let room_name = match lesson.room_id {
            Some(id) => self.room_name_map(vec![id]).await?.remove(&id),
            None => None,
        };

        let now_dt = chrono::DateTime::from_timestamp(now, 0).unwrap_or_default();
        let start = chrono::DateTime::from_timestamp(lesson.start_time, 0).unwrap_or_default();

        Ok(Some(NextLesson {
            lesson_id: lesson.id,
            course_name: course.0,
            subject_name: course.1,
            room_name,
            start_time: start,
            time_slot: time_slot_for(start),
            relative_day: relative_day(now_dt, start),
        }))
    }

    /// 管理员统计
    pub async fn admin_stats_impl(&self, day_start: i64, day_end: i64) -> Result<AdminStats> {
        let students = Students::find()
            .count(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("统计学生失败: {e}")))?;

        let teachers = Staff::find()
            .join(JoinType::InnerJoin, staff::Relation::Occupation.def())
            .filter(occupations::Column::Name.eq(UserRole::TEACHER))
            .count(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("统计教师失败: {e}")))?;

        let courses = Courses::find()
            .count(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("统计课程失败: {e}")))?;

        let lessons_today = Lessons::find()
            .filter(lessons::Column::StartTime.gte(day_start))
            .filter(lessons::Column::StartTime.lt(day_end))
            .count(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("统计今日课次失败: {e}")))?;

        Ok(AdminStats {
            students: students as i64,
            teachers: teachers as i64,
            courses: courses as i64,
            lessons_today: lessons_today as i64,
        })
    }

    /// 数据库连通性探测
    pub async fn ping_impl(&self) -> Result<()> {
        self.db
            .ping()
            .await
            .map_err(|e| SchoolSystemError::database_connection(format!("数据库探测失败: {e}")))
    }
}
