//! 课次存储操作（课表、点名册）

use super::SeaOrmStorage;
use crate::entity::lessons::{ActiveModel, Column, Entity as LessonsEntity};
use crate::entity::prelude::*;
use crate::entity::{absences, courses, grades, rooms, students};
use crate::errors::{Result, SchoolSystemError};
use crate::models::lessons::{
    entities::{AttendanceStatus, Lesson},
    requests::{CreateLessonRequest, RegisterEntry},
    responses::{
        LessonRegister, LessonSummary, RegisterStudent, ScheduleEntry, TeacherScheduleEntry,
    },
};
use crate::utils::schedule::time_slot_for;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use std::collections::{HashMap, HashSet};

impl SeaOrmStorage {
    /// 最新 100 节课次（管理端）
    pub async fn list_lessons_impl(&self) -> Result<Vec<LessonSummary>> {
        let lesson_rows = LessonsEntity::find()
            .order_by_desc(Column::StartTime)
            .limit(100)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询课次列表失败: {e}")))?;

        let class_names = self
            .class_name_map(lesson_rows.iter().map(|l| l.class_id).collect())
            .await?;
        let course_names = self
            .course_name_map(lesson_rows.iter().map(|l| l.course_id).collect())
            .await?;
        let teacher_names = self
            .staff_name_map(lesson_rows.iter().filter_map(|l| l.teacher_id).collect())
            .await?;
        let room_names = self
            .room_name_map(lesson_rows.iter().filter_map(|l| l.room_id).collect())
            .await?;

        Ok(lesson_rows
            .into_iter()
            .map(|l| LessonSummary {
                id: l.id,
                class_name: class_names.get(&l.class_id).cloned().unwrap_or_default(),
                course_name: course_names
                    .get(&l.course_id)
                    .map(|(name, _)| name.clone())
                    .unwrap_or_default(),
                teacher_name: l.teacher_id.and_then(|id| teacher_names.get(&id).cloned()),
                room_name: l.room_id.and_then(|id| room_names.get(&id).cloned()),
                start_time: chrono::DateTime::from_timestamp(l.start_time, 0).unwrap_or_default(),
                duration_min: l.duration_min,
            })
            .collect())
    }

    /// 创建课次，同班同时段已有课次时返回 Conflict
    pub async fn create_lesson_impl(&self, req: CreateLessonRequest) -> Result<Lesson> {
        let start_time = req.start_time.timestamp();

        let taken = LessonsEntity::find()
            .filter(Column::ClassId.eq(req.class_id))
            .filter(Column::StartTime.eq(start_time))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询课次冲突失败: {e}")))?;

        if taken.is_some() {
            return Err(SchoolSystemError::conflict(
                "该班级在此时段已有课次".to_string(),
            ));
        }

        let model = ActiveModel {
            class_id: Set(req.class_id),
            course_id: Set(req.course_id),
            teacher_id: Set(req.teacher_id),
            room_id: Set(req.room_id),
            start_time: Set(start_time),
            duration_min: Set(req.duration_min),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            let err = SchoolSystemError::database_operation(format!("创建课次失败: {e}"));
            if err.is_unique_violation() {
                SchoolSystemError::conflict("该班级在此时段已有课次".to_string())
            } else {
                err
            }
        })?;

        Ok(result.into_lesson())
    }

    /// 删除课次（事务：先清理出勤，随堂成绩解除关联）
    pub async fn delete_lesson_impl(&self, lesson_id: i64) -> Result<bool> {
        let txn = self.db.begin().await.map_err(|e| {
            SchoolSystemError::database_operation(format!("开启事务失败: {e}"))
        })?;

        Absences::delete_many()
            .filter(absences::Column::LessonId.eq(lesson_id))
            .exec(&txn)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除缺勤记录失败: {e}")))?;

        Grades::update_many()
            .col_expr(
                grades::Column::LessonId,
                sea_orm::sea_query::Expr::value(Option::<i64>::None),
            )
            .filter(grades::Column::LessonId.eq(lesson_id))
            .exec(&txn)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("解除成绩课次失败: {e}")))?;

        let result = LessonsEntity::delete_by_id(lesson_id)
            .exec(&txn)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除课次失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 通过 ID 获取课次
    pub async fn get_lesson_by_id_impl(&self, lesson_id: i64) -> Result<Option<Lesson>> {
        let result = LessonsEntity::find_by_id(lesson_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询课次失败: {e}")))?;

        Ok(result.map(|m| m.into_lesson()))
    }

    /// 班级课表（学生视角，含本人缺勤标记）
    pub async fn list_class_schedule_impl(
        &self,
        class_id: i64,
        student_id: i64,
        from: i64,
        future_only: bool,
    ) -> Result<Vec<ScheduleEntry>> {
        let lower = if future_only {
            from.max(chrono::Utc::now().timestamp())
        } else {
            from
        };

        let lesson_rows = LessonsEntity::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::StartTime.gte(lower))
            .order_by_asc(Column::StartTime)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询课表失败: {e}")))?;

        let course_names = self
            .course_name_map(lesson_rows.iter().map(|l| l.course_id).collect())
            .await?;
        let teacher_names = self
            .staff_name_map(lesson_rows.iter().filter_map(|l| l.teacher_id).collect())
            .await?;
        let room_names = self
            .room_name_map(lesson_rows.iter().filter_map(|l| l.room_id).collect())
            .await?;

        // 本人缺勤课次
        let lesson_ids: Vec<i64> = lesson_rows.iter().map(|l| l.id).collect();
        let absent_set: HashSet<i64> = if lesson_ids.is_empty() {
            HashSet::new()
        } else {
            Absences::find()
                .filter(absences::Column::StudentId.eq(student_id))
                .filter(absences::Column::LessonId.is_in(lesson_ids))
                .select_only()
                .column(absences::Column::LessonId)
                .into_tuple::<i64>()
                .all(&self.db)
                .await
                .map_err(|e| {
                    SchoolSystemError::database_operation(format!("查询缺勤记录失败: {e}"))
                })?
                .into_iter()
                .collect()
        };

        Ok(lesson_rows
            .into_iter()
            .map(|l| {
                let start = chrono::DateTime::from_timestamp(l.start_time, 0).unwrap_or_default();
                let (course_name, subject_name) = course_names
                    .get(&l.course_id)
                    .cloned()
                    .unwrap_or_default();
                ScheduleEntry {
                    lesson_id: l.id,
                    course_name,
                    subject_name,
                    teacher_name: l.teacher_id.and_then(|id| teacher_names.get(&id).cloned()),
                    room_name: l.room_id.and_then(|id| room_names.get(&id).cloned()),
                    start_time: start,
                    time_slot: time_slot_for(start),
                    is_absent: absent_set.contains(&l.id),
                }
            })
            .collect())
    }

    /// 教师课表
    pub async fn list_teaching_schedule_impl(
        &self,
        staff_id: i64,
        from: i64,
    ) -> Result<Vec<TeacherScheduleEntry>> {
        let lesson_rows = LessonsEntity::find()
            .filter(Column::TeacherId.eq(staff_id))
            .filter(Column::StartTime.gte(from))
            .order_by_asc(Column::StartTime)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询教师课表失败: {e}")))?;

        let class_names = self
            .class_name_map(lesson_rows.iter().map(|l| l.class_id).collect())
            .await?;
        let course_names = self
            .course_name_map(lesson_rows.iter().map(|l| l.course_id).collect())
            .await?;
        let room_names = self
            .room_name_map(lesson_rows.iter().filter_map(|l| l.room_id).collect())
            .await?;

        Ok(lesson_rows
            .into_iter()
            .map(|l| {
                let start = chrono::DateTime::from_timestamp(l.start_time, 0).unwrap_or_default();
                TeacherScheduleEntry {
                    lesson_id: l.id,
                    class_name: class_names.get(&l.class_id).cloned().unwrap_or_default(),
                    course_name: course_names
                        .get(&l.course_id)
                        .map(|(name, _)| name.clone())
                        .unwrap_or_default(),
                    room_name: l.room_id.and_then(|id| room_names.get(&id).cloned()),
                    start_time: start,
                    time_slot: time_slot_for(start),
                }
            })
            .collect())
    }

    /// 点名册：名册 + 出勤状态 + 本课成绩
    pub async fn get_lesson_register_impl(&self, lesson_id: i64) -> Result<Option<LessonRegister>> {
        let Some(lesson) = LessonsEntity::find_by_id(lesson_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询课次失败: {e}")))?
        else {
            return Ok(None);
        };

        let class_name = self
            .class_name_map(vec![lesson.class_id])
            .await?
            .remove(&lesson.class_id)
            .unwrap_or_default();
        let course_name = self
            .course_name_map(vec![lesson.course_id])
            .await?
            .remove(&lesson.course_id)
            .map(|(name, _)| name)
            .unwrap_or_default();

        let student_rows = Students::find()
            .filter(students::Column::ClassId.eq(lesson.class_id))
            .find_also_related(Users)
            .order_by_asc(students::Column::StudentNumber)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询班级名册失败: {e}")))?;

        // 出勤状态
        let absence_rows = Absences::find()
            .filter(absences::Column::LessonId.eq(lesson_id))
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询缺勤记录失败: {e}")))?;
        let absence_map: HashMap<i64, Option<i64>> = absence_rows
            .into_iter()
            .map(|a| (a.student_id, a.late_reason_id))
            .collect();

        // 随堂成绩
        let grade_rows = Grades::find()
            .filter(grades::Column::LessonId.eq(lesson_id))
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询随堂成绩失败: {e}")))?;
        let grade_map: HashMap<i64, f64> = grade_rows
            .into_iter()
            .map(|g| (g.student_id, g.value))
            .collect();

        let students_list = student_rows
            .into_iter()
            .map(|(s, user)| {
                let (status, late_reason_id) = match absence_map.get(&s.id) {
                    Some(Some(reason)) => (AttendanceStatus::Late, Some(*reason)),
                    Some(None) => (AttendanceStatus::Absent, None),
                    None => (AttendanceStatus::Present, None),
                };
                RegisterStudent {
                    student_id: s.id,
                    student_number: s.student_number,
                    full_name: user
                        .map(|u| format!("{} {}", u.first_name, u.last_name))
                        .unwrap_or_default(),
                    status,
                    late_reason_id,
                    grade: grade_map.get(&s.id).copied(),
                }
            })
            .collect();

        let start = chrono::DateTime::from_timestamp(lesson.start_time, 0).unwrap_or_default();

        Ok(Some(LessonRegister {
            lesson_id: lesson.id,
            class_id: lesson.class_id,
            class_name,
            course_id: lesson.course_id,
            course_name,
            start_time: start,
            time_slot: time_slot_for(start),
            students: students_list,
        }))
    }

    /// 保存点名册（事务：重建缺勤行，按需插入随堂成绩）
    pub async fn save_lesson_register_impl(
        &self,
        lesson_id: i64,
        entries: Vec<RegisterEntry>,
    ) -> Result<bool> {
        let Some(lesson) = LessonsEntity::find_by_id(lesson_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询课次失败: {e}")))?
        else {
            return Ok(false);
        };

        let now = chrono::Utc::now().timestamp();

        let txn = self.db.begin().await.map_err(|e| {
            SchoolSystemError::database_operation(format!("开启事务失败: {e}"))
        })?;

        for entry in entries {
            // 先删后插，保证每个学生每节课至多一行
            Absences::delete_many()
                .filter(absences::Column::StudentId.eq(entry.student_id))
                .filter(absences::Column::LessonId.eq(lesson_id))
                .exec(&txn)
                .await
                .map_err(|e| {
                    SchoolSystemError::database_operation(format!("删除缺勤记录失败: {e}"))
                })?;

            let late_reason = absence_marker(entry.status, entry.late_reason_id)?;

            if let Some(late_reason_id) = late_reason {
                AbsenceActiveModel {
                    student_id: Set(entry.student_id),
                    lesson_id: Set(lesson_id),
                    date: Set(lesson.start_time),
                    late_reason_id: Set(late_reason_id),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(|e| {
                    SchoolSystemError::database_operation(format!("写入缺勤记录失败: {e}"))
                })?;
            }

            if let Some(value) = entry.grade {
                GradeActiveModel {
                    student_id: Set(entry.student_id),
                    course_id: Set(lesson.course_id),
                    lesson_id: Set(Some(lesson_id)),
                    value: Set(value),
                    weight: Set(1.0),
                    comment: Set(entry.grade_comment),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(|e| {
                    SchoolSystemError::database_operation(format!("写入随堂成绩失败: {e}"))
                })?;
            }
        }

        txn.commit()
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(true)
    }

    /// class_id -> 班级名
    pub(crate) async fn class_name_map(&self, class_ids: Vec<i64>) -> Result<HashMap<i64, String>> {
        if class_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Classes::find()
            .filter(crate::entity::classes::Column::Id.is_in(class_ids))
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(rows.into_iter().map(|c| (c.id, c.name)).collect())
    }

    /// course_id -> (课程名, 科目名)
    pub(crate) async fn course_name_map(
        &self,
        course_ids: Vec<i64>,
    ) -> Result<HashMap<i64, (String, String)>> {
        if course_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Courses::find()
            .filter(courses::Column::Id.is_in(course_ids))
            .find_also_related(Subjects)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(c, subject)| {
                (
                    c.id,
                    (c.name, subject.map(|s| s.name).unwrap_or_default()),
                )
            })
            .collect())
    }

    /// room_id -> 教室名
    pub(crate) async fn room_name_map(&self, room_ids: Vec<i64>) -> Result<HashMap<i64, String>> {
        if room_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Rooms::find()
            .filter(rooms::Column::Id.is_in(room_ids))
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询教室失败: {e}")))?;

        Ok(rows.into_iter().map(|r| (r.id, r.name)).collect())
    }
}

/// 点名状态到缺勤行的映射。
///
/// None 表示出勤不写行；Some(None) 为缺勤；Some(Some(id)) 为迟到。
/// 迟到必须带 late_reason_id，不允许伪造占位外键。
fn absence_marker(
    status: AttendanceStatus,
    late_reason_id: Option<i64>,
) -> Result<Option<Option<i64>>> {
    match status {
        AttendanceStatus::Present => Ok(None),
        AttendanceStatus::Absent => Ok(Some(None)),
        AttendanceStatus::Late => match late_reason_id {
            Some(reason_id) => Ok(Some(Some(reason_id))),
            None => Err(SchoolSystemError::validation(
                "late_reason_id is required for late status",
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_writes_no_absence_row() {
        assert_eq!(absence_marker(AttendanceStatus::Present, None).unwrap(), None);
    }

    #[test]
    fn test_absent_writes_row_without_reason() {
        assert_eq!(
            absence_marker(AttendanceStatus::Absent, None).unwrap(),
            Some(None)
        );
    }

    #[test]
    fn test_late_carries_reason_id() {
        assert_eq!(
            absence_marker(AttendanceStatus::Late, Some(7)).unwrap(),
            Some(Some(7))
        );
    }

    #[test]
    fn test_late_without_reason_is_rejected() {
        assert!(absence_marker(AttendanceStatus::Late, None).is_err());
    }
}
