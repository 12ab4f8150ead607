//! 课程存储操作

use super::SeaOrmStorage;
use crate::entity::courses::{ActiveModel, Column, Entity as CoursesEntity};
use crate::entity::prelude::*;
use crate::entity::{absences, grades, lessons, students, teacher_courses};
use crate::errors::{Result, SchoolSystemError};
use crate::models::courses::{
    entities::Course,
    requests::CreateCourseRequest,
    responses::{
        CourseOverview, CourseStudentEntry, CourseStudentsResponse, CourseSummary, MissedLesson,
        StudentCourse,
    },
};
use crate::models::grades::responses::GradeEntry;
use crate::utils::schedule::{attendance_percentage, time_slot_for};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use std::collections::HashMap;

impl SeaOrmStorage {
    /// 课程目录（含科目与授课教师）
    pub async fn list_courses_impl(&self) -> Result<Vec<CourseSummary>> {
        let course_rows = CoursesEntity::find()
            .find_also_related(Subjects)
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询课程列表失败: {e}")))?;

        let course_ids: Vec<i64> = course_rows.iter().map(|(c, _)| c.id).collect();
        let teacher_by_course = self.course_teacher_names(course_ids).await?;

        Ok(course_rows
            .into_iter()
            .map(|(c, subject)| CourseSummary {
                id: c.id,
                name: c.name,
                subject_name: subject.map(|s| s.name).unwrap_or_default(),
                teacher_name: teacher_by_course.get(&c.id).cloned(),
                description: c.description,
                weight: c.weight,
                created_at: chrono::DateTime::from_timestamp(c.created_at, 0).unwrap_or_default(),
            })
            .collect())
    }

    /// 创建课程并关联授课教师（事务）
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let txn = self.db.begin().await.map_err(|e| {
            SchoolSystemError::database_operation(format!("开启事务失败: {e}"))
        })?;

        let course = ActiveModel {
            subject_id: Set(req.subject_id),
            name: Set(req.name),
            description: Set(req.description),
            weight: Set(req.weight),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| SchoolSystemError::database_operation(format!("创建课程失败: {e}")))?;

        TeacherCourseActiveModel {
            staff_id: Set(req.teacher_id),
            course_id: Set(course.id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| SchoolSystemError::database_operation(format!("创建授课关联失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(course.into_course())
    }

    /// 删除课程及其授课关联
    pub async fn delete_course_impl(&self, course_id: i64) -> Result<bool> {
        let txn = self.db.begin().await.map_err(|e| {
            SchoolSystemError::database_operation(format!("开启事务失败: {e}"))
        })?;

        TeacherCourses::delete_many()
            .filter(teacher_courses::Column::CourseId.eq(course_id))
            .exec(&txn)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除授课关联失败: {e}")))?;

        let result = CoursesEntity::delete_by_id(course_id)
            .exec(&txn)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除课程失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 学生本学年课程及出勤统计
    pub async fn list_student_courses_impl(
        &self,
        student_id: i64,
        class_id: i64,
        year_start: i64,
    ) -> Result<Vec<StudentCourse>> {
        let now = chrono::Utc::now().timestamp();

        // 本学年已上课次
        let lesson_rows: Vec<(i64, i64)> = Lessons::find()
            .filter(lessons::Column::ClassId.eq(class_id))
            .filter(lessons::Column::StartTime.gte(year_start))
            .filter(lessons::Column::StartTime.lte(now))
            .select_only()
            .column(lessons::Column::Id)
            .column(lessons::Column::CourseId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询班级课次失败: {e}")))?;

        let mut conducted: HashMap<i64, i64> = HashMap::new();
        let mut course_by_lesson: HashMap<i64, i64> = HashMap::new();
        for (lesson_id, course_id) in &lesson_rows {
            *conducted.entry(*course_id).or_insert(0) += 1;
            course_by_lesson.insert(*lesson_id, *course_id);
        }

        // 本人缺勤按课程聚合
        let mut absent: HashMap<i64, i64> = HashMap::new();
        if !course_by_lesson.is_empty() {
            let absence_lessons: Vec<i64> = Absences::find()
                .filter(absences::Column::StudentId.eq(student_id))
                .filter(
                    absences::Column::LessonId
                        .is_in(course_by_lesson.keys().copied().collect::<Vec<_>>()),
                )
                .select_only()
                .column(absences::Column::LessonId)
                .into_tuple()
                .all(&self.db)
                .await
                .map_err(|e| {
                    SchoolSystemError::database_operation(format!("查询缺勤记录失败: {e}"))
                })?;

            for lesson_id in absence_lessons {
                if let Some(course_id) = course_by_lesson.get(&lesson_id) {
                    *absent.entry(*course_id).or_insert(0) += 1;
                }
            }
        }

        // 班级全部课程（含本学年未开课的）
        let all_course_ids: Vec<i64> = Lessons::find()
            .filter(lessons::Column::ClassId.eq(class_id))
            .select_only()
            .column(lessons::Column::CourseId)
            .distinct()
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询班级课程失败: {e}")))?;

        if all_course_ids.is_empty() {
            return Ok(Vec::new());
        }

        let course_rows = CoursesEntity::find()
            .filter(Column::Id.is_in(all_course_ids))
            .find_also_related(Subjects)
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询课程失败: {e}")))?;

        let teacher_by_course = self
            .course_teacher_names(course_rows.iter().map(|(c, _)| c.id).collect())
            .await?;

        Ok(course_rows
            .into_iter()
            .map(|(c, subject)| {
                let conducted_lessons = *conducted.get(&c.id).unwrap_or(&0);
                let absences_count = *absent.get(&c.id).unwrap_or(&0);
                StudentCourse {
                    id: c.id,
                    name: c.name,
                    subject_name: subject.map(|s| s.name).unwrap_or_default(),
                    teacher_name: teacher_by_course.get(&c.id).cloned(),
                    conducted_lessons,
                    absences: absences_count,
                    attendance_percentage: attendance_percentage(conducted_lessons, absences_count),
                }
            })
            .collect())
    }

    /// 学生视角的课程总览：成绩 + 缺勤课次
    pub async fn get_course_overview_impl(
        &self,
        course_id: i64,
        student_id: i64,
        year_start: i64,
    ) -> Result<Option<CourseOverview>> {
        let Some((course_row, subject)) = CoursesEntity::find_by_id(course_id)
            .find_also_related(Subjects)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询课程失败: {e}")))?
        else {
            return Ok(None);
        };

        let subject_name = subject.map(|s| s.name).unwrap_or_default();
        let teacher_name = self
            .course_teacher_names(vec![course_id])
            .await?
            .remove(&course_id);

        // 本学年该课程的成绩
        let grade_rows = Grades::find()
            .filter(grades::Column::StudentId.eq(student_id))
            .filter(grades::Column::CourseId.eq(course_id))
            .filter(grades::Column::CreatedAt.gte(year_start))
            .order_by_desc(grades::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询成绩失败: {e}")))?;

        let course_name = course_row.name.clone();
        let grades_list: Vec<GradeEntry> = grade_rows
            .into_iter()
            .map(|g| GradeEntry {
                id: g.id,
                value: g.value,
                weight: g.weight,
                comment: g.comment,
                course_name: course_name.clone(),
                subject_name: subject_name.clone(),
                created_at: chrono::DateTime::from_timestamp(g.created_at, 0).unwrap_or_default(),
            })
            .collect();

        // 本学年该课程的缺勤课次
        let missed_rows = Absences::find()
            .filter(absences::Column::StudentId.eq(student_id))
            .filter(absences::Column::Date.gte(year_start))
            .find_also_related(Lessons)
            .order_by_desc(absences::Column::Date)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询缺勤记录失败: {e}")))?;

        let missed_lessons = missed_rows
            .into_iter()
            .filter_map(|(a, lesson)| {
                let lesson = lesson?;
                if lesson.course_id != course_id {
                    return None;
                }
                let date = chrono::DateTime::from_timestamp(lesson.start_time, 0)
                    .unwrap_or_default();
                Some(MissedLesson {
                    lesson_id: lesson.id,
                    date,
                    time_slot: time_slot_for(date),
                    was_late: a.late_reason_id.is_some(),
                })
            })
            .collect();

        Ok(Some(CourseOverview {
            course: CourseSummary {
                id: course_row.id,
                name: course_row.name,
                subject_name,
                teacher_name,
                description: course_row.description,
                weight: course_row.weight,
                created_at: chrono::DateTime::from_timestamp(course_row.created_at, 0)
                    .unwrap_or_default(),
            },
            grades: grades_list,
            missed_lessons,
        }))
    }

    /// 教师视角的课程学生名册（含本课程成绩）
    pub async fn list_course_students_impl(
        &self,
        course_id: i64,
    ) -> Result<Option<CourseStudentsResponse>> {
        let Some((course_row, subject)) = CoursesEntity::find_by_id(course_id)
            .find_also_related(Subjects)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询课程失败: {e}")))?
        else {
            return Ok(None);
        };

        let subject_name = subject.map(|s| s.name).unwrap_or_default();

        // 授课班级
        let class_ids: Vec<i64> = Lessons::find()
            .filter(lessons::Column::CourseId.eq(course_id))
            .select_only()
            .column(lessons::Column::ClassId)
            .distinct()
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询授课班级失败: {e}")))?;

        if class_ids.is_empty() {
            return Ok(Some(CourseStudentsResponse {
                course_id: course_row.id,
                course_name: course_row.name,
                students: Vec::new(),
            }));
        }

        let student_rows = Students::find()
            .filter(students::Column::ClassId.is_in(class_ids.clone()))
            .find_also_related(Users)
            .order_by_asc(students::Column::StudentNumber)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询学生名册失败: {e}")))?;

        let class_names: HashMap<i64, String> = Classes::find()
            .filter(crate::entity::classes::Column::Id.is_in(class_ids))
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询班级失败: {e}")))?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        // 本课程成绩按学生聚合
        let student_ids: Vec<i64> = student_rows.iter().map(|(s, _)| s.id).collect();
        let mut grades_by_student: HashMap<i64, Vec<GradeEntry>> = HashMap::new();
        if !student_ids.is_empty() {
            let grade_rows = Grades::find()
                .filter(grades::Column::CourseId.eq(course_id))
                .filter(grades::Column::StudentId.is_in(student_ids))
                .order_by_desc(grades::Column::CreatedAt)
                .all(&self.db)
                .await
                .map_err(|e| SchoolSystemError::database_operation(format!("查询成绩失败: {e}")))?;

            for g in grade_rows {
                grades_by_student
                    .entry(g.student_id)
                    .or_default()
                    .push(GradeEntry {
                        id: g.id,
                        value: g.value,
                        weight: g.weight,
                        comment: g.comment,
                        course_name: course_row.name.clone(),
                        subject_name: subject_name.clone(),
                        created_at: chrono::DateTime::from_timestamp(g.created_at, 0)
                            .unwrap_or_default(),
                    });
            }
        }

        let students_list = student_rows
            .into_iter()
            .map(|(s, user)| CourseStudentEntry {
                student_id: s.id,
                student_number: s.student_number,
                full_name: user
                    .map(|u| format!("{} {}", u.first_name, u.last_name))
                    .unwrap_or_default(),
                class_name: s.class_id.and_then(|id| class_names.get(&id).cloned()),
                grades: grades_by_student.remove(&s.id).unwrap_or_default(),
            })
            .collect();

        Ok(Some(CourseStudentsResponse {
            course_id: course_row.id,
            course_name: course_row.name,
            students: students_list,
        }))
    }

    /// course_id -> 授课教师姓名（取第一位）
    pub(crate) async fn course_teacher_names(
        &self,
        course_ids: Vec<i64>,
    ) -> Result<HashMap<i64, String>> {
        if course_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let links = TeacherCourses::find()
            .filter(teacher_courses::Column::CourseId.is_in(course_ids))
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询授课关联失败: {e}")))?;

        let staff_names = self
            .staff_name_map(links.iter().map(|l| l.staff_id).collect())
            .await?;

        let mut result = HashMap::new();
        for link in links {
            if let Some(name) = staff_names.get(&link.staff_id) {
                result.entry(link.course_id).or_insert_with(|| name.clone());
            }
        }

        Ok(result)
    }
}
