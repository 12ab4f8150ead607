//! 班级存储操作

use super::SeaOrmStorage;
use crate::entity::classes::{ActiveModel, Column, Entity as ClassesEntity};
use crate::entity::prelude::*;
use crate::entity::{absences, announcements, grades, lessons, staff, students};
use crate::errors::{Result, SchoolSystemError};
use crate::models::classes::{
    entities::Class,
    requests::CreateClassRequest,
    responses::{
        ClassDetail, ClassLesson, ClassStudent, ClassSummary, StudentClassInfo, TeacherClass,
    },
};
use crate::utils::schedule::time_slot_for;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use std::collections::{HashMap, HashSet};

impl SeaOrmStorage {
    /// 列出全部班级及班主任
    pub async fn list_classes_impl(&self) -> Result<Vec<ClassSummary>> {
        let class_rows = ClassesEntity::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询班级列表失败: {e}")))?;

        let teacher_names = self
            .staff_name_map(class_rows.iter().filter_map(|c| c.main_teacher_id).collect())
            .await?;
        let student_counts = self.class_student_counts(&self.db).await?;

        Ok(class_rows
            .into_iter()
            .map(|c| ClassSummary {
                id: c.id,
                name: c.name,
                main_teacher_name: c.main_teacher_id.and_then(|id| teacher_names.get(&id).cloned()),
                student_count: *student_counts.get(&c.id).unwrap_or(&0),
            })
            .collect())
    }

    /// 创建班级
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<Class> {
        let model = ActiveModel {
            name: Set(req.name),
            main_teacher_id: Set(req.main_teacher_id),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("创建班级失败: {e}")))?;

        Ok(result.into_class())
    }

    /// 删除班级（事务：课次及其出勤成绩、学生解绑、班级公告）
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let txn = self.db.begin().await.map_err(|e| {
            SchoolSystemError::database_operation(format!("开启事务失败: {e}"))
        })?;

        let lesson_ids: Vec<i64> = Lessons::find()
            .filter(lessons::Column::ClassId.eq(class_id))
            .select_only()
            .column(lessons::Column::Id)
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询班级课次失败: {e}")))?;

        if !lesson_ids.is_empty() {
            Absences::delete_many()
                .filter(absences::Column::LessonId.is_in(lesson_ids.clone()))
                .exec(&txn)
                .await
                .map_err(|e| {
                    SchoolSystemError::database_operation(format!("删除缺勤记录失败: {e}"))
                })?;

            // 随堂成绩保留，仅解除课次关联
            Grades::update_many()
                .col_expr(
                    grades::Column::LessonId,
                    sea_orm::sea_query::Expr::value(Option::<i64>::None),
                )
                .filter(grades::Column::LessonId.is_in(lesson_ids.clone()))
                .exec(&txn)
                .await
                .map_err(|e| {
                    SchoolSystemError::database_operation(format!("解除成绩课次失败: {e}"))
                })?;

            Lessons::delete_many()
                .filter(lessons::Column::Id.is_in(lesson_ids))
                .exec(&txn)
                .await
                .map_err(|e| SchoolSystemError::database_operation(format!("删除课次失败: {e}")))?;
        }

        Students::update_many()
            .col_expr(
                students::Column::ClassId,
                sea_orm::sea_query::Expr::value(Option::<i64>::None),
            )
            .filter(students::Column::ClassId.eq(class_id))
            .exec(&txn)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("学生解绑班级失败: {e}")))?;

        Announcements::delete_many()
            .filter(announcements::Column::ClassId.eq(class_id))
            .exec(&txn)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除班级公告失败: {e}")))?;

        let result = ClassesEntity::delete_by_id(class_id)
            .exec(&txn)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除班级失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 列出教职工任教或担任班主任的班级
    pub async fn list_staff_classes_impl(&self, staff_id: i64) -> Result<Vec<TeacherClass>> {
        // 授课班级
        let taught_ids: Vec<i64> = Lessons::find()
            .filter(lessons::Column::TeacherId.eq(staff_id))
            .select_only()
            .column(lessons::Column::ClassId)
            .distinct()
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询授课班级失败: {e}")))?;

        let mut class_ids: HashSet<i64> = taught_ids.into_iter().collect();

        // 班主任班级
        let supervised = ClassesEntity::find()
            .filter(Column::MainTeacherId.eq(staff_id))
            .all(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("查询班主任班级失败: {e}"))
            })?;
        class_ids.extend(supervised.iter().map(|c| c.id));

        if class_ids.is_empty() {
            return Ok(Vec::new());
        }

        let class_rows = ClassesEntity::find()
            .filter(Column::Id.is_in(class_ids.into_iter().collect::<Vec<_>>()))
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询班级列表失败: {e}")))?;

        let student_counts = self.class_student_counts(&self.db).await?;

        Ok(class_rows
            .into_iter()
            .map(|c| TeacherClass {
                id: c.id,
                name: c.name,
                student_count: *student_counts.get(&c.id).unwrap_or(&0),
                is_main_teacher: c.main_teacher_id == Some(staff_id),
            })
            .collect())
    }

    /// 班级详情：名册、近期课次、公告
    pub async fn get_class_detail_impl(&self, class_id: i64) -> Result<Option<ClassDetail>> {
        let Some(class_row) = ClassesEntity::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询班级失败: {e}")))?
        else {
            return Ok(None);
        };

        let main_teacher_name = match class_row.main_teacher_id {
            Some(id) => self.staff_name_map(vec![id]).await?.get(&id).cloned(),
            None => None,
        };

        // 名册按学号排序
        let student_rows = Students::find()
            .filter(students::Column::ClassId.eq(class_id))
            .find_also_related(Users)
            .order_by_asc(students::Column::StudentNumber)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询班级名册失败: {e}")))?;

        let students_list = student_rows
            .into_iter()
            .map(|(s, user)| ClassStudent {
                student_id: s.id,
                student_number: s.student_number,
                full_name: user
                    .map(|u| format!("{} {}", u.first_name, u.last_name))
                    .unwrap_or_default(),
            })
            .collect();

        // 最近 10 节课
        let lesson_rows = Lessons::find()
            .filter(lessons::Column::ClassId.eq(class_id))
            .find_also_related(Courses)
            .order_by_desc(lessons::Column::StartTime)
            .limit(10)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询班级课次失败: {e}")))?;

        let subject_names = self
            .subject_name_map(
                lesson_rows
                    .iter()
                    .filter_map(|(_, c)| c.as_ref().map(|c| c.subject_id))
                    .collect(),
            )
            .await?;

        let lessons_list = lesson_rows
            .into_iter()
            .map(|(l, course)| {
                let start = chrono::DateTime::<chrono::Utc>::from_timestamp(l.start_time, 0)
                    .unwrap_or_default();
                ClassLesson {
                    id: l.id,
                    course_name: course.as_ref().map(|c| c.name.clone()).unwrap_or_default(),
                    subject_name: course
                        .as_ref()
                        .and_then(|c| subject_names.get(&c.subject_id).cloned())
                        .unwrap_or_default(),
                    start_time: start,
                    time_slot: time_slot_for(start),
                }
            })
            .collect();

        let announcements_list = self.list_announcements_impl(Some(class_id), 10).await?;

        Ok(Some(ClassDetail {
            id: class_row.id,
            name: class_row.name,
            main_teacher_name,
            students: students_list,
            lessons: lessons_list,
            announcements: announcements_list,
        }))
    }

    /// 学生视角的班级信息（班主任及其邮箱、本班与全校公告）
    pub async fn get_student_class_info_impl(
        &self,
        class_id: i64,
    ) -> Result<Option<StudentClassInfo>> {
        let Some(class_row) = ClassesEntity::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询班级失败: {e}")))?
        else {
            return Ok(None);
        };

        let educator = match class_row.main_teacher_id {
            Some(staff_id) => Staff::find_by_id(staff_id)
                .find_also_related(Users)
                .one(&self.db)
                .await
                .map_err(|e| {
                    SchoolSystemError::database_operation(format!("查询班主任失败: {e}"))
                })?
                .and_then(|(_, user)| user),
            None => None,
        };

        let announcements = self.list_announcements_impl(Some(class_id), 10).await?;

        Ok(Some(StudentClassInfo {
            class_id: Some(class_row.id),
            class_name: Some(class_row.name),
            educator_name: educator
                .as_ref()
                .map(|u| format!("{} {}", u.first_name, u.last_name)),
            educator_email: educator.map(|u| u.email),
            announcements,
        }))
    }

    /// staff_id -> 用户全名
    pub(crate) async fn staff_name_map(&self, staff_ids: Vec<i64>) -> Result<HashMap<i64, String>> {
        if staff_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Staff::find()
            .filter(staff::Column::Id.is_in(staff_ids))
            .find_also_related(Users)
            .all(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("查询教职工姓名失败: {e}"))
            })?;

        Ok(rows
            .into_iter()
            .filter_map(|(s, user)| user.map(|u| (s.id, format!("{} {}", u.first_name, u.last_name))))
            .collect())
    }

    /// subject_id -> 科目名
    pub(crate) async fn subject_name_map(
        &self,
        subject_ids: Vec<i64>,
    ) -> Result<HashMap<i64, String>> {
        if subject_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Subjects::find()
            .filter(crate::entity::subjects::Column::Id.is_in(subject_ids))
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(rows.into_iter().map(|s| (s.id, s.name)).collect())
    }

    /// class_id -> 在读学生数
    async fn class_student_counts<C: ConnectionTrait>(
        &self,
        conn: &C,
    ) -> Result<HashMap<i64, i64>> {
        let rows: Vec<(Option<i64>, i64)> = Students::find()
            .select_only()
            .column(students::Column::ClassId)
            .column_as(students::Column::Id.count(), "student_count")
            .group_by(students::Column::ClassId)
            .into_tuple()
            .all(conn)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("统计班级人数失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(class_id, count)| class_id.map(|id| (id, count)))
            .collect())
    }
}
