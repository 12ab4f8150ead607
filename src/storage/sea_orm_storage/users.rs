//! 用户存储操作（含角色档案）

use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::entity::{classes, occupations, parent_students, parents, staff, students};
use crate::errors::{Result, SchoolSystemError};
use crate::models::{
    PaginationInfo,
    users::{
        entities::{RoleProfile, User, UserRole},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::{UserListItem, UserListResponse},
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::HashMap;

// 建号默认月薪
const ADMIN_SALARY: f64 = 6000.0;
const TEACHER_SALARY: f64 = 4500.0;

impl SeaOrmStorage {
    /// 创建用户及其角色档案（事务）
    pub async fn create_user_with_role_impl(
        &self,
        req: CreateUserRequest,
        password_hash: String,
    ) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let txn = self.db.begin().await.map_err(|e| {
            SchoolSystemError::database_operation(format!("开启事务失败: {e}"))
        })?;

        let model = ActiveModel {
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            email: Set(req.email),
            pesel: Set(req.pesel),
            password_hash: Set(password_hash),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let user = model
            .insert(&txn)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("创建用户失败: {e}")))?;

        match req.role {
            UserRole::Student => {
                // 学号单调递增
                let max_number: Option<Option<i64>> = Students::find()
                    .select_only()
                    .column_as(students::Column::StudentNumber.max(), "max_number")
                    .into_tuple()
                    .one(&txn)
                    .await
                    .map_err(|e| {
                        SchoolSystemError::database_operation(format!("查询最大学号失败: {e}"))
                    })?;
                let student_number = max_number.flatten().unwrap_or(0) + 1;

                StudentActiveModel {
                    user_id: Set(user.id),
                    class_id: Set(None),
                    student_number: Set(student_number),
                    enrollment_date: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(|e| {
                    SchoolSystemError::database_operation(format!("创建学生档案失败: {e}"))
                })?;
            }
            UserRole::Parent => {
                ParentActiveModel {
                    user_id: Set(user.id),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(|e| {
                    SchoolSystemError::database_operation(format!("创建家长档案失败: {e}"))
                })?;
            }
            UserRole::Teacher => {
                Self::insert_staff_profile(&txn, user.id, UserRole::TEACHER, TEACHER_SALARY, now)
                    .await?;
            }
            UserRole::Admin => {
                Self::insert_staff_profile(&txn, user.id, UserRole::ADMIN, ADMIN_SALARY, now)
                    .await?;
            }
            UserRole::Staff => {
                return Err(SchoolSystemError::validation(
                    "不支持直接创建 staff 角色".to_string(),
                ));
            }
        }

        txn.commit()
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(user.into_user())
    }

    /// 插入教职工档案，职业不存在时先创建
    async fn insert_staff_profile<C: ConnectionTrait>(
        conn: &C,
        user_id: i64,
        occupation: &str,
        salary: f64,
        now: i64,
    ) -> Result<()> {
        let occupation_id = Self::find_or_create_occupation(conn, occupation).await?;

        StaffActiveModel {
            user_id: Set(user_id),
            occupation_id: Set(occupation_id),
            employed_at: Set(now),
            salary: Set(salary),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| SchoolSystemError::database_operation(format!("创建教职工档案失败: {e}")))?;

        Ok(())
    }

    pub(crate) async fn find_or_create_occupation<C: ConnectionTrait>(
        conn: &C,
        name: &str,
    ) -> Result<i64> {
        let existing = Occupations::find()
            .filter(occupations::Column::Name.eq(name))
            .one(conn)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询职业失败: {e}")))?;

        if let Some(occupation) = existing {
            return Ok(occupation.id);
        }

        let created = OccupationActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| SchoolSystemError::database_operation(format!("创建职业失败: {e}")))?;

        Ok(created.id)
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 分页列出用户（附带推导角色与学生班级）
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Users::find();

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::FirstName.contains(&escaped))
                    .add(Column::LastName.contains(&escaped))
                    .add(Column::Email.contains(&escaped)),
            );
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询用户总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询用户页数失败: {e}")))?;

        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询用户列表失败: {e}")))?;

        let user_ids: Vec<i64> = users.iter().map(|u| u.id).collect();

        // 批量取档案，避免逐行查询
        let staff_rows = Staff::find()
            .filter(staff::Column::UserId.is_in(user_ids.clone()))
            .find_also_related(Occupations)
            .all(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("查询教职工档案失败: {e}"))
            })?;

        let student_rows = Students::find()
            .filter(students::Column::UserId.is_in(user_ids.clone()))
            .find_also_related(Classes)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询学生档案失败: {e}")))?;

        let parent_rows = Parents::find()
            .filter(parents::Column::UserId.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询家长档案失败: {e}")))?;

        let staff_map: HashMap<i64, UserRole> = staff_rows
            .into_iter()
            .map(|(s, occupation)| {
                let role = match occupation.as_ref().map(|o| o.name.as_str()) {
                    Some(UserRole::ADMIN) => UserRole::Admin,
                    Some(UserRole::TEACHER) => UserRole::Teacher,
                    _ => UserRole::Staff,
                };
                (s.user_id, role)
            })
            .collect();

        let student_map: HashMap<i64, (i64, Option<String>)> = student_rows
            .into_iter()
            .map(|(s, class)| (s.user_id, (s.id, class.map(|c| c.name))))
            .collect();

        let parent_set: std::collections::HashSet<i64> =
            parent_rows.into_iter().map(|p| p.user_id).collect();

        let items = users
            .into_iter()
            .map(|m| {
                let user_id = m.id;
                let (role, student_id, class_name) =
                    if let Some(role) = staff_map.get(&user_id) {
                        (Some(role.clone()), None, None)
                    } else if let Some((student_id, class_name)) = student_map.get(&user_id) {
                        (
                            Some(UserRole::Student),
                            Some(*student_id),
                            class_name.clone(),
                        )
                    } else if parent_set.contains(&user_id) {
                        (Some(UserRole::Parent), None, None)
                    } else {
                        (None, None, None)
                    };

                UserListItem {
                    user: m.into_user(),
                    role,
                    student_id,
                    class_name,
                }
            })
            .collect();

        Ok(UserListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新用户信息
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        // 先检查用户是否存在
        let existing = self.get_user_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(first_name) = update.first_name {
            model.first_name = Set(first_name);
        }

        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name);
        }

        if let Some(email) = update.email {
            model.email = Set(email);
        }

        if let Some(pesel) = update.pesel {
            model.pesel = Set(pesel);
        }

        if let Some(password_hash) = update.password {
            model.password_hash = Set(password_hash);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("更新用户失败: {e}")))?;

        self.get_user_by_id_impl(id).await
    }

    /// 级联删除用户（事务）
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await.map_err(|e| {
            SchoolSystemError::database_operation(format!("开启事务失败: {e}"))
        })?;

        // 教职工档案：解除课程与课次、班主任关联
        if let Some(staff_row) = Staff::find()
            .filter(staff::Column::UserId.eq(id))
            .one(&txn)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("查询教职工档案失败: {e}"))
            })?
        {
            TeacherCourses::delete_many()
                .filter(crate::entity::teacher_courses::Column::StaffId.eq(staff_row.id))
                .exec(&txn)
                .await
                .map_err(|e| {
                    SchoolSystemError::database_operation(format!("删除授课关联失败: {e}"))
                })?;

            Lessons::update_many()
                .col_expr(
                    crate::entity::lessons::Column::TeacherId,
                    sea_orm::sea_query::Expr::value(Option::<i64>::None),
                )
                .filter(crate::entity::lessons::Column::TeacherId.eq(staff_row.id))
                .exec(&txn)
                .await
                .map_err(|e| {
                    SchoolSystemError::database_operation(format!("解除课次教师失败: {e}"))
                })?;

            Classes::update_many()
                .col_expr(
                    classes::Column::MainTeacherId,
                    sea_orm::sea_query::Expr::value(Option::<i64>::None),
                )
                .filter(classes::Column::MainTeacherId.eq(staff_row.id))
                .exec(&txn)
                .await
                .map_err(|e| {
                    SchoolSystemError::database_operation(format!("解除班主任失败: {e}"))
                })?;

            Staff::delete_by_id(staff_row.id)
                .exec(&txn)
                .await
                .map_err(|e| {
                    SchoolSystemError::database_operation(format!("删除教职工档案失败: {e}"))
                })?;
        }

        // 学生档案：成绩、缺勤、奖学金、家长关联
        if let Some(student_row) = Students::find()
            .filter(students::Column::UserId.eq(id))
            .one(&txn)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询学生档案失败: {e}")))?
        {
            Grades::delete_many()
                .filter(crate::entity::grades::Column::StudentId.eq(student_row.id))
                .exec(&txn)
                .await
                .map_err(|e| SchoolSystemError::database_operation(format!("删除成绩失败: {e}")))?;

            Absences::delete_many()
                .filter(crate::entity::absences::Column::StudentId.eq(student_row.id))
                .exec(&txn)
                .await
                .map_err(|e| {
                    SchoolSystemError::database_operation(format!("删除缺勤记录失败: {e}"))
                })?;

            Scholarships::delete_many()
                .filter(crate::entity::scholarships::Column::StudentId.eq(student_row.id))
                .exec(&txn)
                .await
                .map_err(|e| {
                    SchoolSystemError::database_operation(format!("删除奖学金失败: {e}"))
                })?;

            ParentStudents::delete_many()
                .filter(parent_students::Column::StudentId.eq(student_row.id))
                .exec(&txn)
                .await
                .map_err(|e| {
                    SchoolSystemError::database_operation(format!("删除家长关联失败: {e}"))
                })?;

            Students::delete_by_id(student_row.id)
                .exec(&txn)
                .await
                .map_err(|e| {
                    SchoolSystemError::database_operation(format!("删除学生档案失败: {e}"))
                })?;
        }

        // 家长档案
        if let Some(parent_row) = Parents::find()
            .filter(parents::Column::UserId.eq(id))
            .one(&txn)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询家长档案失败: {e}")))?
        {
            ParentStudents::delete_many()
                .filter(parent_students::Column::ParentId.eq(parent_row.id))
                .exec(&txn)
                .await
                .map_err(|e| {
                    SchoolSystemError::database_operation(format!("删除家长关联失败: {e}"))
                })?;

            Parents::delete_by_id(parent_row.id)
                .exec(&txn)
                .await
                .map_err(|e| {
                    SchoolSystemError::database_operation(format!("删除家长档案失败: {e}"))
                })?;
        }

        // 该用户发布的公告
        Announcements::delete_many()
            .filter(crate::entity::announcements::Column::AuthorId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除公告失败: {e}")))?;

        let result = Users::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除用户失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 将学生分配到班级
    pub async fn assign_student_class_impl(&self, user_id: i64, class_id: i64) -> Result<bool> {
        let student_row = Students::find()
            .filter(students::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询学生档案失败: {e}")))?;

        let Some(student_row) = student_row else {
            return Ok(false);
        };

        let class_exists = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询班级失败: {e}")))?;

        if class_exists.is_none() {
            return Ok(false);
        }

        StudentActiveModel {
            id: Set(student_row.id),
            class_id: Set(Some(class_id)),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| SchoolSystemError::database_operation(format!("学生分班失败: {e}")))?;

        Ok(true)
    }

    /// 推导用户的角色档案（staff -> student -> parent）
    pub async fn get_role_profile_impl(&self, user_id: i64) -> Result<Option<RoleProfile>> {
        if let Some((staff_row, occupation)) = Staff::find()
            .filter(staff::Column::UserId.eq(user_id))
            .find_also_related(Occupations)
            .one(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("查询教职工档案失败: {e}"))
            })?
        {
            let role = match occupation.as_ref().map(|o| o.name.as_str()) {
                Some(UserRole::ADMIN) => UserRole::Admin,
                Some(UserRole::TEACHER) => UserRole::Teacher,
                _ => UserRole::Staff,
            };
            return Ok(Some(RoleProfile {
                role,
                student_id: None,
                staff_id: Some(staff_row.id),
                parent_id: None,
                class_id: None,
            }));
        }

        if let Some(student_row) = Students::find()
            .filter(students::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询学生档案失败: {e}")))?
        {
            return Ok(Some(RoleProfile {
                role: UserRole::Student,
                student_id: Some(student_row.id),
                staff_id: None,
                parent_id: None,
                class_id: student_row.class_id,
            }));
        }

        if let Some(parent_row) = Parents::find()
            .filter(parents::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询家长档案失败: {e}")))?
        {
            return Ok(Some(RoleProfile {
                role: UserRole::Parent,
                student_id: None,
                staff_id: None,
                parent_id: Some(parent_row.id),
                class_id: None,
            }));
        }

        Ok(None)
    }

    /// 统计用户数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        let count = Users::find()
            .count(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("统计用户数量失败: {e}")))?;

        Ok(count)
    }
}
