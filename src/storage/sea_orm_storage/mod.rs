//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod announcements;
mod catalog;
mod classes;
mod courses;
mod dashboard;
mod grades;
mod lessons;
mod parents;
mod scholarships;
mod users;

use crate::config::AppConfig;
use crate::errors::{Result, SchoolSystemError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SchoolSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    announcements::{
        entities::Announcement, requests::CreateAnnouncementRequest, responses::AnnouncementEntry,
    },
    catalog::responses::{RoomRef, SubjectRef, TeacherRef},
    classes::{
        entities::Class,
        requests::CreateClassRequest,
        responses::{ClassDetail, ClassSummary, StudentClassInfo, TeacherClass},
    },
    courses::{
        entities::Course,
        requests::CreateCourseRequest,
        responses::{CourseOverview, CourseStudentsResponse, CourseSummary, StudentCourse},
    },
    dashboard::responses::{AdminStats, NextLesson},
    grades::{
        entities::Grade,
        requests::{CreateGradeRequest, UpdateGradeRequest},
        responses::GradeEntry,
    },
    lessons::{
        entities::Lesson,
        requests::{CreateLessonRequest, RegisterEntry},
        responses::{LessonRegister, LessonSummary, ScheduleEntry, TeacherScheduleEntry},
    },
    scholarships::{
        entities::{Scholarship, ScholarshipType},
        responses::{ActiveScholarship, ScholarshipGrant},
    },
    users::{
        entities::{RoleProfile, User},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::{ChildRef, UserListResponse},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user_with_role(
        &self,
        user: CreateUserRequest,
        password_hash: String,
    ) -> Result<User> {
        self.create_user_with_role_impl(user, password_hash).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn assign_student_class(&self, user_id: i64, class_id: i64) -> Result<bool> {
        self.assign_student_class_impl(user_id, class_id).await
    }

    async fn get_role_profile(&self, user_id: i64) -> Result<Option<RoleProfile>> {
        self.get_role_profile_impl(user_id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 班级模块
    async fn list_classes(&self) -> Result<Vec<ClassSummary>> {
        self.list_classes_impl().await
    }

    async fn create_class(&self, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn delete_class(&self, class_id: i64) -> Result<bool> {
        self.delete_class_impl(class_id).await
    }

    async fn list_staff_classes(&self, staff_id: i64) -> Result<Vec<TeacherClass>> {
        self.list_staff_classes_impl(staff_id).await
    }

    async fn get_class_detail(&self, class_id: i64) -> Result<Option<ClassDetail>> {
        self.get_class_detail_impl(class_id).await
    }

    async fn get_student_class_info(&self, class_id: i64) -> Result<Option<StudentClassInfo>> {
        self.get_student_class_info_impl(class_id).await
    }

    async fn list_subjects(&self) -> Result<Vec<SubjectRef>> {
        self.list_subjects_impl().await
    }

    async fn list_teachers(&self) -> Result<Vec<TeacherRef>> {
        self.list_teachers_impl().await
    }

    async fn list_rooms(&self) -> Result<Vec<RoomRef>> {
        self.list_rooms_impl().await
    }

    // 课程模块
    async fn list_courses(&self) -> Result<Vec<CourseSummary>> {
        self.list_courses_impl().await
    }

    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn delete_course(&self, course_id: i64) -> Result<bool> {
        self.delete_course_impl(course_id).await
    }

    async fn list_student_courses(
        &self,
        student_id: i64,
        class_id: i64,
        year_start: i64,
    ) -> Result<Vec<StudentCourse>> {
        self.list_student_courses_impl(student_id, class_id, year_start)
            .await
    }

    async fn get_course_overview(
        &self,
        course_id: i64,
        student_id: i64,
        year_start: i64,
    ) -> Result<Option<CourseOverview>> {
        self.get_course_overview_impl(course_id, student_id, year_start)
            .await
    }

    async fn list_course_students(&self, course_id: i64) -> Result<Option<CourseStudentsResponse>> {
        self.list_course_students_impl(course_id).await
    }

    // 课次模块
    async fn list_lessons(&self) -> Result<Vec<LessonSummary>> {
        self.list_lessons_impl().await
    }

    async fn create_lesson(&self, lesson: CreateLessonRequest) -> Result<Lesson> {
        self.create_lesson_impl(lesson).await
    }

    async fn delete_lesson(&self, lesson_id: i64) -> Result<bool> {
        self.delete_lesson_impl(lesson_id).await
    }

    async fn get_lesson_by_id(&self, lesson_id: i64) -> Result<Option<Lesson>> {
        self.get_lesson_by_id_impl(lesson_id).await
    }

    async fn list_class_schedule(
        &self,
        class_id: i64,
        student_id: i64,
        from: i64,
        future_only: bool,
    ) -> Result<Vec<ScheduleEntry>> {
        self.list_class_schedule_impl(class_id, student_id, from, future_only)
            .await
    }

    async fn list_teaching_schedule(
        &self,
        staff_id: i64,
        from: i64,
    ) -> Result<Vec<TeacherScheduleEntry>> {
        self.list_teaching_schedule_impl(staff_id, from).await
    }

    async fn get_lesson_register(&self, lesson_id: i64) -> Result<Option<LessonRegister>> {
        self.get_lesson_register_impl(lesson_id).await
    }

    async fn save_lesson_register(
        &self,
        lesson_id: i64,
        entries: Vec<RegisterEntry>,
    ) -> Result<bool> {
        self.save_lesson_register_impl(lesson_id, entries).await
    }

    // 成绩模块
    async fn list_student_grades(
        &self,
        student_id: i64,
        since: Option<i64>,
        limit: Option<u64>,
    ) -> Result<Vec<GradeEntry>> {
        self.list_student_grades_impl(student_id, since, limit)
            .await
    }

    async fn create_grade(&self, course_id: i64, req: CreateGradeRequest) -> Result<Grade> {
        self.create_grade_impl(course_id, req).await
    }

    async fn update_grade(
        &self,
        grade_id: i64,
        update: UpdateGradeRequest,
    ) -> Result<Option<Grade>> {
        self.update_grade_impl(grade_id, update).await
    }

    async fn delete_grade(&self, grade_id: i64) -> Result<bool> {
        self.delete_grade_impl(grade_id).await
    }

    // 出勤模块
    async fn attendance_counts(
        &self,
        class_id: i64,
        student_id: i64,
        from: i64,
        to: i64,
    ) -> Result<(i64, i64)> {
        self.attendance_counts_impl(class_id, student_id, from, to)
            .await
    }

    // 奖学金模块
    async fn list_scholarship_types(&self) -> Result<Vec<ScholarshipType>> {
        self.list_scholarship_types_impl().await
    }

    async fn get_scholarship_type(&self, type_id: i64) -> Result<Option<ScholarshipType>> {
        self.get_scholarship_type_impl(type_id).await
    }

    async fn list_student_scholarships(&self, student_id: i64) -> Result<Vec<ActiveScholarship>> {
        self.list_student_scholarships_impl(student_id).await
    }

    async fn list_scholarships(&self) -> Result<Vec<ScholarshipGrant>> {
        self.list_scholarships_impl().await
    }

    async fn create_scholarship(
        &self,
        student_id: i64,
        scholarship_type_id: i64,
        amount: f64,
        start_date: i64,
    ) -> Result<Scholarship> {
        self.create_scholarship_impl(student_id, scholarship_type_id, amount, start_date)
            .await
    }

    async fn delete_scholarship(&self, scholarship_id: i64) -> Result<bool> {
        self.delete_scholarship_impl(scholarship_id).await
    }

    // 公告模块
    async fn list_announcements(
        &self,
        class_id: Option<i64>,
        limit: u64,
    ) -> Result<Vec<AnnouncementEntry>> {
        self.list_announcements_impl(class_id, limit).await
    }

    async fn create_announcement(
        &self,
        author_id: i64,
        req: CreateAnnouncementRequest,
    ) -> Result<Announcement> {
        self.create_announcement_impl(author_id, req).await
    }

    // 家长模块
    async fn list_children(&self, parent_id: i64) -> Result<Vec<ChildRef>> {
        self.list_children_impl(parent_id).await
    }

    // 仪表盘与系统模块
    async fn next_class_lesson(&self, class_id: i64, now: i64) -> Result<Option<NextLesson>> {
        self.next_class_lesson_impl(class_id, now).await
    }

    async fn next_teaching_lesson(&self, staff_id: i64, now: i64) -> Result<Option<NextLesson>> {
        self.next_teaching_lesson_impl(staff_id, now).await
    }

    async fn admin_stats(&self, day_start: i64, day_end: i64) -> Result<AdminStats> {
        self.admin_stats_impl(day_start, day_end).await
    }

    async fn ping(&self) -> Result<()> {
        self.ping_impl().await
    }
}
