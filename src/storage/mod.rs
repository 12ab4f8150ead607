use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户及其角色档案（事务）
    async fn create_user_with_role(
        &self,
        user: CreateUserRequest,
        password_hash: String,
    ) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 列出用户（分页）
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 级联删除用户及其档案、成绩、缺勤、奖学金（事务）
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 将学生分配到班级
    async fn assign_student_class(&self, user_id: i64, class_id: i64) -> Result<bool>;
    // 按 staff -> student -> parent 顺序推导角色档案
    async fn get_role_profile(&self, user_id: i64) -> Result<Option<RoleProfile>>;
    // 统计用户数量（管理员种子判定）
    async fn count_users(&self) -> Result<u64>;

    /// 班级管理方法
    // 列出全部班级及班主任
    async fn list_classes(&self) -> Result<Vec<ClassSummary>>;
    // 创建班级
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    // 删除班级
    async fn delete_class(&self, class_id: i64) -> Result<bool>;
    // 列出教职工任教或担任班主任的班级
    async fn list_staff_classes(&self, staff_id: i64) -> Result<Vec<TeacherClass>>;
    // 班级详情（名册、近期课次、公告）
    async fn get_class_detail(&self, class_id: i64) -> Result<Option<ClassDetail>>;
    // 学生视角的班级信息（班主任、班级公告）
    async fn get_student_class_info(&self, class_id: i64) -> Result<Option<StudentClassInfo>>;

    /// 基础目录方法
    // 全部科目
    async fn list_subjects(&self) -> Result<Vec<SubjectRef>>;
    // 全部教职工及姓名
    async fn list_teachers(&self) -> Result<Vec<TeacherRef>>;
    // 全部教室
    async fn list_rooms(&self) -> Result<Vec<RoomRef>>;

    /// 课程管理方法
    // 课程目录
    async fn list_courses(&self) -> Result<Vec<CourseSummary>>;
    // 创建课程并关联授课教师（事务）
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    // 删除课程及其教师关联
    async fn delete_course(&self, course_id: i64) -> Result<bool>;
    // 学生本学年课程及出勤统计
    async fn list_student_courses(
        &self,
        student_id: i64,
        class_id: i64,
        year_start: i64,
    ) -> Result<Vec<StudentCourse>>;
    // 学生视角的课程总览（成绩 + 缺勤课次）
    async fn get_course_overview(
        &self,
        course_id: i64,
        student_id: i64,
        year_start: i64,
    ) -> Result<Option<CourseOverview>>;
    // 教师视角的课程学生名册（含成绩）
    async fn list_course_students(&self, course_id: i64) -> Result<Option<CourseStudentsResponse>>;

    /// 课次管理方法
    // 最新课次列表
    async fn list_lessons(&self) -> Result<Vec<LessonSummary>>;
    // 创建课次（同班同时段冲突 -> Conflict）
    async fn create_lesson(&self, lesson: CreateLessonRequest) -> Result<Lesson>;
    // 删除课次
    async fn delete_lesson(&self, lesson_id: i64) -> Result<bool>;
    // 通过 ID 获取课次
    async fn get_lesson_by_id(&self, lesson_id: i64) -> Result<Option<Lesson>>;
    // 班级课表（学生视角，含本人缺勤标记）
    async fn list_class_schedule(
        &self,
        class_id: i64,
        student_id: i64,
        from: i64,
        future_only: bool,
    ) -> Result<Vec<ScheduleEntry>>;
    // 教师课表
    async fn list_teaching_schedule(
        &self,
        staff_id: i64,
        from: i64,
    ) -> Result<Vec<TeacherScheduleEntry>>;
    // 点名册（名册 + 出勤状态 + 本课成绩）
    async fn get_lesson_register(&self, lesson_id: i64) -> Result<Option<LessonRegister>>;
    // 保存点名册（事务：重建缺勤行，按需插入成绩）
    async fn save_lesson_register(
        &self,
        lesson_id: i64,
        entries: Vec<RegisterEntry>,
    ) -> Result<bool>;

    /// 成绩管理方法
    // 学生成绩列表（可选起始时间与条数上限）
    async fn list_student_grades(
        &self,
        student_id: i64,
        since: Option<i64>,
        limit: Option<u64>,
    ) -> Result<Vec<GradeEntry>>;
    // 添加成绩（course_id 已由上层解析）
    async fn create_grade(&self, course_id: i64, req: CreateGradeRequest) -> Result<Grade>;
    // 更新成绩
    async fn update_grade(&self, grade_id: i64, update: UpdateGradeRequest)
    -> Result<Option<Grade>>;
    // 删除成绩
    async fn delete_grade(&self, grade_id: i64) -> Result<bool>;

    /// 出勤统计方法
    // (已上课次数, 缺勤次数)
    async fn attendance_counts(
        &self,
        class_id: i64,
        student_id: i64,
        from: i64,
        to: i64,
    ) -> Result<(i64, i64)>;

    /// 奖学金管理方法
    // 全部奖学金类型
    async fn list_scholarship_types(&self) -> Result<Vec<ScholarshipType>>;
    // 通过 ID 获取奖学金类型
    async fn get_scholarship_type(&self, type_id: i64) -> Result<Option<ScholarshipType>>;
    // 学生持有的奖学金
    async fn list_student_scholarships(&self, student_id: i64) -> Result<Vec<ActiveScholarship>>;
    // 全部发放记录（管理端）
    async fn list_scholarships(&self) -> Result<Vec<ScholarshipGrant>>;
    // 发放奖学金（同类型重复 -> Conflict）
    async fn create_scholarship(
        &self,
        student_id: i64,
        scholarship_type_id: i64,
        amount: f64,
        start_date: i64,
    ) -> Result<Scholarship>;
    // 撤销奖学金
    async fn delete_scholarship(&self, scholarship_id: i64) -> Result<bool>;

    /// 公告管理方法
    // 公告列表；class_id 为 Some 时限定该班级及全校公告
    async fn list_announcements(
        &self,
        class_id: Option<i64>,
        limit: u64,
    ) -> Result<Vec<AnnouncementEntry>>;
    // 发布公告
    async fn create_announcement(
        &self,
        author_id: i64,
        req: CreateAnnouncementRequest,
    ) -> Result<Announcement>;

    /// 家长关系方法
    // 家长关联的全部孩子
    async fn list_children(&self, parent_id: i64) -> Result<Vec<ChildRef>>;

    /// 仪表盘与系统方法
    // 班级的下一节课
    async fn next_class_lesson(&self, class_id: i64, now: i64) -> Result<Option<NextLesson>>;
    // 教师的下一节课
    async fn next_teaching_lesson(&self, staff_id: i64, now: i64) -> Result<Option<NextLesson>>;
    // 管理员统计
    async fn admin_stats(&self, day_start: i64, day_end: i64) -> Result<AdminStats>;
    // 数据库连通性探测
    async fn ping(&self) -> Result<()>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
