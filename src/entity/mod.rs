//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod absences;
pub mod announcements;
pub mod classes;
pub mod courses;
pub mod grades;
pub mod lessons;
pub mod occupations;
pub mod parent_students;
pub mod parents;
pub mod rooms;
pub mod scholarship_types;
pub mod scholarships;
pub mod staff;
pub mod students;
pub mod subjects;
pub mod teacher_courses;
pub mod users;
