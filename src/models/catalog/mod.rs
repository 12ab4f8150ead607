//! 基础目录数据模型（科目、教师、教室）

pub mod responses;
