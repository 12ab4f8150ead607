//! 预导入模块，方便使用

pub use super::absences::{
    ActiveModel as AbsenceActiveModel, Entity as Absences, Model as AbsenceModel,
};
pub use super::announcements::{
    ActiveModel as AnnouncementActiveModel, Entity as Announcements, Model as AnnouncementModel,
};
pub use super::classes::{ActiveModel as ClassActiveModel, Entity as Classes, Model as ClassModel};
pub use super::courses::{
    ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel,
};
pub use super::grades::{ActiveModel as GradeActiveModel, Entity as Grades, Model as GradeModel};
pub use super::lessons::{
    ActiveModel as LessonActiveModel, Entity as Lessons, Model as LessonModel,
};
pub use super::occupations::{
    ActiveModel as OccupationActiveModel, Entity as Occupations, Model as OccupationModel,
};
pub use super::parent_students::{
    ActiveModel as ParentStudentActiveModel, Entity as ParentStudents, Model as ParentStudentModel,
};
pub use super::parents::{
    ActiveModel as ParentActiveModel, Entity as Parents, Model as ParentModel,
};
pub use super::rooms::{ActiveModel as RoomActiveModel, Entity as Rooms, Model as RoomModel};
pub use super::scholarship_types::{
    ActiveModel as ScholarshipTypeActiveModel, Entity as ScholarshipTypes,
    Model as ScholarshipTypeModel,
};
pub use super::scholarships::{
    ActiveModel as ScholarshipActiveModel, Entity as Scholarships, Model as ScholarshipModel,
};
pub use super::staff::{ActiveModel as StaffActiveModel, Entity as Staff, Model as StaffModel};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
pub use super::teacher_courses::{
    ActiveModel as TeacherCourseActiveModel, Entity as TeacherCourses, Model as TeacherCourseModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
