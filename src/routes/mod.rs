pub mod announcements;

pub mod attendance;

pub mod auth;

pub mod catalog;

pub mod classes;

pub mod courses;

pub mod dashboard;

pub mod grades;

pub mod lessons;

pub mod scholarships;

pub mod system;

pub mod users;

pub use announcements::configure_announcements_routes;
pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use catalog::configure_catalog_routes;
pub use classes::configure_classes_routes;
pub use courses::configure_courses_routes;
pub use dashboard::configure_dashboard_routes;
pub use grades::configure_grades_routes;
pub use lessons::configure_lessons_routes;
pub use scholarships::configure_scholarships_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;
