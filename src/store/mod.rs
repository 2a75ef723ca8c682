pub mod attendance_store;
pub mod user_store;

pub use attendance_store::AttendanceStore;
pub use user_store::UserStore;
