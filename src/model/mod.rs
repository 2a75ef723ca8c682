pub mod attendance;
pub mod user;
