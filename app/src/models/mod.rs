pub mod chase_log;
pub mod task;
pub mod user;
