pub mod chase_logs;
pub mod tasks;
pub mod users;
