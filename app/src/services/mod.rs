pub mod chase;
pub mod notifier;
