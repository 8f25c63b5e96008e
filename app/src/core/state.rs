use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{config::config::Config, services::notifier::Notify};

#[derive(Clone)]
pub struct AppState {
    pub database: DatabaseConnection,
    pub config: Config,
    pub notifier: Arc<dyn Notify>,
}
