use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use sea_orm::DatabaseConnection;

use crate::{
    config::config::Config,
    core::state::AppState,
    database::{
        connect::{connect_database, run_migrations},
        seed::seed_default_users,
    },
    routes::create_routers,
    services::notifier::Notify,
};

pub async fn create_server(
    config: Config,
    notifier: Arc<dyn Notify>,
) -> Result<(Router<()>, DatabaseConnection)> {
    let db_conn = connect_database(config.clone()).await?;
    run_migrations(&db_conn).await?;
    seed_default_users(&db_conn).await?;

    let state = AppState {
        database: db_conn.clone(),
        config,
        notifier,
    };

    let app = create_routers(Arc::new(state));

    Ok((app, db_conn))
}
