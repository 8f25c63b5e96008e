use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Result;
use chaser::{
    config::config::Config, core::server::create_server, services::notifier::WebhookNotifier,
};
use dotenvy::dotenv;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    dotenv().ok();

    let config = Config::load_envs().expect("Failed to load envs");

    let port: u16 = config.port;
    let server_ip: IpAddr = config
        .server_ip
        .parse()
        .unwrap_or(IpAddr::from([0, 0, 0, 0]));
    let addr = SocketAddr::new(server_ip, port);

    let notifier = Arc::new(WebhookNotifier::new(config.webhook_url.clone()));
    let (server, _db_conn) = create_server(config, notifier).await?;

    let server = axum_server::bind(addr).serve(server.into_make_service());
    info!("Server starting on {}", addr);

    if let Err(e) = server.await {
        error!("Server failed: {}", e);
    }

    Ok(())
}
