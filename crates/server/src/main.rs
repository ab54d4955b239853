use std::net::SocketAddr;

use db::DBService;
use server::{AppState, app, config::Config};
use services::services::{email::EmailService, storage::StorageService};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let db = DBService::new(&config.database_url).await?;
    let email = EmailService::new(config.email.clone());
    let storage = StorageService::new(config.storage.clone());

    if !email.is_enabled() {
        info!("email endpoint not configured, outbound mail disabled");
    }
    if !storage.is_enabled() {
        info!("object storage not configured, uploads disabled");
    }

    let state = AppState::new(db, email, storage);
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {addr}");
    axum::serve(listener, app(state)).await?;
    Ok(())
}
