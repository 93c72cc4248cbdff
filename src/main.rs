use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use usersvc::{Config, Server, users};

#[tokio::main]
async fn main() -> Result<(), usersvc::Error> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // One pool for the whole process, shared by every request.
    let store = users::SqlUserStore::connect(&config.database_url, config.max_connections).await?;
    store.init_schema().await?;
    info!(max_connections = config.max_connections, "database ready");

    Server::bind(config.socket_addr())
        .await?
        .serve(users::routes(Arc::new(store)))
        .await
}
