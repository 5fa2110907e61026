use qanda_common::connect_to_database;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::infrastructure::AppStateImpl;
use crate::infrastructure::http::{HttpServer, HttpServerConfig};
use crate::infrastructure::persistence::PersistenceAdapter;
use crate::infrastructure::settings::Settings;

mod domain;
mod infrastructure;
#[cfg(test)]
mod test_utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    tracing::info!("Configuration loaded");

    let database = connect_to_database(&settings.database).await?;
    tracing::info!(schema = database.database_schema(), "Connected to DB");

    let persistence = PersistenceAdapter::new(database);
    let state = AppStateImpl::new(persistence);

    let server_config = HttpServerConfig {
        port: &settings.server_port,
    };
    let http_server = HttpServer::new(state, server_config).await?;
    http_server.run().await
}
