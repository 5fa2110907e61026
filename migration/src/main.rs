use qanda_common::database;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    domain::migration::Migration,
    infrastructure::{persistence::PersistenceAdapter, settings::Settings},
};

pub mod domain;
pub mod infrastructure;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    tracing::info!("Configuration loaded");

    let database = database::connect(&settings.database).await?;
    tracing::info!(schema = database.database_schema(), "Connected to DB");
    let persistence = PersistenceAdapter::new(database);

    // create the tables the service needs
    let migration = Migration::new(persistence);
    let created = migration.migrate().await?;
    tracing::info!("Database migrated, {} tables created", created);

    Ok(())
}
