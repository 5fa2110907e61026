use std::collections::HashSet;

use futures::TryStreamExt;
use qanda_common::database::Database;

use crate::domain::{migration::MigrationStep, persistence::Persistence};

const EXISTING_TABLES_SQL: &str = "SELECT table_name
    FROM information_schema.tables
    WHERE
      table_schema = $1
      AND table_type = 'BASE TABLE'";

#[derive(Clone)]
pub struct PersistenceAdapter {
    database: &'static Database,
}

impl PersistenceAdapter {
    pub fn new(database: &'static Database) -> Self {
        Self { database }
    }
}

impl Persistence for PersistenceAdapter {
    async fn load(&self) -> Result<HashSet<String>, anyhow::Error> {
        let mut rows = sqlx::query_scalar::<_, String>(EXISTING_TABLES_SQL)
            .bind(self.database.database_schema())
            .fetch(self.database.database_pool());

        let mut set = HashSet::new();
        while let Some(name) = rows.try_next().await? {
            set.insert(name);
        }

        tracing::debug!("found {} existing tables", set.len());
        Ok(set)
    }

    async fn apply_migration_steps(
        &self,
        steps: Vec<impl MigrationStep>,
    ) -> Result<(), anyhow::Error> {
        for step in steps {
            let ctx = step.ctx();
            let ddls = step.ddls();
            self.database.execute_in_transaction(ddls, &ctx).await?;
        }

        Ok(())
    }

    fn database_schema(&self) -> &str {
        self.database.database_schema()
    }
}
