use qanda_common::{UserId, database::Database};
use sqlx::types::Uuid;

use crate::{
    domain::{
        auth::{Authenticator, User},
        repository::RepositoryError,
    },
    infrastructure::persistence::database_error,
};

const FIND_BY_TOKEN_SQL: &str =
    "SELECT \"id\", \"username\" FROM \"users\" WHERE \"api_token\" = $1";

/// Resolves bearer tokens against the `users` table
#[derive(Clone, Debug)]
pub struct PostgresAuthenticator {
    database: &'static Database,
}

impl PostgresAuthenticator {
    pub fn new(database: &'static Database) -> Self {
        Self { database }
    }
}

impl Authenticator for PostgresAuthenticator {
    async fn authenticate(&self, token: &str) -> Result<Option<User>, RepositoryError> {
        let row: Option<(Uuid, String)> = sqlx::query_as(FIND_BY_TOKEN_SQL)
            .bind(token)
            .fetch_optional(self.database.database_pool())
            .await
            .map_err(|e| database_error("failed to look up api token", e))?;

        Ok(row.map(|(id, username)| User {
            id: UserId::from(id),
            username,
        }))
    }
}
