use qanda_common::database::Database;

use crate::domain::repository::RepositoryError;

pub mod answers;
pub mod query;
pub mod schema;
pub mod questions;
pub mod users;

pub use answers::PostgresAnswerRepository;
pub use questions::PostgresQuestionRepository;
pub use users::PostgresAuthenticator;

/// Everything the Postgres adapters need, handed out once at startup
#[derive(Clone, Copy, Debug)]
pub struct PersistenceAdapter {
    database: &'static Database,
}

impl PersistenceAdapter {
    pub fn new(database: &'static Database) -> Self {
        Self { database }
    }

    pub fn questions(&self) -> PostgresQuestionRepository {
        PostgresQuestionRepository::new(self.database)
    }

    pub fn answers(&self) -> PostgresAnswerRepository {
        PostgresAnswerRepository::new(self.database)
    }

    pub fn authenticator(&self) -> PostgresAuthenticator {
        PostgresAuthenticator::new(self.database)
    }
}

pub(crate) fn database_error(context: &str, err: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::DatabaseError(format!("{}: {}", context, err))
}
