use crate::domain::AppState;
use crate::infrastructure::persistence::{
    PersistenceAdapter, PostgresAnswerRepository, PostgresAuthenticator,
    PostgresQuestionRepository,
};

pub mod http;
pub mod persistence;
pub mod settings;

#[derive(Clone, Debug)]
pub struct AppStateImpl {
    questions: PostgresQuestionRepository,
    answers: PostgresAnswerRepository,
    authenticator: PostgresAuthenticator,
}

impl AppStateImpl {
    pub fn new(persistence: PersistenceAdapter) -> Self {
        Self {
            questions: persistence.questions(),
            answers: persistence.answers(),
            authenticator: persistence.authenticator(),
        }
    }
}

impl AppState for AppStateImpl {
    type Q = PostgresQuestionRepository;
    type A = PostgresAnswerRepository;
    type U = PostgresAuthenticator;

    fn questions(&self) -> &Self::Q {
        &self.questions
    }

    fn answers(&self) -> &Self::A {
        &self.answers
    }

    fn authenticator(&self) -> &Self::U {
        &self.authenticator
    }
}
