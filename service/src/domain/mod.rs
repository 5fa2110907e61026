use crate::domain::auth::Authenticator;
use crate::domain::repository::{AnswerRepository, QuestionRepository};

pub mod answer;
pub mod auth;
pub mod error;
pub mod question;
pub mod repository;

//// The global application state shared between all request handlers.
pub trait AppState: Clone + Send + Sync + 'static {
    type Q: QuestionRepository;
    type A: AnswerRepository;
    type U: Authenticator;
    fn questions(&self) -> &Self::Q;
    fn answers(&self) -> &Self::A;
    fn authenticator(&self) -> &Self::U;
}
