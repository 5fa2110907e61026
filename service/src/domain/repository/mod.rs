use std::future::Future;

use qanda_common::QuestionId;
use thiserror::Error;

use crate::domain::{
    answer::{Answer, NewAnswer},
    question::{NewQuestion, Question},
    repository::query::QuestionQuery,
};

pub mod query;

pub trait QuestionRepository: Clone + Send + Sync + 'static {
    /// Store a new question, returns it with assigned id and creation time
    fn insert(
        &self,
        question: NewQuestion,
    ) -> impl Future<Output = Result<Question, RepositoryError>> + Send;

    /// Find questions matching query, in the order the query asks for
    fn find(
        &self,
        query: QuestionQuery,
    ) -> impl Future<Output = Result<Vec<Question>, RepositoryError>> + Send;

    /// Find single question by ID
    fn find_by_id(
        &self,
        id: QuestionId,
    ) -> impl Future<Output = Result<Option<Question>, RepositoryError>> + Send;

    /// Replace title, body, tags and status of a stored question.
    /// Only the row owned by `question.author` is touched.
    fn update(
        &self,
        question: &Question,
    ) -> impl Future<Output = Result<Question, RepositoryError>> + Send;

    /// Permanently remove a question owned by `question.author`
    fn delete(
        &self,
        question: &Question,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

pub trait AnswerRepository: Clone + Send + Sync + 'static {
    /// Store a new answer
    fn insert(
        &self,
        answer: NewAnswer,
    ) -> impl Future<Output = Result<Answer, RepositoryError>> + Send;

    /// Answers to one question, oldest first
    fn find_by_question(
        &self,
        question_id: QuestionId,
    ) -> impl Future<Output = Result<Vec<Answer>, RepositoryError>> + Send;
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("database error: {0}")]
    DatabaseError(String),
}
