use chrono::{DateTime, Utc};
use qanda_common::{AnswerBody, AnswerBodyError, AnswerId, QuestionId, UserId};

use crate::domain::{
    error::{DomainError, ValidationError},
    question::{Author, operations::get_question},
    repository::{AnswerRepository, QuestionRepository},
};

/// An answer posted to a question
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub id: AnswerId,
    pub question_id: QuestionId,
    pub body: AnswerBody,
    pub author: Author,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAnswer {
    pub question_id: QuestionId,
    pub body: AnswerBody,
    pub author_id: UserId,
}

/// Answer as submitted, not yet validated
#[derive(Debug, Clone, Default)]
pub struct AnswerDraft {
    pub question_id: Option<String>,
    pub body: Option<String>,
}

impl AnswerDraft {
    pub fn validate(self, author_id: UserId) -> Result<NewAnswer, ValidationError> {
        let question_id = self
            .question_id
            .as_deref()
            .and_then(|id| QuestionId::parse(id).ok())
            .ok_or(ValidationError::QuestionIdMissing)?;
        let body = AnswerBody::try_new(self.body.unwrap_or_default()).map_err(|err| match err {
            AnswerBodyError::LenCharMaxViolated => ValidationError::AnswerBodyTooLong,
            _ => ValidationError::AnswerBodyMissing,
        })?;

        Ok(NewAnswer {
            question_id,
            body,
            author_id,
        })
    }
}

/// Stores an answer to an existing question
pub async fn post_answer<Q, A>(
    questions: &Q,
    answers: &A,
    actor: &UserId,
    draft: AnswerDraft,
) -> Result<Answer, DomainError>
where
    Q: QuestionRepository,
    A: AnswerRepository,
{
    let new_answer = draft.validate(*actor)?;
    let question = get_question(questions, new_answer.question_id).await?;

    let answer = answers.insert(new_answer).await?;
    tracing::info!(answer_id = %answer.id, question_id = %question.id, "answer posted");
    Ok(answer)
}

/// Answers of one question, oldest first
pub async fn list_answers<Q, A>(
    questions: &Q,
    answers: &A,
    question_id: QuestionId,
) -> Result<Vec<Answer>, DomainError>
where
    Q: QuestionRepository,
    A: AnswerRepository,
{
    let question = get_question(questions, question_id).await?;
    Ok(answers.find_by_question(question.id).await?)
}
