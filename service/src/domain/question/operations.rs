use qanda_common::{QuestionId, UserId};

use crate::domain::{
    error::{DomainError, MutatingAction},
    question::{
        Question, QuestionChanges, QuestionDraft,
        filter::{FilterParams, build_filter},
        ownership::authorize,
    },
    repository::{QuestionRepository, query::QuestionQuery},
};

/// Validates the draft and stores it with the actor as author
pub async fn create_question<R: QuestionRepository>(
    repository: &R,
    actor: &UserId,
    draft: QuestionDraft,
) -> Result<Question, DomainError> {
    let new_question = draft.validate(*actor)?;
    let question = repository.insert(new_question).await?;
    tracing::info!(question_id = %question.id, author_id = %actor, "question created");
    Ok(question)
}

/// Newest first. No matches is an empty list, not an error.
pub async fn list_questions<R: QuestionRepository>(
    repository: &R,
    params: &FilterParams,
) -> Result<Vec<Question>, DomainError> {
    let query = QuestionQuery::newest_first(build_filter(params));
    tracing::debug!("listing questions with {:?}", query);
    Ok(repository.find(query).await?)
}

pub async fn get_question<R: QuestionRepository>(
    repository: &R,
    id: QuestionId,
) -> Result<Question, DomainError> {
    repository
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound)
}

/// Validation and the ownership check both run before anything is written
pub async fn update_question<R: QuestionRepository>(
    repository: &R,
    actor: &UserId,
    id: QuestionId,
    changes: QuestionChanges,
) -> Result<Question, DomainError> {
    let changes = changes.validate()?;

    let mut question = get_question(repository, id).await?;
    authorize(actor, &question.author.id).require(MutatingAction::Update)?;

    question.apply(changes);
    let updated = repository.update(&question).await?;
    tracing::info!(question_id = %id, "question updated");
    Ok(updated)
}

pub async fn delete_question<R: QuestionRepository>(
    repository: &R,
    actor: &UserId,
    id: QuestionId,
) -> Result<(), DomainError> {
    let question = get_question(repository, id).await?;
    authorize(actor, &question.author.id).require(MutatingAction::Delete)?;

    repository.delete(&question).await?;
    tracing::info!(question_id = %id, "question deleted");
    Ok(())
}
