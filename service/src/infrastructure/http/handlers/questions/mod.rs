use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use qanda_common::QuestionId;

use crate::domain::AppState;
use crate::domain::error::DomainError;
use crate::domain::question::filter::FilterParams;
use crate::domain::question::operations::{
    create_question, delete_question, get_question, list_questions, update_question,
};
use crate::domain::question::{QuestionChanges, QuestionDraft};
use crate::infrastructure::http::api::{ApiError, ApiSuccess};
use crate::infrastructure::http::auth::AuthenticatedUser;
use crate::infrastructure::http::handlers::questions::dto::{
    CreateQuestionRequest, MessageResponse, QuestionResponse, UpdateQuestionRequest,
};
use crate::infrastructure::http::querystring::QueryString;

pub mod dto;

pub async fn post_question<S: AppState>(
    State(state): State<S>,
    AuthenticatedUser(user): AuthenticatedUser,
    payload: Result<Json<CreateQuestionRequest>, JsonRejection>,
) -> Result<ApiSuccess<QuestionResponse>, ApiError> {
    let Json(request) = payload?;
    let draft = QuestionDraft::try_from(request).map_err(DomainError::from)?;

    create_question(state.questions(), &user.id, draft)
        .await
        .map_err(ApiError::from)
        .map(|question| ApiSuccess::new(StatusCode::CREATED, QuestionResponse::from(question)))
}

pub async fn find_questions<S: AppState>(
    State(state): State<S>,
    QueryString(params): QueryString<FilterParams>,
) -> Result<ApiSuccess<Vec<QuestionResponse>>, ApiError> {
    let questions = list_questions(state.questions(), &params).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        questions.into_iter().map(QuestionResponse::from).collect(),
    ))
}

pub async fn find_question_by_id<S: AppState>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<QuestionResponse>, ApiError> {
    let id = question_id(&id)?;

    get_question(state.questions(), id)
        .await
        .map_err(ApiError::from)
        .map(|question| ApiSuccess::new(StatusCode::OK, QuestionResponse::from(question)))
}

pub async fn put_question<S: AppState>(
    State(state): State<S>,
    Path(id): Path<String>,
    AuthenticatedUser(user): AuthenticatedUser,
    payload: Result<Json<UpdateQuestionRequest>, JsonRejection>,
) -> Result<ApiSuccess<QuestionResponse>, ApiError> {
    let Json(request) = payload?;
    let changes = QuestionChanges::try_from(request).map_err(DomainError::from)?;
    let id = question_id(&id)?;

    update_question(state.questions(), &user.id, id, changes)
        .await
        .map_err(ApiError::from)
        .map(|question| ApiSuccess::new(StatusCode::OK, QuestionResponse::from(question)))
}

pub async fn remove_question<S: AppState>(
    State(state): State<S>,
    Path(id): Path<String>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<ApiSuccess<MessageResponse>, ApiError> {
    let id = question_id(&id)?;
    delete_question(state.questions(), &user.id, id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageResponse {
            message: "Question deleted successfully",
        },
    ))
}

/// An id that can't name any question is a 404, same as an unknown one
pub(crate) fn question_id(value: &str) -> Result<QuestionId, ApiError> {
    QuestionId::parse(value).map_err(|err| {
        tracing::debug!("{}", err);
        ApiError::from(DomainError::NotFound)
    })
}
