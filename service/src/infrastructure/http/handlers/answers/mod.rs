use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::domain::AppState;
use crate::domain::answer::{AnswerDraft, list_answers, post_answer};
use crate::infrastructure::http::api::{ApiError, ApiSuccess};
use crate::infrastructure::http::auth::AuthenticatedUser;
use crate::infrastructure::http::handlers::answers::dto::{AnswerResponse, PostAnswerRequest};
use crate::infrastructure::http::handlers::questions::question_id;

pub mod dto;

pub async fn create_answer<S: AppState>(
    State(state): State<S>,
    AuthenticatedUser(user): AuthenticatedUser,
    payload: Result<Json<PostAnswerRequest>, JsonRejection>,
) -> Result<ApiSuccess<AnswerResponse>, ApiError> {
    let Json(request) = payload?;

    post_answer(
        state.questions(),
        state.answers(),
        &user.id,
        AnswerDraft::from(request),
    )
    .await
    .map_err(ApiError::from)
    .map(|answer| ApiSuccess::new(StatusCode::CREATED, AnswerResponse::from(answer)))
}

pub async fn find_answers<S: AppState>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<Vec<AnswerResponse>>, ApiError> {
    let id = question_id(&id)?;
    let answers = list_answers(state.questions(), state.answers(), id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        answers.into_iter().map(AnswerResponse::from).collect(),
    ))
}
