use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::answer::{Answer, AnswerDraft};
use crate::infrastructure::http::handlers::questions::dto::AuthorResponse;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostAnswerRequest {
    pub question_id: Option<String>,
    pub body: Option<String>,
}

impl From<PostAnswerRequest> for AnswerDraft {
    fn from(value: PostAnswerRequest) -> Self {
        AnswerDraft {
            question_id: value.question_id,
            body: value.body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResponse {
    pub id: String,
    pub question_id: String,
    pub body: String,
    pub author: AuthorResponse,
    pub created_at: DateTime<Utc>,
}

impl From<Answer> for AnswerResponse {
    fn from(value: Answer) -> Self {
        Self {
            id: value.id.to_string(),
            question_id: value.question_id.to_string(),
            body: value.body.into_inner(),
            author: value.author.into(),
            created_at: value.created_at,
        }
    }
}
