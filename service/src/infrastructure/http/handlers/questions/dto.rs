use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::error::ValidationError;
use crate::domain::question::{Author, Question, QuestionChanges, QuestionDraft};

/// Body of `POST /api/questions`.
/// `tags` stays untyped so a missing list and a non-list get different messages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateQuestionRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Value>,
}

impl TryFrom<CreateQuestionRequest> for QuestionDraft {
    type Error = ValidationError;

    fn try_from(value: CreateQuestionRequest) -> Result<Self, Self::Error> {
        Ok(QuestionDraft {
            title: value.title,
            body: value.body,
            tags: tag_list(value.tags)?,
        })
    }
}

/// Body of `PUT /api/questions/{id}`, every field optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateQuestionRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Value>,
    pub status: Option<String>,
}

impl TryFrom<UpdateQuestionRequest> for QuestionChanges {
    type Error = ValidationError;

    fn try_from(value: UpdateQuestionRequest) -> Result<Self, Self::Error> {
        Ok(QuestionChanges {
            title: value.title,
            body: value.body,
            tags: tag_list(value.tags)?,
            status: value.status,
        })
    }
}

/// `null` counts as absent, anything but a list of strings is rejected
fn tag_list(value: Option<Value>) -> Result<Option<Vec<String>>, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(tag) => Ok(tag),
                _ => Err(ValidationError::TagsNotAList),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(_) => Err(ValidationError::TagsNotAList),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorResponse {
    pub id: String,
    pub username: Option<String>,
}

impl From<Author> for AuthorResponse {
    fn from(value: Author) -> Self {
        Self {
            id: value.id.to_string(),
            username: value.username,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub id: String,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub status: String,
    pub upvotes: i64,
    pub author: AuthorResponse,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Question> for QuestionResponse {
    fn from(value: Question) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title.into_inner(),
            body: value.body.into_inner(),
            tags: value.tags.into_iter().map(|tag| tag.into_inner()).collect(),
            status: value.status.to_string(),
            upvotes: value.upvotes,
            author: value.author.into(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
