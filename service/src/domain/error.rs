use std::fmt::{Display, Formatter};

use qanda_common::{
    ANSWER_BODY_MAX_CHARS, BODY_MAX_CHARS, BODY_MIN_CHARS, MAX_TAGS, TAG_MAX_CHARS,
    TITLE_MAX_CHARS, TITLE_MIN_CHARS,
};
use thiserror::Error;

use crate::domain::repository::RepositoryError;

/// A client supplied value broke one of the content rules.
/// Messages are shown to the client as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title should be at least {min} characters long.", min = TITLE_MIN_CHARS)]
    TitleTooShort,
    #[error("Title should be at most {max} characters long.", max = TITLE_MAX_CHARS)]
    TitleTooLong,
    #[error("Body should be at least {min} characters long.", min = BODY_MIN_CHARS)]
    BodyTooShort,
    #[error("Body should be at most {max} characters long.", max = BODY_MAX_CHARS)]
    BodyTooLong,
    #[error("At least one tag is required.")]
    TagsMissing,
    #[error("Tags should be a list of labels.")]
    TagsNotAList,
    #[error("Tag '{0}' should be 1 to {max} characters of letters, digits or _.+#-", max = TAG_MAX_CHARS)]
    InvalidTag(String),
    #[error("At most {max} tags are allowed.", max = MAX_TAGS)]
    TooManyTags,
    #[error("Status '{0}' is unknown, expected one of: open, closed.")]
    UnknownStatus(String),
    #[error("A valid questionId is required.")]
    QuestionIdMissing,
    #[error("Answer body is required.")]
    AnswerBodyMissing,
    #[error("Answer body should be at most {max} characters long.", max = ANSWER_BODY_MAX_CHARS)]
    AnswerBodyTooLong,
}

/// Mutations that only the author of a question may perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutatingAction {
    Update,
    Delete,
}

impl Display for MutatingAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MutatingAction::Update => f.write_str("update"),
            MutatingAction::Delete => f.write_str("delete"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("You are not authorized to {0} this question")]
    Forbidden(MutatingAction),
    #[error("Question not found")]
    NotFound,
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for DomainError {
    fn from(value: RepositoryError) -> Self {
        match value {
            // the row disappeared between read and write
            RepositoryError::NotFound => Self::NotFound,
            other => Self::Repository(other),
        }
    }
}
