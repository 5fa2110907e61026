use chrono::{DateTime, Utc};
use qanda_common::{
    MAX_TAGS, QuestionBody, QuestionBodyError, QuestionId, QuestionStatus, QuestionTitle,
    QuestionTitleError, Tag, UserId,
};

use crate::domain::error::ValidationError;

pub mod filter;
pub mod operations;
pub mod ownership;

/// One posted question
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// Assigned by persistence at creation
    pub id: QuestionId,
    pub title: QuestionTitle,
    pub body: QuestionBody,
    /// Never empty
    pub tags: Vec<Tag>,
    pub status: QuestionStatus,
    pub upvotes: i64,
    /// Set once at creation from the acting identity
    pub author: Author,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Who wrote a piece of content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: UserId,
    /// None when the user record is gone
    pub username: Option<String>,
}

impl From<UserId> for Author {
    fn from(id: UserId) -> Self {
        Self { id, username: None }
    }
}

/// A validated question ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuestion {
    pub title: QuestionTitle,
    pub body: QuestionBody,
    pub tags: Vec<Tag>,
    pub status: QuestionStatus,
    pub author_id: UserId,
}

/// Question content as submitted for creation, not yet validated
#[derive(Debug, Clone, Default)]
pub struct QuestionDraft {
    pub title: Option<String>,
    pub body: Option<String>,
    /// `None` when no tags were sent
    pub tags: Option<Vec<String>>,
}

/// Fields submitted for an update, not yet validated.
/// Absent fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct QuestionChanges {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<String>,
}

/// Validated update, `None` means keep the stored value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidChanges {
    pub title: Option<QuestionTitle>,
    pub body: Option<QuestionBody>,
    pub tags: Option<Vec<Tag>>,
    pub status: Option<QuestionStatus>,
}

impl QuestionDraft {
    /// Applies the creation rules in order: title, body, tags
    pub fn validate(self, author_id: UserId) -> Result<NewQuestion, ValidationError> {
        let title = parse_title(self.title.unwrap_or_default())?;
        let body = parse_body(self.body.unwrap_or_default())?;
        let tags = match self.tags {
            Some(tags) => parse_tags(tags)?,
            None => return Err(ValidationError::TagsMissing),
        };

        Ok(NewQuestion {
            title,
            body,
            tags,
            status: QuestionStatus::default(),
            author_id,
        })
    }
}

impl QuestionChanges {
    /// Supplied fields follow the creation rules. An empty tag list or a
    /// blank status count as not supplied, so an update never clears tags.
    pub fn validate(self) -> Result<ValidChanges, ValidationError> {
        let title = self.title.map(parse_title).transpose()?;
        let body = self.body.map(parse_body).transpose()?;
        let tags = match self.tags {
            Some(tags) if !tags.is_empty() => Some(parse_tags(tags)?),
            _ => None,
        };
        let status = match self.status {
            Some(status) if !status.trim().is_empty() => Some(
                status
                    .parse::<QuestionStatus>()
                    .map_err(|_| ValidationError::UnknownStatus(status))?,
            ),
            _ => None,
        };

        Ok(ValidChanges {
            title,
            body,
            tags,
            status,
        })
    }
}

impl Question {
    /// Replace each supplied field, keep the rest
    pub fn apply(&mut self, changes: ValidChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(body) = changes.body {
            self.body = body;
        }
        if let Some(tags) = changes.tags {
            self.tags = tags;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
    }
}

fn parse_title(value: String) -> Result<QuestionTitle, ValidationError> {
    QuestionTitle::try_new(value).map_err(|err| match err {
        QuestionTitleError::LenCharMinViolated => ValidationError::TitleTooShort,
        _ => ValidationError::TitleTooLong,
    })
}

fn parse_body(value: String) -> Result<QuestionBody, ValidationError> {
    QuestionBody::try_new(value).map_err(|err| match err {
        QuestionBodyError::LenCharMinViolated => ValidationError::BodyTooShort,
        _ => ValidationError::BodyTooLong,
    })
}

/// Normalizes labels into a tag set, first occurrence wins
fn parse_tags(values: Vec<String>) -> Result<Vec<Tag>, ValidationError> {
    if values.is_empty() {
        return Err(ValidationError::TagsMissing);
    }

    let mut tags: Vec<Tag> = Vec::with_capacity(values.len());
    for value in values {
        let tag = Tag::try_new(value.as_str())
            .map_err(|_| ValidationError::InvalidTag(value.clone()))?;
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    if tags.len() > MAX_TAGS {
        return Err(ValidationError::TooManyTags);
    }
    Ok(tags)
}
