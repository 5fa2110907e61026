use uuid::Uuid;

use crate::domain::{QuestionBody, QuestionTitle, Tag, UserId};

/// Fixed identity helpers, public so that other crates can reuse them in their own tests.
pub fn user_id(n: u128) -> UserId {
    UserId::from(Uuid::from_u128(n))
}

/// Builds a valid title, panicking on bad fixtures.
pub fn title(value: &str) -> QuestionTitle {
    QuestionTitle::try_new(value).unwrap_or_else(|e| panic!("invalid fixture title {value:?}: {e}"))
}

/// Builds a valid body, panicking on bad fixtures.
pub fn body(value: &str) -> QuestionBody {
    QuestionBody::try_new(value).unwrap_or_else(|e| panic!("invalid fixture body {value:?}: {e}"))
}

/// Builds a list of valid tags, panicking on bad fixtures.
pub fn tags(values: &[&str]) -> Vec<Tag> {
    values
        .iter()
        .map(|value| Tag::try_new(*value).unwrap_or_else(|e| panic!("invalid fixture tag {value:?}: {e}")))
        .collect()
}
