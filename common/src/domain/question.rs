use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::LazyLock;

use nutype::nutype;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const TITLE_MIN_CHARS: usize = 5;
pub const TITLE_MAX_CHARS: usize = 300;
pub const BODY_MIN_CHARS: usize = 20;
pub const BODY_MAX_CHARS: usize = 30_000;
pub const TAG_MAX_CHARS: usize = 32;
pub const MAX_TAGS: usize = 10;

// Tags are short labels: lowercase ASCII letters, digits and a few symbols
// that show up in technology names ("c++", "c#", ".net", "node-js").
pub const TAG_SYMBOLS_REGEX: &str = r"^[a-z0-9_.+#-]+$";

static TAG_SYMBOLS_REGEX_COMPILED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(TAG_SYMBOLS_REGEX).expect("TAG_SYMBOLS_REGEX must be a valid regex")
});

pub fn is_eligible_tag(tag: &str) -> bool {
    TAG_SYMBOLS_REGEX_COMPILED.is_match(tag)
}

#[nutype(
    sanitize(trim),
    validate(len_char_min = 5, len_char_max = 300),
    derive(Clone, Debug, Display, AsRef, PartialEq, Eq, Serialize)
)]
pub struct QuestionTitle(String);

#[nutype(
    sanitize(trim),
    validate(len_char_min = 20, len_char_max = 30000),
    derive(Clone, Debug, Display, AsRef, PartialEq, Eq, Serialize)
)]
pub struct QuestionBody(String);

#[nutype(
    sanitize(trim, lowercase),
    validate(not_empty, len_char_max = 32, predicate = is_eligible_tag),
    derive(
        Clone,
        Debug,
        Display,
        AsRef,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        Serialize
    )
)]
pub struct Tag(String);

/// Lifecycle state of a question
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    #[default]
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown question status '{0}'")]
pub struct UnknownStatusError(pub String);

impl QuestionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionStatus::Open => "open",
            QuestionStatus::Closed => "closed",
        }
    }
}

impl FromStr for QuestionStatus {
    type Err = UnknownStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(QuestionStatus::Open),
            "closed" => Ok(QuestionStatus::Closed),
            _ => Err(UnknownStatusError(s.to_string())),
        }
    }
}

impl Display for QuestionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
