use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub mod answer;
pub mod question;

pub use answer::*;
pub use question::*;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a valid identifier")]
pub struct InvalidIdError(pub String);

/// Declares a UUID backed identifier.
///
/// Identifiers are compared by value. Parsing from text goes through [`Uuid`],
/// so `"A1B2..."` and `"a1b2..."` (or the braced/urn forms) are the same id.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new_random() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn parse(value: &str) -> Result<Self, InvalidIdError> {
                Uuid::parse_str(value.trim())
                    .map(Self)
                    .map_err(|_| InvalidIdError(value.to_string()))
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl FromStr for $name {
            type Err = InvalidIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

uuid_id!(
    /// Identity of a registered user, the acting identity of authenticated requests
    UserId
);

uuid_id!(
    /// Identity of a question
    QuestionId
);

uuid_id!(
    /// Identity of an answer
    AnswerId
);
