use qanda_common::UserId;

use crate::domain::error::{DomainError, MutatingAction};

/// Outcome of the ownership check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Authorized,
    Forbidden,
}

/// The single rule guarding update and delete: only the author may mutate.
/// Both ids are canonical [`UserId`] values, so this is a value comparison.
pub fn authorize(actor: &UserId, owner: &UserId) -> Authorization {
    if actor == owner {
        Authorization::Authorized
    } else {
        Authorization::Forbidden
    }
}

impl Authorization {
    pub fn require(self, action: MutatingAction) -> Result<(), DomainError> {
        match self {
            Authorization::Authorized => Ok(()),
            Authorization::Forbidden => Err(DomainError::Forbidden(action)),
        }
    }
}
