use std::future::Future;

use qanda_common::UserId;

use crate::domain::repository::RepositoryError;

/// The acting identity resolved from request credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
}

/// Resolves a bearer token into the user it was issued to.
///
/// How tokens are issued and stored is up to the implementation; callers only
/// read the resolved identity.
pub trait Authenticator: Clone + Send + Sync + 'static {
    /// `Ok(None)` when the token is unknown
    fn authenticate(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Option<User>, RepositoryError>> + Send;
}
