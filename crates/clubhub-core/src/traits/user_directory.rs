//! Inbound user-lookup boundary.

use async_trait::async_trait;
use uuid::Uuid;

use crate::result::AppResult;

/// Resolves user IDs against the external user store.
///
/// The engine does not own user accounts; it only needs to know whether
/// an ID refers to an existing user before granting membership.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Return whether a user with the given ID exists.
    async fn user_exists(&self, user_id: Uuid) -> AppResult<bool>;
}
