//! In-process user directory.

use std::collections::HashSet;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use clubhub_core::result::AppResult;
use clubhub_core::traits::UserDirectory;

/// User directory backed by an in-memory set of IDs.
///
/// Intended for tests and single-process wiring; production deployments
/// implement [`UserDirectory`] against the real user store.
#[derive(Debug, Default)]
pub struct StaticUserDirectory {
    users: RwLock<HashSet<Uuid>>,
}

impl StaticUserDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory pre-populated with the given user IDs.
    pub fn with_users(users: impl IntoIterator<Item = Uuid>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().collect()),
        }
    }

    /// Register a user ID.
    pub fn add(&self, user_id: Uuid) {
        self.users
            .write()
            .expect("user directory lock poisoned")
            .insert(user_id);
    }

    /// Remove a user ID.
    pub fn remove(&self, user_id: Uuid) {
        self.users
            .write()
            .expect("user directory lock poisoned")
            .remove(&user_id);
    }
}

#[async_trait]
impl UserDirectory for StaticUserDirectory {
    async fn user_exists(&self, user_id: Uuid) -> AppResult<bool> {
        Ok(self
            .users
            .read()
            .expect("user directory lock poisoned")
            .contains(&user_id))
    }
}
