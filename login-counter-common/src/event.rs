//! Host events this crate reacts to.

use serde::{Deserialize, Serialize};

use crate::user::{UserId, UserRef};

/// Emitted by the host after a user account completes authentication.
///
/// Only fired for real, authenticated accounts, so the user id is trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginEvent {
    pub username: String,
    pub user: UserRef,
}

impl LoginEvent {
    pub fn new(username: impl Into<String>, user_id: UserId) -> Self {
        Self {
            username: username.into(),
            user: UserRef::new(user_id),
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user.id
    }
}
