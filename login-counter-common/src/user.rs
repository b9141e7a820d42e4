//! User identity and per-user login metrics.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Identifier of a host user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// The user object carried by a login event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: UserId,
}

impl UserRef {
    pub fn new(id: UserId) -> Self {
        Self { id }
    }
}

/// How many times a user logged in, and when the last time was.
///
/// Absent storage entries read as the default: zero logins, never logged in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserLoginMetric {
    pub login_count: u64,
    /// `None` when no login has been recorded (or the stored value is unreadable).
    pub last_login_at: Option<NaiveDateTime>,
}
