//! Read path for per-user login metrics.

use std::sync::Arc;

use chrono::NaiveDateTime;
use login_counter_common::{
    parse_timestamp, UserId, UserLoginMetric, LAST_LOGIN_KEY, LOGIN_COUNT_KEY,
};

use crate::error::Result;
use crate::store::MetaStore;

/// Reads the stored login count and last login time for a user.
///
/// Malformed stored values read as defaults; only storage failures are errors.
#[derive(Clone)]
pub struct MetricsReader {
    store: Arc<dyn MetaStore>,
}

impl MetricsReader {
    pub fn new(store: Arc<dyn MetaStore>) -> Self {
        Self { store }
    }

    /// Number of recorded logins, 0 if absent or not a number.
    pub fn login_count(&self, user_id: UserId) -> Result<u64> {
        let raw = self.store.get(user_id, LOGIN_COUNT_KEY)?;
        Ok(raw.as_deref().map(parse_count).unwrap_or(0))
    }

    /// Time of the last recorded login, `None` if absent or unreadable.
    pub fn last_login_at(&self, user_id: UserId) -> Result<Option<NaiveDateTime>> {
        let Some(raw) = self.store.get(user_id, LAST_LOGIN_KEY)? else {
            return Ok(None);
        };
        let parsed = parse_timestamp(&raw);
        if parsed.is_none() && !raw.trim().is_empty() {
            tracing::debug!(
                user_id = %user_id,
                value = %raw,
                "Ignoring unreadable last login time"
            );
        }
        Ok(parsed)
    }

    pub fn metric(&self, user_id: UserId) -> Result<UserLoginMetric> {
        Ok(UserLoginMetric {
            login_count: self.login_count(user_id)?,
            last_login_at: self.last_login_at(user_id)?,
        })
    }
}

/// Integer-prefix coercion of a stored count.
///
/// Skips leading whitespace and an optional `+`, then reads the leading
/// digits. Anything without leading digits (including negatives) is 0.
fn parse_count(raw: &str) -> u64 {
    let trimmed = raw.trim_start();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if !digits.starts_with(|c: char| c.is_ascii_digit()) {
        if !trimmed.is_empty() {
            tracing::debug!(value = %raw, "Treating non-numeric login count as 0");
        }
        return 0;
    }
    digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, b| acc.saturating_mul(10).saturating_add(u64::from(b - b'0')))
}
