//! Write path: count a login and stamp its time.

use std::sync::Arc;

use chrono::{NaiveDateTime, Timelike, Utc};
use login_counter_common::{format_timestamp, LoginEvent, UserId, LAST_LOGIN_KEY, LOGIN_COUNT_KEY};

use crate::config::ClockZone;
use crate::error::Result;
use crate::hooks::LoginHandler;
use crate::metrics::MetricsReader;
use crate::store::MetaStore;

/// Source of "now" for login timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Server clock, truncated to whole seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    zone: ClockZone,
}

impl SystemClock {
    pub fn new(zone: ClockZone) -> Self {
        Self { zone }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let now = self.zone.wall_clock(Utc::now());
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// Records a successful login: bumps the count, then stamps the time.
///
/// The two writes are independent upserts. Concurrent logins for the same
/// user can lose an increment, since the count is read before it is written.
pub struct LoginRecorder {
    store: Arc<dyn MetaStore>,
    reader: MetricsReader,
    clock: Arc<dyn Clock>,
}

impl LoginRecorder {
    pub fn new(store: Arc<dyn MetaStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            reader: MetricsReader::new(store.clone()),
            store,
            clock,
        }
    }

    pub fn on_login_succeeded(&self, username: &str, user_id: UserId) -> Result<()> {
        let login_count = self.reader.login_count(user_id)?.saturating_add(1);
        self.store
            .set(user_id, LOGIN_COUNT_KEY, &login_count.to_string())?;

        let now = format_timestamp(&self.clock.now());
        self.store.set(user_id, LAST_LOGIN_KEY, &now)?;

        tracing::debug!(
            user_id = %user_id,
            username = %username,
            login_count,
            last_login = %now,
            "Recorded login"
        );
        Ok(())
    }
}

impl LoginHandler for LoginRecorder {
    fn on_login(&self, event: &LoginEvent) -> Result<()> {
        self.on_login_succeeded(&event.username, event.user_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryMetaStore, MockMetaStore, StoreError};
    use crate::test_util::{at, FixedClock};
    use claim::assert_err;

    fn setup(clock: Arc<FixedClock>) -> (Arc<MemoryMetaStore>, LoginRecorder, MetricsReader) {
        let store = Arc::new(MemoryMetaStore::new());
        let recorder = LoginRecorder::new(store.clone(), clock);
        let reader = MetricsReader::new(store.clone());
        (store, recorder, reader)
    }

    #[test]
    fn test_n_serial_logins_count_n() {
        let clock = Arc::new(FixedClock::new(at("2024-01-01 00:00:00")));
        let (_, recorder, reader) = setup(clock);
        let user = UserId(3);

        for n in 1..=25u64 {
            recorder.on_login_succeeded("dave", user).unwrap();
            assert_eq!(reader.login_count(user).unwrap(), n);
        }
        assert_eq!(reader.login_count(UserId(4)).unwrap(), 0);
    }

    #[test]
    fn test_last_login_is_processing_time() {
        let clock = Arc::new(FixedClock::new(at("2024-06-30 23:59:58")));
        let (store, recorder, reader) = setup(clock.clone());
        let user = UserId(1);

        recorder.on_login_succeeded("erin", user).unwrap();
        assert_eq!(reader.last_login_at(user).unwrap(), Some(at("2024-06-30 23:59:58")));
        assert_eq!(
            store.get(user, LAST_LOGIN_KEY).unwrap().as_deref(),
            Some("2024-06-30 23:59:58")
        );

        clock.set(at("2024-07-01 00:00:03"));
        recorder.on_login_succeeded("erin", user).unwrap();
        assert_eq!(reader.last_login_at(user).unwrap(), Some(at("2024-07-01 00:00:03")));
    }

    #[test]
    fn test_malformed_count_restarts_at_one() {
        let clock = Arc::new(FixedClock::new(at("2024-01-01 00:00:00")));
        let (store, recorder, reader) = setup(clock);
        store.set(UserId(9), LOGIN_COUNT_KEY, "garbage").unwrap();

        recorder.on_login_succeeded("frank", UserId(9)).unwrap();
        assert_eq!(reader.login_count(UserId(9)).unwrap(), 1);
    }

    #[test]
    fn test_login_handler_uses_event_user() {
        let clock = Arc::new(FixedClock::new(at("2024-01-01 12:00:00")));
        let (_, recorder, reader) = setup(clock);

        recorder.on_login(&LoginEvent::new("gina", UserId(11))).unwrap();
        assert_eq!(reader.login_count(UserId(11)).unwrap(), 1);
    }

    #[test]
    fn test_write_failure_propagates() {
        let mut store = MockMetaStore::new();
        store.expect_get().returning(|_, _| Ok(Some("2".to_string())));
        store
            .expect_set()
            .returning(|_, _, _| Err(StoreError::Unavailable("read-only".to_string())));
        let clock = Arc::new(FixedClock::new(at("2024-01-01 00:00:00")));
        let recorder = LoginRecorder::new(Arc::new(store), clock);

        assert_err!(recorder.on_login_succeeded("hank", UserId(1)));
    }

    #[test]
    fn test_system_clock_has_whole_seconds() {
        let now = SystemClock::new(ClockZone::Utc).now();
        assert_eq!(now.nanosecond(), 0);
    }
}
