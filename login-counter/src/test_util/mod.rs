use std::sync::{Arc, Mutex};

use chrono::NaiveDateTime;
use login_counter_common::{parse_timestamp, TIMESTAMP_FORMAT};

use crate::config::Config;
use crate::hooks::HookRegistry;
use crate::plugin::LoginCounter;
use crate::recorder::Clock;
use crate::store::SqliteStore;
use crate::AppState;

/// Parse a `YYYY-MM-DD HH:MM:SS` literal. Panics on bad input.
pub fn at(raw: &str) -> NaiveDateTime {
    parse_timestamp(raw)
        .unwrap_or_else(|| panic!("bad timestamp literal {raw:?}, expected {TIMESTAMP_FORMAT}"))
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now: Mutex::new(now) }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap() = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap()
    }
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.database.url = ":memory:".to_string();
    config.logging.level = "debug".to_string();
    config
}

/// In-memory SQLite state with the login counter installed on the given clock.
pub fn create_test_state(clock: Arc<dyn Clock>) -> AppState {
    let config = test_config();
    let store = Arc::new(SqliteStore::new(&config.database.url).unwrap());
    let mut hooks = HookRegistry::new();
    LoginCounter::new(store.clone(), clock, &config.display, &config.columns).install(&mut hooks);

    AppState::new(config, store, hooks)
}
