pub mod columns;
pub mod config;
pub mod error;
pub mod hooks;
pub mod logging;
pub mod metrics;
pub mod plugin;
pub mod recorder;
pub mod routes;
pub mod store;
pub mod test_util;

pub use columns::{ColumnRegistrar, ColumnRenderer};
pub use config::Config;
pub use error::{Error, Result};
pub use hooks::{ColumnValueFilter, ColumnsFilter, HookRegistry, LoginHandler};
pub use metrics::MetricsReader;
pub use plugin::LoginCounter;
pub use recorder::{Clock, LoginRecorder, SystemClock};
pub use store::{MemoryMetaStore, MetaStore, SqliteStore, StoreError};

use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// User directory and per-user metadata.
    pub store: Arc<SqliteStore>,
    /// Login handlers and user-list filters.
    pub hooks: HookRegistry,
}

impl AppState {
    pub fn new(config: Config, store: Arc<SqliteStore>, hooks: HookRegistry) -> Self {
        Self {
            config,
            store,
            hooks,
        }
    }
}
