//! Wires the recorder and the user-list columns into a hook registry.

use std::sync::Arc;

use crate::columns::{ColumnRegistrar, ColumnRenderer};
use crate::config::{ColumnsConfig, DisplayConfig};
use crate::hooks::HookRegistry;
use crate::metrics::MetricsReader;
use crate::recorder::{Clock, LoginRecorder};
use crate::store::MetaStore;

/// The login counter as installed into a host.
pub struct LoginCounter {
    pub recorder: Arc<LoginRecorder>,
    pub registrar: Arc<ColumnRegistrar>,
    pub renderer: Arc<ColumnRenderer>,
}

impl LoginCounter {
    pub fn new(
        store: Arc<dyn MetaStore>,
        clock: Arc<dyn Clock>,
        display: &DisplayConfig,
        labels: &ColumnsConfig,
    ) -> Self {
        Self {
            recorder: Arc::new(LoginRecorder::new(store.clone(), clock)),
            registrar: Arc::new(ColumnRegistrar::new(labels)),
            renderer: Arc::new(ColumnRenderer::new(MetricsReader::new(store), display)),
        }
    }

    /// Register the login handler and both user-list filters at default priority.
    pub fn install(&self, hooks: &mut HookRegistry) {
        hooks.on_login(self.recorder.clone());
        hooks.add_columns_filter(self.registrar.clone());
        hooks.add_value_filter(self.renderer.clone());
        tracing::info!("Login counter installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryMetaStore;
    use crate::test_util::{at, FixedClock};
    use login_counter_common::{Columns, LoginEvent, UserId, LAST_LOGIN_KEY, LOGIN_COUNT_KEY};

    #[test]
    fn test_installed_hooks_count_and_render() {
        let store = Arc::new(MemoryMetaStore::new());
        let clock = Arc::new(FixedClock::new(at("2025-05-05 05:05:05")));
        let counter = LoginCounter::new(
            store,
            clock,
            &DisplayConfig::default(),
            &ColumnsConfig::default(),
        );
        let mut hooks = HookRegistry::new();
        counter.install(&mut hooks);

        let user = UserId(2);
        hooks.emit_login(&LoginEvent::new("jo", user)).unwrap();
        hooks.emit_login(&LoginEvent::new("jo", user)).unwrap();

        let base: Columns = [("username", "Username")].into_iter().collect();
        let columns = hooks.apply_columns(base);
        assert_eq!(columns.len(), 3);
        assert_eq!(hooks.apply_column_value(String::new(), LOGIN_COUNT_KEY, user).unwrap(), "2");
        assert_eq!(
            hooks.apply_column_value(String::new(), LAST_LOGIN_KEY, user).unwrap(),
            "2025-05-05 05:05:05"
        );
        assert_eq!(hooks.apply_column_value("jo".into(), "username", user).unwrap(), "jo");
    }
}
