//! Hook registry: the host's login event and user-list extension points.
//!
//! Handlers are registered explicitly as trait objects with a priority.
//! Lower priorities run first; equal priorities run in registration order.

use std::sync::Arc;

use login_counter_common::{Columns, LoginEvent, UserId};

use crate::error::Result;

/// Priority used when none is given.
pub const DEFAULT_PRIORITY: i32 = 10;

/// Reacts to a completed authentication.
pub trait LoginHandler: Send + Sync {
    fn on_login(&self, event: &LoginEvent) -> Result<()>;
}

/// Adjusts the columns of the admin user list.
pub trait ColumnsFilter: Send + Sync {
    fn filter_columns(&self, columns: Columns) -> Columns;
}

/// Adjusts the value displayed in one cell of the admin user list.
pub trait ColumnValueFilter: Send + Sync {
    fn filter_value(&self, value: String, column_key: &str, user_id: UserId) -> Result<String>;
}

struct Registered<T: ?Sized> {
    priority: i32,
    handler: Arc<T>,
}

fn insert_sorted<T: ?Sized>(list: &mut Vec<Registered<T>>, priority: i32, handler: Arc<T>) {
    // After every entry with priority <= the new one, so ties keep registration order.
    let pos = list.partition_point(|r| r.priority <= priority);
    list.insert(pos, Registered { priority, handler });
}

/// Registry of login handlers and user-list filters.
#[derive(Default)]
pub struct HookRegistry {
    login_handlers: Vec<Registered<dyn LoginHandler>>,
    columns_filters: Vec<Registered<dyn ColumnsFilter>>,
    value_filters: Vec<Registered<dyn ColumnValueFilter>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_login(&mut self, handler: Arc<dyn LoginHandler>) {
        self.on_login_with_priority(DEFAULT_PRIORITY, handler);
    }

    pub fn on_login_with_priority(&mut self, priority: i32, handler: Arc<dyn LoginHandler>) {
        insert_sorted(&mut self.login_handlers, priority, handler);
    }

    pub fn add_columns_filter(&mut self, filter: Arc<dyn ColumnsFilter>) {
        self.add_columns_filter_with_priority(DEFAULT_PRIORITY, filter);
    }

    pub fn add_columns_filter_with_priority(
        &mut self,
        priority: i32,
        filter: Arc<dyn ColumnsFilter>,
    ) {
        insert_sorted(&mut self.columns_filters, priority, filter);
    }

    pub fn add_value_filter(&mut self, filter: Arc<dyn ColumnValueFilter>) {
        self.add_value_filter_with_priority(DEFAULT_PRIORITY, filter);
    }

    pub fn add_value_filter_with_priority(
        &mut self,
        priority: i32,
        filter: Arc<dyn ColumnValueFilter>,
    ) {
        insert_sorted(&mut self.value_filters, priority, filter);
    }

    /// Run every login handler, stopping at the first failure.
    pub fn emit_login(&self, event: &LoginEvent) -> Result<()> {
        for registered in &self.login_handlers {
            if let Err(e) = registered.handler.on_login(event) {
                tracing::error!(user_id = %event.user_id(), "Login handler failed: {}", e);
                return Err(e);
            }
        }
        Ok(())
    }

    pub fn apply_columns(&self, columns: Columns) -> Columns {
        self.columns_filters
            .iter()
            .fold(columns, |columns, registered| registered.handler.filter_columns(columns))
    }

    pub fn apply_column_value(
        &self,
        value: String,
        column_key: &str,
        user_id: UserId,
    ) -> Result<String> {
        self.value_filters.iter().try_fold(value, |value, registered| {
            registered.handler.filter_value(value, column_key, user_id)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::Mutex;

    struct Tracer {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
        fail: bool,
    }

    impl LoginHandler for Tracer {
        fn on_login(&self, _event: &LoginEvent) -> Result<()> {
            self.log.lock().unwrap().push(self.name);
            if self.fail {
                return Err(Error::Internal(format!("{} failed", self.name)));
            }
            Ok(())
        }
    }

    struct Suffix(&'static str);

    impl ColumnsFilter for Suffix {
        fn filter_columns(&self, mut columns: Columns) -> Columns {
            columns.insert(self.0, self.0.to_uppercase());
            columns
        }
    }

    impl ColumnValueFilter for Suffix {
        fn filter_value(
            &self,
            value: String,
            _column_key: &str,
            _user_id: UserId,
        ) -> Result<String> {
            Ok(format!("{}{}", value, self.0))
        }
    }

    fn tracer(
        name: &'static str,
        log: &Arc<Mutex<Vec<&'static str>>>,
        fail: bool,
    ) -> Arc<dyn LoginHandler> {
        Arc::new(Tracer {
            name,
            log: log.clone(),
            fail,
        })
    }

    #[test]
    fn test_login_handlers_run_by_priority_then_registration() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut hooks = HookRegistry::new();
        hooks.on_login(tracer("b", &log, false));
        hooks.on_login_with_priority(5, tracer("a", &log, false));
        hooks.on_login(tracer("c", &log, false));
        hooks.on_login_with_priority(20, tracer("d", &log, false));

        hooks.emit_login(&LoginEvent::new("x", UserId(1))).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_emit_login_stops_at_first_error() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut hooks = HookRegistry::new();
        hooks.on_login(tracer("first", &log, true));
        hooks.on_login(tracer("second", &log, false));

        assert!(hooks.emit_login(&LoginEvent::new("x", UserId(1))).is_err());
        assert_eq!(*log.lock().unwrap(), vec!["first"]);
    }

    #[test]
    fn test_filters_fold_in_order() {
        let mut hooks = HookRegistry::new();
        hooks.add_columns_filter(Arc::new(Suffix("b")));
        hooks.add_columns_filter_with_priority(1, Arc::new(Suffix("a")));
        hooks.add_value_filter(Arc::new(Suffix("2")));
        hooks.add_value_filter_with_priority(1, Arc::new(Suffix("1")));

        let columns = hooks.apply_columns(Columns::new());
        assert_eq!(columns.keys().collect::<Vec<_>>(), vec!["a", "b"]);

        let value = hooks.apply_column_value("v".to_string(), "any", UserId(1)).unwrap();
        assert_eq!(value, "v12");
    }

    #[test]
    fn test_empty_registry_passes_through() {
        let hooks = HookRegistry::new();
        assert!(hooks.emit_login(&LoginEvent::new("x", UserId(1))).is_ok());
        assert!(hooks.apply_columns(Columns::new()).is_empty());
        assert_eq!(hooks.apply_column_value("v".into(), "k", UserId(1)).unwrap(), "v");
    }
}
