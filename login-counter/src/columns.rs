//! Admin user-list columns: which columns exist, and what goes in them.

use login_counter_common::{format_timestamp, Columns, UserId, LAST_LOGIN_KEY, LOGIN_COUNT_KEY};

use crate::config::{ColumnsConfig, DisplayConfig};
use crate::error::Result;
use crate::hooks::{ColumnValueFilter, ColumnsFilter};
use crate::metrics::MetricsReader;

/// Adds the login count and last login columns to the user list.
#[derive(Debug, Clone)]
pub struct ColumnRegistrar {
    login_count_label: String,
    last_login_label: String,
}

impl ColumnRegistrar {
    pub fn new(labels: &ColumnsConfig) -> Self {
        Self {
            login_count_label: labels.login_count_label.clone(),
            last_login_label: labels.last_login_label.clone(),
        }
    }

    pub fn register_columns(&self, mut columns: Columns) -> Columns {
        columns.insert(LOGIN_COUNT_KEY, self.login_count_label.as_str());
        columns.insert(LAST_LOGIN_KEY, self.last_login_label.as_str());
        columns
    }
}

impl Default for ColumnRegistrar {
    fn default() -> Self {
        Self::new(&ColumnsConfig::default())
    }
}

impl ColumnsFilter for ColumnRegistrar {
    fn filter_columns(&self, columns: Columns) -> Columns {
        self.register_columns(columns)
    }
}

/// Fills in the login columns; every other column passes through untouched.
pub struct ColumnRenderer {
    reader: MetricsReader,
    never_label: String,
}

impl ColumnRenderer {
    pub fn new(reader: MetricsReader, display: &DisplayConfig) -> Self {
        Self {
            reader,
            never_label: display.never_label.clone(),
        }
    }

    pub fn render_column(
        &self,
        default_value: String,
        column_key: &str,
        user_id: UserId,
    ) -> Result<String> {
        match column_key {
            LAST_LOGIN_KEY => Ok(match self.reader.last_login_at(user_id)? {
                Some(ts) => format_timestamp(&ts),
                None => self.never_label.clone(),
            }),
            LOGIN_COUNT_KEY => Ok(self.reader.login_count(user_id)?.to_string()),
            _ => Ok(default_value),
        }
    }
}

impl ColumnValueFilter for ColumnRenderer {
    fn filter_value(&self, value: String, column_key: &str, user_id: UserId) -> Result<String> {
        self.render_column(value, column_key, user_id)
    }
}
