//! Admin user list.
//!
//! The host supplies the base columns and values; every registered filter
//! gets a chance to add columns and fill cells.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use login_counter_common::{format_timestamp, Columns, UserId};
use serde::Serialize;

use crate::config::ClockZone;
use crate::error::Result;
use crate::store::UserRecord;
use crate::AppState;

pub const USERNAME_COLUMN: &str = "username";
pub const REGISTERED_COLUMN: &str = "registered";

#[derive(Debug, Clone, Serialize)]
pub struct ColumnInfo {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserRow {
    pub user_id: UserId,
    pub cells: BTreeMap<String, String>,
}

/// Response for /admin/api/users endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct UsersApiResponse {
    pub columns: Vec<ColumnInfo>,
    pub rows: Vec<UserRow>,
    pub total: usize,
}

fn base_columns() -> Columns {
    [(USERNAME_COLUMN, "Username"), (REGISTERED_COLUMN, "Registered")]
        .into_iter()
        .collect()
}

/// The host's own value for a cell; empty for columns it does not know.
///
/// Times are shown in `zone`, the same wall clock login times are recorded in.
fn base_value(user: &UserRecord, column_key: &str, zone: ClockZone) -> String {
    match column_key {
        USERNAME_COLUMN => user.username.clone(),
        REGISTERED_COLUMN => format_timestamp(&zone.wall_clock(user.created_at)),
        _ => String::new(),
    }
}

fn render_row(state: &AppState, columns: &Columns, user: &UserRecord) -> Result<UserRow> {
    let zone = state.config.display.clock;
    let cells = columns
        .keys()
        .map(|key| {
            let value = state
                .hooks
                .apply_column_value(base_value(user, key, zone), key, user.id)?;
            Ok((key.to_string(), value))
        })
        .collect::<Result<BTreeMap<_, _>>>()?;
    Ok(UserRow {
        user_id: user.id,
        cells,
    })
}

/// GET /admin/api/users - List all users with the registered columns
async fn api_users_list(State(state): State<Arc<AppState>>) -> Result<Json<UsersApiResponse>> {
    let columns = state.hooks.apply_columns(base_columns());
    let users = state.store.list_users()?;

    let rows = users
        .iter()
        .map(|user| render_row(&state, &columns, user))
        .collect::<Result<Vec<_>>>()?;

    let total = rows.len();
    tracing::debug!("Returning {} users with {} columns", total, columns.len());
    Ok(Json(UsersApiResponse {
        columns: columns
            .iter()
            .map(|(key, label)| ColumnInfo {
                key: key.to_string(),
                label: label.to_string(),
            })
            .collect(),
        rows,
        total,
    }))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/users", get(api_users_list))
        .with_state(state)
}
