//! Login event intake.
//!
//! The host's authentication layer reports each completed login here. This
//! service does not authenticate anyone itself.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use login_counter_common::{LoginEvent, UserId};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginEventRequest {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct LoginEventResponse {
    pub user_id: UserId,
    pub username: String,
}

/// POST /api/events/login - Record a completed authentication
async fn login_event(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginEventRequest>,
) -> Result<Json<LoginEventResponse>> {
    let username = request.username.trim();
    if username.is_empty() {
        return Err(Error::InvalidRequest("username must not be empty".to_string()));
    }

    let user = state.store.find_or_create_user(username)?;
    state.hooks.emit_login(&LoginEvent::new(user.username.clone(), user.id))?;

    Ok(Json(LoginEventResponse {
        user_id: user.id,
        username: user.username,
    }))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/events/login", post(login_event))
        .with_state(state)
}
