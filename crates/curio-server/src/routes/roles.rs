//! The global role reference list.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use curio_core::models::role::Role;

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_roles))
}

async fn list_roles(
    State(state): State<AppState>,
    _actor: CurrentUser,
) -> Result<Json<Vec<Role>>, ApiError> {
    let roles = state.accounts.list_roles().await?;
    Ok(Json(roles))
}
