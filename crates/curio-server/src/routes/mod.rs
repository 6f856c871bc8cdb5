//! HTTP route definitions, one module per resource.

mod auth;
mod products;
mod roles;
mod users;

use axum::Router;

use crate::state::AppState;

pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/products", products::router())
        .nest("/roles", roles::router())
        .nest("/users", users::router())
}
