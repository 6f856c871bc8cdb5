//! Request authentication extractor.
//!
//! Validates the Bearer token, then reloads the user row. Reloading on
//! every request means a role change or deletion takes effect
//! immediately; the token only proves identity, it never carries
//! authority.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use curio_auth::token::validate_access_token;
use curio_core::error::CurioError;
use curio_core::models::user::User;
use curio_core::repository::UserRepository;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated acting user.
pub struct CurrentUser(pub User);

fn unauthenticated(reason: &str) -> ApiError {
    ApiError(CurioError::AuthenticationFailed {
        reason: reason.into(),
    })
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthenticated("missing authorization header"))?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| unauthenticated("expected a bearer token"))?;

        let claims = validate_access_token(token, &state.auth_config)
            .map_err(CurioError::from)?
            .0;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| unauthenticated("malformed subject claim"))?;
        let business_id = claims
            .business_id
            .as_deref()
            .map(Uuid::parse_str)
            .transpose()
            .map_err(|_| unauthenticated("malformed business claim"))?
            .ok_or_else(|| unauthenticated("token carries no business membership"))?;

        let user = state
            .user_repo
            .get_by_id(business_id, user_id)
            .await
            .map_err(|err| match err {
                // The account is gone (or moved tenants): the token no
                // longer refers to anyone.
                CurioError::NotFound { .. } => unauthenticated("account no longer exists"),
                other => ApiError(other),
            })?;

        Ok(CurrentUser(user))
    }
}
