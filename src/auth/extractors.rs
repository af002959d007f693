use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;

use super::{cookie, services::resolve_user};
use crate::{error::AppError, state::AppState, users::repo_types::User};

/// Caller identified by the session cookie.
///
/// A missing cookie rejects with [`AppError::Unauthorized`]. Extraction never
/// touches the store: handlers resolve the user once the request body and path
/// have been validated. A cookie that maps to no live session resolves to
/// `None`; each endpoint decides what that means.
pub struct AuthSession {
    pub token: String,
}

impl AuthSession {
    pub async fn user(&self, state: &AppState) -> Result<Option<User>, AppError> {
        resolve_user(state, &self.token).await
    }

    pub async fn require_user(
        &self,
        state: &AppState,
        missing: AppError,
    ) -> Result<User, AppError> {
        self.user(state).await?.ok_or(missing)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = cookie::session_token(&jar).ok_or(AppError::Unauthorized)?;
        Ok(AuthSession { token })
    }
}
