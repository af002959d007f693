use time::{Duration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use super::repo_types::Session;
use crate::{error::AppError, state::AppState, users::repo_types::User};

/// Opens a new session for `user_id`; other sessions of the user stay valid.
pub async fn issue_session(state: &AppState, user_id: Uuid) -> Result<Session, AppError> {
    let now = OffsetDateTime::now_utc();
    let session = Session {
        token: Uuid::new_v4().to_string(),
        user_id,
        created_at: now,
        expires_at: now + Duration::days(state.config.session.ttl_days),
    };
    let session = state.sessions.insert(session).await?;
    debug!(%user_id, "session issued");
    Ok(session)
}

/// Maps a presented token to its owner; expired or unknown tokens give `None`.
pub async fn resolve_user(state: &AppState, token: &str) -> Result<Option<User>, AppError> {
    let now = OffsetDateTime::now_utc();
    let Some(session) = state.sessions.find_active(token, now).await? else {
        return Ok(None);
    };
    state.users.find_by_id(session.user_id).await
}

pub async fn end_session(state: &AppState, token: &str) -> Result<(), AppError> {
    if state.sessions.delete(token).await? {
        debug!("session ended");
    }
    Ok(())
}
