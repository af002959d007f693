use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use axum_extra::extract::{cookie::CookieJar, WithRejection};
use tracing::{info, instrument, warn};

use super::{
    dto::{LoginRequest, MessageResponse, RegisterRequest, UpdateUserRequest, UserResponse},
    repo_types::{NewUser, UserPatch},
};
use crate::{
    auth::{
        cookie::{clear_session_cookie, set_session_cookie},
        password::{hash_password, verify_password},
        services::{end_session, issue_session},
        AuthSession,
    },
    error::AppError,
    state::AppState,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            post(register).get(get_me).put(update_me).delete(delete_me),
        )
        .route("/users/login", post(login))
        .route("/users/logout", post(logout))
}

#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(payload), _): WithRejection<Json<RegisterRequest>, AppError>,
) -> Result<(StatusCode, CookieJar, Json<UserResponse>), AppError> {
    if state.users.find_by_email(payload.email.as_str()).await?.is_some() {
        warn!(email = %payload.email.as_str(), "email already registered");
        return Err(AppError::EmailTaken);
    }

    let password_hash = hash_password(payload.password.as_str().to_owned()).await?;
    let user = state
        .users
        .create(NewUser {
            email: payload.email.into_inner(),
            password_hash,
            name: Some(payload.name),
        })
        .await?;
    let session = issue_session(&state, user.id).await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    let jar = set_session_cookie(jar, session.token, &state.config.session);
    Ok((
        StatusCode::CREATED,
        jar,
        Json(UserResponse { user: user.into() }),
    ))
}

#[instrument(skip_all)]
pub async fn get_me(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<UserResponse>, AppError> {
    let user = session.require_user(&state, AppError::UserNotFound).await?;
    Ok(Json(UserResponse { user: user.into() }))
}

#[instrument(skip_all)]
pub async fn update_me(
    State(state): State<AppState>,
    session: AuthSession,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateUserRequest>, AppError>,
) -> Result<Json<MessageResponse>, AppError> {
    let user = session.require_user(&state, AppError::UserNotFound).await?;

    let password_hash = match payload.password {
        Some(pw) => Some(hash_password(pw.as_str().to_owned()).await?),
        None => None,
    };
    let patch = UserPatch {
        email: payload.email.map(|e| e.into_inner()),
        password_hash,
        name: payload.name,
    };

    state
        .users
        .update(user.id, patch)
        .await?
        .ok_or(AppError::UserNotFound)?;

    info!(user_id = %user.id, "user updated");
    Ok(Json(MessageResponse {
        message: "User updated successfully",
    }))
}

#[instrument(skip_all)]
pub async fn delete_me(
    State(state): State<AppState>,
    jar: CookieJar,
    session: AuthSession,
) -> Result<(StatusCode, CookieJar), AppError> {
    match session.user(&state).await? {
        Some(user) => {
            state.users.delete(user.id).await?;
            info!(user_id = %user.id, "user deleted");
        }
        None => end_session(&state, &session.token).await?,
    }
    let jar = clear_session_cookie(jar, &state.config.session);
    Ok((StatusCode::NO_CONTENT, jar))
}

#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(payload), _): WithRejection<Json<LoginRequest>, AppError>,
) -> Result<(CookieJar, Json<UserResponse>), AppError> {
    let Some(user) = state.users.find_by_email(payload.email.as_str()).await? else {
        warn!(email = %payload.email.as_str(), "login unknown email");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(payload.password, user.password_hash.clone()).await? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    let session = issue_session(&state, user.id).await?;
    info!(user_id = %user.id, "user logged in");
    let jar = set_session_cookie(jar, session.token, &state.config.session);
    Ok((jar, Json(UserResponse { user: user.into() })))
}

#[instrument(skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    session: AuthSession,
) -> Result<(StatusCode, CookieJar), AppError> {
    if let Some(user) = session.user(&state).await? {
        info!(user_id = %user.id, "user logged out");
    }
    end_session(&state, &session.token).await?;
    let jar = clear_session_cookie(jar, &state.config.session);
    Ok((StatusCode::NO_CONTENT, jar))
}
