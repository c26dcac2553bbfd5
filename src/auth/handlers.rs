use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{Credentials, LoginResponse, PublicUser, RegisterResponse},
        password::{hash_password, verify_password},
    },
    error::{AppError, ValidJson},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

fn validate(payload: &mut Credentials) -> Result<(), AppError> {
    payload.username = payload.username.trim().to_string();
    if payload.username.is_empty() {
        return Err(AppError::Validation("username is required".into()));
    }
    if payload.password.is_empty() {
        return Err(AppError::Validation("password is required".into()));
    }
    Ok(())
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ValidJson(mut payload): ValidJson<Credentials>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    validate(&mut payload)?;

    let password = payload.password;
    let hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

    let user = match state.store.create_user(&payload.username, &hash).await {
        Ok(u) => u,
        Err(e) => {
            warn!(username = %payload.username, error = %e, "registration failed");
            return Err(e.into());
        }
    };

    info!(user_id = user.id, username = %user.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: PublicUser {
                id: user.id,
                username: user.username,
            },
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ValidJson(mut payload): ValidJson<Credentials>,
) -> Result<Json<LoginResponse>, AppError> {
    validate(&mut payload)?;

    let user = match state.store.find_user_by_username(&payload.username).await? {
        Some(u) => u,
        None => {
            warn!(username = %payload.username, "login unknown username");
            return Err(AppError::UserNotFound);
        }
    };

    let password = payload.password;
    let stored = user.password_hash.clone();
    let ok = tokio::task::spawn_blocking(move || verify_password(&password, &stored)).await??;
    if !ok {
        warn!(user_id = user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    let jwt = state.keys.issue(user.id)?;

    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok(Json(LoginResponse { jwt }))
}
