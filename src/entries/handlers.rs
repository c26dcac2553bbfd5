use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{info, instrument};

use super::{dto::CreateEntryRequest, repo_types::Entry};
use crate::{
    auth::CurrentUser,
    error::{AppError, ValidJson},
    state::AppState,
};

pub fn entry_routes() -> Router<AppState> {
    Router::new().route("/api/entry", post(create_entry).get(list_entries))
}

#[instrument(skip(state, user, payload), fields(user_id = user.id))]
pub async fn create_entry(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidJson(payload): ValidJson<CreateEntryRequest>,
) -> Result<(StatusCode, Json<Entry>), AppError> {
    if payload.content.trim().is_empty() {
        return Err(AppError::Validation("content is required".into()));
    }

    let entry = state.store.create_entry(user.id, &payload.content).await?;

    info!(entry_id = entry.id, "entry created");
    Ok((StatusCode::CREATED, Json(entry)))
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub async fn list_entries(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Entry>>, AppError> {
    let entries = state.store.list_entries_by_user(user.id).await?;
    Ok(Json(entries))
}
