use anyhow::Context;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument};

use super::{
    dto::{ProfileResponse, UpdateProfileRequest},
    repo,
};
use crate::{
    auth::{extractors::AuthUser, repo_types::User},
    error::{ApiError, ApiResult},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/userprofile/me", get(get_profile))
        .route("/userprofile/update_profile", post(update_profile))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User not found".into()))?;
    let profile = repo::get_by_user(&state.db, user_id).await?;
    Ok(Json(ProfileResponse::new(user, profile)))
}

#[instrument(skip(state, body))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<UpdateProfileRequest>,
) -> ApiResult<Json<Value>> {
    let (first_name, last_name) = body.validate()?;

    let mut tx = state.db.begin().await.context("begin tx")?;
    User::update_names(&mut *tx, user_id, &first_name, &last_name).await?;
    let profile = repo::upsert(&mut *tx, user_id, body.age, body.weight, body.height).await?;
    tx.commit().await.context("commit tx")?;

    info!(%user_id, profile_id = profile.id, "profile updated");
    Ok(Json(json!({})))
}
