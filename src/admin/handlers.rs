use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{AdminMealRow, AdminProfileRow, AdminTrainingRow},
    services,
};
use crate::{
    auth::extractors::AdminUser,
    dto::Pagination,
    error::ApiResult,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/meals", get(list_meals))
        .route("/admin/trainings", get(list_trainings))
        .route("/admin/profiles", get(list_profiles))
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Query(p): Query<Pagination>,
) -> ApiResult<Json<Vec<AdminMealRow>>> {
    let (limit, offset) = p.bounds();
    Ok(Json(services::meal_rows(&state.db, limit, offset).await?))
}

#[instrument(skip(state))]
pub async fn list_trainings(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Query(p): Query<Pagination>,
) -> ApiResult<Json<Vec<AdminTrainingRow>>> {
    let (limit, offset) = p.bounds();
    Ok(Json(services::training_rows(&state.db, limit, offset).await?))
}

#[instrument(skip(state))]
pub async fn list_profiles(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Query(p): Query<Pagination>,
) -> ApiResult<Json<Vec<AdminProfileRow>>> {
    let (limit, offset) = p.bounds();
    Ok(Json(services::profile_rows(&state.db, limit, offset).await?))
}
