use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::{dto::FoodRequest, repo, repo_types::Food};
use crate::{
    auth::extractors::AuthUser,
    dto::Pagination,
    error::{ApiError, ApiResult},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/foods", get(list_foods).post(create_food))
        .route(
            "/foods/:id",
            get(get_food).put(update_food).delete(delete_food),
        )
}

#[instrument(skip(state))]
pub async fn list_foods(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(p): Query<Pagination>,
) -> ApiResult<Json<Vec<Food>>> {
    let (limit, offset) = p.bounds();
    let foods = repo::list(&state.db, limit, offset).await?;
    Ok(Json(foods))
}

#[instrument(skip(state))]
pub async fn get_food(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<Food>> {
    let food = repo::get(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Food"))?;
    Ok(Json(food))
}

#[instrument(skip(state, body))]
pub async fn create_food(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<FoodRequest>,
) -> ApiResult<impl IntoResponse> {
    let body = body.normalized()?;
    let food = repo::create(
        &state.db,
        &body.description,
        body.total_kcal,
        body.unit,
        body.value,
    )
    .await?;

    info!(%user_id, food_id = food.id, per = %format!("{} {}", food.value, food.unit.symbol()), "food created");
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/v1/foods/{}", food.id))],
        Json(food),
    ))
}

#[instrument(skip(state, body))]
pub async fn update_food(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<i64>,
    Json(body): Json<FoodRequest>,
) -> ApiResult<Json<Food>> {
    let body = body.normalized()?;
    let food = repo::update(
        &state.db,
        id,
        &body.description,
        body.total_kcal,
        body.unit,
        body.value,
    )
    .await?
    .ok_or(ApiError::NotFound("Food"))?;
    Ok(Json(food))
}

#[instrument(skip(state))]
pub async fn delete_food(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if !repo::delete(&state.db, id).await? {
        return Err(ApiError::NotFound("Food"));
    }
    info!(%user_id, food_id = id, "food deleted");
    Ok(StatusCode::NO_CONTENT)
}
