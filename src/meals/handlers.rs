use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::{error, info, instrument};
use uuid::Uuid;

use super::{
    dto::{MealFoodQuery, MealFoodRequest, MealFoodResponse, MealQuery, MealRequest, MealResponse},
    repo,
    repo_types::MealFood,
    services::{describe_meal, describe_meals},
};
use crate::{
    auth::extractors::AuthUser,
    error::{ApiError, ApiResult},
    foods::{self, Food},
    state::AppState,
};

// --- public routers ---

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(create_meal))
        .route(
            "/meals/:id",
            get(get_meal).put(update_meal).delete(delete_meal),
        )
}

pub fn meal_food_routes() -> Router<AppState> {
    Router::new()
        .route("/meal-foods", get(list_meal_foods).post(create_meal_food))
        .route(
            "/meal-foods/:id",
            get(get_meal_food)
                .put(update_meal_food)
                .delete(delete_meal_food),
        )
}

// --- meals ---

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<MealQuery>,
) -> ApiResult<Json<Vec<MealResponse>>> {
    let date = q.date_filter()?;
    let (limit, offset) = q.bounds();
    let meals = repo::list_by_user(&state.db, user_id, date, limit, offset).await?;
    Ok(Json(describe_meals(&state.db, meals).await?))
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<MealResponse>> {
    let meal = repo::get_for_user(&state.db, user_id, id)
        .await?
        .ok_or(ApiError::NotFound("Meal"))?;
    Ok(Json(describe_meal(&state.db, meal).await?))
}

#[instrument(skip(state))]
pub async fn create_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<MealRequest>,
) -> ApiResult<impl IntoResponse> {
    let meal = repo::create(&state.db, user_id, body.date, body.meal_type).await?;
    info!(%user_id, meal_id = meal.id, "meal created");
    let location = format!("/api/v1/meals/{}", meal.id);
    // a fresh meal has no portions yet
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(MealResponse::new(meal, 0.0)),
    ))
}

#[instrument(skip(state))]
pub async fn update_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
    Json(body): Json<MealRequest>,
) -> ApiResult<Json<MealResponse>> {
    let meal = repo::update(&state.db, user_id, id, body.date, body.meal_type)
        .await?
        .ok_or(ApiError::NotFound("Meal"))?;
    Ok(Json(describe_meal(&state.db, meal).await?))
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if !repo::delete(&state.db, user_id, id).await? {
        return Err(ApiError::NotFound("Meal"));
    }
    info!(%user_id, meal_id = id, "meal deleted");
    Ok(StatusCode::NO_CONTENT)
}

// --- meal foods ---

/// Embeds meal (with totals) and food into each row; one query per related table.
async fn expand(
    state: &AppState,
    user_id: Uuid,
    rows: Vec<MealFood>,
) -> ApiResult<Vec<MealFoodResponse>> {
    let meal_ids: Vec<i64> = rows.iter().map(|r| r.meal_id).collect();
    let food_ids: Vec<i64> = rows.iter().map(|r| r.food_id).collect();

    let meals = repo::get_many_for_user(&state.db, user_id, &meal_ids).await?;
    let by_meal: HashMap<i64, MealResponse> = describe_meals(&state.db, meals)
        .await?
        .into_iter()
        .map(|m| (m.id, m))
        .collect();
    let by_food: HashMap<i64, Food> = foods::repo::get_many(&state.db, &food_ids)
        .await?
        .into_iter()
        .map(|f| (f.id, f))
        .collect();

    rows.into_iter()
        .map(|row| {
            let meal = by_meal.get(&row.meal_id).cloned();
            let food = by_food.get(&row.food_id).cloned();
            match (meal, food) {
                (Some(m), Some(f)) => Ok(MealFoodResponse::new(row, m, f)),
                _ => {
                    error!(meal_food_id = row.id, "dangling meal food");
                    Err(ApiError::Internal(anyhow::anyhow!(
                        "meal food {} references missing rows",
                        row.id
                    )))
                }
            }
        })
        .collect()
}

async fn expand_one(state: &AppState, user_id: Uuid, row: MealFood) -> ApiResult<MealFoodResponse> {
    expand(state, user_id, vec![row])
        .await?
        .pop()
        .ok_or(ApiError::NotFound("Meal food"))
}

/// Checks that the meal belongs to the caller and the food exists.
async fn check_refs(state: &AppState, user_id: Uuid, body: &MealFoodRequest) -> ApiResult<()> {
    body.validate()?;
    if repo::get_for_user(&state.db, user_id, body.meal.id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound("Meal"));
    }
    if foods::repo::get(&state.db, body.food.id).await?.is_none() {
        return Err(ApiError::NotFound("Food"));
    }
    Ok(())
}

#[instrument(skip(state))]
pub async fn list_meal_foods(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<MealFoodQuery>,
) -> ApiResult<Json<Vec<MealFoodResponse>>> {
    let (limit, offset) = q.bounds();
    let rows = repo::list_meal_foods_for_user(&state.db, user_id, q.diet, limit, offset).await?;
    Ok(Json(expand(&state, user_id, rows).await?))
}

#[instrument(skip(state))]
pub async fn get_meal_food(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<MealFoodResponse>> {
    let row = repo::get_meal_food_for_user(&state.db, user_id, id)
        .await?
        .ok_or(ApiError::NotFound("Meal food"))?;
    Ok(Json(expand_one(&state, user_id, row).await?))
}

#[instrument(skip(state))]
pub async fn create_meal_food(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<MealFoodRequest>,
) -> ApiResult<impl IntoResponse> {
    check_refs(&state, user_id, &body).await?;
    let row = repo::create_meal_food(&state.db, body.meal.id, body.food.id, body.value).await?;
    info!(%user_id, meal_food_id = row.id, meal_id = row.meal_id, "meal food created");
    let location = format!("/api/v1/meal-foods/{}", row.id);
    let response = expand_one(&state, user_id, row).await?;
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(response)))
}

#[instrument(skip(state))]
pub async fn update_meal_food(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
    Json(body): Json<MealFoodRequest>,
) -> ApiResult<Json<MealFoodResponse>> {
    check_refs(&state, user_id, &body).await?;
    let row = repo::update_meal_food_for_user(
        &state.db,
        user_id,
        id,
        body.meal.id,
        body.food.id,
        body.value,
    )
    .await?
    .ok_or(ApiError::NotFound("Meal food"))?;
    Ok(Json(expand_one(&state, user_id, row).await?))
}

#[instrument(skip(state))]
pub async fn delete_meal_food(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if !repo::delete_meal_food_for_user(&state.db, user_id, id).await? {
        return Err(ApiError::NotFound("Meal food"));
    }
    info!(%user_id, meal_food_id = id, "meal food deleted");
    Ok(StatusCode::NO_CONTENT)
}
