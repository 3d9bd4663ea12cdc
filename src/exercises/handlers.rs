use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::{
    dto::{ExerciseRequest, MuscleGroupRequest},
    repo,
    repo_types::{Exercise, MuscleGroup},
};
use crate::{
    auth::extractors::AuthUser,
    dto::Pagination,
    error::{ApiError, ApiResult},
    state::AppState,
};

pub fn muscle_group_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/muscle-groups",
            get(list_muscle_groups).post(create_muscle_group),
        )
        .route(
            "/muscle-groups/:id",
            get(get_muscle_group)
                .put(update_muscle_group)
                .delete(delete_muscle_group),
        )
}

pub fn exercise_routes() -> Router<AppState> {
    Router::new()
        .route("/exercises", get(list_exercises).post(create_exercise))
        .route(
            "/exercises/:id",
            get(get_exercise).put(update_exercise).delete(delete_exercise),
        )
}

// --- muscle groups ---

#[instrument(skip(state))]
pub async fn list_muscle_groups(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(p): Query<Pagination>,
) -> ApiResult<Json<Vec<MuscleGroup>>> {
    let (limit, offset) = p.bounds();
    Ok(Json(repo::list_muscle_groups(&state.db, limit, offset).await?))
}

#[instrument(skip(state))]
pub async fn get_muscle_group(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<MuscleGroup>> {
    let group = repo::get_muscle_group(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Muscle group"))?;
    Ok(Json(group))
}

#[instrument(skip(state))]
pub async fn create_muscle_group(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Json(body): Json<MuscleGroupRequest>,
) -> ApiResult<impl IntoResponse> {
    let group = repo::create_muscle_group(&state.db, &body.name()?).await?;
    info!(muscle_group_id = group.id, "muscle group created");
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/v1/muscle-groups/{}", group.id))],
        Json(group),
    ))
}

#[instrument(skip(state))]
pub async fn update_muscle_group(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<i64>,
    Json(body): Json<MuscleGroupRequest>,
) -> ApiResult<Json<MuscleGroup>> {
    let group = repo::update_muscle_group(&state.db, id, &body.name()?)
        .await?
        .ok_or(ApiError::NotFound("Muscle group"))?;
    Ok(Json(group))
}

#[instrument(skip(state))]
pub async fn delete_muscle_group(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if !repo::delete_muscle_group(&state.db, id).await? {
        return Err(ApiError::NotFound("Muscle group"));
    }
    info!(muscle_group_id = id, "muscle group deleted");
    Ok(StatusCode::NO_CONTENT)
}

// --- exercises ---

#[instrument(skip(state))]
pub async fn list_exercises(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(p): Query<Pagination>,
) -> ApiResult<Json<Vec<Exercise>>> {
    let (limit, offset) = p.bounds();
    Ok(Json(repo::list_exercises(&state.db, limit, offset).await?))
}

#[instrument(skip(state))]
pub async fn get_exercise(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<Exercise>> {
    let exercise = repo::get_exercise(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Exercise"))?;
    Ok(Json(exercise))
}

async fn ensure_muscle_group(state: &AppState, id: i64) -> ApiResult<()> {
    if repo::get_muscle_group(&state.db, id).await?.is_none() {
        warn!(muscle_group_id = id, "unknown muscle group");
        return Err(ApiError::NotFound("Muscle group"));
    }
    Ok(())
}

#[instrument(skip(state))]
pub async fn create_exercise(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Json(body): Json<ExerciseRequest>,
) -> ApiResult<impl IntoResponse> {
    let name = body.name()?;
    ensure_muscle_group(&state, body.muscle_group_id).await?;
    let exercise = repo::create_exercise(&state.db, &name, body.muscle_group_id).await?;
    info!(exercise_id = exercise.id, "exercise created");
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/v1/exercises/{}", exercise.id))],
        Json(exercise),
    ))
}

#[instrument(skip(state))]
pub async fn update_exercise(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<i64>,
    Json(body): Json<ExerciseRequest>,
) -> ApiResult<Json<Exercise>> {
    let name = body.name()?;
    ensure_muscle_group(&state, body.muscle_group_id).await?;
    let exercise = repo::update_exercise(&state.db, id, &name, body.muscle_group_id)
        .await?
        .ok_or(ApiError::NotFound("Exercise"))?;
    Ok(Json(exercise))
}

#[instrument(skip(state))]
pub async fn delete_exercise(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if !repo::delete_exercise(&state.db, id).await? {
        return Err(ApiError::NotFound("Exercise"));
    }
    info!(exercise_id = id, "exercise deleted");
    Ok(StatusCode::NO_CONTENT)
}
