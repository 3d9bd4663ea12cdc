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
    dto::{
        TrainingExerciseQuery, TrainingExerciseRequest, TrainingExerciseResponse, TrainingQuery,
        TrainingRequest,
    },
    repo,
    repo_types::{Training, TrainingExercise},
};
use crate::{
    auth::extractors::AuthUser,
    error::{ApiError, ApiResult},
    exercises,
    state::AppState,
};

pub fn training_routes() -> Router<AppState> {
    Router::new()
        .route("/trainings", get(list_trainings).post(create_training))
        .route(
            "/trainings/:id",
            get(get_training).put(update_training).delete(delete_training),
        )
}

pub fn training_exercise_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/training-exercises",
            get(list_training_exercises).post(create_training_exercise),
        )
        .route(
            "/training-exercises/:id",
            get(get_training_exercise)
                .put(update_training_exercise)
                .delete(delete_training_exercise),
        )
}

// --- trainings ---

#[instrument(skip(state))]
pub async fn list_trainings(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<TrainingQuery>,
) -> ApiResult<Json<Vec<Training>>> {
    let (limit, offset) = q.bounds();
    let rows = repo::list_by_user(&state.db, user_id, q.name_filter(), limit, offset).await?;
    Ok(Json(rows))
}

#[instrument(skip(state))]
pub async fn get_training(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<Training>> {
    let training = repo::get_for_user(&state.db, user_id, id)
        .await?
        .ok_or(ApiError::NotFound("Training"))?;
    Ok(Json(training))
}

#[instrument(skip(state))]
pub async fn create_training(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<TrainingRequest>,
) -> ApiResult<impl IntoResponse> {
    let training = repo::create(&state.db, user_id, &body.name()?, body.date).await?;
    info!(%user_id, training_id = training.id, "training created");
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/v1/trainings/{}", training.id))],
        Json(training),
    ))
}

#[instrument(skip(state))]
pub async fn update_training(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
    Json(body): Json<TrainingRequest>,
) -> ApiResult<Json<Training>> {
    let training = repo::update(&state.db, user_id, id, &body.name()?, body.date)
        .await?
        .ok_or(ApiError::NotFound("Training"))?;
    Ok(Json(training))
}

#[instrument(skip(state))]
pub async fn delete_training(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if !repo::delete(&state.db, user_id, id).await? {
        return Err(ApiError::NotFound("Training"));
    }
    info!(%user_id, training_id = id, "training deleted");
    Ok(StatusCode::NO_CONTENT)
}

// --- training exercises ---

/// Embeds exercise and training into each row, loading both with one query each.
async fn expand(
    state: &AppState,
    user_id: Uuid,
    rows: Vec<TrainingExercise>,
) -> ApiResult<Vec<TrainingExerciseResponse>> {
    let exercise_ids: Vec<i64> = rows.iter().map(|r| r.exercise_id).collect();
    let training_ids: Vec<i64> = rows.iter().map(|r| r.training_id).collect();

    let by_exercise: HashMap<i64, exercises::Exercise> =
        exercises::repo::get_exercises(&state.db, &exercise_ids)
            .await?
            .into_iter()
            .map(|e| (e.id, e))
            .collect();
    let by_training: HashMap<i64, Training> =
        repo::get_many_for_user(&state.db, user_id, &training_ids)
            .await?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();

    rows.into_iter()
        .map(|row| {
            let exercise = by_exercise.get(&row.exercise_id).cloned();
            let training = by_training.get(&row.training_id).cloned();
            match (exercise, training) {
                (Some(e), Some(t)) => Ok(TrainingExerciseResponse::new(row, e, t)),
                _ => {
                    error!(training_exercise_id = row.id, "dangling training exercise");
                    Err(ApiError::Internal(anyhow::anyhow!(
                        "training exercise {} references missing rows",
                        row.id
                    )))
                }
            }
        })
        .collect()
}

/// Checks that the exercise exists and the training belongs to the caller.
async fn check_refs(
    state: &AppState,
    user_id: Uuid,
    body: &TrainingExerciseRequest,
) -> ApiResult<()> {
    body.validate()?;
    if exercises::repo::get_exercise(&state.db, body.exercise.id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound("Exercise"));
    }
    if repo::get_for_user(&state.db, user_id, body.training.id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound("Training"));
    }
    Ok(())
}

async fn expand_one(
    state: &AppState,
    user_id: Uuid,
    row: TrainingExercise,
) -> ApiResult<TrainingExerciseResponse> {
    expand(state, user_id, vec![row])
        .await?
        .pop()
        .ok_or(ApiError::NotFound("Training exercise"))
}

#[instrument(skip(state))]
pub async fn list_training_exercises(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<TrainingExerciseQuery>,
) -> ApiResult<Json<Vec<TrainingExerciseResponse>>> {
    let (limit, offset) = q.bounds();
    let rows =
        repo::list_exercises_for_user(&state.db, user_id, q.training, limit, offset).await?;
    Ok(Json(expand(&state, user_id, rows).await?))
}

#[instrument(skip(state))]
pub async fn get_training_exercise(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<TrainingExerciseResponse>> {
    let row = repo::get_exercise_for_user(&state.db, user_id, id)
        .await?
        .ok_or(ApiError::NotFound("Training exercise"))?;
    Ok(Json(expand_one(&state, user_id, row).await?))
}

#[instrument(skip(state))]
pub async fn create_training_exercise(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<TrainingExerciseRequest>,
) -> ApiResult<impl IntoResponse> {
    check_refs(&state, user_id, &body).await?;
    let row = repo::create_exercise(
        &state.db,
        body.exercise.id,
        body.training.id,
        body.repetitions,
        body.series,
        body.rest_time_seconds,
    )
    .await?;
    info!(%user_id, training_exercise_id = row.id, "training exercise created");
    let location = format!("/api/v1/training-exercises/{}", row.id);
    let response = expand_one(&state, user_id, row).await?;
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(response)))
}

#[instrument(skip(state))]
pub async fn update_training_exercise(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
    Json(body): Json<TrainingExerciseRequest>,
) -> ApiResult<Json<TrainingExerciseResponse>> {
    check_refs(&state, user_id, &body).await?;
    let row = repo::update_exercise_for_user(
        &state.db,
        user_id,
        id,
        body.exercise.id,
        body.training.id,
        body.repetitions,
        body.series,
        body.rest_time_seconds,
    )
    .await?
    .ok_or(ApiError::NotFound("Training exercise"))?;
    Ok(Json(expand_one(&state, user_id, row).await?))
}

#[instrument(skip(state))]
pub async fn delete_training_exercise(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if !repo::delete_exercise_for_user(&state.db, user_id, id).await? {
        return Err(ApiError::NotFound("Training exercise"));
    }
    info!(%user_id, training_exercise_id = id, "training exercise deleted");
    Ok(StatusCode::NO_CONTENT)
}
