use serde::Serialize;
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::dto::iso_date;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Training {
    pub id: i64,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub name: String,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub modified_at: OffsetDateTime,
}

/// One exercise prescribed inside a training.
#[derive(Debug, Clone, FromRow)]
pub struct TrainingExercise {
    pub id: i64,
    pub exercise_id: i64,
    pub training_id: i64,
    pub repetitions: i32,
    pub series: i32,
    pub rest_time_seconds: i32,
    pub active: bool,
    pub modified_at: OffsetDateTime,
}

/// Training exercise joined with its exercise name, for the admin inline listing.
#[derive(Debug, Clone, FromRow)]
pub struct TrainingExerciseLine {
    pub id: i64,
    pub training_id: i64,
    pub exercise_name: String,
    pub repetitions: i32,
    pub series: i32,
    pub rest_time_seconds: i32,
}
