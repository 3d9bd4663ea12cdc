use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use super::repo_types::{Training, TrainingExercise};
use crate::{
    dto::{default_limit, iso_date, page_bounds, validate_name, IdRef},
    error::ApiError,
    exercises::Exercise,
};

#[derive(Debug, Deserialize)]
pub struct TrainingRequest {
    pub name: String,
    #[serde(with = "iso_date")]
    pub date: Date,
}

impl TrainingRequest {
    pub fn name(&self) -> Result<String, ApiError> {
        validate_name("name", &self.name, 70)
    }
}

#[derive(Debug, Deserialize)]
pub struct TrainingQuery {
    pub name: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

impl TrainingQuery {
    /// Name filter, ignoring blank values.
    pub fn name_filter(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn bounds(&self) -> (i64, i64) {
        page_bounds(self.limit, self.offset)
    }
}

#[derive(Debug, Deserialize)]
pub struct TrainingExerciseRequest {
    pub exercise: IdRef,
    pub training: IdRef,
    pub repetitions: i32,
    pub series: i32,
    pub rest_time_seconds: i32,
}

impl TrainingExerciseRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.repetitions < 0 || self.series < 0 || self.rest_time_seconds < 0 {
            return Err(ApiError::BadRequest(
                "repetitions, series and rest_time_seconds must not be negative".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct TrainingExerciseQuery {
    pub training: Option<i64>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

impl TrainingExerciseQuery {
    pub fn bounds(&self) -> (i64, i64) {
        page_bounds(self.limit, self.offset)
    }
}

/// Training exercise with its exercise and training embedded.
#[derive(Debug, Serialize)]
pub struct TrainingExerciseResponse {
    pub id: i64,
    pub exercise: Exercise,
    pub training: Training,
    pub repetitions: i32,
    pub series: i32,
    pub rest_time_seconds: i32,
    pub active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub modified_at: OffsetDateTime,
}

impl TrainingExerciseResponse {
    pub fn new(row: TrainingExercise, exercise: Exercise, training: Training) -> Self {
        Self {
            id: row.id,
            exercise,
            training,
            repetitions: row.repetitions,
            series: row.series,
            rest_time_seconds: row.rest_time_seconds,
            active: row.active,
            modified_at: row.modified_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn training_exercise_request_uses_nested_ids() {
        let req: TrainingExerciseRequest = serde_json::from_str(
            r#"{"exercise":{"id":4},"training":{"id":9},"repetitions":12,"series":3,"rest_time_seconds":90}"#,
        )
        .unwrap();
        assert_eq!(req.exercise.id, 4);
        assert_eq!(req.training.id, 9);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn training_exercise_request_requires_ids() {
        let res = serde_json::from_str::<TrainingExerciseRequest>(
            r#"{"exercise":{},"training":{"id":9},"repetitions":12,"series":3,"rest_time_seconds":90}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn negative_counts_are_rejected() {
        let req = TrainingExerciseRequest {
            exercise: IdRef { id: 1 },
            training: IdRef { id: 1 },
            repetitions: 10,
            series: -1,
            rest_time_seconds: 60,
        };
        assert!(matches!(req.validate(), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn blank_name_filter_is_ignored() {
        let q = TrainingQuery { name: Some("  ".into()), limit: 20, offset: 0 };
        assert_eq!(q.name_filter(), None);
        let q = TrainingQuery { name: Some(" perna ".into()), limit: 20, offset: 0 };
        assert_eq!(q.name_filter(), Some("perna"));
    }
}
