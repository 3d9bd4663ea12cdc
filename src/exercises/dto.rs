use serde::Deserialize;

use crate::{dto::validate_name, error::ApiError};

pub const NAME_MAX: usize = 70;

#[derive(Debug, Deserialize)]
pub struct MuscleGroupRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ExerciseRequest {
    pub name: String,
    pub muscle_group_id: i64,
}

impl MuscleGroupRequest {
    pub fn name(&self) -> Result<String, ApiError> {
        validate_name("name", &self.name, NAME_MAX)
    }
}

impl ExerciseRequest {
    pub fn name(&self) -> Result<String, ApiError> {
        validate_name("name", &self.name, NAME_MAX)
    }
}
