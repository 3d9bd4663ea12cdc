mod dto;
pub mod handlers;
pub mod repo;
mod repo_types;

pub use repo_types::{Training, TrainingExerciseLine};

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::training_routes())
        .merge(handlers::training_exercise_routes())
}
