mod dto;
pub mod handlers;
pub mod repo;
mod repo_types;

pub use repo_types::Exercise;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::muscle_group_routes())
        .merge(handlers::exercise_routes())
}
