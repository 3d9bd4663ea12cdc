mod dto;
pub mod handlers;
pub mod repo;
mod repo_types;

pub use repo_types::{Food, MeasureUnit};

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
