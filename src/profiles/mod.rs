pub mod dto;
pub mod handlers;
pub mod recommendation;
pub mod repo;
pub mod repo_types;

#[cfg(test)]
pub mod memory;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::profile_routes()
}
