pub mod dto;
pub mod handlers;
pub mod nutrition;
pub mod repo;
pub mod repo_types;
pub mod services;
pub mod units;

#[cfg(test)]
pub mod memory;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::meal_routes())
        .merge(handlers::patient_routes())
}
