use crate::state::AppState;
use axum::Router;

pub mod access;
mod claims;
mod dto;
pub mod extractors;
pub mod handlers;
pub mod jwt;
mod password;
pub mod repo;
mod repo_types;

#[cfg(test)]
pub mod memory;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::signup_routes())
        .merge(handlers::me_routes())
}
