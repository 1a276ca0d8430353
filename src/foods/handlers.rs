use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::dto::{CreateFoodRequest, FoodSearch};
use super::repo_types::{FoodItem, NewFoodItem};
use crate::{
    auth::{access::Resource, extractors::AuthUser},
    error::{AppError, AppResult},
    extract::AppJson,
    state::AppState,
};

pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/foods", get(list_foods).post(create_food))
        .route("/foods/:id", get(get_food))
}

#[instrument(skip(state))]
pub async fn list_foods(
    State(state): State<AppState>,
    user: AuthUser,
    Query(q): Query<FoodSearch>,
) -> AppResult<Json<Vec<FoodItem>>> {
    user.require(Resource::CatalogRead)?;
    let (limit, offset) = q.clamped();
    let foods = state
        .catalog
        .search(q.search.as_deref(), limit, offset)
        .await?;
    Ok(Json(foods))
}

#[instrument(skip(state))]
pub async fn get_food(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<FoodItem>> {
    user.require(Resource::CatalogRead)?;
    state
        .catalog
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Food not found".into()))
}

#[instrument(skip(state, body))]
pub async fn create_food(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(body): AppJson<CreateFoodRequest>,
) -> AppResult<(StatusCode, Json<FoodItem>)> {
    user.require(Resource::CatalogWrite)?;
    let item = NewFoodItem::try_from(body)?;
    let name = item.name.clone();

    match state.catalog.create(item).await? {
        Some(food) => {
            info!(food_id = %food.id, name = %food.name, user_id = %user.id, "food created");
            Ok((StatusCode::CREATED, Json(food)))
        }
        None => {
            warn!(%name, "food name already in catalog");
            Err(AppError::Conflict(format!("Food {name:?} already exists")))
        }
    }
}
