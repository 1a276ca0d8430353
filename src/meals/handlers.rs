use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::instrument;
use uuid::Uuid;

use super::dto::{
    resolve_date, DailySummaryResponse, DateQuery, LogMealsPayload, LoggedMealsResponse,
};
use super::repo_types::MealLogEntry;
use super::services::{daily_summary, log_meals};
use crate::{
    auth::{access::Resource, extractors::AuthUser},
    error::{AppError, AppResult},
    extract::AppJson,
    state::AppState,
};

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(create_meals))
        .route("/meals/summary", get(get_summary))
        .route("/meals/:id", get(get_meal))
}

pub fn patient_routes() -> Router<AppState> {
    Router::new().route("/patients/:user_id/summary", get(get_patient_summary))
}

/// POST /meals: a single entry or an array of entries.
#[instrument(skip(state, payload))]
pub async fn create_meals(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<LogMealsPayload>,
) -> AppResult<(StatusCode, Json<LoggedMealsResponse>)> {
    user.require(Resource::OwnMeals)?;

    let entries = payload.into_entries();
    if entries.is_empty() {
        return Err(AppError::Validation("at least one meal entry is required".into()));
    }
    for entry in &entries {
        entry.validate()?;
    }

    let meals = log_meals(
        state.catalog.as_ref(),
        state.meals.as_ref(),
        user.id,
        entries,
        OffsetDateTime::now_utc(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(LoggedMealsResponse { meals })))
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    user: AuthUser,
    Query(q): Query<DateQuery>,
) -> AppResult<Json<Vec<MealLogEntry>>> {
    user.require(Resource::OwnMeals)?;
    let date = resolve_date(q.date.as_deref(), OffsetDateTime::now_utc())?;
    let meals = state.meals.list_by_user_and_date(user.id, date).await?;
    Ok(Json(meals))
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MealLogEntry>> {
    user.require(Resource::OwnMeals)?;
    state
        .meals
        .get(user.id, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Meal not found".into()))
}

#[instrument(skip(state))]
pub async fn get_summary(
    State(state): State<AppState>,
    user: AuthUser,
    Query(q): Query<DateQuery>,
) -> AppResult<Json<DailySummaryResponse>> {
    user.require(Resource::OwnMeals)?;
    let date = resolve_date(q.date.as_deref(), OffsetDateTime::now_utc())?;
    let totals = daily_summary(state.meals.as_ref(), user.id, date).await?;
    Ok(Json(DailySummaryResponse { date, totals }))
}

#[instrument(skip(state))]
pub async fn get_patient_summary(
    State(state): State<AppState>,
    user: AuthUser,
    Path(patient_id): Path<Uuid>,
    Query(q): Query<DateQuery>,
) -> AppResult<Json<DailySummaryResponse>> {
    user.require(Resource::PatientSummaries)?;
    let date = resolve_date(q.date.as_deref(), OffsetDateTime::now_utc())?;
    let totals = daily_summary(state.meals.as_ref(), patient_id, date).await?;
    Ok(Json(DailySummaryResponse { date, totals }))
}
