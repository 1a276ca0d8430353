use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use super::dto::{DiabeticInput, ProfileInput, RecommendationResponse};
use super::recommendation::recommend;
use super::repo_types::{DiabeticProfile, UserProfile};
use crate::{
    auth::{access::Resource, extractors::AuthUser},
    error::{AppError, AppResult},
    extract::AppJson,
    meals::{
        dto::{resolve_date, DateQuery},
        services::daily_summary,
    },
    state::AppState,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(get_profile)
                .post(create_profile)
                .put(update_profile)
                .delete(delete_profile),
        )
        .route("/profile/recommendation", get(get_recommendation))
        .route(
            "/diabetic",
            get(get_diabetic)
                .post(create_diabetic)
                .put(update_diabetic)
                .delete(delete_diabetic),
        )
}

fn profile_missing() -> AppError {
    AppError::NotFound("Profile not found".into())
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<UserProfile>> {
    user.require(Resource::OwnProfile)?;
    state
        .profiles
        .get_profile(user.id)
        .await?
        .map(Json)
        .ok_or_else(profile_missing)
}

#[instrument(skip(state, input))]
pub async fn create_profile(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(mut input): AppJson<ProfileInput>,
) -> AppResult<(StatusCode, Json<UserProfile>)> {
    user.require(Resource::OwnProfile)?;
    input.validate()?;
    match state.profiles.create_profile(user.id, &input).await? {
        Some(profile) => {
            info!(user_id = %user.id, "profile created");
            Ok((StatusCode::CREATED, Json(profile)))
        }
        None => {
            warn!(user_id = %user.id, "profile already exists");
            Err(AppError::Conflict("Profile already exists".into()))
        }
    }
}

#[instrument(skip(state, input))]
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(mut input): AppJson<ProfileInput>,
) -> AppResult<Json<UserProfile>> {
    user.require(Resource::OwnProfile)?;
    input.validate()?;
    state
        .profiles
        .update_profile(user.id, &input)
        .await?
        .map(Json)
        .ok_or_else(profile_missing)
}

#[instrument(skip(state))]
pub async fn delete_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<StatusCode> {
    user.require(Resource::OwnProfile)?;
    if state.profiles.delete_profile(user.id).await? {
        info!(user_id = %user.id, "profile deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(profile_missing())
    }
}

#[instrument(skip(state))]
pub async fn get_recommendation(
    State(state): State<AppState>,
    user: AuthUser,
    Query(q): Query<DateQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    user.require(Resource::OwnProfile)?;
    let date = resolve_date(q.date.as_deref(), OffsetDateTime::now_utc())?;
    let profile = state
        .profiles
        .get_profile(user.id)
        .await?
        .ok_or_else(profile_missing)?;
    let diabetic = state.profiles.get_diabetic(user.id).await?.is_some();

    let target = recommend(&profile, diabetic);
    let consumed = daily_summary(state.meals.as_ref(), user.id, date).await?;
    let remaining = target.daily.minus(&consumed);

    Ok(Json(RecommendationResponse {
        date,
        target,
        consumed,
        remaining,
    }))
}

fn diabetic_missing() -> AppError {
    AppError::NotFound("Diabetic profile not found".into())
}

#[instrument(skip(state))]
pub async fn get_diabetic(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DiabeticProfile>> {
    user.require(Resource::OwnProfile)?;
    state
        .profiles
        .get_diabetic(user.id)
        .await?
        .map(Json)
        .ok_or_else(diabetic_missing)
}

#[instrument(skip(state, input))]
pub async fn create_diabetic(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<DiabeticInput>,
) -> AppResult<(StatusCode, Json<DiabeticProfile>)> {
    user.require(Resource::OwnProfile)?;
    input.validate()?;
    let profile = state
        .profiles
        .get_profile(user.id)
        .await?
        .ok_or_else(|| AppError::Validation("create a profile first".into()))?;

    match state.profiles.create_diabetic(profile.id, &input).await? {
        Some(d) => {
            info!(user_id = %user.id, "diabetic profile created");
            Ok((StatusCode::CREATED, Json(d)))
        }
        None => Err(AppError::Conflict("Diabetic profile already exists".into())),
    }
}

#[instrument(skip(state, input))]
pub async fn update_diabetic(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<DiabeticInput>,
) -> AppResult<Json<DiabeticProfile>> {
    user.require(Resource::OwnProfile)?;
    input.validate()?;
    state
        .profiles
        .update_diabetic(user.id, &input)
        .await?
        .map(Json)
        .ok_or_else(diabetic_missing)
}

#[instrument(skip(state))]
pub async fn delete_diabetic(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<StatusCode> {
    user.require(Resource::OwnProfile)?;
    if state.profiles.delete_diabetic(user.id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(diabetic_missing())
    }
}
