use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        access::Role,
        dto::{PublicUser, SignupRequest, SignupResponse},
        extractors::AuthUser,
        password::{hash_password, is_valid_email, normalize_email, MIN_PASSWORD_LEN},
    },
    error::{AppError, AppResult},
    extract::AppJson,
    state::AppState,
};

pub fn signup_routes() -> Router<AppState> {
    Router::new().route("/signup", post(signup))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

/// Checks the account part of a signup request, normalizing the email in place.
pub fn validate_signup(payload: &mut SignupRequest) -> Result<(), AppError> {
    payload.email = normalize_email(&payload.email);

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(AppError::Validation("Invalid email".into()));
    }

    if payload.password.chars().count() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(AppError::Validation("Password too short".into()));
    }

    payload.profile.validate()
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    AppJson(mut payload): AppJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<SignupResponse>)> {
    validate_signup(&mut payload)?;

    // Ensure email is not taken
    if state.users.find_by_email(&payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let hash = hash_password(&payload.password).map_err(|e| {
        error!(error = %e, "hash_password failed");
        AppError::Internal(e)
    })?;

    let registered = state
        .users
        .register(&payload.email, &hash, &payload.profile)
        .await?;
    let Some((user, profile)) = registered else {
        warn!(email = %payload.email, "email registered concurrently");
        return Err(AppError::Conflict("Email already registered".into()));
    };

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            user: PublicUser {
                id: user.id,
                email: user.email,
                role: Role::from_db(&user.role),
            },
            profile,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<PublicUser>> {
    let user = state
        .users
        .find_by_id(auth.id)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| {
            warn!(user_id = %auth.id, "token for unknown or inactive user");
            AppError::Unauthorized
        })?;

    Ok(Json(PublicUser {
        id: user.id,
        email: user.email,
        role: Role::from_db(&user.role),
    }))
}
