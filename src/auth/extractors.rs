use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;
use uuid::Uuid;

use super::access::{authorize, Access, Resource, Role};
use super::jwt::JwtKeys;
use crate::error::AppError;

/// Authenticated caller, taken from the bearer access token.
///
/// `role` is the token's `role` claim as minted by the identity service; it is
/// not re-read from `users.role`. A role change in the database applies once
/// the caller's current access token expires, so access tokens should be
/// short-lived.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

impl AuthUser {
    pub fn require(&self, resource: Resource) -> Result<(), AppError> {
        match authorize(self.role, resource) {
            Access::Allow => Ok(()),
            Access::Deny => {
                warn!(user_id = %self.id, role = ?self.role, ?resource, "access denied");
                Err(AppError::Forbidden)
            }
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .or_else(|| auth_header.strip_prefix("bearer "))
            .ok_or(AppError::Unauthorized)?;

        let claims = match keys.verify_access(token) {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "invalid or expired token");
                return Err(AppError::Unauthorized);
            }
        };

        Ok(AuthUser {
            id: claims.sub,
            role: claims.role,
        })
    }
}
