use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::access::Role;
use crate::profiles::{dto::ProfileInput, repo_types::UserProfile};

/// Request body for user registration: account plus health profile.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub profile: ProfileInput,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub user: PublicUser,
    pub profile: UserProfile,
}
