use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo::UserStore;
use super::repo_types::User;
use crate::profiles::{dto::ProfileInput, memory::InMemoryProfileStore, repo_types::UserProfile};

pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
    profiles: Arc<InMemoryProfileStore>,
}

impl InMemoryUserStore {
    /// Signup profiles are written into `profiles`, like the shared database.
    pub fn new(profiles: Arc<InMemoryProfileStore>) -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            profiles,
        }
    }

    pub fn deactivate(&self, id: Uuid) {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.is_active = false;
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn register(
        &self,
        email: &str,
        password_hash: &str,
        profile: &ProfileInput,
    ) -> anyhow::Result<Option<(User, UserProfile)>> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == email) {
            return Ok(None);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role: "user".into(),
            is_active: true,
            created_at: OffsetDateTime::now_utc(),
        };
        let profile = self
            .profiles
            .insert(user.id, profile)
            .ok_or_else(|| anyhow!("fresh user {} already has a profile", user.id))?;
        users.push(user.clone());
        Ok(Some((user, profile)))
    }
}
