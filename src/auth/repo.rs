use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::repo_types::User;
use crate::profiles::{dto::ProfileInput, repo::insert_profile_tx, repo_types::UserProfile};

/// Account storage.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by (normalized) email.
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    /// Create a patient account together with its health profile.
    ///
    /// Returns `None` if the email is already registered; nothing is written then.
    async fn register(
        &self,
        email: &str,
        password_hash: &str,
        profile: &ProfileInput,
    ) -> anyhow::Result<Option<(User, UserProfile)>>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, role, is_active, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("find user by email")?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, role, is_active, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find user by id")?;
        Ok(user)
    }

    async fn register(
        &self,
        email: &str,
        password_hash: &str,
        profile: &ProfileInput,
    ) -> anyhow::Result<Option<(User, UserProfile)>> {
        let mut tx = self.db.begin().await.context("begin tx")?;

        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, role, is_active, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await;

        let user = match result {
            Ok(user) => user,
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => return Ok(None),
            Err(e) => return Err(e).context("insert user"),
        };

        let profile = insert_profile_tx(&mut tx, user.id, profile)
            .await
            .context("insert signup profile")?;
        tx.commit().await.context("commit signup")?;
        Ok(Some((user, profile)))
    }
}
