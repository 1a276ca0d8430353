use anyhow::Context;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::dto::{DiabeticInput, ProfileInput};
use super::repo_types::{DiabeticProfile, UserProfile, UserProfileRow};

/// Health profiles and their optional diabetic extension, keyed by user.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Returns `None` when the user already has a profile.
    async fn create_profile(
        &self,
        user_id: Uuid,
        input: &ProfileInput,
    ) -> anyhow::Result<Option<UserProfile>>;
    async fn get_profile(&self, user_id: Uuid) -> anyhow::Result<Option<UserProfile>>;
    async fn update_profile(
        &self,
        user_id: Uuid,
        input: &ProfileInput,
    ) -> anyhow::Result<Option<UserProfile>>;
    /// Deleting a profile also removes its diabetic profile.
    async fn delete_profile(&self, user_id: Uuid) -> anyhow::Result<bool>;

    /// Returns `None` when the profile already has a diabetic profile.
    async fn create_diabetic(
        &self,
        profile_id: Uuid,
        input: &DiabeticInput,
    ) -> anyhow::Result<Option<DiabeticProfile>>;
    async fn get_diabetic(&self, user_id: Uuid) -> anyhow::Result<Option<DiabeticProfile>>;
    async fn update_diabetic(
        &self,
        user_id: Uuid,
        input: &DiabeticInput,
    ) -> anyhow::Result<Option<DiabeticProfile>>;
    async fn delete_diabetic(&self, user_id: Uuid) -> anyhow::Result<bool>;
}

const PROFILE_COLUMNS: &str = "id, user_id, name, age, mobile_number, gender, height_cm, \
     weight_kg, activity_level, goal, diet_type, health_conditions";

const DIABETIC_COLUMNS: &str = "d.id, d.user_profile_id, d.hba1c, d.fasting_blood_sugar, \
     d.insulin_dependent, d.medications, d.diagnosis_date";

/// Insert a profile for `user_id` inside an open transaction (used by signup).
pub async fn insert_profile_tx(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    input: &ProfileInput,
) -> Result<UserProfile, sqlx::Error> {
    let row = sqlx::query_as::<_, UserProfileRow>(&format!(
        r#"
        INSERT INTO user_profiles (user_id, name, age, mobile_number, gender, height_cm,
                                   weight_kg, activity_level, goal, diet_type, health_conditions)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING {PROFILE_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(&input.name)
    .bind(input.age)
    .bind(&input.mobile_number)
    .bind(input.gender.as_str())
    .bind(input.height_cm)
    .bind(input.weight_kg)
    .bind(input.activity_level.as_str())
    .bind(input.goal.as_str())
    .bind(input.diet_type.as_str())
    .bind(&input.health_conditions)
    .fetch_one(&mut **tx)
    .await?;
    Ok(row.into())
}

#[derive(Clone)]
pub struct PgProfileStore {
    db: PgPool,
}

impl PgProfileStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn create_profile(
        &self,
        user_id: Uuid,
        input: &ProfileInput,
    ) -> anyhow::Result<Option<UserProfile>> {
        let mut tx = self.db.begin().await.context("begin tx")?;
        match insert_profile_tx(&mut tx, user_id, input).await {
            Ok(profile) => {
                tx.commit().await.context("commit profile")?;
                Ok(Some(profile))
            }
            // user_profiles.user_id is UNIQUE; a concurrent create lands here
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(None),
            Err(e) => Err(e).context("insert profile"),
        }
    }

    async fn get_profile(&self, user_id: Uuid) -> anyhow::Result<Option<UserProfile>> {
        let row = sqlx::query_as::<_, UserProfileRow>(&format!(
            r#"SELECT {PROFILE_COLUMNS} FROM user_profiles WHERE user_id = $1"#
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("get profile")?;
        Ok(row.map(UserProfile::from))
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        input: &ProfileInput,
    ) -> anyhow::Result<Option<UserProfile>> {
        let row = sqlx::query_as::<_, UserProfileRow>(&format!(
            r#"
            UPDATE user_profiles
               SET name = $2, age = $3, mobile_number = $4, gender = $5, height_cm = $6,
                   weight_kg = $7, activity_level = $8, goal = $9, diet_type = $10,
                   health_conditions = $11
             WHERE user_id = $1
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&input.name)
        .bind(input.age)
        .bind(&input.mobile_number)
        .bind(input.gender.as_str())
        .bind(input.height_cm)
        .bind(input.weight_kg)
        .bind(input.activity_level.as_str())
        .bind(input.goal.as_str())
        .bind(input.diet_type.as_str())
        .bind(&input.health_conditions)
        .fetch_optional(&self.db)
        .await
        .context("update profile")?;
        Ok(row.map(UserProfile::from))
    }

    async fn delete_profile(&self, user_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(r#"DELETE FROM user_profiles WHERE user_id = $1"#)
            .bind(user_id)
            .execute(&self.db)
            .await
            .context("delete profile")?;
        Ok(res.rows_affected() > 0)
    }

    async fn create_diabetic(
        &self,
        profile_id: Uuid,
        input: &DiabeticInput,
    ) -> anyhow::Result<Option<DiabeticProfile>> {
        let result = sqlx::query_as::<_, DiabeticProfile>(
            r#"
            INSERT INTO diabetic_profiles (user_profile_id, hba1c, fasting_blood_sugar,
                                           insulin_dependent, medications, diagnosis_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_profile_id, hba1c, fasting_blood_sugar, insulin_dependent,
                      medications, diagnosis_date
            "#,
        )
        .bind(profile_id)
        .bind(input.hba1c)
        .bind(input.fasting_blood_sugar)
        .bind(input.insulin_dependent)
        .bind(&input.medications)
        .bind(input.diagnosis_date)
        .fetch_one(&self.db)
        .await;

        match result {
            Ok(row) => Ok(Some(row)),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(None),
            Err(e) => Err(e).context("insert diabetic profile"),
        }
    }

    async fn get_diabetic(&self, user_id: Uuid) -> anyhow::Result<Option<DiabeticProfile>> {
        let row = sqlx::query_as::<_, DiabeticProfile>(&format!(
            r#"
            SELECT {DIABETIC_COLUMNS}
              FROM diabetic_profiles d
              JOIN user_profiles p ON p.id = d.user_profile_id
             WHERE p.user_id = $1
            "#
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("get diabetic profile")?;
        Ok(row)
    }

    async fn update_diabetic(
        &self,
        user_id: Uuid,
        input: &DiabeticInput,
    ) -> anyhow::Result<Option<DiabeticProfile>> {
        let row = sqlx::query_as::<_, DiabeticProfile>(&format!(
            r#"
            UPDATE diabetic_profiles d
               SET hba1c = $2, fasting_blood_sugar = $3, insulin_dependent = $4,
                   medications = $5, diagnosis_date = $6
              FROM user_profiles p
             WHERE p.id = d.user_profile_id AND p.user_id = $1
            RETURNING {DIABETIC_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(input.hba1c)
        .bind(input.fasting_blood_sugar)
        .bind(input.insulin_dependent)
        .bind(&input.medications)
        .bind(input.diagnosis_date)
        .fetch_optional(&self.db)
        .await
        .context("update diabetic profile")?;
        Ok(row)
    }

    async fn delete_diabetic(&self, user_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            DELETE FROM diabetic_profiles d
             USING user_profiles p
             WHERE p.id = d.user_profile_id AND p.user_id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.db)
        .await
        .context("delete diabetic profile")?;
        Ok(res.rows_affected() > 0)
    }
}
