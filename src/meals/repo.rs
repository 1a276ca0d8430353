use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use super::repo_types::{MealLogEntry, MealLogRow, NewMealLogEntry};

#[async_trait]
pub trait MealStore: Send + Sync {
    /// Writes every entry or none of them.
    async fn insert_batch(
        &self,
        entries: Vec<NewMealLogEntry>,
    ) -> anyhow::Result<Vec<MealLogEntry>>;
    async fn list_by_user_and_date(
        &self,
        user_id: Uuid,
        date: Date,
    ) -> anyhow::Result<Vec<MealLogEntry>>;
    async fn get(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<MealLogEntry>>;
}

const MEAL_COLUMNS: &str = "id, user_id, food_item_id, food_name, quantity, unit, meal_type, \
     consumed_at, remarks, calories, protein, carbs, fats, sugar, fiber, logged_date, created_at";

#[derive(Clone)]
pub struct PgMealStore {
    db: PgPool,
}

impl PgMealStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MealStore for PgMealStore {
    async fn insert_batch(
        &self,
        entries: Vec<NewMealLogEntry>,
    ) -> anyhow::Result<Vec<MealLogEntry>> {
        let sql = format!(
            r#"
            INSERT INTO user_meals (user_id, food_item_id, food_name, quantity, unit, meal_type,
                                    consumed_at, remarks, calories, protein, carbs, fats, sugar,
                                    fiber, logged_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {MEAL_COLUMNS}
            "#
        );

        let mut tx = self.db.begin().await.context("begin tx")?;
        let mut saved = Vec::with_capacity(entries.len());
        for e in entries {
            let row = sqlx::query_as::<_, MealLogRow>(&sql)
                .bind(e.user_id)
                .bind(e.food_item_id) // NULL allowed
                .bind(&e.food_name)
                .bind(e.quantity)
                .bind(e.unit.as_str())
                .bind(e.meal_type.as_str())
                .bind(e.consumed_at)
                .bind(&e.remarks)
                .bind(e.nutrients.calories)
                .bind(e.nutrients.protein)
                .bind(e.nutrients.carbs)
                .bind(e.nutrients.fats)
                .bind(e.nutrients.sugar)
                .bind(e.nutrients.fiber)
                .bind(e.logged_date)
                .fetch_one(&mut *tx)
                .await
                .context("insert meal")?;
            saved.push(MealLogEntry::try_from(row)?);
        }
        tx.commit().await.context("commit meals")?;
        Ok(saved)
    }

    async fn list_by_user_and_date(
        &self,
        user_id: Uuid,
        date: Date,
    ) -> anyhow::Result<Vec<MealLogEntry>> {
        let rows = sqlx::query_as::<_, MealLogRow>(&format!(
            r#"
            SELECT {MEAL_COLUMNS}
              FROM user_meals
             WHERE user_id = $1 AND logged_date = $2
             ORDER BY consumed_at ASC, created_at ASC
            "#
        ))
        .bind(user_id)
        .bind(date)
        .fetch_all(&self.db)
        .await
        .context("list meals by date")?;
        rows.into_iter().map(MealLogEntry::try_from).collect()
    }

    async fn get(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<MealLogEntry>> {
        let row = sqlx::query_as::<_, MealLogRow>(&format!(
            r#"SELECT {MEAL_COLUMNS} FROM user_meals WHERE id = $1 AND user_id = $2"#
        ))
        .bind(meal_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("get meal")?;
        row.map(MealLogEntry::try_from).transpose()
    }
}
