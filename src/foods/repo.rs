use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{FoodItem, FoodItemRow, NewFoodItem};

/// Read/write access to the food catalog.
#[async_trait]
pub trait FoodCatalog: Send + Sync {
    /// Exact, case-insensitive name match.
    async fn find_by_name_case_insensitive(&self, name: &str) -> anyhow::Result<Option<FoodItem>>;
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<FoodItem>>;
    async fn search(
        &self,
        query: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<FoodItem>>;
    /// Returns `None` when an entry with the same name (ignoring case) exists.
    async fn create(&self, item: NewFoodItem) -> anyhow::Result<Option<FoodItem>>;
}

/// `ILIKE` pattern matching `query` anywhere in the name, with the caller's
/// own `%`, `_` and `\` taken literally.
pub fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[derive(Clone)]
pub struct PgFoodCatalog {
    db: PgPool,
}

impl PgFoodCatalog {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FoodCatalog for PgFoodCatalog {
    async fn find_by_name_case_insensitive(&self, name: &str) -> anyhow::Result<Option<FoodItem>> {
        let row = sqlx::query_as::<_, FoodItemRow>(
            r#"
            SELECT id, name, calories, protein_g, carbs_g, fats_g, sugar_g, fiber_g,
                   glycemic_index, food_type
              FROM food_items
             WHERE lower(name) = lower($1)
            "#,
        )
        .bind(name)
        .fetch_optional(&self.db)
        .await
        .context("find food by name")?;
        Ok(row.map(FoodItem::from))
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<FoodItem>> {
        let row = sqlx::query_as::<_, FoodItemRow>(
            r#"
            SELECT id, name, calories, protein_g, carbs_g, fats_g, sugar_g, fiber_g,
                   glycemic_index, food_type
              FROM food_items
             WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("get food by id")?;
        Ok(row.map(FoodItem::from))
    }

    async fn search(
        &self,
        query: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<FoodItem>> {
        let pattern = query.map(contains_pattern);
        let rows = sqlx::query_as::<_, FoodItemRow>(
            r#"
            SELECT id, name, calories, protein_g, carbs_g, fats_g, sugar_g, fiber_g,
                   glycemic_index, food_type
              FROM food_items
             WHERE $1::TEXT IS NULL OR name ILIKE $1 ESCAPE '\'
             ORDER BY name ASC
             LIMIT $2 OFFSET $3
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .context("search foods")?;
        Ok(rows.into_iter().map(FoodItem::from).collect())
    }

    async fn create(&self, item: NewFoodItem) -> anyhow::Result<Option<FoodItem>> {
        let result = sqlx::query_as::<_, FoodItemRow>(
            r#"
            INSERT INTO food_items (name, calories, protein_g, carbs_g, fats_g, sugar_g,
                                    fiber_g, glycemic_index, food_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, name, calories, protein_g, carbs_g, fats_g, sugar_g, fiber_g,
                      glycemic_index, food_type
            "#,
        )
        .bind(&item.name)
        .bind(item.per_100g.calories)
        .bind(item.per_100g.protein)
        .bind(item.per_100g.carbs)
        .bind(item.per_100g.fats)
        .bind(item.per_100g.sugar)
        .bind(item.per_100g.fiber)
        .bind(item.glycemic_index)
        .bind(item.food_type.as_str())
        .fetch_one(&self.db)
        .await;

        match result {
            Ok(row) => Ok(Some(row.into())),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(None),
            Err(e) => Err(e).context("insert food"),
        }
    }
}
