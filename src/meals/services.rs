use time::{Date, OffsetDateTime};
use tracing::{info, warn};
use uuid::Uuid;

use super::dto::LogMealRequest;
use super::nutrition::{scale, sum_daily, DailySummary};
use super::repo::MealStore;
use super::repo_types::{MealLogEntry, NewMealLogEntry};
use crate::error::AppError;
use crate::foods::repo::FoodCatalog;

#[derive(Debug, thiserror::Error)]
pub enum MealError {
    #[error("Food not found: {0}")]
    FoodNotFound(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl From<MealError> for AppError {
    fn from(e: MealError) -> Self {
        match e {
            MealError::FoodNotFound(_) => AppError::NotFound(e.to_string()),
            MealError::Storage(e) => AppError::Internal(e),
        }
    }
}

/// Resolves the food and computes the nutrient columns for one entry.
pub async fn prepare_entry(
    catalog: &dyn FoodCatalog,
    user_id: Uuid,
    req: LogMealRequest,
    now: OffsetDateTime,
) -> Result<NewMealLogEntry, MealError> {
    let name = req.food_name.trim();
    let food = catalog
        .find_by_name_case_insensitive(name)
        .await?
        .ok_or_else(|| MealError::FoodNotFound(name.to_string()))?;

    let nutrients = scale(&food.per_100g, req.quantity, req.unit);

    Ok(NewMealLogEntry {
        user_id,
        food_item_id: Some(food.id),
        food_name: Some(food.name),
        quantity: req.quantity,
        unit: req.unit,
        meal_type: req.meal_type,
        consumed_at: req.consumed_at.unwrap_or(now),
        remarks: req.remarks.unwrap_or_default(),
        nutrients: nutrients.into(),
        logged_date: now.date(),
    })
}

/// Logs a batch of meals for one user.
///
/// Every entry is resolved before anything is written, and the store writes
/// the batch atomically, so one unknown food leaves nothing persisted.
pub async fn log_meals(
    catalog: &dyn FoodCatalog,
    store: &dyn MealStore,
    user_id: Uuid,
    requests: Vec<LogMealRequest>,
    now: OffsetDateTime,
) -> Result<Vec<MealLogEntry>, MealError> {
    let mut prepared = Vec::with_capacity(requests.len());
    for (idx, req) in requests.into_iter().enumerate() {
        match prepare_entry(catalog, user_id, req, now).await {
            Ok(entry) => prepared.push(entry),
            Err(e) => {
                warn!(%user_id, entry = idx, error = %e, "meal batch rejected");
                return Err(e);
            }
        }
    }

    let saved = store.insert_batch(prepared).await?;
    info!(%user_id, count = saved.len(), "meals logged");
    Ok(saved)
}

/// Nutrient totals for everything `user_id` logged on `date`.
pub async fn daily_summary(
    store: &dyn MealStore,
    user_id: Uuid,
    date: Date,
) -> anyhow::Result<DailySummary> {
    let rows = store.list_by_user_and_date(user_id, date).await?;
    Ok(sum_daily(rows.iter().map(|m| &m.nutrients)))
}
