use std::sync::Mutex;

use async_trait::async_trait;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::repo::MealStore;
use super::repo_types::{MealLogEntry, NewMealLogEntry};

#[derive(Default)]
pub struct InMemoryMealStore {
    rows: Mutex<Vec<MealLogEntry>>,
}

impl InMemoryMealStore {
    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl MealStore for InMemoryMealStore {
    async fn insert_batch(
        &self,
        entries: Vec<NewMealLogEntry>,
    ) -> anyhow::Result<Vec<MealLogEntry>> {
        let mut rows = self.rows.lock().unwrap();
        let saved: Vec<MealLogEntry> = entries
            .into_iter()
            .map(|e| MealLogEntry {
                id: Uuid::new_v4(),
                user_id: e.user_id,
                food_item_id: e.food_item_id,
                food_name: e.food_name,
                quantity: e.quantity,
                unit: e.unit,
                meal_type: e.meal_type,
                consumed_at: e.consumed_at,
                remarks: e.remarks,
                nutrients: e.nutrients,
                logged_date: e.logged_date,
                created_at: OffsetDateTime::now_utc(),
            })
            .collect();
        rows.extend(saved.iter().cloned());
        Ok(saved)
    }

    async fn list_by_user_and_date(
        &self,
        user_id: Uuid,
        date: Date,
    ) -> anyhow::Result<Vec<MealLogEntry>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|m| m.user_id == user_id && m.logged_date == date)
            .cloned()
            .collect())
    }

    async fn get(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<MealLogEntry>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|m| m.id == meal_id && m.user_id == user_id)
            .cloned())
    }
}
