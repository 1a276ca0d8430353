use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::repo::FoodCatalog;
use super::repo_types::{FoodItem, FoodType, NewFoodItem};
use crate::meals::nutrition::Nutrients;

#[derive(Default)]
pub struct InMemoryCatalog {
    items: Mutex<Vec<FoodItem>>,
}

impl InMemoryCatalog {
    pub fn with_items(items: Vec<FoodItem>) -> Self {
        Self {
            items: Mutex::new(items),
        }
    }

    /// Catalog seeded with the handful of foods the tests talk about.
    pub fn seeded() -> Self {
        Self::with_items(vec![
            food(
                "Rice",
                Nutrients {
                    calories: 130.0,
                    protein: 2.7,
                    carbs: 28.0,
                    fats: 0.3,
                    sugar: 0.0,
                    fiber: 0.4,
                },
            ),
            food(
                "Dal",
                Nutrients {
                    calories: 116.0,
                    protein: 9.0,
                    carbs: 20.0,
                    fats: 0.4,
                    sugar: 1.8,
                    fiber: 8.0,
                },
            ),
        ])
    }
}

pub fn food(name: &str, per_100g: Nutrients) -> FoodItem {
    FoodItem {
        id: Uuid::new_v4(),
        name: name.into(),
        per_100g,
        glycemic_index: None,
        food_type: FoodType::Vegetarian,
    }
}

#[async_trait]
impl FoodCatalog for InMemoryCatalog {
    async fn find_by_name_case_insensitive(&self, name: &str) -> anyhow::Result<Option<FoodItem>> {
        let items = self.items.lock().unwrap();
        Ok(items
            .iter()
            .find(|f| f.name.to_lowercase() == name.to_lowercase())
            .cloned())
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<FoodItem>> {
        let items = self.items.lock().unwrap();
        Ok(items.iter().find(|f| f.id == id).cloned())
    }

    async fn search(
        &self,
        query: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<FoodItem>> {
        let items = self.items.lock().unwrap();
        let needle = query.map(|q| q.trim().to_lowercase());
        let mut hits: Vec<FoodItem> = items
            .iter()
            .filter(|f| match &needle {
                Some(n) => f.name.to_lowercase().contains(n),
                None => true,
            })
            .cloned()
            .collect();
        hits.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(hits
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn create(&self, item: NewFoodItem) -> anyhow::Result<Option<FoodItem>> {
        let mut items = self.items.lock().unwrap();
        if items
            .iter()
            .any(|f| f.name.to_lowercase() == item.name.to_lowercase())
        {
            return Ok(None);
        }
        let created = FoodItem {
            id: Uuid::new_v4(),
            name: item.name,
            per_100g: item.per_100g,
            glycemic_index: item.glycemic_index,
            food_type: item.food_type,
        };
        items.push(created.clone());
        Ok(Some(created))
    }
}
