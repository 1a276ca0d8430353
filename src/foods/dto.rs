use serde::Deserialize;

use super::repo_types::{FoodType, NewFoodItem};
use crate::error::AppError;
use crate::meals::nutrition::Nutrients;

#[derive(Debug, Deserialize)]
pub struct FoodSearch {
    pub search: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}
fn default_limit() -> i64 {
    20
}

impl FoodSearch {
    pub fn clamped(&self) -> (i64, i64) {
        (self.limit.clamp(1, 100), self.offset.max(0))
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateFoodRequest {
    pub name: String,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
    pub sugar_g: f64,
    pub fiber_g: f64,
    #[serde(default)]
    pub glycemic_index: Option<f64>,
    #[serde(default)]
    pub food_type: FoodType,
}

impl TryFrom<CreateFoodRequest> for NewFoodItem {
    type Error = AppError;

    fn try_from(r: CreateFoodRequest) -> Result<Self, Self::Error> {
        let name = r.name.trim().to_string();
        if name.is_empty() || name.chars().count() > 100 {
            return Err(AppError::Validation("name must be 1-100 characters".into()));
        }
        for (field, value) in [
            ("calories", r.calories),
            ("protein_g", r.protein_g),
            ("carbs_g", r.carbs_g),
            ("fats_g", r.fats_g),
            ("sugar_g", r.sugar_g),
            ("fiber_g", r.fiber_g),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(AppError::Validation(format!(
                    "{field} must be a non-negative number"
                )));
            }
        }
        if let Some(gi) = r.glycemic_index {
            if !(gi.is_finite() && gi >= 0.0) {
                return Err(AppError::Validation(
                    "glycemic_index must be a non-negative number".into(),
                ));
            }
        }
        Ok(NewFoodItem {
            name,
            per_100g: Nutrients {
                calories: r.calories,
                protein: r.protein_g,
                carbs: r.carbs_g,
                fats: r.fats_g,
                sugar: r.sugar_g,
                fiber: r.fiber_g,
            },
            glycemic_index: r.glycemic_index,
            food_type: r.food_type,
        })
    }
}
