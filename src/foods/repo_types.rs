use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::meals::nutrition::Nutrients;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FoodType {
    Vegetarian,
    NonVegetarian,
    Vegan,
    Eggetarian,
    #[default]
    Other,
}

impl FoodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodType::Vegetarian => "vegetarian",
            FoodType::NonVegetarian => "non_vegetarian",
            FoodType::Vegan => "vegan",
            FoodType::Eggetarian => "eggetarian",
            FoodType::Other => "other",
        }
    }

    pub fn from_db(value: &str) -> Self {
        match value {
            "vegetarian" => FoodType::Vegetarian,
            "non_vegetarian" => FoodType::NonVegetarian,
            "vegan" => FoodType::Vegan,
            "eggetarian" => FoodType::Eggetarian,
            _ => FoodType::Other,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct FoodItemRow {
    pub id: Uuid,
    pub name: String,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
    pub sugar_g: f64,
    pub fiber_g: f64,
    pub glycemic_index: Option<f64>,
    pub food_type: String,
}

/// Reference nutrition data for one food, per 100 g.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FoodItem {
    pub id: Uuid,
    pub name: String,
    pub per_100g: Nutrients,
    pub glycemic_index: Option<f64>,
    pub food_type: FoodType,
}

impl From<FoodItemRow> for FoodItem {
    fn from(r: FoodItemRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            per_100g: Nutrients {
                calories: r.calories,
                protein: r.protein_g,
                carbs: r.carbs_g,
                fats: r.fats_g,
                sugar: r.sugar_g,
                fiber: r.fiber_g,
            },
            glycemic_index: r.glycemic_index,
            food_type: FoodType::from_db(&r.food_type),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewFoodItem {
    pub name: String,
    pub per_100g: Nutrients,
    pub glycemic_index: Option<f64>,
    pub food_type: FoodType,
}
