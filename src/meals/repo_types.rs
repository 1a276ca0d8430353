use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::nutrition::LoggedNutrients;
use super::units::Unit;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "breakfast" => Some(MealType::Breakfast),
            "lunch" => Some(MealType::Lunch),
            "dinner" => Some(MealType::Dinner),
            "snack" => Some(MealType::Snack),
            _ => None,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct MealLogRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub food_item_id: Option<Uuid>,
    pub food_name: Option<String>,
    pub quantity: f64,
    pub unit: String,
    pub meal_type: String,
    pub consumed_at: OffsetDateTime,
    pub remarks: String,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
    pub sugar: Option<f64>,
    pub fiber: Option<f64>,
    pub logged_date: Date,
    pub created_at: OffsetDateTime,
}

/// One recorded portion of a food eaten by a user.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MealLogEntry {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    /// `None` once the catalog entry has been deleted; `food_name` survives.
    pub food_item_id: Option<Uuid>,
    pub food_name: Option<String>,
    pub quantity: f64,
    pub unit: Unit,
    pub meal_type: MealType,
    #[serde(with = "time::serde::rfc3339")]
    pub consumed_at: OffsetDateTime,
    pub remarks: String,
    #[serde(flatten)]
    pub nutrients: LoggedNutrients,
    pub logged_date: Date,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl TryFrom<MealLogRow> for MealLogEntry {
    type Error = anyhow::Error;

    fn try_from(r: MealLogRow) -> Result<Self, Self::Error> {
        let meal_type = MealType::from_db(&r.meal_type).ok_or_else(|| {
            anyhow::anyhow!("unknown meal_type {:?} on meal {}", r.meal_type, r.id)
        })?;
        Ok(Self {
            id: r.id,
            user_id: r.user_id,
            food_item_id: r.food_item_id,
            food_name: r.food_name,
            quantity: r.quantity,
            unit: Unit::parse_lenient(&r.unit),
            meal_type,
            consumed_at: r.consumed_at,
            remarks: r.remarks,
            nutrients: LoggedNutrients {
                calories: r.calories,
                protein: r.protein,
                carbs: r.carbs,
                fats: r.fats,
                sugar: r.sugar,
                fiber: r.fiber,
            },
            logged_date: r.logged_date,
            created_at: r.created_at,
        })
    }
}

/// A fully computed entry ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMealLogEntry {
    pub user_id: Uuid,
    pub food_item_id: Option<Uuid>,
    pub food_name: Option<String>,
    pub quantity: f64,
    pub unit: Unit,
    pub meal_type: MealType,
    pub consumed_at: OffsetDateTime,
    pub remarks: String,
    pub nutrients: LoggedNutrients,
    /// Server clock date at insert time; daily summaries key on this.
    pub logged_date: Date,
}
