use std::fmt;

use serde::de::value::{MapAccessDeserializer, SeqAccessDeserializer};
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use time::{macros::format_description, Date, OffsetDateTime};

use super::nutrition::DailySummary;
use super::repo_types::{MealLogEntry, MealType};
use super::units::Unit;
use crate::error::AppError;

/// One entry of a logging request. Nutrient values are never accepted here.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogMealRequest {
    pub food_name: String,
    pub quantity: f64,
    #[serde(default)]
    pub unit: Unit,
    pub meal_type: MealType,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub consumed_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl LogMealRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.food_name.trim().is_empty() {
            return Err(AppError::Validation("food_name is required".into()));
        }
        if !(self.quantity.is_finite() && self.quantity > 0.0) {
            return Err(AppError::Validation(
                "quantity must be a positive number".into(),
            ));
        }
        Ok(())
    }
}

/// `POST /meals` accepts either a single entry or a list of entries.
#[derive(Debug)]
pub enum LogMealsPayload {
    Many(Vec<LogMealRequest>),
    One(LogMealRequest),
}

// Dispatches on the JSON shape so the entry's own error (bad field, unknown
// meal type) reaches the client instead of a generic "no variant matched".
impl<'de> Deserialize<'de> for LogMealsPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PayloadVisitor;

        impl<'de> Visitor<'de> for PayloadVisitor {
            type Value = LogMealsPayload;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a meal entry object or an array of meal entries")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
                Vec::deserialize(SeqAccessDeserializer::new(seq)).map(LogMealsPayload::Many)
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
                LogMealRequest::deserialize(MapAccessDeserializer::new(map))
                    .map(LogMealsPayload::One)
            }
        }

        deserializer.deserialize_any(PayloadVisitor)
    }
}

impl LogMealsPayload {
    pub fn into_entries(self) -> Vec<LogMealRequest> {
        match self {
            LogMealsPayload::Many(v) => v,
            LogMealsPayload::One(e) => vec![e],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoggedMealsResponse {
    pub meals: Vec<MealLogEntry>,
}

/// `?date=YYYY-MM-DD` on the summary, listing and recommendation endpoints.
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DailySummaryResponse {
    pub date: Date,
    #[serde(flatten)]
    pub totals: DailySummary,
}

/// `YYYY-MM-DD`, or the current UTC date when absent.
pub fn resolve_date(raw: Option<&str>, now: OffsetDateTime) -> Result<Date, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(now.date()),
        Some(s) => Date::parse(s, format_description!("[year]-[month]-[day]"))
            .map_err(|_| AppError::Validation(format!("invalid date {s:?}, expected YYYY-MM-DD"))),
    }
}
