use serde::{Deserialize, Serialize};
use time::Date;

use super::recommendation::Recommendation;
use super::repo_types::{ActivityLevel, DietType, Gender, Goal};
use crate::error::AppError;
use crate::meals::nutrition::{DailySummary, Nutrients};

/// Body for creating or replacing the caller's health profile.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileInput {
    pub name: String,
    pub age: i32,
    #[serde(default)]
    pub mobile_number: Option<String>,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    #[serde(default)]
    pub diet_type: DietType,
    #[serde(default)]
    pub health_conditions: String,
}

impl ProfileInput {
    pub fn validate(&mut self) -> Result<(), AppError> {
        self.name = self.name.trim().to_string();
        if self.name.is_empty() || self.name.chars().count() > 100 {
            return Err(AppError::Validation(
                "name must be 1-100 characters".into(),
            ));
        }
        if !(0..=150).contains(&self.age) {
            return Err(AppError::Validation("age must be between 0 and 150".into()));
        }
        if let Some(mobile) = &self.mobile_number {
            if mobile.chars().count() > 15 {
                return Err(AppError::Validation(
                    "mobile_number must be at most 15 characters".into(),
                ));
            }
        }
        if !(self.height_cm.is_finite() && self.height_cm > 0.0) {
            return Err(AppError::Validation("height_cm must be positive".into()));
        }
        if !(self.weight_kg.is_finite() && self.weight_kg > 0.0) {
            return Err(AppError::Validation("weight_kg must be positive".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiabeticInput {
    pub hba1c: f64,
    pub fasting_blood_sugar: f64,
    #[serde(default)]
    pub insulin_dependent: bool,
    #[serde(default)]
    pub medications: Option<String>,
    pub diagnosis_date: Date,
}

impl DiabeticInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if !(self.hba1c.is_finite() && self.hba1c > 0.0) {
            return Err(AppError::Validation("hba1c must be positive".into()));
        }
        if !(self.fasting_blood_sugar.is_finite() && self.fasting_blood_sugar > 0.0) {
            return Err(AppError::Validation(
                "fasting_blood_sugar must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub date: Date,
    pub target: Recommendation,
    pub consumed: DailySummary,
    pub remaining: Nutrients,
}
