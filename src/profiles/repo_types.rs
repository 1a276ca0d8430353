use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::Date;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    LoseWeight,
    Maintain,
    GainWeight,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DietType {
    Vegetarian,
    NonVegetarian,
    Vegan,
    Eggetarian,
    #[default]
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    fn from_db(value: &str) -> Self {
        match value {
            "male" => Gender::Male,
            _ => Gender::Female,
        }
    }
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    fn from_db(value: &str) -> Self {
        match value {
            "light" => ActivityLevel::Light,
            "moderate" => ActivityLevel::Moderate,
            "active" => ActivityLevel::Active,
            "very_active" => ActivityLevel::VeryActive,
            _ => ActivityLevel::Sedentary,
        }
    }
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::LoseWeight => "lose_weight",
            Goal::Maintain => "maintain",
            Goal::GainWeight => "gain_weight",
        }
    }

    fn from_db(value: &str) -> Self {
        match value {
            "lose_weight" => Goal::LoseWeight,
            "gain_weight" => Goal::GainWeight,
            _ => Goal::Maintain,
        }
    }
}

impl DietType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DietType::Vegetarian => "vegetarian",
            DietType::NonVegetarian => "non_vegetarian",
            DietType::Vegan => "vegan",
            DietType::Eggetarian => "eggetarian",
            DietType::Other => "other",
        }
    }

    fn from_db(value: &str) -> Self {
        match value {
            "vegetarian" => DietType::Vegetarian,
            "non_vegetarian" => DietType::NonVegetarian,
            "vegan" => DietType::Vegan,
            "eggetarian" => DietType::Eggetarian,
            _ => DietType::Other,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct UserProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub age: i32,
    pub mobile_number: Option<String>,
    pub gender: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_level: String,
    pub goal: String,
    pub diet_type: String,
    pub health_conditions: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub name: String,
    pub age: i32,
    pub mobile_number: Option<String>,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    pub diet_type: DietType,
    pub health_conditions: String,
}

impl From<UserProfileRow> for UserProfile {
    fn from(r: UserProfileRow) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            name: r.name,
            age: r.age,
            mobile_number: r.mobile_number,
            gender: Gender::from_db(&r.gender),
            height_cm: r.height_cm,
            weight_kg: r.weight_kg,
            activity_level: ActivityLevel::from_db(&r.activity_level),
            goal: Goal::from_db(&r.goal),
            diet_type: DietType::from_db(&r.diet_type),
            health_conditions: r.health_conditions,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DiabeticProfile {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_profile_id: Uuid,
    pub hba1c: f64,
    pub fasting_blood_sugar: f64,
    pub insulin_dependent: bool,
    pub medications: Option<String>,
    pub diagnosis_date: Date,
}
