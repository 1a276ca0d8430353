//! Daily calorie and macronutrient targets derived from a health profile.
//!
//! BMR uses the Mifflin-St Jeor equation (Mifflin et al., 1990):
//! `10 * weight_kg + 6.25 * height_cm - 5 * age + s`, with `s = +5` for men
//! and `s = -161` for women. TDEE is BMR times an activity factor; the goal
//! then shifts it by a fixed daily surplus or deficit.

use serde::Serialize;

use super::repo_types::{ActivityLevel, Gender, Goal, UserProfile};
use crate::meals::nutrition::{round2, Nutrients};

pub const MIN_DAILY_CALORIES: f64 = 1200.0;
const GOAL_DELTA_KCAL: f64 = 500.0;

const PROTEIN_SHARE: f64 = 0.25;
const CARBS_SHARE: f64 = 0.50;
const FATS_SHARE: f64 = 0.25;

const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARBS: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

const FIBER_G_PER_1000_KCAL: f64 = 14.0;
const SUGAR_SHARE: f64 = 0.10;
const SUGAR_SHARE_DIABETIC: f64 = 0.05;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    pub bmr: f64,
    pub tdee: f64,
    /// Calories, macros and fiber to aim for; `sugar` is an upper limit.
    pub daily: Nutrients,
}

pub fn activity_factor(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 1.2,
        ActivityLevel::Light => 1.375,
        ActivityLevel::Moderate => 1.55,
        ActivityLevel::Active => 1.725,
        ActivityLevel::VeryActive => 1.9,
    }
}

fn goal_delta(goal: Goal) -> f64 {
    match goal {
        Goal::LoseWeight => -GOAL_DELTA_KCAL,
        Goal::Maintain => 0.0,
        Goal::GainWeight => GOAL_DELTA_KCAL,
    }
}

pub fn mifflin_st_jeor(weight_kg: f64, height_cm: f64, age: i32, gender: Gender) -> f64 {
    let offset = match gender {
        Gender::Male => 5.0,
        Gender::Female => -161.0,
    };
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age) + offset
}

pub fn recommend(profile: &UserProfile, diabetic: bool) -> Recommendation {
    let bmr = mifflin_st_jeor(
        profile.weight_kg,
        profile.height_cm,
        profile.age,
        profile.gender,
    );
    let tdee = bmr * activity_factor(profile.activity_level);
    let calories = (tdee + goal_delta(profile.goal)).max(MIN_DAILY_CALORIES);
    let sugar_share = if diabetic {
        SUGAR_SHARE_DIABETIC
    } else {
        SUGAR_SHARE
    };

    Recommendation {
        bmr: round2(bmr),
        tdee: round2(tdee),
        daily: Nutrients {
            calories,
            protein: calories * PROTEIN_SHARE / KCAL_PER_G_PROTEIN,
            carbs: calories * CARBS_SHARE / KCAL_PER_G_CARBS,
            fats: calories * FATS_SHARE / KCAL_PER_G_FAT,
            sugar: calories * sugar_share / KCAL_PER_G_CARBS,
            fiber: calories / 1000.0 * FIBER_G_PER_1000_KCAL,
        }
        .rounded(),
    }
}
