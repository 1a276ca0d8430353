//! Portion scaling and daily aggregation of nutrient values.
//!
//! Catalog values are per 100 g. A logged portion is converted to grams via
//! the unit table, every nutrient is scaled linearly and rounded to two
//! decimals. Daily totals are plain sums over the stored rows.

use serde::{Deserialize, Serialize};

use super::units::Unit;

/// The six tracked nutrient values, either per 100 g or for a concrete portion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub sugar: f64,
    pub fiber: f64,
}

/// Nutrient columns as stored on a meal row; any of them may be NULL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggedNutrients {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
    pub sugar: Option<f64>,
    pub fiber: Option<f64>,
}

/// Totals for one user and one calendar date. Never stored.
pub type DailySummary = Nutrients;

impl Nutrients {
    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            calories: f(self.calories),
            protein: f(self.protein),
            carbs: f(self.carbs),
            fats: f(self.fats),
            sugar: f(self.sugar),
            fiber: f(self.fiber),
        }
    }

    pub fn rounded(self) -> Self {
        self.map(round2)
    }

    /// Field-wise `self - other`, used for "remaining budget" style views.
    pub fn minus(&self, other: &Nutrients) -> Nutrients {
        Nutrients {
            calories: self.calories - other.calories,
            protein: self.protein - other.protein,
            carbs: self.carbs - other.carbs,
            fats: self.fats - other.fats,
            sugar: self.sugar - other.sugar,
            fiber: self.fiber - other.fiber,
        }
        .rounded()
    }
}

impl From<Nutrients> for LoggedNutrients {
    fn from(n: Nutrients) -> Self {
        Self {
            calories: Some(n.calories),
            protein: Some(n.protein),
            carbs: Some(n.carbs),
            fats: Some(n.fats),
            sugar: Some(n.sugar),
            fiber: Some(n.fiber),
        }
    }
}

impl LoggedNutrients {
    /// NULL columns count as zero.
    pub fn or_zero(&self) -> Nutrients {
        Nutrients {
            calories: self.calories.unwrap_or(0.0),
            protein: self.protein.unwrap_or(0.0),
            carbs: self.carbs.unwrap_or(0.0),
            fats: self.fats.unwrap_or(0.0),
            sugar: self.sugar.unwrap_or(0.0),
            fiber: self.fiber.unwrap_or(0.0),
        }
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn weight_in_grams(quantity: f64, unit: Unit) -> f64 {
    quantity * unit.grams()
}

/// Scales per-100g values to a portion of `quantity` `unit`s.
///
/// No validation happens here: zero yields zeros and negative quantities
/// scale to negative values.
pub fn scale(per_100g: &Nutrients, quantity: f64, unit: Unit) -> Nutrients {
    let weight_g = weight_in_grams(quantity, unit);
    per_100g.map(|value| round2(value * weight_g / 100.0))
}

/// Sums stored meal rows into a [`DailySummary`]. An empty input gives zeros.
pub fn sum_daily<'a, I>(rows: I) -> DailySummary
where
    I: IntoIterator<Item = &'a LoggedNutrients>,
{
    rows.into_iter()
        .map(LoggedNutrients::or_zero)
        .fold(Nutrients::default(), |acc, n| Nutrients {
            calories: acc.calories + n.calories,
            protein: acc.protein + n.protein,
            carbs: acc.carbs + n.carbs,
            fats: acc.fats + n.fats,
            sugar: acc.sugar + n.sugar,
            fiber: acc.fiber + n.fiber,
        })
        .rounded()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rice() -> Nutrients {
        Nutrients {
            calories: 130.0,
            protein: 2.7,
            carbs: 28.0,
            fats: 0.3,
            sugar: 0.0,
            fiber: 0.4,
        }
    }

    #[test]
    fn two_cups_of_rice() {
        let n = scale(&rice(), 2.0, Unit::Cup);
        assert_eq!(weight_in_grams(2.0, Unit::Cup), 480.0);
        assert_eq!(n.calories, 624.0);
        assert_eq!(n.protein, 12.96);
        assert_eq!(n.carbs, 134.4);
        assert_eq!(n.fats, 1.44);
        assert_eq!(n.sugar, 0.0);
        assert_eq!(n.fiber, 1.92);
    }

    #[test]
    fn scaling_is_linear_in_quantity() {
        for unit in [Unit::G, Unit::Tbsp, Unit::Slice, Unit::Bowl] {
            let single = scale(&rice(), 1.3, unit);
            let double = scale(&rice(), 2.6, unit);
            for (a, b) in [
                (single.calories, double.calories),
                (single.protein, double.protein),
                (single.carbs, double.carbs),
                (single.fats, double.fats),
                (single.sugar, double.sugar),
                (single.fiber, double.fiber),
            ] {
                assert!((b - 2.0 * a).abs() <= 0.011, "{unit:?}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn zero_quantity_scales_to_zero() {
        assert_eq!(scale(&rice(), 0.0, Unit::Kg), Nutrients::default());
    }

    #[test]
    fn negative_quantity_scales_negative() {
        let n = scale(&rice(), -1.0, Unit::G);
        assert_eq!(n.calories, -1.3);
    }

    #[test]
    fn results_are_rounded_to_two_decimals() {
        let n = scale(&rice(), 1.0, Unit::Tsp);
        assert_eq!(n.calories, 6.5);
        assert_eq!(n.fiber, 0.02);
        let odd = scale(&Nutrients { calories: 1.0 / 3.0, ..Default::default() }, 1.0, Unit::Kg);
        assert_eq!(odd.calories, 3.33);
    }

    #[test]
    fn empty_day_sums_to_zero() {
        let rows: Vec<LoggedNutrients> = Vec::new();
        assert_eq!(sum_daily(&rows), DailySummary::default());
    }

    #[test]
    fn null_columns_are_ignored_in_sums() {
        let rows = vec![
            LoggedNutrients {
                calories: Some(100.5),
                ..Default::default()
            },
            LoggedNutrients {
                calories: Some(200.25),
                ..Default::default()
            },
        ];
        let total = sum_daily(&rows);
        assert_eq!(total.calories, 300.75);
        assert_eq!(total.protein, 0.0);
        assert_eq!(total.carbs, 0.0);
        assert_eq!(total.fats, 0.0);
        assert_eq!(total.sugar, 0.0);
        assert_eq!(total.fiber, 0.0);
    }

    #[test]
    fn minus_gives_remaining_budget() {
        let target = Nutrients {
            calories: 2000.0,
            protein: 100.0,
            ..Default::default()
        };
        let eaten = Nutrients {
            calories: 624.0,
            protein: 12.96,
            ..Default::default()
        };
        let left = target.minus(&eaten);
        assert_eq!(left.calories, 1376.0);
        assert_eq!(left.protein, 87.04);
    }
}
