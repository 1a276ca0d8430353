use serde::{Deserialize, Deserializer, Serialize};

/// Portion units a meal can be logged in.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    G,
    Kg,
    Ml,
    L,
    Cup,
    Bowl,
    Piece,
    Tbsp,
    Tsp,
    Slice,
    Other,
}

/// Grams per one unit. `Other` is the fallback for any token not listed here.
pub const UNIT_TO_GRAMS: [(Unit, f64); 11] = [
    (Unit::G, 1.0),
    (Unit::Kg, 1000.0),
    (Unit::Ml, 1.0),
    (Unit::L, 1000.0),
    (Unit::Cup, 240.0),
    (Unit::Bowl, 300.0),
    (Unit::Piece, 100.0),
    (Unit::Tbsp, 15.0),
    (Unit::Tsp, 5.0),
    (Unit::Slice, 30.0),
    (Unit::Other, 100.0),
];

impl Unit {
    pub const FALLBACK: Unit = Unit::Other;

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::G => "g",
            Unit::Kg => "kg",
            Unit::Ml => "ml",
            Unit::L => "l",
            Unit::Cup => "cup",
            Unit::Bowl => "bowl",
            Unit::Piece => "piece",
            Unit::Tbsp => "tbsp",
            Unit::Tsp => "tsp",
            Unit::Slice => "slice",
            Unit::Other => "other",
        }
    }

    /// Case-insensitive lookup; unknown tokens resolve to [`Unit::FALLBACK`].
    pub fn parse_lenient(token: &str) -> Unit {
        let token = token.trim().to_lowercase();
        UNIT_TO_GRAMS
            .iter()
            .map(|(unit, _)| *unit)
            .find(|unit| unit.as_str() == token)
            .unwrap_or(Self::FALLBACK)
    }

    pub fn grams(&self) -> f64 {
        UNIT_TO_GRAMS
            .iter()
            .find(|(unit, _)| unit == self)
            .map(|(_, grams)| *grams)
            .unwrap_or(100.0)
    }
}

impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = Option::<String>::deserialize(deserializer)?;
        Ok(token.map_or_else(Unit::default, |t| Unit::parse_lenient(&t)))
    }
}

/// Gram-equivalent factor for a raw unit token.
pub fn grams_per_unit(unit: &str) -> f64 {
    Unit::parse_lenient(unit).grams()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_units_return_table_values() {
        let expected = [
            ("g", 1.0),
            ("kg", 1000.0),
            ("ml", 1.0),
            ("l", 1000.0),
            ("cup", 240.0),
            ("bowl", 300.0),
            ("piece", 100.0),
            ("tbsp", 15.0),
            ("tsp", 5.0),
            ("slice", 30.0),
            ("other", 100.0),
        ];
        for (token, grams) in expected {
            assert_eq!(grams_per_unit(token), grams, "unit {token}");
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(grams_per_unit("CUP"), 240.0);
        assert_eq!(grams_per_unit("Tbsp"), 15.0);
        assert_eq!(Unit::parse_lenient(" KG "), Unit::Kg);
    }

    #[test]
    fn unknown_units_fall_back_to_other() {
        for token in ["handful", "", "cups", "oz"] {
            assert_eq!(grams_per_unit(token), 100.0, "unit {token:?}");
            assert_eq!(Unit::parse_lenient(token), Unit::Other);
        }
    }

    #[test]
    fn deserializes_unknown_token_as_other() {
        let unit: Unit = serde_json::from_str("\"pinch\"").unwrap();
        assert_eq!(unit, Unit::Other);
        let unit: Unit = serde_json::from_str("\"Bowl\"").unwrap();
        assert_eq!(unit, Unit::Bowl);
        assert_eq!(serde_json::to_string(&Unit::Tsp).unwrap(), "\"tsp\"");
    }

    #[test]
    fn null_unit_means_grams() {
        let unit: Unit = serde_json::from_str("null").unwrap();
        assert_eq!(unit, Unit::G);
    }
}
