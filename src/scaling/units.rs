//! Unit categories and conversion constants
//!
//! Classifies the unit token of a parsed ingredient line and converts
//! weight and volume quantities to grams and milliliters.

use serde::Serialize;

/// Category of a unit token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    /// Weight/mass units (g, oz, lb, kg)
    Weight,
    /// Volume units (ml, tbsp, cup, etc.)
    Volume,
    /// Discrete items, including a bare number with no unit ("3 eggs")
    Count,
    /// Anything else (pinch, clove, can, large)
    Custom,
}

impl UnitCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitCategory::Weight => "weight",
            UnitCategory::Volume => "volume",
            UnitCategory::Count => "count",
            UnitCategory::Custom => "custom",
        }
    }
}

// ============================================================================
// Volume Conversion Constants (to milliliters)
// ============================================================================

pub const ML_PER_TSP: f64 = 4.92892;
pub const ML_PER_TBSP: f64 = 14.7868;
pub const ML_PER_FL_OZ: f64 = 29.5735;
/// US cup
pub const ML_PER_CUP: f64 = 236.588;
pub const ML_PER_PINT: f64 = 473.176;
pub const ML_PER_QUART: f64 = 946.353;
pub const ML_PER_LITER: f64 = 1000.0;
pub const ML_PER_GALLON: f64 = 3785.41;

// ============================================================================
// Weight Conversion Constants (to grams)
// ============================================================================

pub const G_PER_MG: f64 = 0.001;
pub const G_PER_KG: f64 = 1000.0;
pub const G_PER_OZ: f64 = 28.3495;
pub const G_PER_LB: f64 = 453.592;

// ============================================================================
// Unit Recognition
// ============================================================================

/// Conversion factor to grams for a weight unit
pub fn grams_per_unit(unit: &str) -> Option<f64> {
    match unit.trim().to_lowercase().as_str() {
        "g" | "gr" | "gram" | "grams" | "gramme" | "grammes" => Some(1.0),
        "mg" | "milligram" | "milligrams" => Some(G_PER_MG),
        "kg" | "kilo" | "kilos" | "kilogram" | "kilograms" => Some(G_PER_KG),
        "oz" | "ounce" | "ounces" => Some(G_PER_OZ),
        "lb" | "lbs" | "pound" | "pounds" => Some(G_PER_LB),
        _ => None,
    }
}

/// Conversion factor to milliliters for a volume unit
pub fn ml_per_unit(unit: &str) -> Option<f64> {
    match unit.trim().to_lowercase().as_str() {
        "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => Some(1.0),
        "l" | "liter" | "liters" | "litre" | "litres" => Some(ML_PER_LITER),
        "tsp" | "tsps" | "teaspoon" | "teaspoons" => Some(ML_PER_TSP),
        "tbsp" | "tbsps" | "tbs" | "tablespoon" | "tablespoons" => Some(ML_PER_TBSP),
        "floz" => Some(ML_PER_FL_OZ),
        "cup" | "cups" => Some(ML_PER_CUP),
        "pint" | "pints" => Some(ML_PER_PINT),
        "quart" | "quarts" | "qt" => Some(ML_PER_QUART),
        "gallon" | "gallons" | "gal" => Some(ML_PER_GALLON),
        _ => None,
    }
}

/// Determine the category of a unit token
pub fn categorize_unit(unit: &str) -> UnitCategory {
    let lower = unit.trim().to_lowercase();

    if lower.is_empty() {
        return UnitCategory::Count;
    }
    if grams_per_unit(&lower).is_some() {
        return UnitCategory::Weight;
    }
    if ml_per_unit(&lower).is_some() {
        return UnitCategory::Volume;
    }

    match lower.as_str() {
        "each" | "piece" | "pieces" | "item" | "items" | "count" | "unit" | "units" => {
            UnitCategory::Count
        }
        _ => UnitCategory::Custom,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_weight_units() {
        assert_eq!(categorize_unit("g"), UnitCategory::Weight);
        assert_eq!(categorize_unit("Grams"), UnitCategory::Weight);
        assert_eq!(categorize_unit("oz"), UnitCategory::Weight);
        assert_eq!(categorize_unit("lbs"), UnitCategory::Weight);
        assert_eq!(categorize_unit("kg"), UnitCategory::Weight);
    }

    #[test]
    fn test_categorize_volume_units() {
        assert_eq!(categorize_unit("ml"), UnitCategory::Volume);
        assert_eq!(categorize_unit("tbsp"), UnitCategory::Volume);
        assert_eq!(categorize_unit("cups"), UnitCategory::Volume);
        assert_eq!(categorize_unit("TSP"), UnitCategory::Volume);
    }

    #[test]
    fn test_categorize_count_and_custom() {
        assert_eq!(categorize_unit(""), UnitCategory::Count);
        assert_eq!(categorize_unit("pieces"), UnitCategory::Count);
        assert_eq!(categorize_unit("pinch"), UnitCategory::Custom);
        assert_eq!(categorize_unit("cloves"), UnitCategory::Custom);
        assert_eq!(categorize_unit("large"), UnitCategory::Custom);
    }

    #[test]
    fn test_conversion_factors() {
        assert_eq!(grams_per_unit("g"), Some(1.0));
        assert_eq!(grams_per_unit("lb"), Some(G_PER_LB));
        assert_eq!(grams_per_unit("cup"), None);
        assert_eq!(ml_per_unit("cup"), Some(ML_PER_CUP));
        assert_eq!(ml_per_unit("l"), Some(ML_PER_LITER));
        assert_eq!(ml_per_unit("g"), None);
    }

    #[test]
    fn test_category_as_str() {
        assert_eq!(UnitCategory::Weight.as_str(), "weight");
        assert_eq!(UnitCategory::Custom.as_str(), "custom");
    }
}
