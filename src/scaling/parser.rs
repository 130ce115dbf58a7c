//! Ingredient line parsing
//!
//! Splits a free-text ingredient line into quantity, unit and name.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::units::{categorize_unit, grams_per_unit, ml_per_unit, UnitCategory};

/// Leading numeric token, optional alphabetic unit, then the rest of the line.
/// `.` does not cross a newline, so a line with an embedded newline after
/// the number does not match.
static INGREDIENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9./]+)\s*([a-zA-Z]*)\s*(.*)$").expect("ingredient pattern is valid")
});

/// Why a numeric token could not be turned into a quantity
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("'{0}' is not a number")]
    Malformed(String),

    #[error("'{0}' has more than one '/'")]
    MultipleSlashes(String),

    #[error("'{0}' divides by zero")]
    ZeroDenominator(String),

    #[error("'{0}' is out of range")]
    NotFinite(String),
}

/// An ingredient line split into its parts
///
/// `quantity` is `None` when the line has no usable leading number; in that
/// case `unit` is empty and `name` holds the original line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIngredient {
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub name: String,
}

impl ParsedIngredient {
    /// A line with no quantity, kept as-is
    pub fn unparsed(text: &str) -> Self {
        Self {
            quantity: None,
            unit: String::new(),
            name: text.to_string(),
        }
    }

    /// Same unit and name, different quantity
    pub fn with_quantity(self, quantity: f64) -> Self {
        Self {
            quantity: Some(quantity),
            ..self
        }
    }

    pub fn is_measured(&self) -> bool {
        self.quantity.is_some()
    }

    /// Category of the unit token, `None` for unparsed lines
    pub fn category(&self) -> Option<UnitCategory> {
        self.quantity.map(|_| categorize_unit(&self.unit))
    }

    /// Quantity in grams when the unit is a weight unit
    pub fn grams(&self) -> Option<f64> {
        let quantity = self.quantity?;
        grams_per_unit(&self.unit).map(|factor| quantity * factor)
    }

    /// Quantity in milliliters when the unit is a volume unit
    pub fn milliliters(&self) -> Option<f64> {
        let quantity = self.quantity?;
        ml_per_unit(&self.unit).map(|factor| quantity * factor)
    }
}

/// Interpret a numeric token made of digits, `.` and `/`
///
/// A token with one `/` is a fraction. More than one `/`, a zero
/// denominator, or sides that are not decimals are rejected.
pub fn parse_quantity(token: &str) -> Result<f64, QuantityError> {
    let value = match token.split_once('/') {
        Some((numerator, denominator)) => {
            if denominator.contains('/') {
                return Err(QuantityError::MultipleSlashes(token.to_string()));
            }
            let numerator = parse_decimal(numerator, token)?;
            let denominator = parse_decimal(denominator, token)?;
            if denominator == 0.0 {
                return Err(QuantityError::ZeroDenominator(token.to_string()));
            }
            numerator / denominator
        }
        None => parse_decimal(token, token)?,
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(QuantityError::NotFinite(token.to_string()))
    }
}

fn parse_decimal(part: &str, token: &str) -> Result<f64, QuantityError> {
    part.parse::<f64>()
        .map_err(|_| QuantityError::Malformed(token.to_string()))
}

/// Parse one ingredient line
///
/// Examples:
/// - "400g spaghetti" -> quantity 400, unit "g", name "spaghetti"
/// - "2 cups mixed vegetables" -> quantity 2, unit "cups", name "mixed vegetables"
/// - "1/2 cup sugar" -> quantity 0.5, unit "cup", name "sugar"
/// - "salt to taste" -> no quantity, name "salt to taste"
pub fn parse_ingredient(line: &str) -> ParsedIngredient {
    if line.is_empty() {
        return ParsedIngredient::unparsed(line);
    }

    let Some(caps) = INGREDIENT_PATTERN.captures(line) else {
        return ParsedIngredient::unparsed(line);
    };

    match parse_quantity(&caps[1]) {
        Ok(quantity) => ParsedIngredient {
            quantity: Some(quantity),
            unit: caps[2].to_string(),
            name: caps[3].to_string(),
        },
        Err(e) => {
            tracing::debug!(line, error = %e, "Ingredient quantity not usable, keeping line as-is");
            ParsedIngredient::unparsed(line)
        }
    }
}
