//! Scaling MCP Tools
//!
//! Stateless tools over the servings scaler: inspect one ingredient line or
//! scale an ad-hoc ingredient list.

use serde::Serialize;

use crate::scaling::{parse_ingredient, scale_ingredients, ServingsScale, UnitCategory};

/// Response for parse_ingredient
#[derive(Debug, Serialize)]
pub struct ParseIngredientResponse {
    pub line: String,
    pub quantity: Option<f64>,
    pub unit: String,
    pub name: String,
    pub category: Option<UnitCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grams: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milliliters: Option<f64>,
}

/// Response for scale_ingredients
#[derive(Debug, Serialize)]
pub struct ScaleIngredientsResponse {
    pub original_servings: Option<f64>,
    pub servings: f64,
    /// `None` when the serving counts give no usable ratio
    pub ratio: Option<f64>,
    pub scaled: bool,
    pub ingredients: Vec<String>,
}

pub fn parse_ingredient_line(line: &str) -> ParseIngredientResponse {
    let parsed = parse_ingredient(line);

    ParseIngredientResponse {
        line: line.to_string(),
        quantity: parsed.quantity,
        category: parsed.category(),
        grams: parsed.grams(),
        milliliters: parsed.milliliters(),
        unit: parsed.unit,
        name: parsed.name,
    }
}

pub fn scale_ingredient_lines(
    lines: &[String],
    original_servings: Option<f64>,
    servings: f64,
) -> ScaleIngredientsResponse {
    let ratio = ServingsScale::new(original_servings, servings)
        .map(|scale| scale.ratio())
        .filter(|ratio| ratio.is_finite());

    ScaleIngredientsResponse {
        original_servings,
        servings,
        ratio,
        scaled: ratio.is_some(),
        ingredients: scale_ingredients(lines, original_servings, servings),
    }
}
