//! Servings scaling module
//!
//! Parses free-text ingredient lines, rescales their quantities to a new
//! serving count and formats them back for display.

pub mod formatter;
pub mod parser;
pub mod scaler;
pub mod units;

pub use formatter::{format_ingredient, format_quantity, round_quantity};
pub use parser::{parse_ingredient, parse_quantity, ParsedIngredient, QuantityError};
pub use scaler::{scale_ingredients, ServingsScale};
pub use units::{categorize_unit, grams_per_unit, ml_per_unit, UnitCategory};
