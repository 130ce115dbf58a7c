//! Ingredient line formatting
//!
//! Turns a `ParsedIngredient` back into display text.

use super::parser::ParsedIngredient;

/// Magnitude from which every `f64` is a whole number
const WHOLE_NUMBER_THRESHOLD: f64 = 4_503_599_627_370_496.0; // 2^52

/// Round to 2 decimal places, halves rounding up
///
/// Negative zero comes back as positive zero so it never prints as "-0".
/// Quantities at or above 2^52 have no fraction and are returned as-is,
/// which also keeps `quantity * 100` from overflowing.
pub fn round_quantity(quantity: f64) -> f64 {
    if quantity.abs() >= WHOLE_NUMBER_THRESHOLD {
        return quantity;
    }
    let rounded = (quantity * 100.0 + 0.5).floor() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Shortest display form of a rounded quantity ("800", "0.5", "0.33")
pub fn format_quantity(quantity: f64) -> String {
    round_quantity(quantity).to_string()
}

/// Format a parsed ingredient for display
///
/// The unit sits directly against the number ("600g"), the name follows
/// after a space. Lines without a quantity print their name unchanged.
pub fn format_ingredient(parsed: &ParsedIngredient) -> String {
    let Some(quantity) = parsed.quantity else {
        return parsed.name.clone();
    };

    let qty = format_quantity(quantity);

    match (parsed.unit.is_empty(), parsed.name.is_empty()) {
        (false, false) => format!("{}{} {}", qty, parsed.unit, parsed.name),
        (false, true) => format!("{}{}", qty, parsed.unit),
        (true, false) => format!("{} {}", qty, parsed.name),
        (true, true) => qty,
    }
}
