//! Servings scaling
//!
//! Rescales every measured ingredient line by new servings / original servings.

use super::formatter::format_ingredient;
use super::parser::parse_ingredient;

/// A validated scaling ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServingsScale {
    ratio: f64,
}

impl ServingsScale {
    /// Build a scale from serving counts
    ///
    /// Returns `None` when the original servings are missing, NaN or not
    /// positive; callers then leave ingredient lines untouched.
    pub fn new(original_servings: Option<f64>, new_servings: f64) -> Option<Self> {
        let original = original_servings.filter(|s| *s > 0.0)?;
        Some(Self {
            ratio: new_servings / original,
        })
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Scale one line
    ///
    /// Lines without a quantity, or whose scaled quantity is not finite,
    /// come back verbatim.
    pub fn apply(&self, line: &str) -> String {
        let parsed = parse_ingredient(line);
        let Some(quantity) = parsed.quantity else {
            return line.to_string();
        };

        let scaled = quantity * self.ratio;
        if !scaled.is_finite() {
            return line.to_string();
        }

        format_ingredient(&parsed.with_quantity(scaled))
    }
}

/// Scale a list of ingredient lines, preserving order and length
pub fn scale_ingredients<S: AsRef<str>>(
    lines: &[S],
    original_servings: Option<f64>,
    new_servings: f64,
) -> Vec<String> {
    match ServingsScale::new(original_servings, new_servings) {
        Some(scale) => lines.iter().map(|line| scale.apply(line.as_ref())).collect(),
        None => {
            tracing::warn!(
                ?original_servings,
                new_servings,
                "Original servings unusable, ingredients left unscaled"
            );
            lines.iter().map(|line| line.as_ref().to_string()).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doubling_servings_doubles_quantity() {
        assert_eq!(scale_ingredients(&["400g spaghetti"], Some(2.0), 4.0), vec!["800g spaghetti"]);
    }

    #[test]
    fn test_halving_with_fractions() {
        let lines = ["1/2 cup sugar", "3 eggs", "2 cups mixed vegetables"];
        assert_eq!(
            scale_ingredients(&lines, Some(4.0), 2.0),
            vec!["0.25cup sugar", "1.5eggs", "1cups mixed vegetables"]
        );
    }

    #[test]
    fn test_unmeasured_lines_untouched() {
        assert_eq!(scale_ingredients(&["salt to taste"], Some(2.0), 4.0), vec!["salt to taste"]);
        assert_eq!(scale_ingredients(&["1/2/3 cups flour"], Some(2.0), 4.0), vec!["1/2/3 cups flour"]);
        assert_eq!(scale_ingredients(&[""], Some(2.0), 4.0), vec![""]);
    }

    #[test]
    fn test_invalid_original_servings_is_identity() {
        let lines = ["400g spaghetti", "salt to taste", "1.50 cups stock"];
        assert_eq!(scale_ingredients(&lines, Some(0.0), 4.0), lines);
        assert_eq!(scale_ingredients(&lines, Some(-2.0), 4.0), lines);
        assert_eq!(scale_ingredients(&lines, None, 4.0), lines);
        assert_eq!(scale_ingredients(&lines, Some(f64::NAN), 4.0), lines);
    }

    #[test]
    fn test_same_servings_is_identity_for_normalized_lines() {
        let lines = [
            "400g spaghetti",
            "2 cups mixed vegetables",
            "0.5cup sugar",
            "salt to taste",
            "3 (400g) cans tomatoes",
        ];
        for servings in [1.0, 3.0, 7.5] {
            assert_eq!(scale_ingredients(&lines, Some(servings), servings), lines);
        }
    }

    #[test]
    fn test_same_servings_normalizes_numeric_lines() {
        assert_eq!(scale_ingredients(&["1.50 cups stock"], Some(2.0), 2.0), vec!["1.5cups stock"]);
        assert_eq!(scale_ingredients(&["1/2 cup milk"], Some(2.0), 2.0), vec!["0.5cup milk"]);
    }

    #[test]
    fn test_order_and_length_preserved() {
        let lines = vec![
            "salt to taste".to_string(),
            "100g butter".to_string(),
            "pinch of nutmeg".to_string(),
            "2 tbsp honey".to_string(),
        ];
        let scaled = scale_ingredients(&lines, Some(1.0), 3.0);
        assert_eq!(scaled, vec!["salt to taste", "300g butter", "pinch of nutmeg", "6tbsp honey"]);
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        assert_eq!(scale_ingredients(&["1 cup rice"], Some(3.0), 1.0), vec!["0.33cup rice"]);
    }

    #[test]
    fn test_non_finite_result_keeps_line() {
        assert_eq!(scale_ingredients(&["2 cups flour"], Some(1.0), f64::INFINITY), vec!["2 cups flour"]);
        assert_eq!(scale_ingredients(&["2 cups flour"], Some(1.0), f64::NAN), vec!["2 cups flour"]);
    }

    #[test]
    fn test_huge_finite_quantity_is_not_rounded_to_infinity() {
        let line = format!("1{}g flour", "0".repeat(307));
        let scaled = scale_ingredients(&[line.as_str()], Some(2.0), 2.0);
        assert_eq!(scaled, vec![line.clone()]);
        assert_eq!(parse_ingredient(&scaled[0]).quantity, Some(1e307));
    }

    #[test]
    fn test_servings_scale_ratio() {
        assert_eq!(ServingsScale::new(Some(4.0), 6.0).map(|s| s.ratio()), Some(1.5));
        assert_eq!(ServingsScale::new(Some(0.0), 6.0), None);
        assert_eq!(ServingsScale::new(None, 6.0), None);
    }
}
