//! Ladle Status Tool
//!
//! Provides runtime status information about the Ladle service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Recipe keeping and scaling instructions for AI assistants
pub const RECIPE_INSTRUCTIONS: &str = r#"
# Ladle Recipe Instructions

This guide explains how to keep and scale recipes with the Ladle tools.

## Ingredient Lines

Every ingredient is one line of free text. A line that starts with a number is
scaled when servings change; anything else is kept verbatim.

| Line | Quantity | Unit | Name |
|------|----------|------|------|
| `2 cups flour` | 2 | cups | flour |
| `1/2 tsp salt` | 0.5 | tsp | salt |
| `400g spaghetti` | 400 | g | spaghetti |
| `3 eggs` | 3 | eggs | |
| `salt to taste` | - | - | salt to taste |

Rules:
- The first word after the number is always read as the unit
- Scaled lines put the unit straight after the number: `3 eggs` halved is `1.5eggs`
- Write fractions as `1/2`, never `1 1/2` (use `1.5` instead)
- Mixed numbers and unicode fractions (½) are not recognized
- Scaled quantities are rounded to two decimals: `1/3 cup sugar` doubled is `0.67cup sugar`

---

## Storing a Recipe

```
create_recipe(
  name: "Spaghetti Carbonara",
  category: "Pasta",
  servings: 2,
  ingredients: ["200g spaghetti", "2 eggs", "50g pecorino", "salt to taste"]
)
```

## Scaling

- `get_recipe(id, servings: 6)` returns the stored recipe plus `scaled_ingredients`
- `scale_recipe(id, servings: 6)` returns only the scaled lines
- `scale_ingredients(ingredients, original_servings, servings)` scales lines that are not stored

Scaling never changes the stored recipe.

---

## Ratings and Favorites

- `rate_recipe(recipe_id, value 1-5, user_id?)`: a user's new rating replaces the old one
- `add_favorite(user_id, recipe_id)` / `remove_favorite` / `list_favorites(user_id)`

## Comments and Popularity

- `add_comment(recipe_id, body, user_id?)` / `list_comments(recipe_id)` / `delete_comment(id)`
- `recipe_analytics()`: store totals and the five newest recipes
- `popular_recipes(limit?)`: ranked by favorites + ratings + comments

## Kitchen Helpers

- `get_substitutes(ingredient, dietary?)`: e.g. `butter` with `vegan`
- `suggest_recipes(category?, ingredients?)`: stored recipes ranked by matching ingredients
- `analyze_nutrition(ingredients)`: rough per-serving estimate only
"#;

/// Ladle service status information
#[derive(Debug, Serialize)]
pub struct LadleStatus {
    pub name: String,
    pub build_number: u64,
    pub build_timestamp: String,
    pub version: String,
    pub database_path: String,
    pub database_size_bytes: Option<u64>,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
    pub as_of: String,
}

/// Status tracker that maintains service start time
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    pub fn get_status(&self) -> LadleStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        LadleStatus {
            name: build_info.name.to_string(),
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp.to_string(),
            version: build_info.version.to_string(),
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
            as_of: chrono::Local::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_for_missing_database() {
        let tracker = StatusTracker::new(PathBuf::from("/nonexistent/ladle.db"));
        let status = tracker.get_status();
        assert_eq!(status.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(status.database_path, "/nonexistent/ladle.db");
        assert!(status.database_size_bytes.is_none());
        assert_eq!(status.process_id, std::process::id());
        assert!(chrono::DateTime::parse_from_rfc3339(&status.as_of).is_ok());
    }

    #[test]
    fn test_instructions_examples_match_parser() {
        use crate::scaling::{parse_ingredient, scale_ingredients, ParsedIngredient};

        let rows = [
            ("2 cups flour", Some(2.0), "cups", "flour"),
            ("1/2 tsp salt", Some(0.5), "tsp", "salt"),
            ("400g spaghetti", Some(400.0), "g", "spaghetti"),
            ("3 eggs", Some(3.0), "eggs", ""),
            ("salt to taste", None, "", "salt to taste"),
        ];
        for (line, quantity, unit, name) in rows {
            assert!(RECIPE_INSTRUCTIONS.contains(&format!("`{}`", line)));
            let expected = ParsedIngredient {
                quantity,
                unit: unit.to_string(),
                name: name.to_string(),
            };
            assert_eq!(parse_ingredient(line), expected, "{}", line);
        }

        assert_eq!(scale_ingredients(&["3 eggs"], Some(2.0), 1.0), vec!["1.5eggs"]);
        assert!(RECIPE_INSTRUCTIONS.contains("`1.5eggs`"));
        assert_eq!(scale_ingredients(&["1/3 cup sugar"], Some(1.0), 2.0), vec!["0.67cup sugar"]);
        assert!(RECIPE_INSTRUCTIONS.contains("`0.67cup sugar`"));
    }

    #[test]
    fn test_instructions_mention_scaling_tools() {
        assert!(RECIPE_INSTRUCTIONS.contains("scale_recipe"));
        assert!(RECIPE_INSTRUCTIONS.contains("scale_ingredients"));
        assert!(RECIPE_INSTRUCTIONS.contains("popular_recipes"));
    }
}
