//! Recipe Suggestion and Nutrition Estimate Tools
//!
//! Naive rule-based helpers; nothing here calls out to a model.

use serde::Serialize;

use crate::db::Database;
use crate::models::Recipe;
use super::recipes::{summarize, RecipeSummary};

pub const DEFAULT_SUGGESTION_LIMIT: i64 = 5;
const MAX_SUGGESTION_LIMIT: i64 = 20;

#[derive(Debug, Serialize)]
pub struct Suggestion {
    #[serde(flatten)]
    pub recipe: RecipeSummary,
    /// Requested ingredients found in the recipe's ingredient lines
    pub matched_ingredients: Vec<String>,
}

/// Response for suggest_recipes
#[derive(Debug, Serialize)]
pub struct SuggestRecipesResponse {
    pub category: Option<String>,
    pub ingredients: Vec<String>,
    pub suggestions: Vec<Suggestion>,
    pub candidates: usize,
}

/// Rough per-serving nutrition estimate
#[derive(Debug, Serialize)]
pub struct NutritionEstimate {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub ingredient_count: usize,
    pub estimated: bool,
}

/// Requested ingredients that appear in any of the recipe's lines
fn matched_ingredients(recipe: &Recipe, wanted: &[String]) -> Vec<String> {
    let lines: Vec<String> = recipe.ingredients.iter().map(|l| l.to_lowercase()).collect();
    wanted
        .iter()
        .filter(|word| lines.iter().any(|line| line.contains(word.as_str())))
        .cloned()
        .collect()
}

/// Suggest stored recipes by category and ingredients on hand
pub fn suggest_recipes(
    db: &Database,
    category: Option<&str>,
    ingredients: &[String],
    limit: i64,
) -> Result<SuggestRecipesResponse, String> {
    let limit = limit.clamp(1, MAX_SUGGESTION_LIMIT) as usize;
    let category = category.map(str::trim).filter(|c| !c.is_empty());
    let wanted: Vec<String> = ingredients
        .iter()
        .map(|i| i.trim().to_lowercase())
        .filter(|i| !i.is_empty())
        .collect();

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let recipes = Recipe::all_in_category(&conn, category)
        .map_err(|e| format!("Failed to load recipes: {}", e))?;
    let candidates = recipes.len();

    let mut ranked: Vec<(Recipe, Vec<String>)> = recipes
        .into_iter()
        .map(|recipe| {
            let matched = matched_ingredients(&recipe, &wanted);
            (recipe, matched)
        })
        .collect();
    // Stable sort keeps insertion order among equal matches
    ranked.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

    let suggestions = ranked
        .into_iter()
        .take(limit)
        .map(|(recipe, matched_ingredients)| {
            Ok(Suggestion {
                recipe: summarize(&conn, recipe)?,
                matched_ingredients,
            })
        })
        .collect::<Result<Vec<_>, String>>()?;

    tracing::debug!(
        candidates,
        returned = suggestions.len(),
        "Suggested recipes"
    );

    Ok(SuggestRecipesResponse {
        category: category.map(str::to_string),
        ingredients: wanted,
        suggestions,
        candidates,
    })
}

/// Fixed placeholder estimate; real nutrient lookup is not available
pub fn analyze_nutrition(ingredients: &[String]) -> NutritionEstimate {
    NutritionEstimate {
        calories: 200.0,
        protein: 10.0,
        carbs: 30.0,
        fat: 5.0,
        fiber: 3.0,
        ingredient_count: ingredients.iter().filter(|l| !l.trim().is_empty()).count(),
        estimated: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::RecipeCreate;

    fn recipe(name: &str, category: &str, ingredients: &[&str]) -> RecipeCreate {
        RecipeCreate {
            name: name.to_string(),
            category: Some(category.to_string()),
            description: None,
            servings: 4.0,
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            instructions: None,
            notes: None,
        }
    }

    fn setup() -> Database {
        let db = Database::in_memory().unwrap();
        db.with_conn(|conn| {
            run_migrations(conn)?;
            Recipe::create(conn, &recipe("Pancakes", "Breakfast", &["2 cups flour", "2 eggs", "1 cup milk"]))?;
            Recipe::create(conn, &recipe("Omelette", "Breakfast", &["3 eggs", "30g cheese"]))?;
            Recipe::create(conn, &recipe("Carbonara", "Italian", &["200g spaghetti", "2 eggs", "50g Pecorino cheese"]))?;
            Ok(())
        })
        .unwrap();
        db
    }

    #[test]
    fn test_suggest_by_category() {
        let db = setup();
        let response = suggest_recipes(&db, Some("breakfast"), &[], DEFAULT_SUGGESTION_LIMIT).unwrap();
        assert_eq!(response.candidates, 2);
        let names: Vec<_> = response.suggestions.iter().map(|s| s.recipe.name.as_str()).collect();
        assert_eq!(names, vec!["Pancakes", "Omelette"]);
    }

    #[test]
    fn test_suggest_ranks_by_matched_ingredients() {
        let db = setup();
        let wanted = vec!["Eggs".to_string(), "cheese".to_string()];
        let response = suggest_recipes(&db, None, &wanted, DEFAULT_SUGGESTION_LIMIT).unwrap();

        assert_eq!(response.suggestions.len(), 3);
        assert_eq!(response.suggestions[0].recipe.name, "Omelette");
        assert_eq!(response.suggestions[0].matched_ingredients, vec!["eggs", "cheese"]);
        assert_eq!(response.suggestions[1].recipe.name, "Carbonara");
        assert_eq!(response.suggestions[2].matched_ingredients, vec!["eggs"]);
    }

    #[test]
    fn test_suggest_limit_is_clamped() {
        let db = setup();
        let response = suggest_recipes(&db, None, &[], 0).unwrap();
        assert_eq!(response.suggestions.len(), 1);
        let response = suggest_recipes(&db, None, &[], 1000).unwrap();
        assert_eq!(response.suggestions.len(), 3);
    }

    #[test]
    fn test_analyze_nutrition_stub() {
        let lines = vec!["2 cups flour".to_string(), " ".to_string(), "1 egg".to_string()];
        let estimate = analyze_nutrition(&lines);
        assert_eq!(estimate.calories, 200.0);
        assert_eq!(estimate.fiber, 3.0);
        assert_eq!(estimate.ingredient_count, 2);
        assert!(estimate.estimated);
    }
}
