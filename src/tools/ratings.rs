//! Rating MCP Tools

use serde::Serialize;

use crate::db::Database;
use crate::models::{Rating, RatingSummary, Recipe, MAX_RATING, MIN_RATING};

/// Response for rate_recipe
#[derive(Debug, Serialize)]
pub struct RateRecipeResponse {
    pub rating: Rating,
    pub summary: RatingSummary,
}

/// Response for get_recipe_rating
#[derive(Debug, Serialize)]
pub struct RecipeRatingResponse {
    pub recipe_id: i64,
    pub average: f64,
    pub count: i64,
    pub ratings: Vec<Rating>,
}

/// Rate a recipe 1-5; a user's new rating replaces their old one
pub fn rate_recipe(
    db: &Database,
    recipe_id: i64,
    value: i64,
    user_id: Option<&str>,
) -> Result<RateRecipeResponse, String> {
    if !(MIN_RATING..=MAX_RATING).contains(&value) {
        return Err(format!(
            "Rating must be between {} and {}, got {}",
            MIN_RATING, MAX_RATING, value
        ));
    }
    let user_id = user_id.map(str::trim).filter(|u| !u.is_empty());

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let recipe = Recipe::get_by_id(&conn, recipe_id)
        .map_err(|e| format!("Database error checking recipe: {}", e))?;
    if recipe.is_none() {
        return Err(format!("Recipe not found with id: {}", recipe_id));
    }

    let rating = Rating::upsert(&conn, recipe_id, user_id, value)
        .map_err(|e| format!("Failed to save rating: {}", e))?;

    let summary = Rating::summary(&conn, recipe_id)
        .map_err(|e| format!("Failed to summarize ratings: {}", e))?;

    Ok(RateRecipeResponse { rating, summary })
}

/// Average, count and individual ratings of a recipe; `None` if it does not exist
pub fn get_recipe_rating(db: &Database, recipe_id: i64) -> Result<Option<RecipeRatingResponse>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    if Recipe::get_by_id(&conn, recipe_id)
        .map_err(|e| format!("Database error checking recipe: {}", e))?
        .is_none()
    {
        return Ok(None);
    }

    let summary = Rating::summary(&conn, recipe_id)
        .map_err(|e| format!("Failed to summarize ratings: {}", e))?;
    let ratings = Rating::get_for_recipe(&conn, recipe_id)
        .map_err(|e| format!("Failed to get ratings: {}", e))?;

    Ok(Some(RecipeRatingResponse {
        recipe_id,
        average: summary.average,
        count: summary.count,
        ratings,
    }))
}
