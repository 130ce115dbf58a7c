//! Recipe MCP Tools
//!
//! Tools for managing recipes and viewing them at a different serving count.

use rusqlite::Connection;
use serde::Serialize;

use crate::db::Database;
use crate::models::{
    Comment, Favorite, Rating, RatingSummary, Recipe, RecipeCreate, RecipeFilter, RecipeUpdate,
};
use crate::scaling::scale_ingredients;

/// Response for create_recipe
#[derive(Debug, Serialize)]
pub struct CreateRecipeResponse {
    pub id: i64,
    pub name: String,
    pub servings: f64,
    pub ingredient_count: usize,
    pub created_at: String,
}

/// Full recipe detail, optionally with ingredients scaled to other servings
#[derive(Debug, Serialize)]
pub struct RecipeDetail {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub servings: f64,
    pub ingredients: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaled_servings: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaled_ingredients: Option<Vec<String>>,
    pub instructions: Option<String>,
    pub notes: Option<String>,
    pub rating: RatingSummary,
    pub favorite_count: i64,
    pub comment_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Recipe summary for listing
#[derive(Debug, Serialize)]
pub struct RecipeSummary {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub servings: f64,
    pub ingredient_count: usize,
    pub average_rating: f64,
    pub rating_count: i64,
}

/// Response for list_recipes
#[derive(Debug, Serialize)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeSummary>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Response for scale_recipe
#[derive(Debug, Serialize)]
pub struct ScaledRecipeResponse {
    pub recipe_id: i64,
    pub name: String,
    pub original_servings: f64,
    pub servings: f64,
    pub ingredients: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RecipeUpdateResponse {
    pub success: bool,
    pub updated_at: String,
}

#[derive(Debug, Serialize)]
pub struct RecipeDeleteResponse {
    pub success: bool,
    pub deleted_id: i64,
}

// ============================================================================
// Helpers
// ============================================================================

/// Trim ingredient lines and drop blank ones
pub fn normalize_ingredients(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

fn validate_name(name: &str) -> Result<String, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Recipe name cannot be empty".to_string());
    }
    Ok(name.to_string())
}

fn validate_servings(servings: f64) -> Result<f64, String> {
    if !servings.is_finite() || servings <= 0.0 {
        return Err("servings must be greater than 0".to_string());
    }
    Ok(servings)
}

/// Requested serving count for a scaled view; the stepper never goes below 1
fn clamp_servings(servings: f64) -> f64 {
    servings.max(1.0)
}

pub(crate) fn summarize(conn: &Connection, recipe: Recipe) -> Result<RecipeSummary, String> {
    let rating = Rating::summary(conn, recipe.id)
        .map_err(|e| format!("Failed to get rating: {}", e))?;

    Ok(RecipeSummary {
        id: recipe.id,
        name: recipe.name,
        category: recipe.category,
        servings: recipe.servings,
        ingredient_count: recipe.ingredients.len(),
        average_rating: rating.average,
        rating_count: rating.count,
    })
}

// ============================================================================
// Recipe Tools
// ============================================================================

/// Create a new recipe
pub fn create_recipe(db: &Database, mut data: RecipeCreate) -> Result<CreateRecipeResponse, String> {
    data.name = validate_name(&data.name)?;
    data.servings = validate_servings(data.servings)?;
    data.ingredients = normalize_ingredients(data.ingredients);

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let recipe = Recipe::create(&conn, &data)
        .map_err(|e| format!("Failed to create recipe: {}", e))?;

    tracing::info!(id = recipe.id, name = %recipe.name, "Created recipe");

    Ok(CreateRecipeResponse {
        id: recipe.id,
        name: recipe.name,
        servings: recipe.servings,
        ingredient_count: recipe.ingredients.len(),
        created_at: recipe.created_at,
    })
}

/// Get a recipe with full details
///
/// With `servings`, the ingredient list is also returned scaled to that
/// serving count (unless it equals the stored servings).
pub fn get_recipe(
    db: &Database,
    id: i64,
    servings: Option<f64>,
) -> Result<Option<RecipeDetail>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let Some(recipe) = Recipe::get_by_id(&conn, id)
        .map_err(|e| format!("Failed to get recipe: {}", e))?
    else {
        return Ok(None);
    };

    let rating = Rating::summary(&conn, id)
        .map_err(|e| format!("Failed to get rating: {}", e))?;

    let favorite_count = Favorite::count_for_recipe(&conn, id)
        .map_err(|e| format!("Failed to count favorites: {}", e))?;

    let comment_count = Comment::count_for_recipe(&conn, id)
        .map_err(|e| format!("Failed to count comments: {}", e))?;

    let (scaled_servings, scaled_ingredients) = match servings.map(clamp_servings) {
        Some(target) if target != recipe.servings => (
            Some(target),
            Some(scale_ingredients(&recipe.ingredients, Some(recipe.servings), target)),
        ),
        _ => (None, None),
    };

    Ok(Some(RecipeDetail {
        id: recipe.id,
        name: recipe.name,
        category: recipe.category,
        description: recipe.description,
        servings: recipe.servings,
        ingredients: recipe.ingredients,
        scaled_servings,
        scaled_ingredients,
        instructions: recipe.instructions,
        notes: recipe.notes,
        rating,
        favorite_count,
        comment_count,
        created_at: recipe.created_at,
        updated_at: recipe.updated_at,
    }))
}

/// List recipes with filtering
pub fn list_recipes(
    db: &Database,
    query: Option<&str>,
    category: Option<&str>,
    sort_by: &str,
    sort_order: &str,
    limit: i64,
    offset: i64,
) -> Result<ListRecipesResponse, String> {
    let limit = limit.clamp(1, 200);
    let offset = offset.max(0);
    let filter = RecipeFilter { query, category };

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let recipes = Recipe::list(&conn, &filter, sort_by, sort_order, limit, offset)
        .map_err(|e| format!("Failed to list recipes: {}", e))?;

    let total = Recipe::count(&conn, &filter)
        .map_err(|e| format!("Failed to count recipes: {}", e))?;

    let summaries = recipes
        .into_iter()
        .map(|recipe| summarize(&conn, recipe))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ListRecipesResponse {
        recipes: summaries,
        total,
        limit,
        offset,
    })
}

/// Update a recipe; `None` if it does not exist
pub fn update_recipe(
    db: &Database,
    id: i64,
    mut data: RecipeUpdate,
) -> Result<Option<RecipeUpdateResponse>, String> {
    if let Some(ref name) = data.name {
        data.name = Some(validate_name(name)?);
    }
    if let Some(servings) = data.servings {
        data.servings = Some(validate_servings(servings)?);
    }
    data.ingredients = data.ingredients.map(normalize_ingredients);

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let updated = Recipe::update(&conn, id, &data)
        .map_err(|e| format!("Failed to update recipe: {}", e))?;

    Ok(updated.map(|recipe| RecipeUpdateResponse {
        success: true,
        updated_at: recipe.updated_at,
    }))
}

/// Delete a recipe along with its ratings, favorites and comments
pub fn delete_recipe(db: &Database, id: i64) -> Result<Option<RecipeDeleteResponse>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let deleted = Recipe::delete(&conn, id)
        .map_err(|e| format!("Failed to delete recipe: {}", e))?;

    if !deleted {
        return Ok(None);
    }

    tracing::info!(id, "Deleted recipe");

    Ok(Some(RecipeDeleteResponse {
        success: true,
        deleted_id: id,
    }))
}

/// Just the ingredient list of a recipe, scaled to `servings`
pub fn scale_recipe(
    db: &Database,
    id: i64,
    servings: f64,
) -> Result<Option<ScaledRecipeResponse>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let Some(recipe) = Recipe::get_by_id(&conn, id)
        .map_err(|e| format!("Failed to get recipe: {}", e))?
    else {
        return Ok(None);
    };

    let servings = clamp_servings(servings);
    let ingredients = scale_ingredients(&recipe.ingredients, Some(recipe.servings), servings);

    Ok(Some(ScaledRecipeResponse {
        recipe_id: recipe.id,
        name: recipe.name,
        original_servings: recipe.servings,
        servings,
        ingredients,
    }))
}
