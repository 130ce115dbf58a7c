//! Ladle MCP Server Implementation
//!
//! Implements the MCP server with all Ladle tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::db::Database;
use crate::models::{RecipeCreate, RecipeUpdate};
use crate::tools::analytics;
use crate::tools::comments;
use crate::tools::favorites;
use crate::tools::ratings;
use crate::tools::recipes;
use crate::tools::scaling;
use crate::tools::status::StatusTracker;
use crate::tools::substitutes;
use crate::tools::suggestions;

/// Ladle MCP Service
#[derive(Clone)]
pub struct LadleService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    tool_router: ToolRouter<LadleService>,
}

impl LadleService {
    pub fn new(database_path: PathBuf, database: Database) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            database,
            tool_router: Self::tool_router(),
        }
    }
}

/// Serialize a tool result as pretty JSON text content
fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn not_found(what: &str, id: i64) -> Result<CallToolResult, McpError> {
    json_result(&serde_json::json!({ "error": format!("{} not found", what), "id": id }))
}

// ============================================================================
// Scaling Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ParseIngredientParams {
    /// One ingredient line, e.g. "2 cups flour" or "1/2 tsp salt"
    pub line: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ScaleIngredientsParams {
    /// Ingredient lines in order
    pub ingredients: Vec<String>,
    /// Servings the lines are written for; missing, zero or negative leaves lines unchanged
    pub original_servings: Option<f64>,
    /// Servings to scale to
    pub servings: f64,
}

// ============================================================================
// Recipe Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateRecipeParams {
    /// Name of the recipe
    pub name: String,
    /// Category such as "Italian" or "Breakfast"
    pub category: Option<String>,
    pub description: Option<String>,
    /// Number of servings the ingredient list makes (default 1)
    #[serde(default = "default_servings")]
    pub servings: f64,
    /// Ingredient lines, e.g. ["2 cups flour", "salt to taste"]
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
    pub notes: Option<String>,
}

fn default_servings() -> f64 { 1.0 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetRecipeParams {
    /// Recipe ID
    pub id: i64,
    /// Also return the ingredients scaled to this many servings
    pub servings: Option<f64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListRecipesParams {
    /// Search in name, description and ingredients (optional)
    pub query: Option<String>,
    /// Exact category, case-insensitive (optional)
    pub category: Option<String>,
    /// Sort field: name, created_at, rating (default name)
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    /// Sort order: asc or desc (default asc)
    #[serde(default = "default_sort_order")]
    pub sort_order: String,
    #[serde(default = "default_list_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_sort_by() -> String { "name".to_string() }
fn default_sort_order() -> String { "asc".to_string() }
fn default_list_limit() -> i64 { 50 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateRecipeParams {
    /// Recipe ID
    pub id: i64,
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub servings: Option<f64>,
    /// Replaces the whole ingredient list
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteRecipeParams {
    /// Recipe ID to delete
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ScaleRecipeParams {
    /// Recipe ID
    pub id: i64,
    /// Servings to scale to (values below 1 are treated as 1)
    pub servings: f64,
}

// ============================================================================
// Rating & Favorite Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RateRecipeParams {
    pub recipe_id: i64,
    /// Rating from 1 to 5
    pub value: i64,
    /// Rater; a new rating from the same user replaces the old one
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetRecipeRatingParams {
    pub recipe_id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FavoriteParams {
    pub user_id: String,
    pub recipe_id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListFavoritesParams {
    pub user_id: String,
}

// ============================================================================
// Comment & Analytics Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddCommentParams {
    pub recipe_id: i64,
    /// Comment text; must not be blank
    pub body: String,
    /// Commenter (optional)
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListCommentsParams {
    pub recipe_id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteCommentParams {
    /// Comment ID to delete
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PopularRecipesParams {
    /// Maximum recipes to return, 1-100 (default 10)
    #[serde(default = "default_popular_limit")]
    pub limit: i64,
}

fn default_popular_limit() -> i64 { 10 }

// ============================================================================
// Helper Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetSubstitutesParams {
    /// Ingredient name, e.g. "butter" or "sour cream"
    pub ingredient: String,
    /// Dietary tag: vegan, vegetarian, dairy_free, gluten_free, nut_free, keto, low_fat, low_carb, low_fodmap, raw
    pub dietary: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SuggestRecipesParams {
    /// Restrict to this category (optional)
    pub category: Option<String>,
    /// Ingredients on hand; recipes using more of them rank first
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default = "default_suggestion_limit")]
    pub limit: i64,
}

fn default_suggestion_limit() -> i64 { suggestions::DEFAULT_SUGGESTION_LIMIT }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AnalyzeNutritionParams {
    /// Ingredient lines
    pub ingredients: Vec<String>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl LadleService {
    // --- Status ---

    #[tool(description = "Get the current status of the Ladle service including build info, database status, and process information")]
    async fn ladle_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        json_result(&status)
    }

    #[tool(description = "Get instructions for writing ingredient lines, storing recipes and scaling them. Call this when unsure how to use the recipe tools.")]
    fn recipe_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::RECIPE_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(RECIPE_INSTRUCTIONS)]))
    }

    // --- Scaling ---

    #[tool(description = "Parse one ingredient line into quantity, unit and name, with gram/ml conversions for known units")]
    fn parse_ingredient(&self, Parameters(p): Parameters<ParseIngredientParams>) -> Result<CallToolResult, McpError> {
        json_result(&scaling::parse_ingredient_line(&p.line))
    }

    #[tool(description = "Scale ingredient lines from original_servings to servings without storing them. Lines without a leading quantity are kept as-is.")]
    fn scale_ingredients(&self, Parameters(p): Parameters<ScaleIngredientsParams>) -> Result<CallToolResult, McpError> {
        json_result(&scaling::scale_ingredient_lines(&p.ingredients, p.original_servings, p.servings))
    }

    // --- Recipes ---

    #[tool(description = "Create a new recipe with its ingredient lines")]
    fn create_recipe(&self, Parameters(p): Parameters<CreateRecipeParams>) -> Result<CallToolResult, McpError> {
        let data = RecipeCreate {
            name: p.name,
            category: p.category,
            description: p.description,
            servings: p.servings,
            ingredients: p.ingredients,
            instructions: p.instructions,
            notes: p.notes,
        };
        let result = recipes::create_recipe(&self.database, data).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get full recipe details with rating, favorite count and comment count. Pass servings to also get the ingredients scaled.")]
    fn get_recipe(&self, Parameters(p): Parameters<GetRecipeParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::get_recipe(&self.database, p.id, p.servings).map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(recipe) => json_result(&recipe),
            None => not_found("Recipe", p.id),
        }
    }

    #[tool(description = "List recipes with optional search, category filter, sorting, and pagination")]
    fn list_recipes(&self, Parameters(p): Parameters<ListRecipesParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::list_recipes(
            &self.database,
            p.query.as_deref(),
            p.category.as_deref(),
            &p.sort_by,
            &p.sort_order,
            p.limit,
            p.offset,
        )
        .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Update a recipe. Only the given fields change; ingredients replaces the whole list.")]
    fn update_recipe(&self, Parameters(p): Parameters<UpdateRecipeParams>) -> Result<CallToolResult, McpError> {
        let data = RecipeUpdate {
            name: p.name,
            category: p.category,
            description: p.description,
            servings: p.servings,
            ingredients: p.ingredients,
            instructions: p.instructions,
            notes: p.notes,
        };
        let result = recipes::update_recipe(&self.database, p.id, data).map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(updated) => json_result(&updated),
            None => not_found("Recipe", p.id),
        }
    }

    #[tool(description = "Delete a recipe together with its ratings, favorites and comments")]
    fn delete_recipe(&self, Parameters(p): Parameters<DeleteRecipeParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::delete_recipe(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(deleted) => json_result(&deleted),
            None => not_found("Recipe", p.id),
        }
    }

    #[tool(description = "Get a stored recipe's ingredient lines scaled to a number of servings. The stored recipe is not changed.")]
    fn scale_recipe(&self, Parameters(p): Parameters<ScaleRecipeParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::scale_recipe(&self.database, p.id, p.servings).map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(scaled) => json_result(&scaled),
            None => not_found("Recipe", p.id),
        }
    }

    // --- Ratings ---

    #[tool(description = "Rate a recipe from 1 to 5. A user's new rating replaces their previous one.")]
    fn rate_recipe(&self, Parameters(p): Parameters<RateRecipeParams>) -> Result<CallToolResult, McpError> {
        let result = ratings::rate_recipe(&self.database, p.recipe_id, p.value, p.user_id.as_deref())
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get a recipe's average rating (one decimal), rating count and individual ratings")]
    fn get_recipe_rating(&self, Parameters(p): Parameters<GetRecipeRatingParams>) -> Result<CallToolResult, McpError> {
        let result = ratings::get_recipe_rating(&self.database, p.recipe_id).map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(rating) => json_result(&rating),
            None => not_found("Recipe", p.recipe_id),
        }
    }

    // --- Favorites ---

    #[tool(description = "Add a recipe to a user's favorites")]
    fn add_favorite(&self, Parameters(p): Parameters<FavoriteParams>) -> Result<CallToolResult, McpError> {
        let result = favorites::add_favorite(&self.database, &p.user_id, p.recipe_id)
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Ok(favorite) => json_result(&favorite),
            Err(blocked) => json_result(&blocked),
        }
    }

    #[tool(description = "Remove a recipe from a user's favorites")]
    fn remove_favorite(&self, Parameters(p): Parameters<FavoriteParams>) -> Result<CallToolResult, McpError> {
        let removed = favorites::remove_favorite(&self.database, &p.user_id, p.recipe_id)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&serde_json::json!({
            "success": removed,
            "user_id": p.user_id.trim(),
            "recipe_id": p.recipe_id,
        }))
    }

    #[tool(description = "List a user's favorite recipes")]
    fn list_favorites(&self, Parameters(p): Parameters<ListFavoritesParams>) -> Result<CallToolResult, McpError> {
        let result = favorites::list_favorites(&self.database, &p.user_id).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Comments ---

    #[tool(description = "Leave a comment on a recipe")]
    fn add_comment(&self, Parameters(p): Parameters<AddCommentParams>) -> Result<CallToolResult, McpError> {
        let result = comments::add_comment(&self.database, p.recipe_id, p.user_id.as_deref(), &p.body)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "List a recipe's comments, oldest first")]
    fn list_comments(&self, Parameters(p): Parameters<ListCommentsParams>) -> Result<CallToolResult, McpError> {
        let result = comments::list_comments(&self.database, p.recipe_id).map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(listed) => json_result(&listed),
            None => not_found("Recipe", p.recipe_id),
        }
    }

    #[tool(description = "Delete a comment")]
    fn delete_comment(&self, Parameters(p): Parameters<DeleteCommentParams>) -> Result<CallToolResult, McpError> {
        let result = comments::delete_comment(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(deleted) => json_result(&deleted),
            None => not_found("Comment", p.id),
        }
    }

    // --- Analytics ---

    #[tool(description = "Totals of recipes, ratings, comments, favorites and distinct users, plus the five newest recipes")]
    fn recipe_analytics(&self) -> Result<CallToolResult, McpError> {
        let result = analytics::recipe_analytics(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Recipes ranked by favorites + ratings + comments, with average rating")]
    fn popular_recipes(&self, Parameters(p): Parameters<PopularRecipesParams>) -> Result<CallToolResult, McpError> {
        let result = analytics::popular_recipes(&self.database, p.limit).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Kitchen Helpers ---

    #[tool(description = "Get substitutes for a common ingredient, optionally filtered by a dietary tag such as vegan or gluten_free")]
    fn get_substitutes(&self, Parameters(p): Parameters<GetSubstitutesParams>) -> Result<CallToolResult, McpError> {
        json_result(&substitutes::get_substitutes(&p.ingredient, p.dietary.as_deref()))
    }

    #[tool(description = "Suggest stored recipes by category and ingredients on hand")]
    fn suggest_recipes(&self, Parameters(p): Parameters<SuggestRecipesParams>) -> Result<CallToolResult, McpError> {
        let result = suggestions::suggest_recipes(&self.database, p.category.as_deref(), &p.ingredients, p.limit)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Rough per-serving nutrition estimate for a list of ingredient lines (placeholder values)")]
    fn analyze_nutrition(&self, Parameters(p): Parameters<AnalyzeNutritionParams>) -> Result<CallToolResult, McpError> {
        json_result(&suggestions::analyze_nutrition(&p.ingredients))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for LadleService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "ladle".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Ladle".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Ladle - recipe keeping and servings scaling. \
                 Call recipe_instructions for the ingredient line format. \
                 Scaling: parse_ingredient, scale_ingredients, scale_recipe, get_recipe with servings. \
                 Recipes: create/get/list/update/delete_recipe. \
                 Ratings: rate_recipe, get_recipe_rating. \
                 Favorites: add/remove/list_favorites. \
                 Comments: add_comment, list_comments, delete_comment. \
                 Analytics: recipe_analytics, popular_recipes. \
                 Helpers: get_substitutes, suggest_recipes, analyze_nutrition."
                    .into(),
            ),
        }
    }
}
