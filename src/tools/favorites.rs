//! Favorite MCP Tools

use serde::Serialize;

use crate::db::Database;
use crate::models::{Favorite, Recipe};
use super::recipes::{summarize, RecipeSummary};

/// Response when a favorite cannot be added
#[derive(Debug, Serialize)]
pub struct FavoriteBlockedResponse {
    pub error: String,
    pub user_id: String,
    pub recipe_id: i64,
}

#[derive(Debug, Serialize)]
pub struct FavoriteRecipe {
    pub favorited_at: String,
    #[serde(flatten)]
    pub recipe: RecipeSummary,
}

/// Response for list_favorites
#[derive(Debug, Serialize)]
pub struct ListFavoritesResponse {
    pub user_id: String,
    pub favorites: Vec<FavoriteRecipe>,
    pub count: usize,
}

fn validate_user_id(user_id: &str) -> Result<&str, String> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err("user_id cannot be empty".to_string());
    }
    Ok(user_id)
}

/// Add a recipe to a user's favorites (blocked if already there)
pub fn add_favorite(
    db: &Database,
    user_id: &str,
    recipe_id: i64,
) -> Result<Result<Favorite, FavoriteBlockedResponse>, String> {
    let user_id = validate_user_id(user_id)?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let recipe = Recipe::get_by_id(&conn, recipe_id)
        .map_err(|e| format!("Database error checking recipe: {}", e))?;
    if recipe.is_none() {
        return Err(format!("Recipe not found with id: {}", recipe_id));
    }

    let exists = Favorite::exists(&conn, user_id, recipe_id)
        .map_err(|e| format!("Database error checking favorites: {}", e))?;
    if exists {
        return Ok(Err(FavoriteBlockedResponse {
            error: "Recipe already in favorites".to_string(),
            user_id: user_id.to_string(),
            recipe_id,
        }));
    }

    let favorite = Favorite::create(&conn, user_id, recipe_id)
        .map_err(|e| format!("Failed to add favorite: {}", e))?;

    Ok(Ok(favorite))
}

/// Remove a recipe from a user's favorites; returns whether it was there
pub fn remove_favorite(db: &Database, user_id: &str, recipe_id: i64) -> Result<bool, String> {
    let user_id = validate_user_id(user_id)?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    Favorite::delete(&conn, user_id, recipe_id)
        .map_err(|e| format!("Failed to remove favorite: {}", e))
}

pub fn list_favorites(db: &Database, user_id: &str) -> Result<ListFavoritesResponse, String> {
    let user_id = validate_user_id(user_id)?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let rows = Favorite::recipes_for_user(&conn, user_id)
        .map_err(|e| format!("Failed to list favorites: {}", e))?;

    let favorites = rows
        .into_iter()
        .map(|(favorite, recipe)| {
            Ok(FavoriteRecipe {
                favorited_at: favorite.created_at,
                recipe: summarize(&conn, recipe)?,
            })
        })
        .collect::<Result<Vec<_>, String>>()?;

    Ok(ListFavoritesResponse {
        user_id: user_id.to_string(),
        count: favorites.len(),
        favorites,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::RecipeCreate;

    fn setup() -> (Database, i64) {
        let db = Database::in_memory().unwrap();
        let id = db
            .with_conn(|conn| {
                run_migrations(conn)?;
                let recipe = Recipe::create(
                    conn,
                    &RecipeCreate {
                        name: "Chili".to_string(),
                        category: None,
                        description: None,
                        servings: 6.0,
                        ingredients: vec!["500g beef".to_string(), "2 cans beans".to_string()],
                        instructions: None,
                        notes: None,
                    },
                )?;
                Ok(recipe.id)
            })
            .unwrap();
        (db, id)
    }

    #[test]
    fn test_add_and_list_favorites() {
        let (db, id) = setup();
        assert!(add_favorite(&db, " alice ", id).unwrap().is_ok());

        let listed = list_favorites(&db, "alice").unwrap();
        assert_eq!(listed.count, 1);
        assert_eq!(listed.favorites[0].recipe.name, "Chili");
        assert_eq!(listed.favorites[0].recipe.ingredient_count, 2);

        assert_eq!(list_favorites(&db, "bob").unwrap().count, 0);
    }

    #[test]
    fn test_duplicate_favorite_blocked() {
        let (db, id) = setup();
        add_favorite(&db, "alice", id).unwrap().unwrap();
        let blocked = add_favorite(&db, "alice", id).unwrap().unwrap_err();
        assert_eq!(blocked.error, "Recipe already in favorites");
    }

    #[test]
    fn test_favorite_validation() {
        let (db, id) = setup();
        assert!(add_favorite(&db, "", id).is_err());
        assert!(add_favorite(&db, "alice", id + 1).is_err());
        assert!(list_favorites(&db, "  ").is_err());
    }

    #[test]
    fn test_remove_favorite() {
        let (db, id) = setup();
        add_favorite(&db, "alice", id).unwrap().unwrap();
        assert!(remove_favorite(&db, "alice", id).unwrap());
        assert!(!remove_favorite(&db, "alice", id).unwrap());
    }
}
