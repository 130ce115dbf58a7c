//! Recipe Analytics MCP Tools
//!
//! Store-wide totals and a popularity ranking built from favorites, ratings
//! and comments.

use serde::Serialize;

use crate::db::Database;
use crate::models::{stats, Recipe, RecipeFilter, StoreTotals};
use super::recipes::{summarize, RecipeSummary};

const RECENT_RECIPES: i64 = 5;

/// Response for recipe_analytics
#[derive(Debug, Serialize)]
pub struct RecipeAnalyticsResponse {
    #[serde(flatten)]
    pub totals: StoreTotals,
    pub recent_recipes: Vec<RecipeSummary>,
}

#[derive(Debug, Serialize)]
pub struct PopularRecipe {
    pub popularity: i64,
    pub favorite_count: i64,
    pub comment_count: i64,
    #[serde(flatten)]
    pub recipe: RecipeSummary,
}

/// Response for popular_recipes
#[derive(Debug, Serialize)]
pub struct PopularRecipesResponse {
    pub recipes: Vec<PopularRecipe>,
    pub count: usize,
}

pub fn recipe_analytics(db: &Database) -> Result<RecipeAnalyticsResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let totals = StoreTotals::load(&conn)
        .map_err(|e| format!("Failed to count totals: {}", e))?;

    let recent = Recipe::list(
        &conn,
        &RecipeFilter::default(),
        "created_at",
        "desc",
        RECENT_RECIPES,
        0,
    )
    .map_err(|e| format!("Failed to list recipes: {}", e))?;

    let recent_recipes = recent
        .into_iter()
        .map(|recipe| summarize(&conn, recipe))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RecipeAnalyticsResponse {
        totals,
        recent_recipes,
    })
}

/// Most engaged-with recipes first; recipes without activity still appear last
pub fn popular_recipes(db: &Database, limit: i64) -> Result<PopularRecipesResponse, String> {
    let limit = limit.clamp(1, 100);
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let ranked = stats::most_popular(&conn, limit)
        .map_err(|e| format!("Failed to rank recipes: {}", e))?;

    let mut recipes = Vec::with_capacity(ranked.len());
    for engagement in ranked {
        let Some(recipe) = Recipe::get_by_id(&conn, engagement.recipe_id)
            .map_err(|e| format!("Failed to get recipe: {}", e))?
        else {
            continue;
        };
        recipes.push(PopularRecipe {
            popularity: engagement.popularity(),
            favorite_count: engagement.favorite_count,
            comment_count: engagement.comment_count,
            recipe: summarize(&conn, recipe)?,
        });
    }

    Ok(PopularRecipesResponse {
        count: recipes.len(),
        recipes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::{Comment, Favorite, Rating, RecipeCreate};

    fn add_recipe(db: &Database, name: &str) -> i64 {
        db.with_conn(|conn| {
            let recipe = Recipe::create(
                conn,
                &RecipeCreate {
                    name: name.to_string(),
                    category: None,
                    description: None,
                    servings: 4.0,
                    ingredients: vec!["1 onion".to_string()],
                    instructions: None,
                    notes: None,
                },
            )?;
            Ok(recipe.id)
        })
        .unwrap()
    }

    fn setup() -> Database {
        let db = Database::in_memory().unwrap();
        db.with_conn(|conn| run_migrations(conn)).unwrap();
        db
    }

    #[test]
    fn test_analytics_on_empty_store() {
        let db = setup();
        let response = recipe_analytics(&db).unwrap();
        assert_eq!(response.totals.recipes, 0);
        assert_eq!(response.totals.users, 0);
        assert!(response.recent_recipes.is_empty());
    }

    #[test]
    fn test_analytics_totals_and_recent() {
        let db = setup();
        let ids: Vec<_> = (1..=6).map(|n| add_recipe(&db, &format!("Soup {}", n))).collect();
        db.with_conn(|conn| {
            Favorite::create(conn, "frank", ids[0])?;
            Rating::upsert(conn, ids[0], Some("grace"), 4)?;
            Comment::create(conn, ids[1], Some("frank"), "Hearty")?;
            Ok(())
        })
        .unwrap();

        let response = recipe_analytics(&db).unwrap();
        assert_eq!(response.totals.recipes, 6);
        assert_eq!(response.totals.favorites, 1);
        assert_eq!(response.totals.ratings, 1);
        assert_eq!(response.totals.comments, 1);
        assert_eq!(response.totals.users, 2);
        assert_eq!(response.recent_recipes.len(), 5);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["recipes"], 6);
    }

    #[test]
    fn test_popular_recipes_ranking() {
        let db = setup();
        let quiet = add_recipe(&db, "Toast");
        let rated = add_recipe(&db, "Ramen");
        let loved = add_recipe(&db, "Tacos");
        db.with_conn(|conn| {
            Rating::upsert(conn, rated, None, 2)?;
            Favorite::create(conn, "hana", loved)?;
            Favorite::create(conn, "ivan", loved)?;
            Rating::upsert(conn, loved, Some("hana"), 5)?;
            Rating::upsert(conn, loved, Some("ivan"), 4)?;
            Comment::create(conn, loved, None, "Weekly staple")?;
            Ok(())
        })
        .unwrap();

        let response = popular_recipes(&db, 10).unwrap();
        let ids: Vec<_> = response.recipes.iter().map(|p| p.recipe.id).collect();
        assert_eq!(ids, vec![loved, rated, quiet]);

        let top = &response.recipes[0];
        assert_eq!(top.popularity, 5);
        assert_eq!(top.favorite_count, 2);
        assert_eq!(top.comment_count, 1);
        assert_eq!(top.recipe.rating_count, 2);
        assert_eq!(top.recipe.average_rating, 4.5);

        assert_eq!(popular_recipes(&db, 0).unwrap().count, 1);
    }
}
