//! Rating model
//!
//! Star ratings (1-5) attached to recipes.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// A single rating
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    pub id: i64,
    pub recipe_id: i64,
    pub user_id: Option<String>,
    pub value: i64,
    pub created_at: String,
}

/// Average and count of a recipe's ratings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    /// Rounded to one decimal, 0 when unrated
    pub average: f64,
    pub count: i64,
}

impl Rating {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            recipe_id: row.get("recipe_id")?,
            user_id: row.get("user_id")?,
            value: row.get("value")?,
            created_at: row.get("created_at")?,
        })
    }

    /// Record a rating, replacing the user's earlier rating of the same recipe
    pub fn upsert(
        conn: &Connection,
        recipe_id: i64,
        user_id: Option<&str>,
        value: i64,
    ) -> DbResult<Self> {
        let tx = conn.unchecked_transaction()?;

        if let Some(user_id) = user_id {
            tx.execute(
                "DELETE FROM ratings WHERE recipe_id = ?1 AND user_id = ?2",
                params![recipe_id, user_id],
            )?;
        }

        tx.execute(
            "INSERT INTO ratings (recipe_id, user_id, value) VALUES (?1, ?2, ?3)",
            params![recipe_id, user_id, value],
        )?;

        let id = tx.last_insert_rowid();
        let rating = tx
            .prepare("SELECT * FROM ratings WHERE id = ?1")?
            .query_row([id], Self::from_row)?;

        tx.commit()?;
        Ok(rating)
    }

    /// All ratings of a recipe, newest first
    pub fn get_for_recipe(conn: &Connection, recipe_id: i64) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM ratings WHERE recipe_id = ?1 ORDER BY id DESC",
        )?;
        let ratings = stmt
            .query_map([recipe_id], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ratings)
    }

    /// Average and count for a recipe
    pub fn summary(conn: &Connection, recipe_id: i64) -> DbResult<RatingSummary> {
        let (average, count): (Option<f64>, i64) = conn.query_row(
            "SELECT AVG(value), COUNT(*) FROM ratings WHERE recipe_id = ?1",
            [recipe_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(RatingSummary {
            average: round_to_tenth(average.unwrap_or(0.0)),
            count,
        })
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::{Recipe, RecipeCreate};

    fn setup() -> (Connection, i64) {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        run_migrations(&conn).unwrap();
        let recipe = Recipe::create(
            &conn,
            &RecipeCreate {
                name: "Pancakes".to_string(),
                category: None,
                description: None,
                servings: 4.0,
                ingredients: vec![],
                instructions: None,
                notes: None,
            },
        )
        .unwrap();
        (conn, recipe.id)
    }

    #[test]
    fn test_summary_of_unrated_recipe() {
        let (conn, recipe_id) = setup();
        let summary = Rating::summary(&conn, recipe_id).unwrap();
        assert_eq!(summary, RatingSummary { average: 0.0, count: 0 });
    }

    #[test]
    fn test_summary_rounds_to_one_decimal() {
        let (conn, recipe_id) = setup();
        Rating::upsert(&conn, recipe_id, None, 5).unwrap();
        Rating::upsert(&conn, recipe_id, None, 4).unwrap();
        Rating::upsert(&conn, recipe_id, None, 4).unwrap();
        let summary = Rating::summary(&conn, recipe_id).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.average, 4.3);
    }

    #[test]
    fn test_user_rating_is_replaced() {
        let (conn, recipe_id) = setup();
        Rating::upsert(&conn, recipe_id, Some("user1"), 2).unwrap();
        let latest = Rating::upsert(&conn, recipe_id, Some("user1"), 5).unwrap();
        assert_eq!(latest.value, 5);
        assert_eq!(latest.user_id.as_deref(), Some("user1"));

        let all = Rating::get_for_recipe(&conn, recipe_id).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(Rating::summary(&conn, recipe_id).unwrap().average, 5.0);
    }

    #[test]
    fn test_out_of_range_value_rejected_by_schema() {
        let (conn, recipe_id) = setup();
        assert!(Rating::upsert(&conn, recipe_id, None, 6).is_err());
    }

    #[test]
    fn test_failed_rerating_keeps_previous_rating() {
        let (conn, recipe_id) = setup();
        Rating::upsert(&conn, recipe_id, Some("user1"), 4).unwrap();
        assert!(Rating::upsert(&conn, recipe_id, Some("user1"), 9).is_err());

        let all = Rating::get_for_recipe(&conn, recipe_id).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].value, 4);
    }

    #[test]
    fn test_ratings_cascade_with_recipe() {
        let (conn, recipe_id) = setup();
        Rating::upsert(&conn, recipe_id, None, 3).unwrap();
        Recipe::delete(&conn, recipe_id).unwrap();
        assert!(Rating::get_for_recipe(&conn, recipe_id).unwrap().is_empty());
    }
}
