//! Favorite model
//!
//! Links a user to the recipes they bookmarked.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};
use super::Recipe;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    pub id: i64,
    pub user_id: String,
    pub recipe_id: i64,
    pub created_at: String,
}

impl Favorite {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            recipe_id: row.get("recipe_id")?,
            created_at: row.get("created_at")?,
        })
    }

    pub fn create(conn: &Connection, user_id: &str, recipe_id: i64) -> DbResult<Self> {
        conn.execute(
            "INSERT INTO favorites (user_id, recipe_id) VALUES (?1, ?2)",
            params![user_id, recipe_id],
        )?;

        let id = conn.last_insert_rowid();
        let mut stmt = conn.prepare("SELECT * FROM favorites WHERE id = ?1")?;
        stmt.query_row([id], Self::from_row).map_err(DbError::from)
    }

    pub fn exists(conn: &Connection, user_id: &str, recipe_id: i64) -> DbResult<bool> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM favorites WHERE user_id = ?1 AND recipe_id = ?2",
            params![user_id, recipe_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Returns whether a favorite was removed
    pub fn delete(conn: &Connection, user_id: &str, recipe_id: i64) -> DbResult<bool> {
        let rows = conn.execute(
            "DELETE FROM favorites WHERE user_id = ?1 AND recipe_id = ?2",
            params![user_id, recipe_id],
        )?;
        Ok(rows > 0)
    }

    /// A user's favorite recipes, most recently added first
    pub fn recipes_for_user(conn: &Connection, user_id: &str) -> DbResult<Vec<(Favorite, Recipe)>> {
        let favorites = {
            let mut stmt = conn.prepare(
                "SELECT * FROM favorites WHERE user_id = ?1 ORDER BY id DESC",
            )?;
            let rows = stmt.query_map([user_id], Self::from_row)?;
            rows.collect::<Result<Vec<_>, _>>()?
        };

        let mut result = Vec::with_capacity(favorites.len());
        for favorite in favorites {
            if let Some(recipe) = Recipe::get_by_id(conn, favorite.recipe_id)? {
                result.push((favorite, recipe));
            }
        }
        Ok(result)
    }

    /// How many users favorited a recipe
    pub fn count_for_recipe(conn: &Connection, recipe_id: i64) -> DbResult<i64> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM favorites WHERE recipe_id = ?1",
            [recipe_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
