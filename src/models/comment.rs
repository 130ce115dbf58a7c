//! Comment model
//!
//! Free-text comments left on recipes.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub recipe_id: i64,
    pub user_id: Option<String>,
    pub body: String,
    pub created_at: String,
}

impl Comment {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            recipe_id: row.get("recipe_id")?,
            user_id: row.get("user_id")?,
            body: row.get("body")?,
            created_at: row.get("created_at")?,
        })
    }

    pub fn create(
        conn: &Connection,
        recipe_id: i64,
        user_id: Option<&str>,
        body: &str,
    ) -> DbResult<Self> {
        conn.execute(
            "INSERT INTO comments (recipe_id, user_id, body) VALUES (?1, ?2, ?3)",
            params![recipe_id, user_id, body],
        )?;

        let id = conn.last_insert_rowid();
        let comment = conn
            .prepare("SELECT * FROM comments WHERE id = ?1")?
            .query_row([id], Self::from_row)?;
        Ok(comment)
    }

    /// Comments on a recipe, oldest first
    pub fn get_for_recipe(conn: &Connection, recipe_id: i64) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM comments WHERE recipe_id = ?1 ORDER BY id")?;
        let comments = stmt
            .query_map([recipe_id], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(comments)
    }

    /// Returns whether a comment was removed
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM comments WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }

    pub fn count_for_recipe(conn: &Connection, recipe_id: i64) -> DbResult<i64> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM comments WHERE recipe_id = ?1",
            [recipe_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
