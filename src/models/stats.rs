//! Recipe statistics
//!
//! Site-wide totals and per-recipe engagement counts.

use rusqlite::{Connection, Row};
use serde::Serialize;

use crate::db::DbResult;

/// Row counts across the store
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StoreTotals {
    pub recipes: i64,
    pub ratings: i64,
    pub comments: i64,
    pub favorites: i64,
    /// Distinct user ids seen on ratings, comments or favorites
    pub users: i64,
}

/// How much attention a recipe has received
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Engagement {
    pub recipe_id: i64,
    pub favorite_count: i64,
    pub rating_count: i64,
    pub comment_count: i64,
}

impl Engagement {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            recipe_id: row.get("id")?,
            favorite_count: row.get("favorite_count")?,
            rating_count: row.get("rating_count")?,
            comment_count: row.get("comment_count")?,
        })
    }

    /// Favorites + ratings + comments
    pub fn popularity(&self) -> i64 {
        self.favorite_count + self.rating_count + self.comment_count
    }
}

impl StoreTotals {
    pub fn load(conn: &Connection) -> DbResult<Self> {
        let totals = conn.query_row(
            "SELECT
                (SELECT COUNT(*) FROM recipes),
                (SELECT COUNT(*) FROM ratings),
                (SELECT COUNT(*) FROM comments),
                (SELECT COUNT(*) FROM favorites),
                (SELECT COUNT(*) FROM (
                    SELECT user_id FROM ratings WHERE user_id IS NOT NULL
                    UNION SELECT user_id FROM comments WHERE user_id IS NOT NULL
                    UNION SELECT user_id FROM favorites
                ))",
            [],
            |row| {
                Ok(Self {
                    recipes: row.get(0)?,
                    ratings: row.get(1)?,
                    comments: row.get(2)?,
                    favorites: row.get(3)?,
                    users: row.get(4)?,
                })
            },
        )?;
        Ok(totals)
    }
}

/// Recipes ranked by popularity, ties broken by id
pub fn most_popular(conn: &Connection, limit: i64) -> DbResult<Vec<Engagement>> {
    let mut stmt = conn.prepare(
        "SELECT r.id,
            (SELECT COUNT(*) FROM favorites f WHERE f.recipe_id = r.id) AS favorite_count,
            (SELECT COUNT(*) FROM ratings ra WHERE ra.recipe_id = r.id) AS rating_count,
            (SELECT COUNT(*) FROM comments c WHERE c.recipe_id = r.id) AS comment_count
         FROM recipes r
         ORDER BY favorite_count + rating_count + comment_count DESC, r.id ASC
         LIMIT ?1",
    )?;
    let rows = stmt
        .query_map([limit], Engagement::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}
