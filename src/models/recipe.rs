//! Recipe model
//!
//! A recipe with a serving count and free-text ingredient lines.

use rusqlite::types::Type;
use rusqlite::{params, Connection, Row, ToSql};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};

/// A stored recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub servings: f64,
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a new recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeCreate {
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    #[serde(default = "default_servings")]
    pub servings: f64,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
    pub notes: Option<String>,
}

fn default_servings() -> f64 {
    1.0
}

/// Data for updating a recipe; `None` leaves a field alone
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub servings: Option<f64>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<String>,
    pub notes: Option<String>,
}

/// Filters for listing recipes
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter<'a> {
    /// Case-insensitive substring match on name, description or ingredient lines
    pub query: Option<&'a str>,
    /// Case-insensitive exact category
    pub category: Option<&'a str>,
}

/// Escape LIKE wildcards so the query matches literally
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl RecipeFilter<'_> {
    /// WHERE clause and its parameters, numbered from ?1
    fn where_clause(&self) -> (String, Vec<Box<dyn ToSql>>) {
        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(q) = self.query {
            let n = params_vec.len() + 1;
            conditions.push(format!(
                "(name LIKE ?{n} ESCAPE '\\' OR description LIKE ?{n} ESCAPE '\\' \
                 OR ingredients LIKE ?{n} ESCAPE '\\')"
            ));
            params_vec.push(Box::new(format!("%{}%", escape_like(q))));
        }
        if let Some(category) = self.category {
            conditions.push(format!("category = ?{} COLLATE NOCASE", params_vec.len() + 1));
            params_vec.push(Box::new(category.to_string()));
        }

        let clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        (clause, params_vec)
    }
}

impl Recipe {
    /// Create a Recipe from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let ingredients_json: String = row.get("ingredients")?;
        let ingredients = serde_json::from_str(&ingredients_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e))
        })?;

        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            category: row.get("category")?,
            description: row.get("description")?,
            servings: row.get("servings")?,
            ingredients,
            instructions: row.get("instructions")?,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Insert a new recipe into the database
    pub fn create(conn: &Connection, data: &RecipeCreate) -> DbResult<Self> {
        let ingredients = serde_json::to_string(&data.ingredients)?;
        conn.execute(
            r#"
            INSERT INTO recipes (name, category, description, servings, ingredients, instructions, notes)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                data.name,
                data.category,
                data.description,
                data.servings,
                ingredients,
                data.instructions,
                data.notes,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?
            .ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Get a recipe by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM recipes WHERE id = ?1")?;

        match stmt.query_row([id], Self::from_row) {
            Ok(recipe) => Ok(Some(recipe)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List recipes matching a filter
    pub fn list(
        conn: &Connection,
        filter: &RecipeFilter,
        sort_by: &str,
        sort_order: &str,
        limit: i64,
        offset: i64,
    ) -> DbResult<Vec<Self>> {
        let order = if sort_order.eq_ignore_ascii_case("desc") { "DESC" } else { "ASC" };
        let sort_expr = match sort_by.to_lowercase().as_str() {
            "created_at" => "created_at",
            "rating" => "(SELECT COALESCE(AVG(value), 0) FROM ratings WHERE recipe_id = recipes.id)",
            _ => "name COLLATE NOCASE",
        };

        let (where_clause, mut params_vec) = filter.where_clause();
        let sql = format!(
            "SELECT * FROM recipes {} ORDER BY {} {}, id ASC LIMIT ?{} OFFSET ?{}",
            where_clause,
            sort_expr,
            order,
            params_vec.len() + 1,
            params_vec.len() + 2
        );
        params_vec.push(Box::new(limit));
        params_vec.push(Box::new(offset));

        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn.prepare(&sql)?;
        let recipes = stmt
            .query_map(params_refs.as_slice(), Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(recipes)
    }

    /// Count recipes matching a filter
    pub fn count(conn: &Connection, filter: &RecipeFilter) -> DbResult<i64> {
        let (where_clause, params_vec) = filter.where_clause();
        let sql = format!("SELECT COUNT(*) FROM recipes {}", where_clause);
        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
        let count: i64 = conn.query_row(&sql, params_refs.as_slice(), |row| row.get(0))?;
        Ok(count)
    }

    /// Every recipe, optionally restricted to one category, oldest first
    pub fn all_in_category(conn: &Connection, category: Option<&str>) -> DbResult<Vec<Self>> {
        let recipes = match category {
            Some(category) => {
                let mut stmt = conn.prepare(
                    "SELECT * FROM recipes WHERE category = ?1 COLLATE NOCASE ORDER BY id",
                )?;
                let rows = stmt.query_map([category], Self::from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = conn.prepare("SELECT * FROM recipes ORDER BY id")?;
                let rows = stmt.query_map([], Self::from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };
        Ok(recipes)
    }

    /// Update a recipe; returns `None` if it does not exist
    pub fn update(conn: &Connection, id: i64, data: &RecipeUpdate) -> DbResult<Option<Self>> {
        let mut updates = Vec::new();
        let mut params_vec: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(ref name) = data.name {
            updates.push(format!("name = ?{}", params_vec.len() + 1));
            params_vec.push(Box::new(name.clone()));
        }
        if let Some(ref category) = data.category {
            updates.push(format!("category = ?{}", params_vec.len() + 1));
            params_vec.push(Box::new(category.clone()));
        }
        if let Some(ref description) = data.description {
            updates.push(format!("description = ?{}", params_vec.len() + 1));
            params_vec.push(Box::new(description.clone()));
        }
        if let Some(servings) = data.servings {
            updates.push(format!("servings = ?{}", params_vec.len() + 1));
            params_vec.push(Box::new(servings));
        }
        if let Some(ref ingredients) = data.ingredients {
            updates.push(format!("ingredients = ?{}", params_vec.len() + 1));
            params_vec.push(Box::new(serde_json::to_string(ingredients)?));
        }
        if let Some(ref instructions) = data.instructions {
            updates.push(format!("instructions = ?{}", params_vec.len() + 1));
            params_vec.push(Box::new(instructions.clone()));
        }
        if let Some(ref notes) = data.notes {
            updates.push(format!("notes = ?{}", params_vec.len() + 1));
            params_vec.push(Box::new(notes.clone()));
        }

        if updates.is_empty() {
            return Self::get_by_id(conn, id);
        }

        updates.push("updated_at = datetime('now')".to_string());

        let sql = format!(
            "UPDATE recipes SET {} WHERE id = ?{}",
            updates.join(", "),
            params_vec.len() + 1
        );
        params_vec.push(Box::new(id));

        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
        let rows = conn.execute(&sql, params_refs.as_slice())?;
        if rows == 0 {
            return Ok(None);
        }

        Self::get_by_id(conn, id)
    }

    /// Delete a recipe; ratings and favorites cascade
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM recipes WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn recipe(name: &str, category: Option<&str>) -> RecipeCreate {
        RecipeCreate {
            name: name.to_string(),
            category: category.map(str::to_string),
            description: None,
            servings: 2.0,
            ingredients: vec!["400g spaghetti".to_string(), "salt to taste".to_string()],
            instructions: None,
            notes: None,
        }
    }

    #[test]
    fn test_create_and_get_round_trips_ingredients() {
        let conn = setup();
        let created = Recipe::create(&conn, &recipe("Carbonara", Some("Italian"))).unwrap();
        let fetched = Recipe::get_by_id(&conn, created.id).unwrap().unwrap();
        assert_eq!(fetched.name, "Carbonara");
        assert_eq!(fetched.servings, 2.0);
        assert_eq!(fetched.ingredients, vec!["400g spaghetti", "salt to taste"]);
        assert!(Recipe::get_by_id(&conn, created.id + 1).unwrap().is_none());
    }

    #[test]
    fn test_list_filters_and_counts() {
        let conn = setup();
        Recipe::create(&conn, &recipe("Carbonara", Some("Italian"))).unwrap();
        Recipe::create(&conn, &recipe("Pad Thai", Some("Thai"))).unwrap();
        Recipe::create(&conn, &recipe("Arrabbiata", Some("italian"))).unwrap();

        let filter = RecipeFilter { query: None, category: Some("ITALIAN") };
        let italian = Recipe::list(&conn, &filter, "name", "asc", 50, 0).unwrap();
        let names: Vec<_> = italian.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Arrabbiata", "Carbonara"]);
        assert_eq!(Recipe::count(&conn, &filter).unwrap(), 2);

        let filter = RecipeFilter { query: Some("Thai"), category: None };
        assert_eq!(Recipe::count(&conn, &filter).unwrap(), 1);

        let page = Recipe::list(&conn, &RecipeFilter::default(), "name", "desc", 1, 1).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "Carbonara");
    }

    #[test]
    fn test_query_searches_description_and_ingredients() {
        let conn = setup();
        let mut soup = recipe("Minestrone", Some("Italian"));
        soup.description = Some("Hearty winter soup".to_string());
        soup.ingredients = vec!["2 cups cannellini beans".to_string()];
        Recipe::create(&conn, &soup).unwrap();
        Recipe::create(&conn, &recipe("Carbonara", Some("Italian"))).unwrap();

        let by_ingredient = RecipeFilter { query: Some("cannellini"), category: None };
        let found = Recipe::list(&conn, &by_ingredient, "name", "asc", 50, 0).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Minestrone");

        let by_description = RecipeFilter { query: Some("WINTER"), category: None };
        assert_eq!(Recipe::count(&conn, &by_description).unwrap(), 1);

        let shared = RecipeFilter { query: Some("spaghetti"), category: None };
        assert_eq!(Recipe::count(&conn, &shared).unwrap(), 1);
    }

    #[test]
    fn test_query_wildcards_match_literally() {
        let conn = setup();
        Recipe::create(&conn, &recipe("100% Rye Bread", None)).unwrap();
        Recipe::create(&conn, &recipe("Rye_Crackers", None)).unwrap();
        Recipe::create(&conn, &recipe("Ryebread", None)).unwrap();

        let percent = RecipeFilter { query: Some("%"), category: None };
        assert_eq!(Recipe::count(&conn, &percent).unwrap(), 1);

        let underscore = RecipeFilter { query: Some("Rye_"), category: None };
        assert_eq!(Recipe::count(&conn, &underscore).unwrap(), 1);

        assert_eq!(escape_like(r"50%_off\"), r"50\%\_off\\");
    }

    #[test]
    fn test_update_partial_fields() {
        let conn = setup();
        let created = Recipe::create(&conn, &recipe("Soup", None)).unwrap();
        let update = RecipeUpdate {
            servings: Some(6.0),
            ingredients: Some(vec!["1l stock".to_string()]),
            ..Default::default()
        };
        let updated = Recipe::update(&conn, created.id, &update).unwrap().unwrap();
        assert_eq!(updated.name, "Soup");
        assert_eq!(updated.servings, 6.0);
        assert_eq!(updated.ingredients, vec!["1l stock"]);

        assert!(Recipe::update(&conn, 999, &update).unwrap().is_none());
    }

    #[test]
    fn test_delete() {
        let conn = setup();
        let created = Recipe::create(&conn, &recipe("Toast", None)).unwrap();
        assert!(Recipe::delete(&conn, created.id).unwrap());
        assert!(!Recipe::delete(&conn, created.id).unwrap());
    }
}
