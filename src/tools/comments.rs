//! Comment MCP Tools

use serde::Serialize;

use crate::db::Database;
use crate::models::{Comment, Recipe};

/// Response for list_comments
#[derive(Debug, Serialize)]
pub struct ListCommentsResponse {
    pub recipe_id: i64,
    pub comments: Vec<Comment>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct CommentDeleteResponse {
    pub success: bool,
    pub deleted_id: i64,
}

/// Leave a comment on a recipe
pub fn add_comment(
    db: &Database,
    recipe_id: i64,
    user_id: Option<&str>,
    body: &str,
) -> Result<Comment, String> {
    let body = body.trim();
    if body.is_empty() {
        return Err("Comment cannot be empty".to_string());
    }
    let user_id = user_id.map(str::trim).filter(|u| !u.is_empty());

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let recipe = Recipe::get_by_id(&conn, recipe_id)
        .map_err(|e| format!("Database error checking recipe: {}", e))?;
    if recipe.is_none() {
        return Err(format!("Recipe not found with id: {}", recipe_id));
    }

    let comment = Comment::create(&conn, recipe_id, user_id, body)
        .map_err(|e| format!("Failed to add comment: {}", e))?;

    tracing::info!(id = comment.id, recipe_id, "Added comment");
    Ok(comment)
}

/// Comments on a recipe, oldest first; `None` if the recipe does not exist
pub fn list_comments(db: &Database, recipe_id: i64) -> Result<Option<ListCommentsResponse>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    if Recipe::get_by_id(&conn, recipe_id)
        .map_err(|e| format!("Database error checking recipe: {}", e))?
        .is_none()
    {
        return Ok(None);
    }

    let comments = Comment::get_for_recipe(&conn, recipe_id)
        .map_err(|e| format!("Failed to get comments: {}", e))?;

    Ok(Some(ListCommentsResponse {
        recipe_id,
        count: comments.len(),
        comments,
    }))
}

pub fn delete_comment(db: &Database, id: i64) -> Result<Option<CommentDeleteResponse>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let deleted = Comment::delete(&conn, id)
        .map_err(|e| format!("Failed to delete comment: {}", e))?;

    Ok(deleted.then_some(CommentDeleteResponse {
        success: true,
        deleted_id: id,
    }))
}
