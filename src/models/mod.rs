//! Data models
//!
//! Rust structs representing database entities.

mod comment;
mod favorite;
mod rating;
mod recipe;
pub mod stats;

pub use comment::Comment;
pub use favorite::Favorite;
pub use rating::{Rating, RatingSummary, MAX_RATING, MIN_RATING};
pub use recipe::{Recipe, RecipeCreate, RecipeFilter, RecipeUpdate};
pub use stats::{Engagement, StoreTotals};
