//! MCP Tool implementations
//!
//! Each submodule contains tools for a specific domain.

pub mod analytics;
pub mod comments;
pub mod favorites;
pub mod ratings;
pub mod recipes;
pub mod scaling;
pub mod status;
pub mod substitutes;
pub mod suggestions;
