//! Ladle Library
//!
//! Ingredient parsing and servings scaling, plus recipe storage for the MCP server.

pub mod build_info;
pub mod config;
pub mod db;
pub mod mcp;
pub mod models;
pub mod scaling;
pub mod tools;
