//! Recipe management service: CRUD over recipes plus filtered search.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod filter;
pub mod merge;
pub mod models;
pub mod observer;
pub mod query;
pub mod schema;
pub mod service;
pub mod store;

use std::sync::Arc;

/// Application state shared across all handlers
pub type AppState = Arc<service::RecipeService>;
