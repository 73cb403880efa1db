//! Bookshelf server
//!
//! A small REST JSON API for a book catalog held in process memory.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Build the state with a fresh, empty book store
    pub fn new() -> Self {
        let repository = repository::Repository::default();
        Self {
            services: Arc::new(services::Services::new(repository)),
        }
    }
}
