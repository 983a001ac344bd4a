//! Eggwatch Backend Library
//!
//! This module exposes the backend components for use by tests and other consumers.

pub mod config;
pub mod error;
pub mod geo;
pub mod http_service;
pub mod models;
pub mod repositories;
pub mod services;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};

use repositories::StoreRepository;
use services::SearchService;
use std::sync::Arc;

/// Application state containing the repository and services shared by
/// request handlers and background tasks
pub struct AppState {
    pub store_repo: Arc<StoreRepository>,
    pub search_service: Arc<SearchService>,
}

impl AppState {
    /// Create a new AppState with an empty repository
    pub fn new(config: &AppConfig) -> Self {
        let store_repo = Arc::new(StoreRepository::new());
        let search_service = Arc::new(SearchService::new(
            store_repo.clone(),
            config.synthetic_data,
        ));

        Self {
            store_repo,
            search_service,
        }
    }
}
