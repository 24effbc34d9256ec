// Tuning Backend - ingestion service for performance tuning documents

pub mod config;
pub mod db;
pub mod models;
pub mod types;
pub mod parsers;
pub mod storage;
pub mod routes;
pub mod middleware;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;
// Note: Import specific items from types module instead of glob to avoid name conflicts
// e.g., use tuning_backend::types::{AppError, AppResult};

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
