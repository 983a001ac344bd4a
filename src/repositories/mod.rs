pub mod store_repository;

// Re-export for convenient access
pub use store_repository::{BackfillStore, StoreRepository};
