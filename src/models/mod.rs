//! Domain models for the Eggwatch backend.
//!
//! This module contains the core entities of the price tracker: stores,
//! their price observations, and the derived search views.

pub mod price;
pub mod search;
pub mod store;

// Re-export all models for convenient access
pub use price::{EggType, PriceRecord};
pub use search::{SearchResults, StoreView};
pub use store::{LatestPrices, NewStore, Store, StoreDetails};
