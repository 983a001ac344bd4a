pub mod price_refresher;
pub mod search_service;

pub use price_refresher::PriceRefresher;
pub use search_service::SearchService;
