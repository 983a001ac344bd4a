use super::{PriceRecord, Store};
use rust_decimal::Decimal;
use serde::Serialize;

/// A store annotated with price data for one requested egg variant
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreView {
    #[serde(flatten)]
    pub store: Store,
    pub current_price: Option<Decimal>,
    pub price_history: Vec<PriceRecord>,
}

/// Envelope returned by the price search endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub stores: Vec<StoreView>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl SearchResults {
    /// Build the envelope, aggregating min/max over stores that have a
    /// current price. Stores without one are listed but never drag the
    /// bounds; with no priced store at all, both bounds stay absent.
    pub fn from_views(stores: Vec<StoreView>) -> Self {
        let mut min_price: Option<Decimal> = None;
        let mut max_price: Option<Decimal> = None;

        for view in &stores {
            if let Some(price) = view.current_price {
                min_price = Some(min_price.map_or(price, |m| m.min(price)));
                max_price = Some(max_price.map_or(price, |m| m.max(price)));
            }
        }

        Self {
            stores,
            min_price,
            max_price,
        }
    }
}
