use crate::error::RepositoryError;
use crate::models::{EggType, NewStore, PriceRecord, Store, StoreView};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

/// One synthetic store plus its seed prices, written as a unit by
/// [`StoreRepository::backfill_stores`].
#[derive(Debug, Clone)]
pub struct BackfillStore {
    pub store: NewStore,
    pub prices: Vec<(EggType, Decimal)>,
}

/// Mutable state guarded by the repository lock.
struct RepositoryState {
    stores: HashMap<i64, Store>,
    prices: HashMap<i64, PriceRecord>,
    next_store_id: i64,
    next_price_id: i64,
    backfilled_zips: HashSet<String>,
}

impl RepositoryState {
    fn new() -> Self {
        Self {
            stores: HashMap::new(),
            prices: HashMap::new(),
            next_store_id: 1,
            next_price_id: 1,
            backfilled_zips: HashSet::new(),
        }
    }

    fn insert_store(&mut self, new_store: NewStore) -> Store {
        let id = self.next_store_id;
        self.next_store_id += 1;
        let store = new_store.into_store(id);
        self.stores.insert(id, store.clone());
        store
    }

    fn insert_price(
        &mut self,
        store_id: i64,
        egg_type: EggType,
        price: Decimal,
        recorded_at: DateTime<Utc>,
    ) -> Result<PriceRecord, RepositoryError> {
        if !self.stores.contains_key(&store_id) {
            return Err(RepositoryError::NotFound(format!(
                "Store {} not found",
                store_id
            )));
        }
        if price < Decimal::ZERO {
            return Err(RepositoryError::InvalidInput(
                "Price must not be negative".to_string(),
            ));
        }

        let id = self.next_price_id;
        self.next_price_id += 1;
        let record = PriceRecord {
            id,
            store_id,
            egg_type,
            price: price.round_dp(2),
            recorded_at,
        };
        self.prices.insert(id, record.clone());
        Ok(record)
    }

    /// All records for one store and variant, newest first. Equal timestamps
    /// order by descending id, so the most recently written record wins.
    fn history(&self, store_id: i64, egg_type: EggType) -> Vec<PriceRecord> {
        let mut records: Vec<PriceRecord> = self
            .prices
            .values()
            .filter(|r| r.store_id == store_id && r.egg_type == egg_type)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at).then(b.id.cmp(&a.id)));
        records
    }
}

/// Repository for store and price data access.
///
/// All state lives in process memory behind a single RwLock. Every mutation
/// takes the write guard for its whole read-then-write sequence, so request
/// handlers and the refresh scheduler never interleave partial writes.
/// Stores are immutable once created and price records are append-only;
/// nothing is ever deleted.
pub struct StoreRepository {
    state: RwLock<RepositoryState>,
}

impl StoreRepository {
    /// Create a new, empty StoreRepository
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RepositoryState::new()),
        }
    }

    /// Insert a new store, assigning the next id
    pub async fn create_store(&self, new_store: NewStore) -> Store {
        let mut state = self.state.write().await;
        state.insert_store(new_store)
    }

    /// Find a store by id
    pub async fn get_store(&self, id: i64) -> Option<Store> {
        let state = self.state.read().await;
        state.stores.get(&id).cloned()
    }

    /// All stores, ordered by id
    pub async fn list_stores(&self) -> Vec<Store> {
        let state = self.state.read().await;
        let mut stores: Vec<Store> = state.stores.values().cloned().collect();
        stores.sort_by_key(|s| s.id);
        stores
    }

    /// Append a price observation for a store.
    ///
    /// `recorded_at` defaults to now. Prices are normalized to two decimal
    /// places on write. Fails without touching state if the store does not
    /// exist or the price is negative.
    pub async fn create_price(
        &self,
        store_id: i64,
        egg_type: EggType,
        price: Decimal,
        recorded_at: Option<DateTime<Utc>>,
    ) -> Result<PriceRecord, RepositoryError> {
        let recorded_at = recorded_at.unwrap_or_else(Utc::now);
        let mut state = self.state.write().await;
        state.insert_price(store_id, egg_type, price, recorded_at)
    }

    /// Price history for one store and variant, newest first.
    /// Empty for unknown stores.
    pub async fn price_history(&self, store_id: i64, egg_type: EggType) -> Vec<PriceRecord> {
        let state = self.state.read().await;
        state.history(store_id, egg_type)
    }

    /// Most recent observation for one store and variant
    pub async fn latest_price(&self, store_id: i64, egg_type: EggType) -> Option<PriceRecord> {
        let state = self.state.read().await;
        state
            .prices
            .values()
            .filter(|r| r.store_id == store_id && r.egg_type == egg_type)
            .max_by(|a, b| a.recorded_at.cmp(&b.recorded_at).then(a.id.cmp(&b.id)))
            .cloned()
    }

    /// Join each store id with its latest price and full history for the
    /// requested variant. Ids that no longer resolve are silently dropped.
    pub async fn search_views(&self, store_ids: &[i64], egg_type: EggType) -> Vec<StoreView> {
        let state = self.state.read().await;
        store_ids
            .iter()
            .filter_map(|id| state.stores.get(id).cloned())
            .map(|store| {
                let price_history = state.history(store.id, egg_type);
                let current_price = price_history.first().map(|r| r.price);
                StoreView {
                    store,
                    current_price,
                    price_history,
                }
            })
            .collect()
    }

    /// Create a batch of synthetic stores and their seed prices for a postal
    /// code, exactly once per code.
    ///
    /// The first caller for a given code wins: the per-code marker is tested
    /// and set under the same write guard as the inserts, so two concurrent
    /// empty-result searches can never double-create. Losers (and any later
    /// call for the same code) get an empty Vec and should fall back to the
    /// read path. A rejected batch leaves no trace, including the marker.
    pub async fn backfill_stores(
        &self,
        zip_code: &str,
        batch: Vec<BackfillStore>,
    ) -> Result<Vec<Store>, RepositoryError> {
        // Validate up front so a failed call cannot leave the marker set
        // with only part of the batch written.
        for entry in &batch {
            for (_, price) in &entry.prices {
                if *price < Decimal::ZERO {
                    return Err(RepositoryError::InvalidInput(
                        "Price must not be negative".to_string(),
                    ));
                }
            }
        }

        let mut state = self.state.write().await;
        if !state.backfilled_zips.insert(zip_code.to_string()) {
            return Ok(Vec::new());
        }

        let now = Utc::now();
        let mut created = Vec::with_capacity(batch.len());
        for entry in batch {
            let store = state.insert_store(entry.store);
            for (egg_type, price) in entry.prices {
                state.insert_price(store.id, egg_type, price, now)?;
            }
            created.push(store);
        }
        Ok(created)
    }

    /// Number of stores currently held
    pub async fn store_count(&self) -> usize {
        let state = self.state.read().await;
        state.stores.len()
    }

    /// Number of price records currently held
    pub async fn price_count(&self) -> usize {
        let state = self.state.read().await;
        state.prices.len()
    }
}

impl Default for StoreRepository {
    fn default() -> Self {
        Self::new()
    }
}
