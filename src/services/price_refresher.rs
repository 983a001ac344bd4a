use crate::models::EggType;
use crate::repositories::StoreRepository;
use rand::Rng;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tracing::{debug, info, warn};

/// Maximum relative price movement per refresh, in basis points (±5%)
const MAX_DRIFT_BASIS_POINTS: i64 = 500;

/// Background task that drifts every store's prices on a fixed period,
/// simulating day-to-day shelf price movement.
pub struct PriceRefresher {
    store_repo: Arc<StoreRepository>,
    refresh_interval: Duration,
}

impl PriceRefresher {
    /// Create a new refresher with the default 24 hour period
    pub fn new(store_repo: Arc<StoreRepository>) -> Self {
        Self {
            store_repo,
            refresh_interval: Duration::from_secs(24 * 3600),
        }
    }

    /// Set refresh interval
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Start the refresh loop.
    ///
    /// The first tick fires immediately, so prices refresh once at startup
    /// and then on every period.
    pub async fn start(self) {
        let mut interval = time::interval(self.refresh_interval);
        info!(
            "Price refresher started, refreshing every {:?}",
            self.refresh_interval
        );

        loop {
            interval.tick().await;
            self.refresh_once().await;
        }
    }

    /// One refresh pass over every store and variant.
    ///
    /// Each pair reads its latest observation, applies a bounded drift, and
    /// appends a new record. Pairs without a baseline and failed writes are
    /// skipped; one store's problem never aborts the pass for the rest.
    pub async fn refresh_once(&self) {
        let stores = self.store_repo.list_stores().await;
        if stores.is_empty() {
            debug!("No stores to refresh");
            return;
        }

        info!("Refreshing prices for {} stores", stores.len());
        let mut refreshed = 0usize;
        let mut skipped = 0usize;

        for store in stores {
            for egg_type in EggType::ALL {
                let baseline = match self.store_repo.latest_price(store.id, egg_type).await {
                    Some(record) => record,
                    None => {
                        debug!(
                            "Store {} has no {} baseline, skipping",
                            store.id,
                            egg_type.as_str()
                        );
                        skipped += 1;
                        continue;
                    }
                };

                let drifted = drift_price(baseline.price);
                match self
                    .store_repo
                    .create_price(store.id, egg_type, drifted, None)
                    .await
                {
                    Ok(_) => refreshed += 1,
                    Err(e) => {
                        warn!(
                            "Failed to refresh {} price for store {}: {}",
                            egg_type.as_str(),
                            store.id,
                            e
                        );
                        skipped += 1;
                    }
                }
            }
        }

        info!(
            "Price refresh complete: {} records written, {} pairs skipped",
            refreshed, skipped
        );
    }
}

/// Apply a bounded multiplicative drift to a price and round to cents.
/// A non-negative input always drifts to a non-negative output.
fn drift_price(price: Decimal) -> Decimal {
    let mut rng = rand::thread_rng();
    let basis_points: i64 = rng.gen_range(-MAX_DRIFT_BASIS_POINTS..=MAX_DRIFT_BASIS_POINTS);
    let factor = Decimal::ONE + Decimal::new(basis_points, 4);
    (price * factor).round_dp(2)
}
