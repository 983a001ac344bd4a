use crate::error::{option_to_result, AppError, AppResult};
use crate::geo::resolver::{self, ResolvedZip};
use crate::geo::{within_radius, Coordinate, RADIUS_BUFFER_MILES};
use crate::models::{
    EggType, LatestPrices, NewStore, PriceRecord, SearchResults, Store, StoreDetails,
};
use crate::repositories::{BackfillStore, StoreRepository};
use rand::Rng;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info};

/// Number of synthetic stores generated per backfilled postal code
pub const SYNTHETIC_STORE_COUNT: usize = 5;

/// Synthetic store templates: name, street address, hours, and a coordinate
/// offset from the resolved centroid. Offsets stay under ~0.75 miles so
/// generated stores always fall inside the smallest allowed search radius.
const SYNTHETIC_STORES: [(&str, &str, &str, f64, f64); SYNTHETIC_STORE_COUNT] = [
    ("Sunrise Market", "214 Oak Street", "7am-9pm daily", 0.004, -0.006),
    ("Corner Farm Stand", "87 Mission Road", "8am-6pm daily", -0.003, 0.008),
    ("Daily Dozen Foods", "1520 Elm Avenue", "8am-8pm daily", 0.006, 0.003),
    ("Meadowbrook Grocery", "342 Birch Lane", "Mon-Sat 8am-7pm", -0.005, -0.004),
    ("Hillside Pantry", "970 Cedar Court", "9am-9pm daily", 0.002, 0.010),
];

/// Service orchestrating the price search pipeline: validation, postal-code
/// resolution, radius filtering, synthetic backfill, and aggregation.
pub struct SearchService {
    store_repo: Arc<StoreRepository>,
    synthetic_data: bool,
}

impl SearchService {
    pub fn new(store_repo: Arc<StoreRepository>, synthetic_data: bool) -> Self {
        Self {
            store_repo,
            synthetic_data,
        }
    }

    /// Search for stores near a postal code with price data for one variant.
    ///
    /// Raw query parameters come in untyped so every validation failure is
    /// reported with the offending field's name rather than a framework
    /// parse error.
    pub async fn search(
        &self,
        zip_code: Option<&str>,
        radius: Option<&str>,
        egg_type: Option<&str>,
    ) -> AppResult<SearchResults> {
        let zip = validate_zip_code(zip_code)?;
        let radius = validate_radius(radius)?;
        let egg_type = validate_egg_type(egg_type)?;

        debug!(
            "Searching zip={} radius={}mi egg_type={}",
            zip,
            radius,
            egg_type.as_str()
        );

        let resolved = resolver::lookup(zip)?;
        let effective_radius = radius as f64 + RADIUS_BUFFER_MILES;

        let mut nearby = self
            .stores_within(resolved.coordinate, effective_radius)
            .await;

        if nearby.is_empty() && self.synthetic_data {
            let batch = synthetic_batch(zip, &resolved);
            let created = self.store_repo.backfill_stores(zip, batch).await?;
            if !created.is_empty() {
                info!(
                    "Backfilled {} synthetic stores for zip {}",
                    created.len(),
                    zip
                );
            }
            // Re-run the filter so winners and losers of a concurrent
            // backfill race take the same read path.
            nearby = self
                .stores_within(resolved.coordinate, effective_radius)
                .await;
        }

        let ids: Vec<i64> = nearby.iter().map(|s| s.id).collect();
        let views = self.store_repo.search_views(&ids, egg_type).await;
        Ok(SearchResults::from_views(views))
    }

    /// Price history for one store and variant, oldest first (chart order)
    pub async fn store_price_history(
        &self,
        store_id: i64,
        egg_type: Option<&str>,
    ) -> AppResult<Vec<PriceRecord>> {
        let egg_type = validate_egg_type(egg_type)?;
        let store = option_to_result(
            self.store_repo.get_store(store_id).await,
            &format!("Store {} not found", store_id),
        )?;

        let mut history = self.store_repo.price_history(store.id, egg_type).await;
        // Stored newest-first for latest-price lookups; serve oldest-first
        history.reverse();
        Ok(history)
    }

    /// A single store with its latest price per variant
    pub async fn store_details(&self, store_id: i64) -> AppResult<StoreDetails> {
        let store = option_to_result(
            self.store_repo.get_store(store_id).await,
            &format!("Store {} not found", store_id),
        )?;

        let white = self
            .store_repo
            .latest_price(store.id, EggType::White)
            .await
            .map(|r| r.price);
        let brown = self
            .store_repo
            .latest_price(store.id, EggType::Brown)
            .await
            .map(|r| r.price);

        Ok(StoreDetails {
            store,
            prices: LatestPrices { white, brown },
        })
    }

    async fn stores_within(&self, center: Coordinate, radius_miles: f64) -> Vec<Store> {
        self.store_repo
            .list_stores()
            .await
            .into_iter()
            .filter(|store| within_radius(center, store.coordinate(), radius_miles))
            .collect()
    }
}

fn validate_zip_code(zip_code: Option<&str>) -> AppResult<&str> {
    match zip_code {
        Some(zip) if zip.len() == 5 && zip.chars().all(|c| c.is_ascii_digit()) => Ok(zip),
        _ => Err(AppError::Validation(
            "zipCode must be exactly 5 digits".to_string(),
        )),
    }
}

fn validate_radius(radius: Option<&str>) -> AppResult<u32> {
    radius
        .and_then(|r| r.parse::<u32>().ok())
        .filter(|r| (1..=20).contains(r))
        .ok_or_else(|| {
            AppError::Validation("radius must be an integer between 1 and 20".to_string())
        })
}

fn validate_egg_type(egg_type: Option<&str>) -> AppResult<EggType> {
    egg_type
        .and_then(|e| EggType::from_str(e).ok())
        .ok_or_else(|| {
            AppError::Validation("eggType must be one of: white, brown".to_string())
        })
}

/// Base shelf price per variant, before jitter
fn base_price(egg_type: EggType) -> Decimal {
    match egg_type {
        EggType::White => Decimal::new(349, 2), // 3.49
        EggType::Brown => Decimal::new(429, 2), // 4.29
    }
}

/// Build the synthetic store batch for a postal code with no real coverage.
///
/// Structure is fully deterministic (names, addresses, coordinate offsets
/// come from fixed templates anchored at the resolved centroid); only the
/// seed prices carry jitter of up to ±30 cents around the variant base.
fn synthetic_batch(zip: &str, resolved: &ResolvedZip) -> Vec<BackfillStore> {
    let mut rng = rand::thread_rng();

    SYNTHETIC_STORES
        .iter()
        .map(|&(name, street, hours, lat_offset, lon_offset)| {
            let store = NewStore {
                name: name.to_string(),
                address: street.to_string(),
                city: resolved.city.to_string(),
                state: resolved.state.to_string(),
                zip_code: zip.to_string(),
                latitude: resolved.coordinate.latitude + lat_offset,
                longitude: resolved.coordinate.longitude + lon_offset,
                phone: None,
                website: None,
                hours: Some(hours.to_string()),
            };

            let prices = EggType::ALL
                .iter()
                .map(|&egg_type| {
                    let jitter_cents: i64 = rng.gen_range(-30..=30);
                    (egg_type, base_price(egg_type) + Decimal::new(jitter_cents, 2))
                })
                .collect();

            BackfillStore { store, prices }
        })
        .collect()
}
