use chrono::{DateTime, Duration, Utc};
use eggwatch_backend::models::*;
use eggwatch_backend::repositories::*;
use eggwatch_backend::services::SearchService;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Test application: a fresh in-memory repository plus the services wired
/// against it
pub struct TestApp {
    pub store_repo: Arc<StoreRepository>,
    pub search_service: Arc<SearchService>,
}

impl TestApp {
    /// Create a test app with synthetic backfill disabled
    pub fn new() -> Self {
        Self::with_synthetic_data(false)
    }

    /// Create a test app with an explicit synthetic backfill setting
    pub fn with_synthetic_data(synthetic_data: bool) -> Self {
        let store_repo = Arc::new(StoreRepository::new());
        let search_service = Arc::new(SearchService::new(store_repo.clone(), synthetic_data));

        Self {
            store_repo,
            search_service,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test data fixtures: two stores near the 94110 centroid and one far away
/// in Brooklyn
pub struct TestFixtures {
    pub mission_market: Store,
    pub valencia_grocer: Store,
    pub brooklyn_bodega: Store,
}

impl TestFixtures {
    /// Create test fixtures with sample data
    pub async fn create(app: &TestApp) -> Self {
        let mission_market =
            create_test_store(app, "Mission Market", "94110", 37.7485, -122.4184).await;

        let valencia_grocer =
            create_test_store(app, "Valencia Corner Grocery", "94110", 37.7520, -122.4210).await;

        let brooklyn_bodega =
            create_test_store(app, "Atlantic Avenue Foods", "11201", 40.6955, -73.9902).await;

        // Brown eggs at all three stores; white only at Valencia
        create_test_price(app, mission_market.id, EggType::Brown, 399).await;
        create_test_price(app, valencia_grocer.id, EggType::Brown, 449).await;
        create_test_price(app, valencia_grocer.id, EggType::White, 359).await;
        create_test_price(app, brooklyn_bodega.id, EggType::Brown, 519).await;

        Self {
            mission_market,
            valencia_grocer,
            brooklyn_bodega,
        }
    }
}

/// Helper function to create a test store at an explicit coordinate
pub async fn create_test_store(
    app: &TestApp,
    name: &str,
    zip_code: &str,
    latitude: f64,
    longitude: f64,
) -> Store {
    app.store_repo
        .create_store(NewStore {
            name: name.to_string(),
            address: "100 Test Street".to_string(),
            city: "Testville".to_string(),
            state: "CA".to_string(),
            zip_code: zip_code.to_string(),
            latitude,
            longitude,
            phone: None,
            website: None,
            hours: None,
        })
        .await
}

/// Helper function to record a price given in cents
pub async fn create_test_price(
    app: &TestApp,
    store_id: i64,
    egg_type: EggType,
    cents: i64,
) -> PriceRecord {
    app.store_repo
        .create_price(store_id, egg_type, dollars(cents), None)
        .await
        .expect("Failed to create test price")
}

/// Helper function to record a price at an explicit timestamp
pub async fn create_test_price_at(
    app: &TestApp,
    store_id: i64,
    egg_type: EggType,
    cents: i64,
    recorded_at: DateTime<Utc>,
) -> PriceRecord {
    app.store_repo
        .create_price(store_id, egg_type, dollars(cents), Some(recorded_at))
        .await
        .expect("Failed to create test price")
}

/// A Decimal amount from cents, e.g. `dollars(399)` is 3.99
pub fn dollars(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Timestamp a fixed number of hours in the past
pub fn hours_ago(hours: i64) -> DateTime<Utc> {
    Utc::now() - Duration::hours(hours)
}

/// Build a store value without touching a repository (for pure tests)
pub fn sample_store(id: i64) -> Store {
    Store {
        id,
        name: format!("Store {}", id),
        address: "100 Test Street".to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        zip_code: "94110".to_string(),
        latitude: 37.7485,
        longitude: -122.4184,
        phone: None,
        website: None,
        hours: None,
    }
}

/// Assert that two stores are equal
pub fn assert_stores_equal(store1: &Store, store2: &Store) {
    assert_eq!(store1.id, store2.id);
    assert_eq!(store1.name, store2.name);
    assert_eq!(store1.address, store2.address);
    assert_eq!(store1.zip_code, store2.zip_code);
    assert_eq!(store1.latitude, store2.latitude);
    assert_eq!(store1.longitude, store2.longitude);
}

/// Assert that a search result lists exactly the given store ids, in order
pub fn assert_result_store_ids(results: &SearchResults, expected: &[i64]) {
    let ids: Vec<i64> = results.stores.iter().map(|view| view.store.id).collect();
    assert_eq!(ids, expected);
}
