mod helpers;

use eggwatch_backend::models::*;
use eggwatch_backend::repositories::*;
use helpers::*;
use rust_decimal::Decimal;

// ============================================================================
// Store Creation Tests
// ============================================================================

#[tokio::test]
async fn test_store_ids_start_at_one_and_increase() {
    let app = TestApp::new();

    let first = create_test_store(&app, "First", "94110", 37.7485, -122.4184).await;
    let second = create_test_store(&app, "Second", "94110", 37.7490, -122.4180).await;
    let third = create_test_store(&app, "Third", "94110", 37.7495, -122.4175).await;

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert_eq!(third.id, 3);
}

#[tokio::test]
async fn test_get_store_round_trip() {
    let app = TestApp::new();

    let created = create_test_store(&app, "Mission Market", "94110", 37.7485, -122.4184).await;
    let found = app
        .store_repo
        .get_store(created.id)
        .await
        .expect("Store should exist");

    assert_stores_equal(&created, &found);
}

#[tokio::test]
async fn test_get_unknown_store_returns_none() {
    let app = TestApp::new();

    assert!(app.store_repo.get_store(42).await.is_none());
}

#[tokio::test]
async fn test_list_stores_ordered_by_id() {
    let app = TestApp::new();
    let fixtures = TestFixtures::create(&app).await;

    let stores = app.store_repo.list_stores().await;
    let ids: Vec<i64> = stores.iter().map(|s| s.id).collect();

    assert_eq!(
        ids,
        vec![
            fixtures.mission_market.id,
            fixtures.valencia_grocer.id,
            fixtures.brooklyn_bodega.id,
        ]
    );
}

// ============================================================================
// Price Append Tests
// ============================================================================

#[tokio::test]
async fn test_price_ids_start_at_one_and_increase() {
    let app = TestApp::new();
    let store = create_test_store(&app, "Mission Market", "94110", 37.7485, -122.4184).await;

    let first = create_test_price(&app, store.id, EggType::White, 349).await;
    let second = create_test_price(&app, store.id, EggType::Brown, 429).await;

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert_eq!(first.price, dollars(349));
    assert_eq!(second.store_id, store.id);
}

#[tokio::test]
async fn test_price_for_unknown_store_is_rejected() {
    let app = TestApp::new();

    let result = app
        .store_repo
        .create_price(99, EggType::White, dollars(349), None)
        .await;

    assert!(result.is_err());
    // The failed write leaves no trace
    assert_eq!(app.store_repo.price_count().await, 0);
}

#[tokio::test]
async fn test_negative_price_is_rejected() {
    let app = TestApp::new();
    let store = create_test_store(&app, "Mission Market", "94110", 37.7485, -122.4184).await;

    let result = app
        .store_repo
        .create_price(store.id, EggType::White, dollars(-1), None)
        .await;

    assert!(result.is_err());
    assert_eq!(app.store_repo.price_count().await, 0);
}

#[tokio::test]
async fn test_zero_price_is_allowed() {
    let app = TestApp::new();
    let store = create_test_store(&app, "Free Eggs Depot", "94110", 37.7485, -122.4184).await;

    let record = app
        .store_repo
        .create_price(store.id, EggType::White, Decimal::ZERO, None)
        .await
        .expect("Zero price should be accepted");

    assert_eq!(record.price, Decimal::ZERO);
}

#[tokio::test]
async fn test_prices_are_normalized_to_cents() {
    let app = TestApp::new();
    let store = create_test_store(&app, "Mission Market", "94110", 37.7485, -122.4184).await;

    let record = app
        .store_repo
        .create_price(store.id, EggType::White, Decimal::new(3999, 3), None) // 3.999
        .await
        .expect("Failed to create price");

    assert_eq!(record.price, dollars(400));
}

// ============================================================================
// History and Latest Price Tests
// ============================================================================

#[tokio::test]
async fn test_history_is_newest_first() {
    let app = TestApp::new();
    let store = create_test_store(&app, "Mission Market", "94110", 37.7485, -122.4184).await;

    let oldest = create_test_price_at(&app, store.id, EggType::Brown, 389, hours_ago(48)).await;
    let middle = create_test_price_at(&app, store.id, EggType::Brown, 399, hours_ago(24)).await;
    let newest = create_test_price_at(&app, store.id, EggType::Brown, 409, hours_ago(1)).await;

    let history = app.store_repo.price_history(store.id, EggType::Brown).await;
    let ids: Vec<i64> = history.iter().map(|r| r.id).collect();

    assert_eq!(ids, vec![newest.id, middle.id, oldest.id]);
}

#[tokio::test]
async fn test_history_ties_break_toward_later_record() {
    let app = TestApp::new();
    let store = create_test_store(&app, "Mission Market", "94110", 37.7485, -122.4184).await;

    let timestamp = hours_ago(1);
    let earlier = create_test_price_at(&app, store.id, EggType::Brown, 399, timestamp).await;
    let later = create_test_price_at(&app, store.id, EggType::Brown, 409, timestamp).await;

    let history = app.store_repo.price_history(store.id, EggType::Brown).await;
    assert_eq!(history[0].id, later.id);
    assert_eq!(history[1].id, earlier.id);

    let latest = app
        .store_repo
        .latest_price(store.id, EggType::Brown)
        .await
        .expect("Latest price should exist");
    assert_eq!(latest.id, later.id);
    assert_eq!(latest.price, dollars(409));
}

#[tokio::test]
async fn test_history_is_scoped_to_store_and_variant() {
    let app = TestApp::new();
    let fixtures = TestFixtures::create(&app).await;

    // Valencia has one brown and one white record
    let brown = app
        .store_repo
        .price_history(fixtures.valencia_grocer.id, EggType::Brown)
        .await;
    let white = app
        .store_repo
        .price_history(fixtures.valencia_grocer.id, EggType::White)
        .await;

    assert_eq!(brown.len(), 1);
    assert_eq!(white.len(), 1);
    assert_eq!(brown[0].price, dollars(449));
    assert_eq!(white[0].price, dollars(359));
}

#[tokio::test]
async fn test_latest_price_absent_when_never_observed() {
    let app = TestApp::new();
    let store = create_test_store(&app, "Mission Market", "94110", 37.7485, -122.4184).await;

    assert!(app
        .store_repo
        .latest_price(store.id, EggType::White)
        .await
        .is_none());
}

#[tokio::test]
async fn test_latest_price_tracks_most_recent_timestamp() {
    let app = TestApp::new();
    let store = create_test_store(&app, "Mission Market", "94110", 37.7485, -122.4184).await;

    create_test_price_at(&app, store.id, EggType::White, 339, hours_ago(24)).await;
    let newest = create_test_price_at(&app, store.id, EggType::White, 349, hours_ago(2)).await;

    let latest = app
        .store_repo
        .latest_price(store.id, EggType::White)
        .await
        .expect("Latest price should exist");
    assert_eq!(latest.id, newest.id);
    assert_eq!(latest.price, dollars(349));
}

// ============================================================================
// Search View Tests
// ============================================================================

#[tokio::test]
async fn test_search_views_carry_latest_price_and_history() {
    let app = TestApp::new();
    let store = create_test_store(&app, "Mission Market", "94110", 37.7485, -122.4184).await;

    create_test_price_at(&app, store.id, EggType::Brown, 389, hours_ago(24)).await;
    create_test_price_at(&app, store.id, EggType::Brown, 399, hours_ago(1)).await;

    let views = app.store_repo.search_views(&[store.id], EggType::Brown).await;

    assert_eq!(views.len(), 1);
    assert_eq!(views[0].current_price, Some(dollars(399)));
    assert_eq!(views[0].price_history.len(), 2);
}

#[tokio::test]
async fn test_search_views_drop_unknown_ids() {
    let app = TestApp::new();
    let store = create_test_store(&app, "Mission Market", "94110", 37.7485, -122.4184).await;

    let views = app
        .store_repo
        .search_views(&[store.id, 999], EggType::Brown)
        .await;

    assert_eq!(views.len(), 1);
    assert_eq!(views[0].store.id, store.id);
}

#[tokio::test]
async fn test_search_views_without_prices_have_no_current_price() {
    let app = TestApp::new();
    let store = create_test_store(&app, "Mission Market", "94110", 37.7485, -122.4184).await;

    let views = app.store_repo.search_views(&[store.id], EggType::Brown).await;

    assert_eq!(views.len(), 1);
    assert_eq!(views[0].current_price, None);
    assert!(views[0].price_history.is_empty());
}

// ============================================================================
// Backfill Tests
// ============================================================================

fn backfill_batch(zip_code: &str, count: usize) -> Vec<BackfillStore> {
    (0..count)
        .map(|i| BackfillStore {
            store: NewStore {
                name: format!("Synthetic {}", i),
                address: format!("{} Synthetic Way", 100 + i),
                city: "Testville".to_string(),
                state: "CA".to_string(),
                zip_code: zip_code.to_string(),
                latitude: 37.7485 + i as f64 * 0.001,
                longitude: -122.4184,
                phone: None,
                website: None,
                hours: None,
            },
            prices: vec![
                (EggType::White, dollars(349)),
                (EggType::Brown, dollars(429)),
            ],
        })
        .collect()
}

#[tokio::test]
async fn test_backfill_creates_stores_and_seed_prices() {
    let app = TestApp::new();

    let created = app
        .store_repo
        .backfill_stores("99999", backfill_batch("99999", 3))
        .await
        .expect("Backfill should succeed");

    assert_eq!(created.len(), 3);
    assert_eq!(app.store_repo.store_count().await, 3);
    // One record per variant per store
    assert_eq!(app.store_repo.price_count().await, 6);
}

#[tokio::test]
async fn test_backfill_runs_once_per_zip() {
    let app = TestApp::new();

    let first = app
        .store_repo
        .backfill_stores("99999", backfill_batch("99999", 3))
        .await
        .expect("First backfill should succeed");
    let second = app
        .store_repo
        .backfill_stores("99999", backfill_batch("99999", 3))
        .await
        .expect("Second backfill should succeed");

    assert_eq!(first.len(), 3);
    assert!(second.is_empty());
    assert_eq!(app.store_repo.store_count().await, 3);
}

#[tokio::test]
async fn test_backfill_is_scoped_per_zip() {
    let app = TestApp::new();

    app.store_repo
        .backfill_stores("99999", backfill_batch("99999", 2))
        .await
        .expect("Backfill for 99999 should succeed");
    let other = app
        .store_repo
        .backfill_stores("88888", backfill_batch("88888", 2))
        .await
        .expect("Backfill for 88888 should succeed");

    assert_eq!(other.len(), 2);
    assert_eq!(app.store_repo.store_count().await, 4);
}

#[tokio::test]
async fn test_concurrent_backfills_create_one_batch() {
    let app = TestApp::new();

    let repo_a = app.store_repo.clone();
    let repo_b = app.store_repo.clone();
    let task_a =
        tokio::spawn(async move { repo_a.backfill_stores("99999", backfill_batch("99999", 3)).await });
    let task_b =
        tokio::spawn(async move { repo_b.backfill_stores("99999", backfill_batch("99999", 3)).await });

    let created_a = task_a
        .await
        .expect("Task a panicked")
        .expect("Backfill a should succeed");
    let created_b = task_b
        .await
        .expect("Task b panicked")
        .expect("Backfill b should succeed");

    // Exactly one of the racers wins; the other gets an empty batch
    assert_eq!(created_a.len() + created_b.len(), 3);
    assert_eq!(app.store_repo.store_count().await, 3);
    assert_eq!(app.store_repo.price_count().await, 6);
}

#[tokio::test]
async fn test_rejected_backfill_leaves_no_marker() {
    let app = TestApp::new();

    let mut bad_batch = backfill_batch("99999", 2);
    bad_batch[1].prices.push((EggType::White, dollars(-10)));

    let result = app.store_repo.backfill_stores("99999", bad_batch).await;
    assert!(result.is_err());
    assert_eq!(app.store_repo.store_count().await, 0);
    assert_eq!(app.store_repo.price_count().await, 0);

    // The zip is still eligible after the failure
    let retried = app
        .store_repo
        .backfill_stores("99999", backfill_batch("99999", 2))
        .await
        .expect("Retry should succeed");
    assert_eq!(retried.len(), 2);
}

// ============================================================================
// Count Tests
// ============================================================================

#[tokio::test]
async fn test_counts_track_inserts() {
    let app = TestApp::new();
    assert_eq!(app.store_repo.store_count().await, 0);
    assert_eq!(app.store_repo.price_count().await, 0);

    TestFixtures::create(&app).await;

    assert_eq!(app.store_repo.store_count().await, 3);
    assert_eq!(app.store_repo.price_count().await, 4);
}
