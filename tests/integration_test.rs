use recommendation_engine::models::{CatalogProduct, InteractionKind, RecommendationSource};
use recommendation_engine::stores::{
    MemoryCatalog, MemoryInteractionStore, MemoryOrderStore, ProductCatalog,
};
use recommendation_engine::{EngineConfig, RecommendationPipeline};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

fn product(id: &str, category: &str, price: i64, sold_count: u32) -> CatalogProduct {
    CatalogProduct {
        id: id.to_string(),
        name: format!("{id} name"),
        category: category.to_string(),
        price,
        stock: 10,
        sold_count,
    }
}

/// Catalog used across the tests: alice's own products (Shirts), the
/// collaborative pool touched only by bob (Hats), and fresh Shirts the
/// content tier can discover.
fn fixture_catalog() -> Vec<CatalogProduct> {
    let mut products = vec![
        product("a1", "Shirts", 200_000, 0),
        product("a2", "Shirts", 200_000, 0),
        product("a3", "Shirts", 200_000, 0),
        product("a4", "Shirts", 200_000, 0),
        product("d1", "Shirts", 210_000, 450),
        product("d2", "Shirts", 210_000, 400),
        product("d3", "Shirts", 210_000, 350),
        product("d4", "Shirts", 210_000, 300),
    ];
    for i in 1..=6 {
        products.push(product(&format!("c{i}"), "Hats", 300_000, 50));
    }
    products
}

fn fixture_pipeline() -> (RecommendationPipeline, Arc<MemoryOrderStore>) {
    let catalog = Arc::new(MemoryCatalog::new(fixture_catalog()));
    let interactions = Arc::new(MemoryInteractionStore::new());
    let orders = Arc::new(MemoryOrderStore::new());

    // alice: four warm-eligible products with distinct weights
    for (id, kind) in [
        ("a1", InteractionKind::Cart),
        ("a2", InteractionKind::Like),
        ("a3", InteractionKind::View),
        ("a4", InteractionKind::Purchase),
    ] {
        interactions.record("alice", catalog.product_by_id(id).unwrap(), kind);
    }

    // bob: overlaps alice on a1, heavy buyer across the Hats pool
    interactions.record("bob", catalog.product_by_id("a1").unwrap(), InteractionKind::Like);
    for i in 1..=6 {
        interactions.record(
            "bob",
            catalog.product_by_id(&format!("c{i}")).unwrap(),
            InteractionKind::Purchase,
        );
    }

    let pipeline = RecommendationPipeline::new(
        interactions,
        catalog,
        orders.clone(),
        EngineConfig::default(),
    );
    (pipeline, orders)
}

#[test]
fn test_tier_priority_blending() {
    init_tracing();
    let (pipeline, _orders) = fixture_pipeline();

    let items = pipeline.recommend("alice", 10);

    assert_eq!(items.len(), 10);

    // fixed tier order: 3 warm, then 5 collab, then discovery
    let tags: Vec<RecommendationSource> = items.iter().map(|i| i.source).collect();
    assert_eq!(&tags[..3], &[RecommendationSource::Warm; 3]);
    assert_eq!(&tags[3..8], &[RecommendationSource::Collab; 5]);
    assert_eq!(&tags[8..], &[RecommendationSource::Content; 2]);

    // warm keeps the top 3 boosted weights: purchase > cart > like
    let warm_ids: Vec<&str> = items[..3].iter().map(|i| i.product_id.as_str()).collect();
    assert_eq!(warm_ids, vec!["a4", "a1", "a2"]);

    // collab scores tie; product id breaks the tie deterministically
    let collab_ids: Vec<&str> = items[3..8].iter().map(|i| i.product_id.as_str()).collect();
    assert_eq!(collab_ids, vec!["c1", "c2", "c3", "c4", "c5"]);

    // discovery candidates outscore every collab candidate in absolute
    // terms, yet still rank below them: tier priority wins
    let max_collab = items[3..8].iter().map(|i| i.score).fold(f64::MIN, f64::max);
    assert!(items[8].score > max_collab);

    // no duplicates anywhere
    let mut seen = std::collections::HashSet::new();
    assert!(items.iter().all(|i| seen.insert(i.product_id.clone())));
}

#[test]
fn test_purchase_removes_product_from_warm_tier() {
    init_tracing();
    let (pipeline, orders) = fixture_pipeline();

    orders.add_purchase("alice", "a4");
    let items = pipeline.recommend("alice", 10);

    let warm_ids: Vec<&str> = items
        .iter()
        .filter(|i| i.source == RecommendationSource::Warm)
        .map(|i| i.product_id.as_str())
        .collect();
    assert_eq!(warm_ids, vec!["a1", "a2", "a3"]);
    assert!(items.iter().all(|i| i.product_id != "a4"));
}

#[test]
fn test_cold_start_user_gets_best_sellers() {
    init_tracing();
    let (pipeline, _orders) = fixture_pipeline();

    let items = pipeline.recommend("mallory", 4);

    assert_eq!(items.len(), 4);
    assert!(items.iter().all(|i| i.source == RecommendationSource::Popular));
    // d1 (450) leads; scores are non-increasing down the list
    assert_eq!(items[0].product_id, "d1");
    for pair in items.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn test_repeat_calls_are_idempotent() {
    init_tracing();
    let (pipeline, _orders) = fixture_pipeline();

    let engine = pipeline.snapshot();
    let purchased = std::collections::HashSet::new();
    let first = engine.get_recommendations("alice", 10, &purchased);
    let second = engine.get_recommendations("alice", 10, &purchased);

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.product_id, b.product_id);
        assert_eq!(a.source, b.source);
        assert!((a.score - b.score).abs() < 1e-9);
    }
}

#[test]
fn test_explain_matches_recommendation_factors() {
    init_tracing();
    let (pipeline, _orders) = fixture_pipeline();

    // c1 reaches alice only through bob
    let explanation = pipeline.explain("alice", "c1");
    assert!(explanation.warm.is_none());
    let collab = explanation.collaborative.expect("collaborative factor");
    assert_eq!(collab.paths.len(), 1);
    assert_eq!(collab.paths[0].contributor, "bob");
    assert_eq!(collab.paths[0].via_product, "a1");
    // similarity min(0.775, 0.575) × purchase weight × heavy-buyer boost
    assert!((collab.total_score - 0.575 * 0.975 * 1.5).abs() < 1e-9);

    // a1 is warm for alice
    let explanation = pipeline.explain("alice", "a1");
    let warm = explanation.warm.expect("warm factor");
    assert!((warm.raw_weight - 0.775).abs() < 1e-9);
    assert_eq!(warm.implied_kind, InteractionKind::Cart);

    // d1 shares alice's category but nobody endorses it
    let explanation = pipeline.explain("alice", "d1");
    assert!(explanation.warm.is_none());
    assert!(explanation.collaborative.is_none());
    let content = explanation.content.expect("content factor");
    assert_eq!(content.category, "Shirts");
    assert_eq!(content.shared_category_count, 4);
    assert!(!explanation.popular_fallback);

    // unknown users fall through to the popularity note
    let explanation = pipeline.explain("mallory", "d1");
    assert!(explanation.cold_start);
    assert!(explanation.popular_fallback);
}

#[test]
fn test_empty_stores_yield_no_recommendation() {
    init_tracing();
    let pipeline = RecommendationPipeline::new(
        Arc::new(MemoryInteractionStore::new()),
        Arc::new(MemoryCatalog::new(Vec::new())),
        Arc::new(MemoryOrderStore::new()),
        EngineConfig::default(),
    );

    assert!(pipeline.recommend("anyone", 10).is_empty());
}
