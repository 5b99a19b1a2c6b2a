use super::{InteractionStore, OrderStore, ProductCatalog};
use crate::models::{CatalogProduct, InteractionEvent, InteractionKind, InteractionRecord};
use dashmap::DashMap;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Per-user cap on tracked events; older entries fall off the tail.
const MAX_EVENTS_PER_USER: usize = 100;

/// In-memory interaction tracker. Sequences are most-recent-first;
/// re-recording an existing (product, kind) pair moves it to the front
/// instead of growing the sequence.
#[derive(Debug, Default)]
pub struct MemoryInteractionStore {
    interactions: DashMap<String, Vec<InteractionEvent>>,
}

impl MemoryInteractionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, user: &str, product: &CatalogProduct, kind: InteractionKind) {
        let mut events = self.interactions.entry(user.to_string()).or_default();

        if let Some(pos) = events
            .iter()
            .position(|e| e.product_id == product.id && e.kind == kind)
        {
            events.remove(pos);
            debug!(user, product_id = %product.id, kind = kind.as_str(), "refreshed interaction");
        }

        events.insert(
            0,
            InteractionEvent {
                user: user.to_string(),
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                price: product.price,
                category: product.category.clone(),
                kind,
            },
        );
        events.truncate(MAX_EVENTS_PER_USER);
    }

    /// Full tracked history for one user, most recent first.
    pub fn user_events(&self, user: &str) -> Vec<InteractionEvent> {
        self.interactions
            .get(user)
            .map(|events| events.value().clone())
            .unwrap_or_default()
    }
}

impl InteractionStore for MemoryInteractionStore {
    fn all_interactions_for_recommendation(&self) -> HashMap<String, Vec<InteractionRecord>> {
        self.interactions
            .iter()
            .map(|entry| {
                let records = entry
                    .value()
                    .iter()
                    .map(|e| InteractionRecord {
                        product_id: e.product_id.clone(),
                        product_name: e.product_name.clone(),
                        kind: e.kind,
                    })
                    .collect();
                (entry.key().clone(), records)
            })
            .collect()
    }
}

/// Immutable catalog snapshot with an id index.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: Vec<CatalogProduct>,
    by_id: HashMap<String, usize>,
}

impl MemoryCatalog {
    pub fn new(products: Vec<CatalogProduct>) -> Self {
        let by_id = products
            .iter()
            .enumerate()
            .map(|(idx, p)| (p.id.clone(), idx))
            .collect();
        Self { products, by_id }
    }
}

impl ProductCatalog for MemoryCatalog {
    fn products(&self) -> &[CatalogProduct] {
        &self.products
    }

    fn product_by_id(&self, id: &str) -> Option<&CatalogProduct> {
        self.by_id.get(id).map(|&idx| &self.products[idx])
    }
}

/// In-memory purchase ledger.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    purchases: DashMap<String, HashSet<String>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_purchase(&self, user: &str, product_id: &str) {
        self.purchases
            .entry(user.to_string())
            .or_default()
            .insert(product_id.to_string());
    }
}

impl OrderStore for MemoryOrderStore {
    fn purchased_product_ids(&self, user: &str) -> HashSet<String> {
        self.purchases
            .get(user)
            .map(|set| set.value().clone())
            .unwrap_or_default()
    }
}
