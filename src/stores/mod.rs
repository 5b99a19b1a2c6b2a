mod memory;

pub use memory::{MemoryCatalog, MemoryInteractionStore, MemoryOrderStore};

use crate::models::{CatalogProduct, InteractionRecord};
use std::collections::{HashMap, HashSet};

#[cfg(test)]
use mockall::automock;

/// Source of the interaction snapshot the graph is built from.
///
/// Implementations expose, per user, a most-recent-first sequence capped
/// at 100 entries with duplicate (product, kind) pairs collapsed to
/// their most recent occurrence.
#[cfg_attr(test, automock)]
pub trait InteractionStore: Send + Sync {
    fn all_interactions_for_recommendation(&self) -> HashMap<String, Vec<InteractionRecord>>;
}

/// Read access to the product catalog snapshot.
pub trait ProductCatalog: Send + Sync {
    fn products(&self) -> &[CatalogProduct];

    fn product_by_id(&self, id: &str) -> Option<&CatalogProduct> {
        self.products().iter().find(|p| p.id == id)
    }

    /// Top `n` products by sold count, ties broken by product id.
    fn top_selling(&self, n: usize) -> Vec<&CatalogProduct> {
        let mut ranked: Vec<&CatalogProduct> = self.products().iter().collect();
        ranked.sort_by(|a, b| {
            b.sold_count
                .cmp(&a.sold_count)
                .then_with(|| a.id.cmp(&b.id))
        });
        ranked.truncate(n);
        ranked
    }
}

/// Lookup of products a user has already bought.
#[cfg_attr(test, automock)]
pub trait OrderStore: Send + Sync {
    fn purchased_product_ids(&self, user: &str) -> HashSet<String>;
}
