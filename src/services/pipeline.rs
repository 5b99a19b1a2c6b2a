use crate::config::EngineConfig;
use crate::graph::{GraphBuilder, WeightTable};
use crate::models::{Explanation, RecommendationItem};
use crate::services::RecommendationEngine;
use crate::stores::{InteractionStore, OrderStore, ProductCatalog};
use std::sync::Arc;
use tracing::debug;

/// Wires the collaborator stores to the engine: pull the interaction
/// snapshot, build the graph once, serve read-only requests against it.
///
/// `snapshot()` is the batch entry point — build one engine, then fan
/// out `get_recommendations` calls across users (or threads) against
/// the same immutable state. The per-call convenience methods rebuild
/// the graph from a fresh snapshot every time, trading recomputation
/// cost for simplicity.
pub struct RecommendationPipeline {
    interactions: Arc<dyn InteractionStore>,
    catalog: Arc<dyn ProductCatalog>,
    orders: Arc<dyn OrderStore>,
    config: EngineConfig,
    table: WeightTable,
}

impl RecommendationPipeline {
    pub fn new(
        interactions: Arc<dyn InteractionStore>,
        catalog: Arc<dyn ProductCatalog>,
        orders: Arc<dyn OrderStore>,
        config: EngineConfig,
    ) -> Self {
        Self {
            interactions,
            catalog,
            orders,
            config,
            table: WeightTable::default(),
        }
    }

    pub fn with_weight_table(mut self, table: WeightTable) -> Self {
        self.table = table;
        self
    }

    /// Build an engine over the current interaction snapshot.
    pub fn snapshot(&self) -> RecommendationEngine {
        let interactions = self.interactions.all_interactions_for_recommendation();
        debug!(users = interactions.len(), "building recommendation snapshot");
        let graph = GraphBuilder::new(self.table.clone()).build(&interactions);
        RecommendationEngine::new(graph, Arc::clone(&self.catalog), self.config.clone())
    }

    /// Fresh-snapshot recommendations for one user, with the purchased
    /// set resolved from the order store.
    pub fn recommend(&self, user: &str, top_n: usize) -> Vec<RecommendationItem> {
        let purchased = self.orders.purchased_product_ids(user);
        self.snapshot().get_recommendations(user, top_n, &purchased)
    }

    /// Fresh-snapshot explanation for one (user, product) pair.
    pub fn explain(&self, user: &str, product_id: &str) -> Explanation {
        self.snapshot().explain(user, product_id)
    }
}
