use super::{InteractionGraph, WeightTable};
use crate::models::InteractionRecord;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Builds the weighted user↔product graph from an interaction snapshot.
///
/// Repeated interactions between the same user and product accumulate;
/// summation is order-independent, so the graph does not depend on how
/// the snapshot's sequences are ordered (modulo floating-point rounding).
pub struct GraphBuilder {
    table: WeightTable,
}

impl GraphBuilder {
    pub fn new(table: WeightTable) -> Self {
        Self { table }
    }

    pub fn build(
        &self,
        interactions: &HashMap<String, Vec<InteractionRecord>>,
    ) -> InteractionGraph {
        let mut user_to_products: HashMap<String, HashMap<String, f64>> = HashMap::new();
        let mut product_to_users: HashMap<String, HashMap<String, f64>> = HashMap::new();
        let mut users: HashSet<String> = HashSet::new();
        let mut products: HashSet<String> = HashSet::new();
        let mut display_names: HashMap<String, String> = HashMap::new();

        for (user, records) in interactions {
            users.insert(user.clone());
            let user_edges = user_to_products.entry(user.clone()).or_default();

            let mut touch_counts: HashMap<&str, usize> = HashMap::new();

            for record in records {
                let weight = self.table.weight(record.kind);

                *user_edges.entry(record.product_id.clone()).or_insert(0.0) += weight;
                *product_to_users
                    .entry(record.product_id.clone())
                    .or_default()
                    .entry(user.clone())
                    .or_insert(0.0) += weight;

                products.insert(record.product_id.clone());
                // sequences are most-recent-first, so the first name seen wins
                display_names
                    .entry(record.product_id.clone())
                    .or_insert_with(|| record.product_name.clone());

                *touch_counts.entry(record.product_id.as_str()).or_insert(0) += 1;
            }

            for (product_id, count) in touch_counts {
                if count > 1 {
                    debug!(
                        user = %user,
                        product_id = %product_id,
                        interactions = count,
                        accumulated = user_edges.get(product_id).copied().unwrap_or(0.0),
                        "accumulated repeated interactions"
                    );
                }
            }
        }

        let graph = InteractionGraph::new(
            user_to_products,
            product_to_users,
            users,
            products,
            display_names,
        );

        info!(
            users = graph.user_count(),
            products = graph.product_count(),
            edges = graph.edge_count(),
            "interaction graph built"
        );

        graph
    }
}
