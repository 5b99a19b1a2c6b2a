use super::{TierContext, TierStrategy};
use crate::graph::InteractionGraph;
use crate::models::{BuyerClass, Candidate, RecommendationSource};
use crate::utils::sort_candidates;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Accumulated weight at or above this marks a purchase-tier interaction
/// when classifying a contributor (purchase midpoint is 0.975).
const PURCHASE_TIER_WEIGHT: f64 = 0.9;

/// Collaborative tier.
///
/// Algorithm:
/// 1. For every product A the user touched, find every other user who
///    also touched A; similarity is the smaller of the two edge weights.
/// 2. Each such contributor endorses their own products B, scaled by
///    their buyer-class confidence.
/// 3. Scores accumulate across all (A, contributor) paths, then rank.
pub struct CollaborativeTier;

impl TierStrategy for CollaborativeTier {
    fn candidates(
        &self,
        ctx: &TierContext<'_>,
        user: &str,
        exclude: &HashSet<String>,
        limit: usize,
    ) -> Vec<Candidate> {
        let Some(user_products) = ctx.graph.user_products(user) else {
            return Vec::new();
        };

        let mut scores: HashMap<String, f64> = HashMap::new();
        let mut contributors: HashSet<&str> = HashSet::new();

        for (product_a, &weight_ua) in user_products {
            let Some(other_users) = ctx.graph.product_users(product_a) else {
                continue;
            };

            for (other_user, &weight_other) in other_users {
                if other_user == user {
                    continue;
                }
                contributors.insert(other_user);

                let similarity = weight_ua.min(weight_other);
                let confidence = contributor_confidence(ctx.graph, other_user).multiplier();

                let Some(other_products) = ctx.graph.user_products(other_user) else {
                    continue;
                };

                for (product_b, &weight_b) in other_products {
                    if exclude.contains(product_b) {
                        continue;
                    }
                    *scores.entry(product_b.clone()).or_insert(0.0) +=
                        similarity * weight_b * confidence;
                }
            }
        }

        if !contributors.is_empty() {
            debug!(
                user,
                contributors = contributors.len(),
                "collaborative tier found overlapping users"
            );
        }

        let mut candidates: Vec<Candidate> = scores
            .into_iter()
            .map(|(product_id, score)| Candidate {
                product_id,
                score,
                source: RecommendationSource::Collab,
            })
            .collect();

        sort_candidates(&mut candidates);
        candidates.truncate(limit);
        candidates
    }

    fn source(&self) -> RecommendationSource {
        RecommendationSource::Collab
    }
}

/// Classify a contributor by how many of their products carry a
/// purchase-tier weight. A user absent from the graph is Standard.
pub(crate) fn contributor_confidence(graph: &InteractionGraph, user: &str) -> BuyerClass {
    let Some(products) = graph.user_products(user) else {
        return BuyerClass::Standard;
    };
    let purchase_count = products
        .values()
        .filter(|weight| **weight >= PURCHASE_TIER_WEIGHT)
        .count();
    BuyerClass::from_purchase_count(purchase_count)
}
