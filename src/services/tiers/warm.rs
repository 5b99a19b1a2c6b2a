use super::{TierContext, TierStrategy};
use crate::models::{Candidate, RecommendationSource};
use crate::utils::sort_candidates;
use std::collections::HashSet;

/// Warm tier: products the user already engaged with but has not bought.
///
/// A viewed/liked/carted product stays eligible; only purchased products
/// are excluded. The accumulated weight is boosted to put these ahead of
/// colder candidates.
pub struct WarmTier;

impl TierStrategy for WarmTier {
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

        let mut candidates: Vec<Candidate> = user_products
            .iter()
            .filter(|(product_id, _)| !exclude.contains(*product_id))
            .map(|(product_id, weight)| Candidate {
                product_id: product_id.clone(),
                score: weight * ctx.config.warm_boost,
                source: RecommendationSource::Warm,
            })
            .collect();

        sort_candidates(&mut candidates);
        candidates.truncate(limit);
        candidates
    }

    fn source(&self) -> RecommendationSource {
        RecommendationSource::Warm
    }
}
