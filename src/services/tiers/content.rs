use super::{TierContext, TierStrategy};
use crate::models::{Candidate, RecommendationSource};
use crate::utils::sort_candidates;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Only the user's strongest categories are mined for candidates.
const TOP_CATEGORY_COUNT: usize = 2;
/// Candidates kept per category before the merged re-sort.
const PER_CATEGORY_LIMIT: usize = 5;
/// Sold count at which the popularity term saturates.
const SOLD_COUNT_NORM: f64 = 500.0;

/// Content tier: category affinity, catalog popularity, and price
/// proximity to the user's historical average.
pub struct ContentTier;

impl TierStrategy for ContentTier {
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

        let affinities = category_affinities(ctx, user_products);
        if affinities.is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<(String, f64)> = affinities.into_iter().collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked.truncate(TOP_CATEGORY_COUNT);

        debug!(
            user,
            categories = ?ranked.iter().map(|(c, _)| c.as_str()).collect::<Vec<_>>(),
            "content tier top categories"
        );

        let avg_price = user_average_price(ctx, user_products);

        let mut merged: Vec<Candidate> = Vec::new();
        for (category, affinity) in &ranked {
            let mut scored: Vec<Candidate> = ctx
                .catalog
                .products()
                .iter()
                .filter(|p| p.category == *category && !exclude.contains(&p.id))
                .map(|p| {
                    let base = affinity * ctx.config.category_weight;
                    let popularity = (f64::from(p.sold_count) / SOLD_COUNT_NORM).min(1.0)
                        * ctx.config.popularity_weight;
                    let price_similarity = if avg_price > 0.0 {
                        let diff = ((p.price as f64) - avg_price).abs() / avg_price;
                        1.0 - diff.min(1.0)
                    } else {
                        0.5
                    };
                    Candidate {
                        product_id: p.id.clone(),
                        score: base
                            + popularity
                            + price_similarity * ctx.config.price_similarity_weight,
                        source: RecommendationSource::Content,
                    }
                })
                .collect();

            sort_candidates(&mut scored);
            scored.truncate(PER_CATEGORY_LIMIT);
            merged.extend(scored);
        }

        sort_candidates(&mut merged);
        merged.truncate(limit);
        merged
    }

    fn source(&self) -> RecommendationSource {
        RecommendationSource::Content
    }
}

/// Sum of the user's interaction weights per catalog category. Products
/// that no longer resolve against the catalog are skipped.
pub(crate) fn category_affinities(
    ctx: &TierContext<'_>,
    user_products: &HashMap<String, f64>,
) -> HashMap<String, f64> {
    let mut affinities: HashMap<String, f64> = HashMap::new();
    for (product_id, weight) in user_products {
        if let Some(product) = ctx.catalog.product_by_id(product_id) {
            *affinities.entry(product.category.clone()).or_insert(0.0) += weight;
        }
    }
    affinities
}

/// Mean catalog price across the user's resolvable products, or the
/// configured reference price when none resolve.
pub(crate) fn user_average_price(
    ctx: &TierContext<'_>,
    user_products: &HashMap<String, f64>,
) -> f64 {
    let prices: Vec<f64> = user_products
        .keys()
        .filter_map(|product_id| ctx.catalog.product_by_id(product_id))
        .map(|p| p.price as f64)
        .collect();

    if prices.is_empty() {
        ctx.config.default_reference_price
    } else {
        prices.iter().sum::<f64>() / prices.len() as f64
    }
}
