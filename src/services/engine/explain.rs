use super::RecommendationEngine;
use crate::models::{
    CollabPath, CollaborativeFactor, ContentFactor, Explanation, InteractionKind, WarmFactor,
};
use crate::services::tiers::{contributor_confidence, user_average_price};
use std::cmp::Ordering;

/// Contributing paths listed in an explanation; the total still sums
/// every path.
const MAX_EXPLAIN_PATHS: usize = 5;

impl RecommendationEngine {
    /// Read-only breakdown of which tiers would recommend `product_id`
    /// to `user` and by how much, over the same data and formulas as
    /// `get_recommendations`.
    pub fn explain(&self, user: &str, product_id: &str) -> Explanation {
        let mut explanation = Explanation {
            user: user.to_string(),
            product_id: product_id.to_string(),
            cold_start: false,
            warm: None,
            collaborative: None,
            content: None,
            popular_fallback: false,
        };

        let Some(user_products) = self.graph().user_products(user) else {
            explanation.cold_start = true;
            explanation.popular_fallback = true;
            return explanation;
        };

        if let Some(&weight) = user_products.get(product_id) {
            explanation.warm = Some(WarmFactor {
                raw_weight: weight,
                boosted_score: weight * self.config.warm_boost,
                implied_kind: implied_kind(weight),
            });
        }

        let mut total_score = 0.0;
        let mut paths: Vec<CollabPath> = Vec::new();
        for (product_a, &weight_ua) in user_products {
            let Some(other_users) = self.graph().product_users(product_a) else {
                continue;
            };
            for (other_user, &weight_other) in other_users {
                if other_user == user {
                    continue;
                }
                let Some(other_products) = self.graph().user_products(other_user) else {
                    continue;
                };
                let Some(&weight_b) = other_products.get(product_id) else {
                    continue;
                };

                let buyer_class = contributor_confidence(self.graph(), other_user);
                let score = weight_ua.min(weight_other) * weight_b * buyer_class.multiplier();
                total_score += score;
                paths.push(CollabPath {
                    via_product: product_a.clone(),
                    contributor: other_user.clone(),
                    buyer_class,
                    score,
                });
            }
        }
        if total_score > 0.0 {
            paths.sort_by(|a, b| {
                b.score
                    .partial_cmp(&a.score)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.contributor.cmp(&b.contributor))
                    .then_with(|| a.via_product.cmp(&b.via_product))
            });
            paths.truncate(MAX_EXPLAIN_PATHS);
            explanation.collaborative = Some(CollaborativeFactor { total_score, paths });
        }

        if let Some(product) = self.catalog.product_by_id(product_id) {
            if !user_products.contains_key(product_id) {
                let shared_category_count = user_products
                    .keys()
                    .filter(|id| {
                        self.catalog
                            .product_by_id(id)
                            .is_some_and(|p| p.category == product.category)
                    })
                    .count();

                if shared_category_count > 0 {
                    let ctx = self.ctx();
                    let avg_price = user_average_price(&ctx, user_products);
                    let price_distance_pct = if avg_price > 0.0 {
                        ((product.price as f64) - avg_price).abs() / avg_price * 100.0
                    } else {
                        0.0
                    };
                    explanation.content = Some(ContentFactor {
                        category: product.category.clone(),
                        shared_category_count,
                        sold_count: product.sold_count,
                        price: product.price,
                        price_distance_pct,
                    });
                }
            }
        }

        explanation.popular_fallback = explanation.warm.is_none()
            && explanation.collaborative.is_none()
            && explanation.content.is_none();

        explanation
    }
}

/// Interaction kind implied by an accumulated edge weight.
fn implied_kind(weight: f64) -> InteractionKind {
    if weight >= 0.9 {
        InteractionKind::Purchase
    } else if weight >= 0.7 {
        InteractionKind::Cart
    } else if weight >= 0.5 {
        InteractionKind::Like
    } else if weight >= 0.3 {
        InteractionKind::View
    } else {
        InteractionKind::Skip
    }
}
