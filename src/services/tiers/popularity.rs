use super::{TierContext, TierStrategy};
use crate::models::{Candidate, RecommendationSource};
use std::collections::HashSet;

/// Best sellers considered before exclusion filtering.
const TOP_SELLING_POOL: usize = 50;
/// Sold count at which the fallback score would saturate without the cap.
const SOLD_COUNT_NORM: f64 = 2000.0;
/// Fallback scores never exceed this; popularity alone is weak evidence.
const SCORE_CAP: f64 = 0.3;

/// Popularity tier: catalog best sellers. Serves cold-start users and
/// backfills the discovery tier when content-based scoring runs dry.
pub struct PopularityTier;

impl TierStrategy for PopularityTier {
    fn candidates(
        &self,
        ctx: &TierContext<'_>,
        _user: &str,
        exclude: &HashSet<String>,
        limit: usize,
    ) -> Vec<Candidate> {
        ctx.catalog
            .top_selling(TOP_SELLING_POOL)
            .into_iter()
            .filter(|p| !exclude.contains(&p.id))
            .map(|p| Candidate {
                product_id: p.id.clone(),
                score: (f64::from(p.sold_count) / SOLD_COUNT_NORM).min(SCORE_CAP),
                source: RecommendationSource::Popular,
            })
            .take(limit)
            .collect()
    }

    fn source(&self) -> RecommendationSource {
        RecommendationSource::Popular
    }
}
