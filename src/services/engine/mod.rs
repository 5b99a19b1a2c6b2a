mod explain;

use crate::config::EngineConfig;
use crate::graph::InteractionGraph;
use crate::models::{Candidate, RecommendationItem, RecommendationSource, TierStats};
use crate::services::tiers::{
    CollaborativeTier, ContentTier, PopularityTier, TierContext, TierStrategy, WarmTier,
};
use crate::stores::ProductCatalog;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Popularity candidates fetched when the content tier comes up short.
const DISCOVERY_BACKFILL_LIMIT: usize = 5;

/// Three-tier recommendation engine over an immutable graph and catalog
/// snapshot. Construction captures all state; requests are read-only,
/// so calls for different users may run concurrently.
pub struct RecommendationEngine {
    graph: InteractionGraph,
    catalog: Arc<dyn ProductCatalog>,
    config: EngineConfig,
    warm: WarmTier,
    collaborative: CollaborativeTier,
    content: ContentTier,
    popularity: PopularityTier,
}

impl RecommendationEngine {
    pub fn new(
        graph: InteractionGraph,
        catalog: Arc<dyn ProductCatalog>,
        config: EngineConfig,
    ) -> Self {
        info!(
            users = graph.user_count(),
            graph_products = graph.product_count(),
            catalog_products = catalog.products().len(),
            "recommendation engine ready"
        );
        Self {
            graph,
            catalog,
            config,
            warm: WarmTier,
            collaborative: CollaborativeTier,
            content: ContentTier,
            popularity: PopularityTier,
        }
    }

    pub fn graph(&self) -> &InteractionGraph {
        &self.graph
    }

    /// Ranked, deduplicated recommendations for one user.
    ///
    /// Tier priority is fixed: warm before collaborative before
    /// discovery. Within a tier items keep their tier-internal score
    /// order; there is no cross-tier re-sort by absolute score. An empty
    /// result means no recommendation is available for the user.
    pub fn get_recommendations(
        &self,
        user: &str,
        top_n: usize,
        purchased: &HashSet<String>,
    ) -> Vec<RecommendationItem> {
        let ctx = self.ctx();

        if !self.graph.contains_user(user) {
            debug!(user, "cold start, falling back to best sellers");
            let candidates = self.popularity.candidates(&ctx, user, purchased, top_n);
            return self.into_items(candidates);
        }

        let warm = self
            .warm
            .candidates(&ctx, user, purchased, self.config.warm_limit);

        let mut exclude: HashSet<String> = purchased.clone();
        exclude.extend(warm.iter().map(|c| c.product_id.clone()));

        let collab = self
            .collaborative
            .candidates(&ctx, user, &exclude, self.config.collab_limit);
        exclude.extend(collab.iter().map(|c| c.product_id.clone()));

        let discovery = self.discovery_candidates(&ctx, user, &exclude);

        let blended = self.blend(warm, collab, discovery, top_n);

        let stats = tier_stats(&blended);
        info!(
            user,
            warm = stats.warm_count,
            collab = stats.collab_count,
            content = stats.content_count,
            popular = stats.popular_count,
            total = stats.total,
            "recommendations assembled"
        );
        if blended.is_empty() {
            info!(user, "no recommendation available");
        }

        self.into_items(blended)
    }

    /// Discovery tier: content-based candidates, backfilled with best
    /// sellers when fewer than the tier limit score.
    fn discovery_candidates(
        &self,
        ctx: &TierContext<'_>,
        user: &str,
        exclude: &HashSet<String>,
    ) -> Vec<Candidate> {
        let content = self
            .content
            .candidates(ctx, user, exclude, self.config.discovery_limit);
        if content.len() >= self.config.discovery_limit {
            return content;
        }

        let popular = self
            .popularity
            .candidates(ctx, user, exclude, DISCOVERY_BACKFILL_LIMIT);

        // merge in first-seen order, dropping duplicate ids
        let mut seen: HashSet<String> = HashSet::new();
        let mut combined: Vec<Candidate> = Vec::new();
        for candidate in content.into_iter().chain(popular) {
            if seen.insert(candidate.product_id.clone()) {
                combined.push(candidate);
            }
        }
        combined.truncate(self.config.discovery_limit);
        combined
    }

    /// Fixed-priority blend: warm, then collaborative, then discovery,
    /// capped at `top_n`. Later tiers only fill remaining positions.
    fn blend(
        &self,
        warm: Vec<Candidate>,
        collab: Vec<Candidate>,
        discovery: Vec<Candidate>,
        top_n: usize,
    ) -> Vec<Candidate> {
        let mut blended: Vec<Candidate> = Vec::new();

        blended.extend(warm.into_iter().take(self.config.warm_limit));

        let remaining = top_n.saturating_sub(blended.len());
        if remaining > 0 {
            blended.extend(collab.into_iter().take(self.config.collab_limit.min(remaining)));
        }

        let remaining = top_n.saturating_sub(blended.len());
        if remaining > 0 {
            blended.extend(discovery.into_iter().take(remaining));
        }

        blended.truncate(top_n);
        blended
    }

    fn ctx(&self) -> TierContext<'_> {
        TierContext {
            graph: &self.graph,
            catalog: self.catalog.as_ref(),
            config: &self.config,
        }
    }

    /// Resolve display names: catalog first, then the name last seen in
    /// the interaction log, then the bare id for fully stale products.
    fn into_items(&self, candidates: Vec<Candidate>) -> Vec<RecommendationItem> {
        candidates
            .into_iter()
            .map(|c| {
                let name = self
                    .catalog
                    .product_by_id(&c.product_id)
                    .map(|p| p.name.clone())
                    .or_else(|| self.graph.display_name(&c.product_id).map(str::to_string))
                    .unwrap_or_else(|| c.product_id.clone());
                RecommendationItem {
                    product_id: c.product_id,
                    name,
                    score: c.score,
                    source: c.source,
                }
            })
            .collect()
    }
}

fn tier_stats(candidates: &[Candidate]) -> TierStats {
    let mut stats = TierStats { total: candidates.len(), ..TierStats::default() };
    for candidate in candidates {
        match candidate.source {
            RecommendationSource::Warm => stats.warm_count += 1,
            RecommendationSource::Collab => stats.collab_count += 1,
            RecommendationSource::Content => stats.content_count += 1,
            RecommendationSource::Popular => stats.popular_count += 1,
        }
    }
    stats
}
