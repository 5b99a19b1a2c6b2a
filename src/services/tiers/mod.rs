mod collaborative;
mod content;
mod popularity;
mod warm;

pub use collaborative::CollaborativeTier;
pub use content::ContentTier;
pub use popularity::PopularityTier;
pub use warm::WarmTier;

pub(crate) use collaborative::contributor_confidence;
pub(crate) use content::user_average_price;

use crate::config::EngineConfig;
use crate::graph::InteractionGraph;
use crate::models::{Candidate, RecommendationSource};
use crate::stores::ProductCatalog;
use std::collections::HashSet;

/// Immutable state shared by every tier for the duration of a request.
pub struct TierContext<'a> {
    pub graph: &'a InteractionGraph,
    pub catalog: &'a dyn ProductCatalog,
    pub config: &'a EngineConfig,
}

/// One scoring tier. Candidates come back sorted by score descending
/// (product id ascending on ties), already filtered against `exclude`
/// and capped at `limit`.
pub trait TierStrategy {
    fn candidates(
        &self,
        ctx: &TierContext<'_>,
        user: &str,
        exclude: &HashSet<String>,
        limit: usize,
    ) -> Vec<Candidate>;

    fn source(&self) -> RecommendationSource;
}
