use serde::{Deserialize, Serialize};

/// How a user engaged with a product. Closed set; the tracker emits the
/// lowercase string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Purchase,
    Cart,
    Like,
    View,
    Skip,
}

impl InteractionKind {
    /// Parse the tracker's string form. Anything unrecognized is `None`
    /// and carries no interest weight downstream.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "purchase" => Some(InteractionKind::Purchase),
            "cart" => Some(InteractionKind::Cart),
            "like" => Some(InteractionKind::Like),
            "view" => Some(InteractionKind::View),
            "skip" => Some(InteractionKind::Skip),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::Purchase => "purchase",
            InteractionKind::Cart => "cart",
            InteractionKind::Like => "like",
            InteractionKind::View => "view",
            InteractionKind::Skip => "skip",
        }
    }
}

/// A single tracked engagement, as recorded by the interaction store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub user: String,
    pub product_id: String,
    pub product_name: String,
    pub price: i64,
    pub category: String,
    pub kind: InteractionKind,
}

/// The trimmed view of an event that graph construction consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub product_id: String,
    pub product_name: String,
    pub kind: InteractionKind,
}

/// Catalog snapshot entry. Products are identified by `id`; `name` is a
/// display attribute only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: i64,
    pub stock: u32,
    pub sold_count: u32,
}

/// Which tier produced a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationSource {
    Warm,    // interacted but not purchased
    Collab,  // from users with overlapping interests
    Content, // category / popularity / price affinity
    Popular, // best-seller fallback
}

impl RecommendationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationSource::Warm => "WARM",
            RecommendationSource::Collab => "COLLAB",
            RecommendationSource::Content => "CONTENT",
            RecommendationSource::Popular => "POPULAR",
        }
    }
}

/// Tier-internal scored candidate, keyed by product id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub product_id: String,
    pub score: f64,
    pub source: RecommendationSource,
}

/// Final output item. `name` is resolved from the catalog, falling back
/// to the display name seen in the interaction log for stale products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub product_id: String,
    pub name: String,
    pub score: f64,
    pub source: RecommendationSource,
}

/// Per-tier counts for one assembled recommendation list.
#[derive(Debug, Clone, Default)]
pub struct TierStats {
    pub warm_count: usize,
    pub collab_count: usize,
    pub content_count: usize,
    pub popular_count: usize,
    pub total: usize,
}

/// Confidence class of a contributing user, derived from how many of
/// their interactions sit in the purchase tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuyerClass {
    Heavy,
    Regular,
    Standard,
}

impl BuyerClass {
    pub fn from_purchase_count(count: usize) -> Self {
        if count >= 5 {
            BuyerClass::Heavy
        } else if count >= 2 {
            BuyerClass::Regular
        } else {
            BuyerClass::Standard
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            BuyerClass::Heavy => 1.5,
            BuyerClass::Regular => 1.2,
            BuyerClass::Standard => 1.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BuyerClass::Heavy => "Heavy buyer",
            BuyerClass::Regular => "Regular buyer",
            BuyerClass::Standard => "User",
        }
    }
}

/// Read-only breakdown of why a product would be recommended to a user.
#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    pub user: String,
    pub product_id: String,
    /// The user has no graph entry; only the popularity fallback applies.
    pub cold_start: bool,
    pub warm: Option<WarmFactor>,
    pub collaborative: Option<CollaborativeFactor>,
    pub content: Option<ContentFactor>,
    /// Set when no warm, collaborative, or content factor applies.
    pub popular_fallback: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct WarmFactor {
    pub raw_weight: f64,
    pub boosted_score: f64,
    /// Interaction kind implied by the accumulated weight.
    pub implied_kind: InteractionKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollaborativeFactor {
    /// Sum over every contributing path, not just the ones listed.
    pub total_score: f64,
    pub paths: Vec<CollabPath>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollabPath {
    /// Product both users touched.
    pub via_product: String,
    pub contributor: String,
    pub buyer_class: BuyerClass,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentFactor {
    pub category: String,
    /// How many of the user's own products share the category.
    pub shared_category_count: usize,
    pub sold_count: u32,
    pub price: i64,
    /// Distance from the user's average interacted price, in percent.
    pub price_distance_pct: f64,
}
