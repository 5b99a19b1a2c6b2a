use std::env;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Scoring weights and tier limits for the recommendation engine.
/// Immutable after construction; `Default` carries the tuned values.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Boost applied to products the user engaged with but has not bought.
    pub warm_boost: f64,
    /// Share of the content score taken from category affinity.
    pub category_weight: f64,
    /// Share of the content score taken from catalog popularity.
    pub popularity_weight: f64,
    /// Share of the content score taken from price proximity.
    pub price_similarity_weight: f64,
    pub warm_limit: usize,
    pub collab_limit: usize,
    pub discovery_limit: usize,
    /// Reference price when none of the user's products resolve.
    pub default_reference_price: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            warm_boost: 1.5,
            category_weight: 0.6,
            popularity_weight: 0.3,
            price_similarity_weight: 0.1,
            warm_limit: 3,
            collab_limit: 5,
            discovery_limit: 3,
            default_reference_price: 500_000.0,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Ok(Self {
            warm_boost: env_parse("WARM_BOOST", defaults.warm_boost)?,
            category_weight: env_parse("CATEGORY_WEIGHT", defaults.category_weight)?,
            popularity_weight: env_parse("POPULARITY_WEIGHT", defaults.popularity_weight)?,
            price_similarity_weight: env_parse(
                "PRICE_SIMILARITY_WEIGHT",
                defaults.price_similarity_weight,
            )?,
            warm_limit: env_parse("WARM_TIER_LIMIT", defaults.warm_limit)?,
            collab_limit: env_parse("COLLAB_TIER_LIMIT", defaults.collab_limit)?,
            discovery_limit: env_parse("DISCOVERY_TIER_LIMIT", defaults.discovery_limit)?,
            default_reference_price: env_parse(
                "DEFAULT_REFERENCE_PRICE",
                defaults.default_reference_price,
            )?,
        })
    }
}

fn env_parse<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw.clone() }),
        Err(_) => Ok(default),
    }
}
