pub mod config;
pub mod graph;
pub mod models;
pub mod services;
pub mod stores;
pub mod utils;

pub use config::EngineConfig;
pub use graph::{GraphBuilder, InteractionGraph, WeightTable};
pub use services::{RecommendationEngine, RecommendationPipeline};
