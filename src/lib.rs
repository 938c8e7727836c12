//! `TrailScout` - trail recommendation parsing and trip planning core
//!
//! This library provides the pipeline that turns raw AI-generated trail
//! recommendations into structured, geocoded trail records, plus the
//! persistence and configuration plumbing around it.

pub mod config;
pub mod coordinate_resolver;
pub mod error;
pub mod geocode;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod recommendation;
pub mod store;

// Re-export core types for public API
pub use config::{GeocodingConfig, TrailScoutConfig};
pub use coordinate_resolver::CoordinateResolver;
pub use error::TrailScoutError;
pub use geocode::{GeocodeHit, Geocoder, NominatimClient};
pub use models::{Coordinates, RecommendationSet, Trail};
pub use parser::TrailRecord;
pub use pipeline::TrailPipeline;
pub use recommendation::RecommendationService;
pub use store::TripStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TrailScoutError>;
