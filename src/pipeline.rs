//! Recommendation Pipeline Module
//!
//! This module orchestrates one run over a raw recommendation blob:
//! decode the records, fan out geocoding enrichment across them, and
//! reassemble the trails in their original order.

use crate::coordinate_resolver::CoordinateResolver;
use crate::geocode::Geocoder;
use crate::models::Trail;
use crate::{Result, TrailScoutError, parser};
use tracing::{debug, info};

/// Batch orchestrator for recommendation parsing and enrichment
pub struct TrailPipeline;

impl TrailPipeline {
    /// Build the ordered trail sequence for one recommendation blob.
    ///
    /// Geocoding runs concurrently across records, but the output order
    /// always follows the input order. A record whose lookup fails or
    /// comes back empty is still emitted, just without coordinates, and
    /// never affects its siblings. Fails when the blob is not delimited
    /// recommendation data at all, or when no record survives validation.
    pub async fn build_trails(geocoder: &dyn Geocoder, blob: &str) -> Result<Vec<Trail>> {
        let records = parser::parse_records(blob)?;
        debug!("Parsed {} candidate trail records", records.len());

        // join_all keeps input order, so completion timing cannot reorder
        let trails: Vec<Trail> =
            futures::future::join_all(records.into_iter().map(|record| async move {
                let coordinates =
                    CoordinateResolver::resolve(geocoder, &record.name, &record.location).await;
                record.into_trail(coordinates)
            }))
            .await;

        if trails.is_empty() {
            return Err(TrailScoutError::empty_result(
                "No valid trail recommendations found. Please try again.",
            ));
        }

        info!(
            "Built {} trails ({} geocoded)",
            trails.len(),
            trails.iter().filter(|t| t.has_coordinates()).count()
        );
        Ok(trails)
    }
}
