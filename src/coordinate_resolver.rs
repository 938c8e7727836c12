//! Coordinate Resolution Module
//!
//! This module resolves a trail's name and place description into
//! coordinates via the geocoding collaborator, with a place-only
//! fallback query.

use crate::geocode::Geocoder;
use crate::models::Coordinates;
use tracing::{debug, warn};

/// Service for attaching coordinates to trail records
pub struct CoordinateResolver;

impl CoordinateResolver {
    /// Resolve coordinates for a trail, or `None` when nothing matches.
    ///
    /// The primary query combines the trail name with its location; when
    /// that finds nothing, the location alone is tried once. Transport
    /// failures are treated the same as an empty result and never
    /// propagate to the caller.
    pub async fn resolve(
        geocoder: &dyn Geocoder,
        name: &str,
        location: &str,
    ) -> Option<Coordinates> {
        let combined = format!("{name}, {location}");
        debug!("Resolving coordinates for '{}'", combined);

        if let Some(coordinates) = Self::first_hit(geocoder, &combined).await {
            return Some(coordinates);
        }

        debug!(
            "No match for '{}', falling back to '{}'",
            combined, location
        );
        Self::first_hit(geocoder, location).await
    }

    /// Run one search and keep the best match, absorbing failures
    async fn first_hit(geocoder: &dyn Geocoder, query: &str) -> Option<Coordinates> {
        match geocoder.search(query).await {
            Ok(hits) => hits.into_iter().next().map(|hit| Coordinates {
                latitude: hit.latitude,
                longitude: hit.longitude,
            }),
            Err(e) => {
                warn!("Geocoding failed for '{}': {}", query, e);
                None
            }
        }
    }
}
