//! Geocoding client for the OpenStreetMap Nominatim API
//!
//! Thin HTTP search client behind the `Geocoder` trait so the enrichment
//! pipeline can run against a stub in tests.

use crate::config::GeocodingConfig;
use crate::{Result, TrailScoutError};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use tracing::{debug, info, warn};

/// A single geocoding match
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeHit {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

/// Forward geocoding search collaborator
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Search for a free-text place description, best match first
    async fn search(&self, query: &str) -> Result<Vec<GeocodeHit>>;
}

/// Nominatim search response entry
#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(deserialize_with = "de_coordinate")]
    lat: f64,
    #[serde(deserialize_with = "de_coordinate")]
    lon: f64,
}

/// Nominatim serves coordinates as JSON strings; tolerate numbers too
fn de_coordinate<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCoordinate {
        Number(f64),
        Text(String),
    }

    match RawCoordinate::deserialize(deserializer)? {
        RawCoordinate::Number(value) => Ok(value),
        RawCoordinate::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Nominatim API client
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    /// Create a new client from the geocoding configuration
    pub fn new(config: &GeocodingConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TrailScoutError::api(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn search(&self, query: &str) -> Result<Vec<GeocodeHit>> {
        let url = format!(
            "{}/search?format=json&q={}",
            self.base_url,
            urlencoding::encode(query)
        );
        debug!("Geocoding query: '{}'", query);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TrailScoutError::api(format!("Geocoding request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!("Geocoding request for '{}' returned HTTP {}", query, status);
            return Err(TrailScoutError::api(format!(
                "Geocoding service returned HTTP {status}"
            )));
        }

        let results: Vec<SearchResult> = response
            .json()
            .await
            .map_err(|e| TrailScoutError::api(format!("Invalid geocoding response: {e}")))?;

        if results.is_empty() {
            debug!("No geocoding results for '{}'", query);
        } else {
            info!("Found {} geocoding results for '{}'", results.len(), query);
        }

        Ok(results
            .into_iter()
            .map(|result| GeocodeHit {
                latitude: result.lat,
                longitude: result.lon,
            })
            .collect())
    }
}
