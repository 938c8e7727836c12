//! Data models for trail recommendations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recommended trail, optionally enriched with coordinates.
///
/// Serializes with camelCase field names so it round-trips losslessly
/// across the boundary to the surrounding application.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trail {
    /// Display name of the trail
    pub name: String,
    /// Human-readable place description
    pub location: String,
    /// Free-text highlights
    pub key_features: String,
    /// Free-text facilities description
    pub facilities: String,
    /// Latitude in decimal degrees, absent when geocoding found nothing
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees, set together with latitude
    pub longitude: Option<f64>,
}

impl Trail {
    /// Whether geocoding produced a coordinate pair for this trail
    #[must_use]
    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    /// Format the coordinate pair, when present
    #[must_use]
    pub fn format_coordinates(&self) -> Option<String> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(format!("{lat:.4}, {lon:.4}")),
            _ => None,
        }
    }
}

/// A latitude/longitude pair, always produced together
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

/// Result of one full recommendation run
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RecommendationSet {
    /// Optional summary text produced alongside the recommendations
    pub summary: Option<String>,
    /// Parsed and enriched trails, in original recommendation order
    pub trails: Vec<Trail>,
    /// When this set was produced
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trail() -> Trail {
        Trail {
            name: "Blue Ridge Loop".to_string(),
            location: "Asheville, NC".to_string(),
            key_features: "Scenic overlooks".to_string(),
            facilities: "Picnic area".to_string(),
            latitude: Some(35.59),
            longitude: Some(-82.55),
        }
    }

    #[test]
    fn test_has_coordinates() {
        let mut trail = sample_trail();
        assert!(trail.has_coordinates());

        trail.latitude = None;
        trail.longitude = None;
        assert!(!trail.has_coordinates());
    }

    #[test]
    fn test_trail_serializes_camel_case() {
        let trail = sample_trail();
        let json = serde_json::to_string(&trail).expect("serialize trail");
        assert!(json.contains("\"keyFeatures\":\"Scenic overlooks\""));
        assert!(json.contains("\"latitude\":35.59"));
    }

    #[test]
    fn test_trail_round_trip_without_coordinates() {
        let trail = Trail {
            latitude: None,
            longitude: None,
            ..sample_trail()
        };
        let json = serde_json::to_string(&trail).expect("serialize trail");
        let back: Trail = serde_json::from_str(&json).expect("deserialize trail");
        assert_eq!(back, trail);
        assert!(!back.has_coordinates());
    }

    #[test]
    fn test_format_coordinates() {
        let trail = sample_trail();
        assert_eq!(trail.format_coordinates().as_deref(), Some("35.5900, -82.5500"));
    }
}
