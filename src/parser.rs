//! Recommendation Parsing Module
//!
//! This module parses the delimited recommendation text produced by the
//! external AI service into candidate trail records, rejecting the
//! service's own apology/error messages embedded in the data. A JSON
//! array of records is accepted as an alternative encoding.

use crate::TrailScoutError;
use crate::models::{Coordinates, Trail};
use serde::Deserialize;
use tracing::{debug, warn};

/// Separates one trail record from the next in the raw blob
const RECORD_SEPARATOR: char = '#';

/// Any of these separates fields within a record
const FIELD_SEPARATORS: [char; 3] = ['!', '@', '%'];

/// Name-field substrings marking a non-trail message from the service
const ERROR_SENTINELS: [&str; 2] = ["sorry", "error"];

/// An unenriched trail record extracted from the blob
#[derive(Debug, Clone, PartialEq)]
pub struct TrailRecord {
    /// Display name of the trail
    pub name: String,
    /// Human-readable place description
    pub location: String,
    /// Free-text highlights
    pub key_features: String,
    /// Free-text facilities description
    pub facilities: String,
}

impl TrailRecord {
    /// Attach geocoding results, producing the output entity
    #[must_use]
    pub fn into_trail(self, coordinates: Option<Coordinates>) -> Trail {
        Trail {
            name: self.name,
            location: self.location,
            key_features: self.key_features,
            facilities: self.facilities,
            latitude: coordinates.map(|c| c.latitude),
            longitude: coordinates.map(|c| c.longitude),
        }
    }
}

/// Structured (JSON) encoding of a recommendation record
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StructuredRecord {
    name: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    key_features: String,
    #[serde(default)]
    facilities: String,
}

/// Split the raw blob into candidate trail tokens.
///
/// The blob must contain at least one record separator and one field
/// separator, otherwise it is not recommendation data at all. Empty
/// segments (e.g. from a leading separator) are dropped. Field contents
/// are not validated here.
pub fn tokenize(blob: &str) -> crate::Result<Vec<&str>> {
    if !blob.contains(RECORD_SEPARATOR) || !blob.contains(FIELD_SEPARATORS) {
        warn!("Recommendation blob is missing the expected separators");
        return Err(TrailScoutError::format(
            "recommendation text does not contain delimited trail records",
        ));
    }

    Ok(blob
        .split(RECORD_SEPARATOR)
        .filter(|token| !token.is_empty())
        .collect())
}

/// Validate a single token and extract its positional fields.
///
/// Up to four fields are read in order: name, location, key features,
/// facilities. Missing trailing fields default to the empty string and
/// anything past the fourth separator is ignored. Returns `None` for the
/// service's embedded apology/error messages and for records without a
/// usable name; the drop is logged, siblings are unaffected.
pub fn parse_token(token: &str) -> Option<TrailRecord> {
    let mut fields = token.split(FIELD_SEPARATORS);
    let name = fields.next().unwrap_or_default().to_string();
    let location = fields.next().unwrap_or_default().to_string();
    let key_features = fields.next().unwrap_or_default().to_string();
    let facilities = fields.next().unwrap_or_default().to_string();

    accept_record(TrailRecord {
        name,
        location,
        key_features,
        facilities,
    })
}

/// Decode the structured JSON form of the blob, if that is what it is.
///
/// Newer service versions send a JSON array of records instead of the
/// delimited text; both encodings go through the same acceptance check.
/// Returns `None` when the blob is not a JSON record array.
pub fn try_parse_structured(blob: &str) -> Option<Vec<TrailRecord>> {
    let entries: Vec<StructuredRecord> = serde_json::from_str(blob.trim()).ok()?;
    debug!("Decoded {} structured recommendation records", entries.len());

    Some(
        entries
            .into_iter()
            .filter_map(|entry| {
                accept_record(TrailRecord {
                    name: entry.name,
                    location: entry.location,
                    key_features: entry.key_features,
                    facilities: entry.facilities,
                })
            })
            .collect(),
    )
}

/// Extract all accepted records from a blob, whichever encoding it uses
pub fn parse_records(blob: &str) -> crate::Result<Vec<TrailRecord>> {
    if let Some(records) = try_parse_structured(blob) {
        return Ok(records);
    }

    Ok(tokenize(blob)?
        .into_iter()
        .filter_map(parse_token)
        .collect())
}

/// Acceptance check shared by both blob encodings
fn accept_record(record: TrailRecord) -> Option<TrailRecord> {
    let name = record.name.trim();
    if name.is_empty() {
        warn!("Skipping trail record without a name");
        return None;
    }
    if is_error_sentinel(name) {
        warn!("Skipping embedded service message: {}", record.name);
        return None;
    }
    Some(record)
}

/// Whether a name field is one of the service's apology/error messages
fn is_error_sentinel(name: &str) -> bool {
    let lowered = name.to_lowercase();
    ERROR_SENTINELS
        .iter()
        .any(|sentinel| lowered.contains(sentinel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const VALID_BLOB: &str = "#Eagle Peak!Sierra Nevada, CA!Old-growth forest, waterfall!Restrooms, parking#Sorry, I could not find trails matching your criteria.";

    #[test]
    fn test_tokenize_drops_empty_leading_segment() {
        let tokens = tokenize(VALID_BLOB).expect("valid blob");
        assert_eq!(tokens.len(), 2);
        assert!(tokens[0].starts_with("Eagle Peak"));
        assert!(tokens[1].starts_with("Sorry"));
    }

    #[rstest]
    #[case("no separators at all")]
    #[case("record#separator#but#no#fields")]
    #[case("field!separators@only%here")]
    #[case("")]
    fn test_tokenize_rejects_malformed_blob(#[case] blob: &str) {
        let result = tokenize(blob);
        assert!(matches!(result, Err(TrailScoutError::Format { .. })));
    }

    #[rstest]
    #[case('!')]
    #[case('@')]
    #[case('%')]
    fn test_any_field_separator_satisfies_tokenizer(#[case] separator: char) {
        let blob = format!("#Eagle Peak{separator}Sierra Nevada, CA");
        assert_eq!(tokenize(&blob).expect("valid blob").len(), 1);
    }

    #[test]
    fn test_parse_token_positional_fields() {
        let record = parse_token("Eagle Peak!Sierra Nevada, CA@Old-growth forest%Restrooms")
            .expect("accepted record");
        assert_eq!(record.name, "Eagle Peak");
        assert_eq!(record.location, "Sierra Nevada, CA");
        assert_eq!(record.key_features, "Old-growth forest");
        assert_eq!(record.facilities, "Restrooms");
    }

    #[test]
    fn test_parse_token_missing_trailing_fields_default_empty() {
        let record = parse_token("Eagle Peak!Sierra Nevada, CA").expect("accepted record");
        assert_eq!(record.key_features, "");
        assert_eq!(record.facilities, "");
    }

    #[test]
    fn test_parse_token_ignores_extra_fields() {
        let record = parse_token("a!b!c!d!ignored!also ignored").expect("accepted record");
        assert_eq!(record.facilities, "d");
    }

    #[rstest]
    #[case("Sorry, I could not find trails matching your criteria.")]
    #[case("SORRY!somewhere!x!y")]
    #[case("An ERROR occurred while generating trails!x")]
    #[case("We are sorry about this!x!y!z")]
    fn test_parse_token_rejects_sentinels(#[case] token: &str) {
        assert!(parse_token(token).is_none());
    }

    #[rstest]
    #[case("!Asheville, NC!features!facilities")]
    #[case("   !x!y")]
    fn test_parse_token_rejects_blank_name(#[case] token: &str) {
        assert!(parse_token(token).is_none());
    }

    #[test]
    fn test_parse_token_allows_empty_optional_fields() {
        let record = parse_token("Eagle Peak!!!").expect("accepted record");
        assert_eq!(record.name, "Eagle Peak");
        assert_eq!(record.location, "");
    }

    #[test]
    fn test_parse_records_delimited() {
        let records = parse_records(VALID_BLOB).expect("valid blob");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Eagle Peak");
    }

    #[test]
    fn test_parse_records_structured_json() {
        let blob = r#"[
            {"name": "Eagle Peak", "location": "Sierra Nevada, CA", "keyFeatures": "Waterfall", "facilities": "Parking"},
            {"name": "Sorry, nothing matched your criteria."},
            {"name": "Blue Ridge Loop", "location": "Asheville, NC"}
        ]"#;
        let records = parse_records(blob).expect("structured blob");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Eagle Peak");
        assert_eq!(records[0].key_features, "Waterfall");
        assert_eq!(records[1].name, "Blue Ridge Loop");
        assert_eq!(records[1].facilities, "");
    }

    #[test]
    fn test_structured_decode_requires_record_array() {
        assert!(try_parse_structured("{\"name\": \"not an array\"}").is_none());
        assert!(try_parse_structured("#Eagle Peak!Sierra Nevada, CA").is_none());
    }

    #[test]
    fn test_into_trail_carries_coordinates_together() {
        let record = parse_token("Eagle Peak!Sierra Nevada, CA").expect("accepted record");
        let trail = record.clone().into_trail(Some(Coordinates {
            latitude: 36.77,
            longitude: -119.42,
        }));
        assert_eq!(trail.latitude, Some(36.77));
        assert_eq!(trail.longitude, Some(-119.42));

        let bare = record.into_trail(None);
        assert!(bare.latitude.is_none());
        assert!(bare.longitude.is_none());
    }
}
