//! Recommendation Run Orchestration
//!
//! This module ties the pipeline to the surrounding application's
//! key/value store: it short-circuits on upstream errors, runs the
//! pipeline over the stored blob, and persists the outcome for the rest
//! of the application to render.

use crate::TrailScoutError;
use crate::geocode::Geocoder;
use crate::models::RecommendationSet;
use crate::pipeline::TrailPipeline;
use crate::store::{KEY_ERROR, KEY_PARSED, TripStore};
use anyhow::Result;
use chrono::Utc;
use tracing::{info, warn};

/// Service running one recommendation pass against the store
pub struct RecommendationService;

impl RecommendationService {
    /// Load stored recommendations, parse and enrich them, persist the result.
    ///
    /// An error string recorded by the upstream service takes precedence:
    /// the pipeline does not run and the stored message is surfaced as-is.
    pub async fn run(store: &TripStore, geocoder: &dyn Geocoder) -> Result<RecommendationSet> {
        if let Some(message) = store.upstream_error().await? {
            warn!("Upstream service recorded an error, skipping pipeline run");
            return Err(TrailScoutError::upstream(message).into());
        }

        let blob = store.recommendations().await?;
        let Some(blob) = blob.filter(|b| !b.trim().is_empty()) else {
            return Err(TrailScoutError::empty_result(
                "No trail recommendations found. Please try again.",
            )
            .into());
        };

        let summary = store.summary().await?;
        let trails = TrailPipeline::build_trails(geocoder, &blob).await?;

        store.set_parsed_trails(&trails).await?;
        info!("Stored {} parsed trails", trails.len());

        Ok(RecommendationSet {
            summary,
            trails,
            generated_at: Utc::now(),
        })
    }

    /// Clear a failed run's leftovers so the next attempt starts clean
    pub async fn reset_for_retry(store: &TripStore) -> Result<()> {
        store.remove(KEY_ERROR).await?;
        store.remove(KEY_PARSED).await?;
        info!("Cleared stored error and parsed results for retry");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocode::GeocodeHit;
    use async_trait::async_trait;

    /// Geocoder answering every query with a fixed coordinate pair
    struct FixedGeocoder;

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn search(&self, _query: &str) -> crate::Result<Vec<GeocodeHit>> {
            Ok(vec![GeocodeHit {
                latitude: 35.59,
                longitude: -82.55,
            }])
        }
    }

    fn open_temp_store() -> (tempfile::TempDir, TripStore) {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = TripStore::open(dir.path().join("store")).expect("open store");
        (dir, store)
    }

    fn as_trail_error(err: &anyhow::Error) -> &TrailScoutError {
        err.downcast_ref::<TrailScoutError>().expect("typed error")
    }

    #[tokio::test]
    async fn test_stored_upstream_error_short_circuits() {
        let (_dir, store) = open_temp_store();
        store
            .set_recommendations("#Eagle Peak!Sierra Nevada, CA")
            .await
            .expect("seed blob");
        store
            .set_upstream_error("Trail service is down.")
            .await
            .expect("seed error");

        let err = RecommendationService::run(&store, &FixedGeocoder)
            .await
            .expect_err("upstream error wins");
        match as_trail_error(&err) {
            TrailScoutError::Upstream { message } => {
                assert_eq!(message, "Trail service is down.");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_blob_is_empty_result() {
        let (_dir, store) = open_temp_store();

        let err = RecommendationService::run(&store, &FixedGeocoder)
            .await
            .expect_err("nothing stored");
        assert!(matches!(
            as_trail_error(&err),
            TrailScoutError::EmptyResult { .. }
        ));
    }

    #[tokio::test]
    async fn test_successful_run_persists_parsed_trails() {
        let (_dir, store) = open_temp_store();
        store
            .set_recommendations("#Blue Ridge Loop!Asheville, NC!Scenic overlooks!Picnic area")
            .await
            .expect("seed blob");
        store.set_summary("One great loop.").await.expect("seed summary");

        let set = RecommendationService::run(&store, &FixedGeocoder)
            .await
            .expect("run succeeds");
        assert_eq!(set.summary.as_deref(), Some("One great loop."));
        assert_eq!(set.trails.len(), 1);
        assert!(set.trails[0].has_coordinates());

        let persisted = store
            .parsed_trails()
            .await
            .expect("get")
            .expect("persisted trails");
        assert_eq!(persisted, set.trails);
    }

    #[tokio::test]
    async fn test_reset_for_retry_clears_error_and_results() {
        let (_dir, store) = open_temp_store();
        store
            .set_upstream_error("Trail service is down.")
            .await
            .expect("seed error");
        store
            .set_parsed_trails(&[])
            .await
            .expect("seed stale result");

        RecommendationService::reset_for_retry(&store)
            .await
            .expect("reset");
        assert!(store.upstream_error().await.expect("get").is_none());
        assert!(store.parsed_trails().await.expect("get").is_none());
    }
}
