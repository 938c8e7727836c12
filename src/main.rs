use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;
use trailscout::{
    NominatimClient, RecommendationService, TrailScoutConfig, TrailScoutError, TripStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = TrailScoutConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if config.logging.format == "compact" {
        subscriber.compact().init();
    } else {
        subscriber.init();
    }

    let store = TripStore::open(&config.store.location)?;

    // A file argument seeds the store with a fresh blob before the run
    if let Some(path) = std::env::args().nth(1) {
        let blob = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read recommendation file: {path}"))?;
        store.set_recommendations(blob.trim_end()).await?;
        info!("Seeded store with recommendations from {}", path);
    }

    let geocoder = NominatimClient::new(&config.geocoding)?;

    match RecommendationService::run(&store, &geocoder).await {
        Ok(set) => {
            if let Some(summary) = &set.summary {
                println!("{summary}");
                println!();
            }

            println!("Found {} trail recommendations:", set.trails.len());
            for trail in &set.trails {
                match trail.format_coordinates() {
                    Some(coordinates) => println!("  - {} ({})", trail.name, coordinates),
                    None => println!("  - {}", trail.name),
                }
                println!("      location:   {}", trail.location);
                if !trail.key_features.is_empty() {
                    println!("      features:   {}", trail.key_features);
                }
                if !trail.facilities.is_empty() {
                    println!("      facilities: {}", trail.facilities);
                }
            }
            Ok(())
        }
        Err(err) => {
            let message = err
                .downcast_ref::<TrailScoutError>()
                .map_or_else(|| err.to_string(), TrailScoutError::user_message);
            eprintln!("{message}");

            // Leave the store clean so the user's retry starts fresh
            RecommendationService::reset_for_retry(&store).await?;
            std::process::exit(1)
        }
    }
}
