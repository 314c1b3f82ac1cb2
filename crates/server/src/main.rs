//! Simple test harness for the recommendation service.
//!
//! Loads persisted artifacts and logs recommendations for one title.
//!
//! Usage: server [ARTIFACT_DIR] [TITLE]

use std::env;

use anyhow::Result;
use tracing::info;

use server::RecommendationService;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,server=debug,similarity=debug")),
        )
        .init();

    let mut args = env::args().skip(1);
    let artifact_dir = args.next().unwrap_or_else(|| "artifacts".to_string());
    let title = args.next().unwrap_or_else(|| "Gandhi".to_string());

    info!("Starting Cinematch service test harness");
    let service = RecommendationService::load(&artifact_dir)?;
    info!("Service ready with {} movies", service.len());

    let recommendations = service.recommend(&title, 5)?;
    info!("Received {} recommendations for '{}':", recommendations.len(), title);
    for rec in &recommendations {
        info!("{}. {} - Score: {:.3}", rec.rank, rec.title, rec.score);
        info!("   {}", rec.poster_url);
    }

    Ok(())
}
