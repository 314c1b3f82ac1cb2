use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::RawCatalog;
use pipeline::FeatureBuilder;
use server::{MovieRecommendation, RecommendationService};
use similarity::{
    ArtifactStore, DenseCosineIndex, IndexConfig, SimilarityIndex, DEFAULT_MAX_FEATURES,
    DEFAULT_TOP_K,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::info;

/// Cinematch - content-based movie recommender
#[derive(Parser)]
#[command(name = "cinematch")]
#[command(about = "Content-based movie recommender over the TMDB 5000 catalog", long_about = None)]
struct Cli {
    /// Directory holding the persisted item table and similarity index
    #[arg(short, long, default_value = "artifacts")]
    artifacts: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build features, fit the index and persist the artifacts
    Build {
        /// Directory containing tmdb_5000_movies.csv and tmdb_5000_credits.csv
        #[arg(short, long, default_value = "data")]
        data_dir: PathBuf,

        /// Vocabulary size
        #[arg(long, default_value_t = DEFAULT_MAX_FEATURES)]
        max_features: usize,

        /// Title used to print a sample recommendation after fitting
        #[arg(long, default_value = "Gandhi")]
        probe: String,
    },

    /// Get movies similar to a title
    Recommend {
        /// Exact catalog title
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        limit: usize,

        /// Show scores and poster URLs
        #[arg(long)]
        explain: bool,
    },

    /// Search for movies by title
    Search {
        /// Title fragment (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Run benchmark to test query performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            data_dir,
            max_features,
            probe,
        } => handle_build(&cli.artifacts, &data_dir, max_features, &probe)?,
        Commands::Recommend {
            title,
            limit,
            explain,
        } => handle_recommend(&cli.artifacts, &title, limit, explain)?,
        Commands::Search { title } => handle_search(&cli.artifacts, &title)?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(&cli.artifacts, requests, concurrent).await?,
    }

    Ok(())
}

/// Load the service, reporting how long it took
fn load_service(artifacts: &Path) -> Result<RecommendationService> {
    let start = Instant::now();
    let service = RecommendationService::load(artifacts)?;
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        service.len(),
        start.elapsed()
    );
    Ok(service)
}

/// Handle the 'build' command
fn handle_build(artifacts: &Path, data_dir: &Path, max_features: usize, probe: &str) -> Result<()> {
    println!("Loading TMDB catalog from {}...", data_dir.display());
    let start = Instant::now();
    let catalog = RawCatalog::load_from_files(data_dir).context("Failed to load TMDB catalog")?;
    let (movies, credits) = catalog.counts();
    println!(
        "{} Loaded {} movies and {} credits in {:?}",
        "✓".green(),
        movies,
        credits,
        start.elapsed()
    );

    let (items, corpus) = FeatureBuilder::new()
        .build(&catalog.movies, &catalog.credits)
        .context("Failed to build features")?;
    println!("{} Tagged {} movies", "✓".green(), items.len());

    let config = IndexConfig::default().with_max_features(max_features);
    let start = Instant::now();
    let index = DenseCosineIndex::fit(&corpus, &config).context("Failed to fit similarity index")?;
    println!(
        "{} Fitted index ({} terms) in {:?}",
        "✓".green(),
        index.vocabulary().len(),
        start.elapsed()
    );

    if items.position(probe).is_some() {
        let recommendations = similarity::recommend(probe, &items, &index, config.top_k)?;
        println!("{}", format!("Sample recommendations for '{}':", probe).bold().blue());
        for (i, rec) in recommendations.iter().enumerate() {
            println!("  {}. {} ({:.3})", i + 1, rec.title, rec.score);
        }
    } else {
        info!("Probe title '{}' not in catalog, skipping sample", probe);
    }

    let manifest = ArtifactStore::new(artifacts)
        .save(&items, &index)
        .with_context(|| format!("Failed to save artifacts to {}", artifacts.display()))?;
    println!(
        "{} Saved {} items and {} terms to {}",
        "✓".green(),
        manifest.items,
        manifest.vocabulary,
        artifacts.display()
    );
    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(artifacts: &Path, title: &str, limit: usize, explain: bool) -> Result<()> {
    let service = load_service(artifacts)?;
    let recommendations = service.recommend(title, limit)?;
    print_recommendations(title, &recommendations, explain);
    Ok(())
}

/// Handle the 'search' command
fn handle_search(artifacts: &Path, title: &str) -> Result<()> {
    let service = load_service(artifacts)?;
    let matches = service.search(title, 20);

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("  (no matches)");
    }
    for item in matches {
        println!("{}: {}", item.movie_id, item.title);
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(artifacts: &Path, requests: usize, concurrent: usize) -> Result<()> {
    if requests == 0 || concurrent == 0 {
        bail!("requests and concurrent must both be positive");
    }
    let service = load_service(artifacts)?;
    if service.is_empty() {
        bail!("artifact set has no movies");
    }

    // Random catalog titles, so every query resolves
    let titles: Vec<String> = (0..requests)
        .map(|_| {
            let row = rand::random_range(0..service.len());
            service.items().items()[row].title.clone()
        })
        .collect();

    let limiter = Arc::new(Semaphore::new(concurrent));
    let wall = Instant::now();
    let mut handles = vec![];
    for title in titles {
        let service = service.clone();
        let permit = limiter.clone().acquire_owned().await?;
        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let start = Instant::now();
            service.recommend(&title, DEFAULT_TOP_K)?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings: Vec<Duration> = vec![];
    for handle in handles {
        timings.push(handle.await??);
    }
    let total_time = wall.elapsed();

    timings.sort();
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
    let avg_latency = timings.iter().sum::<Duration>() / timings.len() as u32;
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(title: &str, recommendations: &[MovieRecommendation], explain: bool) {
    println!("{}", format!("Movies similar to '{}':", title).bold().blue());
    for rec in recommendations {
        if explain {
            println!(
                "{}. {} - Score: {:.3}",
                rec.rank.to_string().green(),
                rec.title,
                rec.score
            );
            println!("   Poster: {}", rec.poster_url);
        } else {
            println!("{}. {}", rec.rank.to_string().green(), rec.title);
        }
    }
}
