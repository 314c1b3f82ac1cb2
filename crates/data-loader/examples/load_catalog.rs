use data_loader::RawCatalog;
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_dir = Path::new("data");

    println!("Loading TMDB 5000 catalog...\n");

    let start = Instant::now();
    let catalog = RawCatalog::load_from_files(data_dir)
        .expect("Failed to load catalog");
    let elapsed = start.elapsed();

    let (movies, credits) = catalog.counts();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movie rows: {}", movies);
    println!("Credit rows: {}", credits);
    println!("\nPerformance: {:.0} rows/second",
             (movies + credits) as f64 / elapsed.as_secs_f64());
}
