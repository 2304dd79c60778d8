use data_loader::Catalog;
use std::path::Path;
use std::time::Instant;

fn main() {
    let path = Path::new("data/liquors.csv");

    println!("Loading liquor dataset...\n");

    let start = Instant::now();
    let catalog = Catalog::load_from_file(path)
        .expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let report = catalog.load_report();
    let stats = catalog.stats();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Rows read: {}", report.rows_read);
    println!("Records: {}", report.rows_loaded);
    println!("Skipped: {}", report.rows_skipped());
    println!("Categories: {}", stats.category_counts.len());
    println!("\nPerformance: {:.0} rows/second",
             report.rows_read as f64 / elapsed.as_secs_f64());
}
