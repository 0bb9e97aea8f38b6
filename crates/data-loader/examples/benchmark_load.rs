use data_loader::{DatasetSource, TextColumn, load};
use std::path::PathBuf;
use std::time::Instant;

#[tokio::main]
async fn main() {
    // A local copy of the export avoids timing the network
    let source = std::env::args()
        .nth(1)
        .map(|path| DatasetSource::File(PathBuf::from(path)))
        .unwrap_or_default();

    println!("Loading movie dataset from {}...\n", source);

    let start = Instant::now();
    let dataset = load(&source).await.expect("Failed to load dataset");
    let elapsed = start.elapsed();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Rows: {}", dataset.len());
    for column in TextColumn::ALL {
        println!("{} options: {}", column.header(), dataset.distinct_values(column).len());
    }

    println!("\nPerformance: {:.0} rows/second",
             dataset.len() as f64 / elapsed.as_secs_f64());
}
