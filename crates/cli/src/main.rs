use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use data_loader::{DEFAULT_DATASET_URL, DatasetSource};
use pipeline::{Axis, FilterRequest};
use poster_client::{OMDB_BASE_URL, OmdbClient};
use rand::Rng;
use rand::seq::IndexedRandom;
use server::{AppConfig, AxisOptions, DEFAULT_BIND_ADDR, MovieRecommendation, RecommendationOrchestrator};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

/// ReelPicks - browse top-rated movies by rating, genre, cast or language
#[derive(Parser)]
#[command(name = "reel-picks")]
#[command(about = "Top-rated movie picks along one filter axis, with posters", long_about = None)]
struct Cli {
    /// URL of the movie CSV
    #[arg(long, default_value = DEFAULT_DATASET_URL, global = true)]
    dataset_url: String,

    /// Read the movie CSV from a local file instead of the URL
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// OMDb API key used for poster lookups
    #[arg(long, env = "OMDB_API_KEY", hide_env_values = true, global = true)]
    omdb_api_key: Option<String>,

    /// OMDb-compatible endpoint for poster lookups
    #[arg(long, default_value = OMDB_BASE_URL, global = true)]
    omdb_url: String,

    /// Timeout for a single poster lookup, in seconds
    #[arg(long, default_value = "5", global = true)]
    poster_timeout_secs: u64,

    /// Number of movies to show per query
    #[arg(long, default_value = "8", global = true)]
    limit: usize,

    /// Remember failed poster lookups instead of retrying them
    #[arg(long, global = true)]
    cache_failed_posters: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the top movies for one filter
    Recommend(RecommendArgs),

    /// List the values a filter axis offers
    Options {
        /// rating, genre, cast or language
        #[arg(long)]
        axis: Axis,
    },

    /// Serve the JSON API
    Serve {
        /// Address to listen on
        #[arg(long, default_value = DEFAULT_BIND_ADDR)]
        addr: SocketAddr,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

/// Exactly one filter per query
#[derive(Args)]
#[group(required = true, multiple = false)]
struct RecommendArgs {
    /// Minimum average rating (inclusive)
    #[arg(long)]
    min_rating: Option<f64>,

    /// Exact genre, e.g. "Drama"
    #[arg(long)]
    genre: Option<String>,

    /// Exact cast member name
    #[arg(long)]
    cast: Option<String>,

    /// Exact language name, e.g. "English"
    #[arg(long)]
    language: Option<String>,
}

impl RecommendArgs {
    fn into_request(self) -> Result<FilterRequest> {
        let request = match (self.min_rating, self.genre, self.cast, self.language) {
            (Some(rating), None, None, None) => {
                if !rating.is_finite() {
                    bail!("invalid minimum rating `{}`", rating);
                }
                FilterRequest::MinimumRating(rating)
            }
            (None, Some(genre), None, None) => FilterRequest::Genre(genre),
            (None, None, Some(cast), None) => FilterRequest::CastMember(cast),
            (None, None, None, Some(language)) => FilterRequest::Language(language),
            _ => bail!("choose exactly one of --min-rating, --genre, --cast or --language"),
        };
        Ok(request)
    }
}

impl Cli {
    fn to_config(&self) -> AppConfig {
        let dataset = match &self.data_file {
            Some(path) => DatasetSource::File(path.clone()),
            None => DatasetSource::Remote(self.dataset_url.clone()),
        };
        AppConfig {
            dataset,
            omdb_base_url: self.omdb_url.clone(),
            omdb_api_key: self.omdb_api_key.clone(),
            poster_timeout: Duration::from_secs(self.poster_timeout_secs),
            result_limit: self.limit,
            cache_failed_posters: self.cache_failed_posters,
            ..AppConfig::default()
        }
    }
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
    let mut config = cli.to_config();
    if let Commands::Serve { addr } = &cli.command {
        config.bind_addr = *addr;
    }

    // Load the dataset (this may take a moment)
    println!("Loading movie dataset from {}...", config.dataset);
    let start = Instant::now();
    let orchestrator = RecommendationOrchestrator::from_config(&config).await?;
    println!(
        "{} Loaded {} rows in {:?}",
        "✓".green(),
        orchestrator.dataset().len(),
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend(args) => handle_recommend(&orchestrator, args).await?,
        Commands::Options { axis } => handle_options(&orchestrator, axis),
        Commands::Serve { .. } => server::serve(config.bind_addr, orchestrator).await?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(orchestrator, requests, concurrent).await?,
    }

    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    orchestrator: &RecommendationOrchestrator<OmdbClient>,
    args: RecommendArgs,
) -> Result<()> {
    let request = args.into_request()?;
    let axis = request.axis();

    match &request {
        FilterRequest::CastMember(value) | FilterRequest::Language(value) => {
            println!("Showing movies featuring: {}", value.bold());
        }
        _ => {}
    }

    let recommendations = orchestrator.recommend(&request).await;
    if recommendations.is_empty() {
        println!("{}", format!("No movies match this {}.", axis).yellow());
        return Ok(());
    }

    print_recommendations(&recommendations, shows_genre(axis));
    Ok(())
}

/// Handle the 'options' command
fn handle_options(orchestrator: &RecommendationOrchestrator<OmdbClient>, axis: Axis) {
    match orchestrator.options(axis) {
        AxisOptions::Slider(slider) => {
            println!(
                "{} {:.1} to {:.1} (default {:.1})",
                "Minimum rating:".bold().blue(),
                slider.min,
                slider.max,
                slider.default
            );
        }
        AxisOptions::Picker { values } => {
            println!("{}", format!("{} values for {}:", values.len(), axis).bold().blue());
            for value in values {
                println!("{}{}", "• ".green(), value);
            }
        }
    }
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    orchestrator: RecommendationOrchestrator<OmdbClient>,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }

    // Draw random requests from the values the dataset actually offers
    let request_mix = random_requests(&orchestrator, requests);

    let permits = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();
    let mut handles = vec![];
    for request in request_mix {
        let orchestrator = orchestrator.clone();
        let permits = Arc::clone(&permits);
        let handle = tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let start = Instant::now();
            orchestrator.recommend(&request).await;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = vec![];
    for handle in handles {
        let elapsed = handle.await.context("Benchmark task panicked")??;
        timings.push(elapsed);
    }
    let total_time = wall_clock.elapsed();

    let summed: Duration = timings.iter().sum();
    let avg_latency = summed / (timings.len() as u32);
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[(timings.len() as f32 * 0.95) as usize];
    let p99 = timings[(timings.len() as f32 * 0.99) as usize];
    let throughput = requests as f32 / total_time.as_secs_f32();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} requests/second", throughput);
    println!("Posters cached: {}", orchestrator.posters().cache_len());

    Ok(())
}

fn random_requests(orchestrator: &RecommendationOrchestrator<OmdbClient>, count: usize) -> Vec<FilterRequest> {
    let mut rng = rand::rng();
    let pickers: Vec<(Axis, Vec<String>)> = Axis::ALL
        .iter()
        .filter_map(|&axis| match orchestrator.options(axis) {
            AxisOptions::Picker { values } if !values.is_empty() => Some((axis, values)),
            _ => None,
        })
        .collect();

    (0..count)
        .map(|_| {
            let slot = rng.random_range(0..=pickers.len());
            match pickers.get(slot) {
                Some((axis, values)) => {
                    let value = values.choose(&mut rng).map(String::as_str).unwrap_or_default();
                    FilterRequest::from_axis(*axis, value).unwrap_or(FilterRequest::MinimumRating(5.0))
                }
                None => FilterRequest::MinimumRating(rng.random_range(1.0..=8.0)),
            }
        })
        .collect()
}

/// The genre line is redundant when browsing by genre, and the cast view
/// never showed it
fn shows_genre(axis: Axis) -> bool {
    matches!(axis, Axis::Rating | Axis::Language)
}

/// The "Genre:" line under a title, when shown and known
fn genre_line(movie: &MovieRecommendation, show_genre: bool) -> Option<String> {
    let genre = movie.genre.as_deref().filter(|_| show_genre)?;
    Some(format!("   Genre: {}", genre))
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[MovieRecommendation], show_genre: bool) {
    println!("{}", "Recommended Movies:".bold().blue());
    for (index, movie) in recommendations.iter().enumerate() {
        let rating = movie
            .rating
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "{}. {} - Rating: {}",
            (index + 1).to_string().green(),
            movie.title.bold(),
            rating.yellow()
        );
        if let Some(line) = genre_line(movie, show_genre) {
            println!("{}", line);
        }
        println!("   Poster: {}", movie.poster_url.dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recommendation(genre: Option<&str>) -> MovieRecommendation {
        MovieRecommendation {
            title: "Inception".to_string(),
            rating: Some(8.8),
            genre: genre.map(str::to_string),
            poster_url: "https://img/Inception.jpg".to_string(),
        }
    }

    #[test]
    fn test_genre_line_only_when_shown_and_known() {
        assert_eq!(
            genre_line(&recommendation(Some("Sci-Fi")), true).as_deref(),
            Some("   Genre: Sci-Fi")
        );
        assert_eq!(genre_line(&recommendation(Some("Sci-Fi")), false), None);
        assert_eq!(genre_line(&recommendation(None), true), None);
    }

    #[test]
    fn test_genre_shown_for_rating_and_language_views() {
        assert!(shows_genre(Axis::Rating));
        assert!(shows_genre(Axis::Language));
        assert!(!shows_genre(Axis::Genre));
        assert!(!shows_genre(Axis::Cast));
    }
}
