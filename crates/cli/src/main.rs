use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{Catalog, LiquorRecord, RecordId};
use pipeline::{execute, QueryParams};
use recommender::BarEntry;
use server::{BottleRecommendation, RecommendationOrchestrator};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

const BENCH_CATEGORIES: [&str; 6] = ["whiskey", "vodka", "gin", "rum", "tequila", "scotch"];

/// Liquor catalog - query and recommend from the bottle dataset
#[derive(Parser)]
#[command(name = "liquor-catalog")]
#[command(about = "Query the liquor catalog and get bottle recommendations", long_about = None)]
struct Cli {
    /// Path to the catalog CSV
    #[arg(short, long, global = true, default_value = "data/liquors.csv")]
    data_path: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter, sort and page through the catalog
    Query {
        /// Case-insensitive substring of the name or brand
        #[arg(long)]
        name_contains: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        price_min: Option<String>,

        #[arg(long)]
        price_max: Option<String>,

        #[arg(long)]
        abv_min: Option<String>,

        #[arg(long)]
        abv_max: Option<String>,

        /// `<id|name|price|abv>:<asc|desc>`
        #[arg(long)]
        sort: Option<String>,

        #[arg(long)]
        limit: Option<String>,

        #[arg(long)]
        offset: Option<String>,
    },

    /// Show one record
    Show {
        #[arg(long)]
        id: RecordId,
    },

    /// Show catalog statistics and the load report
    Stats,

    /// Recommend bottles from one or more bar files (JSON)
    ///
    /// One file gives personal recommendations; several give room
    /// recommendations, with each username taken from the file name.
    Recommend {
        #[arg(long = "bar", required = true)]
        bars: Vec<PathBuf>,

        /// Show the reason for each recommendation
        #[arg(long)]
        explain: bool,
    },

    /// Run random queries concurrently and report latency
    Benchmark {
        /// Number of queries to run
        #[arg(long, default_value = "1000")]
        requests: usize,

        /// Number of concurrent queries
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

    println!("Loading catalog from {}...", cli.data_path.display());
    let start = Instant::now();
    let catalog = Arc::new(
        Catalog::load_from_file(&cli.data_path)
            .with_context(|| format!("Failed to load catalog from {}", cli.data_path.display()))?,
    );
    println!(
        "{} Loaded {} records in {:?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );

    match cli.command {
        Commands::Query {
            name_contains,
            category,
            price_min,
            price_max,
            abv_min,
            abv_max,
            sort,
            limit,
            offset,
        } => {
            let pairs = [
                ("name_contains", name_contains),
                ("category", category),
                ("price_min", price_min),
                ("price_max", price_max),
                ("abv_min", abv_min),
                ("abv_max", abv_max),
                ("sort", sort),
                ("limit", limit),
                ("offset", offset),
            ];
            let pairs = pairs
                .into_iter()
                .filter_map(|(key, value)| value.map(|v| (key, v)));
            handle_query(&catalog, pairs)?
        }
        Commands::Show { id } => handle_show(&catalog, id)?,
        Commands::Stats => handle_stats(&catalog),
        Commands::Recommend { bars, explain } => handle_recommend(catalog, &bars, explain).await?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(catalog, requests, concurrent).await?,
    }

    Ok(())
}

/// Handle the 'query' command
fn handle_query<I>(catalog: &Catalog, pairs: I) -> Result<()>
where
    I: IntoIterator<Item = (&'static str, String)>,
{
    let params = QueryParams::from_pairs(pairs).context("Invalid query")?;
    let page = execute(catalog, &params)?;

    println!(
        "{}",
        format!(
            "{} of {} matching records (offset {}):",
            page.records.len(),
            page.total_matched,
            params.offset
        )
        .bold()
        .blue()
    );
    for record in page.records {
        print_record_line(record);
    }
    Ok(())
}

/// Handle the 'show' command
fn handle_show(catalog: &Catalog, id: RecordId) -> Result<()> {
    let record = catalog
        .get(id)
        .ok_or_else(|| anyhow!("Record {} not found", id))?;

    println!("{}", format!("{} (#{})", record.name, record.id).bold().blue());
    let fields = [
        ("Brand", record.brand.clone()),
        ("Category", record.category.clone()),
        ("Price", record.price.map(|p| format!("${:.2}", p))),
        ("Fair price", record.fair_price.map(|p| format!("${:.2}", p))),
        ("ABV", record.effective_abv().map(|a| format!("{:.1}%", a))),
        ("Size", record.size.clone()),
        ("Origin", record.origin.clone()),
        ("Ranking", record.ranking.map(|r| r.to_string())),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("{}{}: {}", "• ".green(), label, value);
        }
    }
    for (key, value) in &record.extra {
        println!("{}{}: {}", "• ".cyan(), key, value);
    }
    Ok(())
}

/// Handle the 'stats' command
fn handle_stats(catalog: &Catalog) {
    let stats = catalog.stats();
    let report = catalog.load_report();

    println!("{}", "Catalog statistics:".bold().blue());
    println!("{}Records: {}", "• ".green(), stats.record_count);
    println!(
        "{}Rows read: {}, loaded: {}, skipped: {}",
        "• ".green(),
        report.rows_read,
        report.rows_loaded,
        report.rows_skipped()
    );
    if let (Some(min), Some(max), Some(mean)) = (stats.min_price, stats.max_price, stats.mean_price) {
        println!(
            "{}Prices ({} priced): ${:.2} - ${:.2}, mean ${:.2}",
            "• ".green(),
            stats.priced_count,
            min,
            max,
            mean
        );
    }

    println!("Categories:");
    for (category, count) in &stats.category_counts {
        println!("  - {}: {}", category, count);
    }
    if stats.uncategorized > 0 {
        println!("  - (none): {}", stats.uncategorized);
    }

    for skipped in report.skipped.iter().take(10) {
        println!("{}line {}: {}", "! ".yellow(), skipped.line, skipped.reason);
    }
}

/// Handle the 'recommend' command
async fn handle_recommend(catalog: Arc<Catalog>, bars: &[PathBuf], explain: bool) -> Result<()> {
    let mut members = Vec::with_capacity(bars.len());
    for path in bars {
        members.push((username_for(path), read_bar(path)?));
    }

    let orchestrator = RecommendationOrchestrator::new(catalog);

    if members.len() == 1 {
        let (username, bar) = members.remove(0);
        let result = orchestrator.recommend_personal(username, bar).await?;
        println!(
            "{}",
            format!("Recommendations for {}:", result.username).bold().blue()
        );
        print_recommendations(&result.recommendations, explain);
    } else {
        let result = orchestrator.recommend_room(members).await?;
        println!(
            "{}",
            format!("Recommendations for {}:", result.members.join(", ")).bold().blue()
        );
        print_recommendations(&result.recommendations, explain);
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(catalog: Arc<Catalog>, requests: usize, concurrent: usize) -> Result<()> {
    if requests == 0 {
        return Err(anyhow!("--requests must be at least 1"));
    }
    let concurrent = concurrent.max(1);

    let params: Vec<QueryParams> = (0..requests).map(|_| random_params()).collect();

    let started = Instant::now();
    let mut timings: Vec<Duration> = Vec::with_capacity(requests);
    let mut matched = 0usize;

    for batch in params.chunks(concurrent) {
        let mut handles = Vec::with_capacity(batch.len());
        for params in batch.iter().cloned() {
            let catalog = catalog.clone();
            handles.push(tokio::spawn(async move {
                let start = Instant::now();
                let page = execute(&catalog, &params)?;
                Ok::<_, anyhow::Error>((start.elapsed(), page.total_matched))
            }));
        }
        for handle in handles {
            let (elapsed, total) = handle.await??;
            timings.push(elapsed);
            matched += total;
        }
    }
    let wall_time = started.elapsed();
    debug!("Benchmark matched {} records in total", matched);

    let latency = LatencySummary::from_timings(&mut timings)
        .ok_or_else(|| anyhow!("No queries completed"))?;
    let throughput = requests as f32 / wall_time.as_secs_f32();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Queries: {} ({} concurrent)", requests, concurrent);
    println!("Wall time: {:?}", wall_time);
    println!("Average latency: {:?}", latency.mean);
    println!("P50 latency: {:?}", latency.p50);
    println!("P95 latency: {:?}", latency.p95);
    println!("P99 latency: {:?}", latency.p99);
    println!("Throughput: {:.2} queries/second", throughput);

    Ok(())
}

/// Mean and percentile latencies of a benchmark run
#[derive(Debug, PartialEq)]
struct LatencySummary {
    mean: Duration,
    p50: Duration,
    p95: Duration,
    p99: Duration,
}

impl LatencySummary {
    /// Sorts `timings` in place. `None` when there are no timings.
    fn from_timings(timings: &mut [Duration]) -> Option<Self> {
        if timings.is_empty() {
            return None;
        }
        timings.sort();

        let total: Duration = timings.iter().sum();
        let percentile = |p: f64| {
            let idx = ((timings.len() as f64 * p) as usize).min(timings.len() - 1);
            timings[idx]
        };

        Some(Self {
            mean: total.div_f64(timings.len() as f64),
            p50: percentile(0.50),
            p95: percentile(0.95),
            p99: percentile(0.99),
        })
    }
}

/// A random mix of category, price and paging options
fn random_params() -> QueryParams {
    let mut params = QueryParams::default();
    if rand::random::<bool>() {
        let category = BENCH_CATEGORIES[rand::random::<u32>() as usize % BENCH_CATEGORIES.len()];
        params = params.with_category(category);
    }
    if rand::random::<bool>() {
        let min = (rand::random::<u32>() % 50) as f64;
        params = params.with_price_range(Some(min), Some(min + 50.0));
    }
    params.with_limit(20).with_offset(rand::random::<u32>() as usize % 5)
}

fn username_for(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "guest".to_string())
}

fn read_bar(path: &Path) -> Result<Vec<BarEntry>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read bar file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid bar file {}", path.display()))
}

fn print_record_line(record: &LiquorRecord) {
    let price = record
        .price
        .map(|p| format!("${:.2}", p))
        .unwrap_or_else(|| "-".to_string());
    let abv = record
        .effective_abv()
        .map(|a| format!("{:.1}%", a))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{:>5}  {} [{}] {} {}",
        record.id.to_string().green(),
        record.name,
        record.category.as_deref().unwrap_or("-"),
        price,
        abv
    );
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[BottleRecommendation], explain: bool) {
    for (rank, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} [{}] - Score: {}",
            (rank + 1).to_string().green(),
            rec.name,
            rec.category.as_deref().unwrap_or("-"),
            rec.score
        );
        if let Some(member) = &rec.influenced_by {
            println!("   Influenced by: {}", member.cyan());
        }
        if explain {
            println!("   {}", rec.reason);
        }
    }
}
