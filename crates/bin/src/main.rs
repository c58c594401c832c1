//! Hobart CLI binary.
//!
//! Command-line interface for the Hobart bank metrics engine.

mod integration;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use hobart::universe::BankUniverse;
use hobart_data::{FdicClient, RawPeriodRecord};
use hobart_metrics::{MetricRow, catalog, derive_metrics};
use hobart_output::{
    ExportFormat, Exporter, MetricSnapshot, latest_date, metrics_frame, to_observations,
};
use indicatif::{ProgressBar, ProgressStyle};
use integration::cache_manager;
use integration::data_pipeline::{FetchConfig, fetch_universe_data_with_progress};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process;
use std::time::Duration as StdDuration;

/// Earliest reporting date fetched by default.
const DEFAULT_START: &str = "2000-03-31";

#[derive(Parser)]
#[command(name = "hobart")]
#[command(about = "Hobart: bank regulatory metrics from FDIC BankFind data", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch reporting periods for the bank universe into the cache
    Fetch {
        /// First reporting date (YYYY-MM-DD)
        #[arg(long, default_value = DEFAULT_START)]
        start: String,

        /// Last reporting date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        end: Option<String>,

        /// Disable caching (always fetch fresh data)
        #[arg(long)]
        no_cache: bool,

        /// Force refresh cached data
        #[arg(long)]
        refresh: bool,
    },

    /// Derive the metric table and optionally export it
    Metrics {
        /// First reporting date (YYYY-MM-DD)
        #[arg(long, default_value = DEFAULT_START)]
        start: String,

        /// Last reporting date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        end: Option<String>,

        /// Restrict to these banks (comma-separated short names)
        #[arg(long, value_delimiter = ',')]
        banks: Vec<String>,

        /// Restrict to the peer group
        #[arg(long)]
        peers: bool,

        /// Write long-form observations to this file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Export format (csv, json, or pretty-json)
        #[arg(long, default_value = "csv")]
        format: String,

        /// Disable caching (always fetch fresh data)
        #[arg(long)]
        no_cache: bool,

        /// Force refresh cached data
        #[arg(long)]
        refresh: bool,
    },

    /// Cross-bank summary of one metric at one reporting date
    Snapshot {
        /// Metric name from the catalog
        metric: String,

        /// Reporting date (YYYY-MM-DD, defaults to the latest available)
        #[arg(long)]
        date: Option<String>,

        /// Restrict to the peer group
        #[arg(long)]
        peers: bool,
    },

    /// List the tracked bank universe
    Banks {
        /// Show only the peer group
        #[arg(long)]
        peers: bool,
    },

    /// List all metrics with their definitions
    Catalog,

    /// Show or clear the local cache
    Cache {
        /// Delete all cached data
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            start,
            end,
            no_cache,
            refresh,
        } => {
            let (start, end) = parse_range(&start, end.as_deref())?;
            let config = FetchConfig {
                use_cache: !no_cache,
                force_refresh: refresh,
            };
            let raw = fetch_universe(start, end, config).await?;
            let periods: usize = raw.values().map(Vec::len).sum();
            println!("\nFetched {} banks, {} reporting periods", raw.len(), periods);
            cache_manager::print_cache_info();
        }
        Commands::Metrics {
            start,
            end,
            banks,
            peers,
            output,
            format,
            no_cache,
            refresh,
        } => {
            let (start, end) = parse_range(&start, end.as_deref())?;
            let config = FetchConfig {
                use_cache: !no_cache,
                force_refresh: refresh,
            };
            let mut raw = fetch_universe(start, end, config).await?;
            restrict_banks(&mut raw, &banks, peers)?;

            let rows = derive_metrics(&raw);
            if rows.is_empty() {
                return Err("no reporting periods in range".into());
            }
            print_metrics(&rows, output.as_deref(), &format)?;
        }
        Commands::Snapshot {
            metric,
            date,
            peers,
        } => {
            let date = date.as_deref().map(parse_date).transpose()?;
            snapshot(&metric, date, peers).await?;
        }
        Commands::Banks { peers } => {
            list_banks(peers);
        }
        Commands::Catalog => {
            list_catalog();
        }
        Commands::Cache { clear } => {
            if clear {
                let cache = cache_manager::open_cache()?;
                cache.clear()?;
                println!("Cache cleared");
            } else {
                cache_manager::print_cache_info();
            }
        }
    }

    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("invalid date {:?} (expected YYYY-MM-DD): {}", s, e).into())
}

fn parse_range(
    start: &str,
    end: Option<&str>,
) -> Result<(NaiveDate, NaiveDate), Box<dyn std::error::Error>> {
    let start = parse_date(start)?;
    let end = match end {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };
    Ok((start, end))
}

async fn fetch_universe(
    start: NaiveDate,
    end: NaiveDate,
    config: FetchConfig,
) -> Result<BTreeMap<String, Vec<RawPeriodRecord>>, Box<dyn std::error::Error>> {
    let universe = BankUniverse::new();
    let client = FdicClient::new()?;

    if config.use_cache {
        cache_manager::print_cache_info();
        if config.force_refresh {
            println!("  Mode: Force refresh (re-fetching all data)");
        }
    } else {
        println!("  Cache: Disabled");
    }

    let pb = ProgressBar::new(universe.banks().len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid template")
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(StdDuration::from_millis(100));
    pb.set_message("Fetching universe data...");

    let raw =
        fetch_universe_data_with_progress(&client, &universe, start, end, config, Some(&pb))
            .await?;
    pb.finish_with_message(format!("Loaded {} banks", raw.len()));

    Ok(raw)
}

fn restrict_banks(
    raw: &mut BTreeMap<String, Vec<RawPeriodRecord>>,
    banks: &[String],
    peers: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if peers {
        let universe = BankUniverse::new();
        let peer_names: Vec<String> = universe
            .peers()
            .into_iter()
            .map(|b| b.short_name.clone())
            .collect();
        raw.retain(|name, _| peer_names.contains(name));
    }

    if !banks.is_empty() {
        for bank in banks {
            if !raw.contains_key(bank) {
                return Err(format!("unknown or unfetched bank: {}", bank).into());
            }
        }
        raw.retain(|name, _| banks.contains(name));
    }

    Ok(())
}

fn print_metrics(
    rows: &[MetricRow],
    output: Option<&std::path::Path>,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let df = metrics_frame(rows)?;
    println!(
        "\nDerived {} metrics for {} rows ({} columns)",
        catalog::all_metrics().len(),
        df.height(),
        df.width()
    );
    println!("{}", df.head(Some(10)));

    if let Some(path) = output {
        let format: ExportFormat = format.parse()?;
        let observations = to_observations(rows);
        observations.export_to_file(path, format)?;
        println!(
            "Wrote {} observations to {}",
            observations.len(),
            path.display()
        );
    }

    Ok(())
}

async fn snapshot(
    metric: &str,
    date: Option<NaiveDate>,
    peers: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if catalog::get_metric_info(metric).is_none() {
        return Err(format!(
            "unknown metric {:?} (see `hobart catalog` for the full list)",
            metric
        )
        .into());
    }

    let (start, end) = parse_range(DEFAULT_START, None)?;
    let mut raw = fetch_universe(start, end, FetchConfig::default()).await?;
    restrict_banks(&mut raw, &[], peers)?;

    let rows = derive_metrics(&raw);
    let date = match date.or_else(|| latest_date(&rows)) {
        Some(d) => d,
        None => return Err("no reporting periods available".into()),
    };

    match MetricSnapshot::new(&rows, metric, date) {
        Some(snapshot) => print!("{}", snapshot.to_ascii_table()),
        None => println!("No bank has a defined value for {} at {}", metric, date),
    }

    Ok(())
}

fn list_banks(peers: bool) {
    let universe = BankUniverse::new();

    if peers {
        println!("Peer group ({} banks):\n", universe.peers().len());
        for bank in universe.peers() {
            println!("  {:>6}  {:<20} {}", bank.cert, bank.short_name, bank.name);
        }
    } else {
        println!("Bank universe ({} banks):\n", universe.banks().len());
        for bank in universe.banks() {
            println!("  {:>6}  {:<30} {}", bank.cert, bank.short_name, bank.name);
        }
    }
}

fn list_catalog() {
    println!("Metric catalog ({} metrics):\n", catalog::all_metrics().len());

    for metric in catalog::all_metrics() {
        let tag = match metric.format {
            hobart_metrics::MetricFormat::Dollar => "$",
            hobart_metrics::MetricFormat::Ratio => "%",
        };
        println!("  [{}] {}", tag, metric.name);
        println!("      {}", metric.definition);
    }
}
