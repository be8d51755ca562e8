//! Price Window Sweep
//! Enumerates every product of a capped, price-filterable catalog by bisecting the price domain

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use pricesweep_cli::write_export;
use pricesweep_config::{CliConfigMerge, Settings};
use pricesweep_core::{EnumerationDriver, FilterRange, RunReport, SweepStatus};
use pricesweep_providers::CatalogClient;

/// Exit code for a run that finished with an undercount under `--strict`
const EXIT_PARTIAL: i32 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "pricesweep",
    about = "Exhaustively enumerate a capped price-window catalog",
    long_about = "
Retrieves every product from a catalog API that returns at most a fixed number of
records per query and filters only by an inclusive price range. Windows whose total
exceeds the cap are bisected until each fits in one call.

Configuration precedence: CLI flags > PRICESWEEP_* environment > pricesweep.toml > defaults.

Examples:
  pricesweep --base-url https://api.ecommerce.com/products
  pricesweep --min-price 0 --max-price 5000 --cap 1000 --output ./output/products.json
  pricesweep --config ./sweep.toml --max-concurrent 4 --strict
",
    version
)]
struct Args {
    /// Configuration file (TOML); defaults to ./pricesweep.toml when present
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Catalog endpoint
    #[arg(long)]
    base_url: Option<String>,

    /// Lowest price of the domain (inclusive)
    #[arg(long, allow_hyphen_values = true)]
    min_price: Option<i64>,

    /// Highest price of the domain (inclusive)
    #[arg(long, allow_hyphen_values = true)]
    max_price: Option<i64>,

    /// Records the catalog returns per call at most
    #[arg(long)]
    cap: Option<u64>,

    /// Ceiling on simultaneous requests
    #[arg(long)]
    max_concurrent: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Write the records and run summary as JSON
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Pretty-print the JSON export
    #[arg(long)]
    pretty: bool,

    /// Exit non-zero when some prices could not be fully enumerated
    #[arg(long)]
    strict: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

impl CliConfigMerge for Args {
    fn merge_into_config(&self, config: &mut Settings) {
        if let Some(base_url) = &self.base_url {
            config.source.base_url = base_url.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.source.request_timeout_secs = secs;
        }
        if let Some(min_price) = self.min_price {
            config.sweep.initial_min_price = min_price;
        }
        if let Some(max_price) = self.max_price {
            config.sweep.initial_max_price = max_price;
        }
        if let Some(cap) = self.cap {
            config.sweep.max_records_per_call = cap;
        }
        if let Some(max_concurrent) = self.max_concurrent {
            config.sweep.max_concurrent_requests = max_concurrent;
        }
        if let Some(output) = &self.output {
            config.export.output_path = Some(output.clone());
        }
        config.export.pretty |= self.pretty;
        config.export.strict |= self.strict;
        config.app.debug_mode |= self.debug;
    }
}

fn init_tracing(settings: &Settings) {
    let fallback = format!(
        "pricesweep={level},pricesweep_core={level},pricesweep_providers={level}",
        level = settings.app.effective_log_level()
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_report(report: &RunReport) {
    println!("\n📊 Sweep {}", report.range);
    println!("   Total reported: {}", report.total);
    println!("   Records returned: {}", report.records.len());
    println!("   Remote calls: {}", report.calls);
    println!("   Elapsed: {:.3}s", report.elapsed.as_secs_f64());

    match report.status() {
        SweepStatus::Complete => println!("✅ Complete"),
        SweepStatus::PartialUndercount { missing, residues } => {
            println!("⚠️  Partial: {missing} records missing at {residues} price(s)");
            for residue in &report.residues {
                println!(
                    "   price {}: {} of {} returned",
                    residue.price, residue.returned, residue.total
                );
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => Settings::load_from_file(path)?,
        None => Settings::load()?,
    }
    .merge_cli_args(&args);
    settings.validate()?;

    init_tracing(&settings);

    let sweep = &settings.sweep;
    let domain = FilterRange::new(sweep.initial_min_price, sweep.initial_max_price);

    println!("🚀 {}", settings.app.name);
    println!("🌐 Source: {}", settings.source.base_url);
    println!("🎯 Domain: {domain}");
    println!(
        "🔧 Cap: {} per call, {} concurrent",
        sweep.max_records_per_call, sweep.max_concurrent_requests
    );

    let client = CatalogClient::with_timeout(
        &settings.source.base_url,
        Duration::from_secs(settings.source.request_timeout_secs),
    )?;
    let driver = EnumerationDriver::new(client, sweep.max_records_per_call)
        .with_max_concurrent_requests(sweep.max_concurrent_requests);

    let report = driver.run(domain).await?;
    print_report(&report);

    if let Some(path) = &settings.export.output_path {
        write_export(path, &report, settings.export.pretty)?;
        info!(
            event_type = "export_written",
            path = %path.display(),
            records = report.records.len(),
            "Export written"
        );
        println!("💾 Written: {}", path.display());
    }

    if settings.export.strict && !report.is_complete() {
        warn!(
            event_type = "strict_partial",
            missing = report.missing(),
            "Run finished with an undercount"
        );
        std::process::exit(EXIT_PARTIAL);
    }

    Ok(())
}
