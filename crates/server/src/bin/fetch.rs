//! Fetch worker.
//!
//! Queries the place-search provider for one location and search term and
//! writes the top results to the artifact path in `NEARBY_OUTPUT`:
//!
//! ```text
//! nearby-fetch <latitude> <longitude> [category]
//! ```
//!
//! Exits non-zero with a diagnostic on stderr when anything goes wrong.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::debug;

use nearby_core::provider::ProviderConfig;
use nearby_core::worker::OUTPUT_ENV;
use nearby_core::{write_result_atomically, Category, FetchRequest, SerpApiClient};

const USAGE: &str = "Usage: nearby-fetch <latitude> <longitude> [category]";

/// Artifact path used when `NEARBY_OUTPUT` is unset.
const DEFAULT_OUTPUT: &str = "result.json";

#[tokio::main]
async fn main() {
    // stderr is the diagnostic channel; keep it quiet unless asked
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let request = parse_args(&args)?;

    let config = ProviderConfig::from_env();
    if config.api_key.trim().is_empty() {
        bail!("{} not found in environment variables.", config.api_key_env);
    }

    let output = std::env::var(OUTPUT_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT));
    debug!("Writing results to {:?}", output);

    let client = SerpApiClient::new(config).context("Failed to create provider client")?;
    let result = client
        .search(&request)
        .await
        .with_context(|| format!("Search for {} failed", request.category()))?;

    write_result_atomically(&output, &result)
        .await
        .with_context(|| format!("Failed to write {:?}", output))?;

    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| output.display().to_string());
    println!("[INFO] {} saved with {} results.", name, result.len());
    Ok(())
}

/// Parses `<latitude> <longitude> [category]`.
fn parse_args(args: &[String]) -> Result<FetchRequest> {
    if args.len() < 2 {
        bail!(USAGE);
    }

    let latitude: f64 = args[0]
        .trim()
        .parse()
        .with_context(|| format!("Invalid latitude: {:?}", args[0]))?;
    let longitude: f64 = args[1]
        .trim()
        .parse()
        .with_context(|| format!("Invalid longitude: {:?}", args[1]))?;

    let category = match args.get(2) {
        Some(term) => Category::new(term)?,
        None => Category::restaurant(),
    };

    Ok(FetchRequest::new(latitude, longitude, category)?)
}
