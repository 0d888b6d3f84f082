//! pdfscout main entry point
//!
//! Command-line interface for the PDF discovery and cataloging pipeline.

use clap::Parser;
use pdfscout::categories::CategoriesConfig;
use pdfscout::collection;
use pdfscout::config::{load_config, Config};
use pdfscout::pipeline::Pipeline;
use pdfscout::politeness::Politeness;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// pdfscout: find PDF files on the web
///
/// Discovers PDF URLs through search engines and site crawling, validates
/// each candidate, and merges the results into a JSON catalog consumed by
/// the viewer application.
#[derive(Parser, Debug)]
#[command(name = "pdfscout")]
#[command(version = "1.0.0")]
#[command(about = "Find and catalog PDF files on the web", long_about = None)]
struct Cli {
    /// Search query, or a seed URL for the website backend
    #[arg(long)]
    query: String,

    /// Comma-separated backends to use: duckduckgo, api, website
    #[arg(long, default_value = "duckduckgo")]
    methods: String,

    /// Maximum number of results per backend
    #[arg(long, default_value_t = 10)]
    limit: usize,

    /// Output JSON catalog path (overrides the config file)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Existing catalog to load and extend (defaults to the output file)
    #[arg(long)]
    existing: Option<PathBuf>,

    /// Skip partial-download verification of each PDF
    #[arg(long)]
    no_verify: bool,

    /// Path to TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to categories configuration file (overrides the config file)
    #[arg(long)]
    categories: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load configuration, falling back to built-in defaults
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(&config.output.collection_path));

    // Append mode: extend the output file itself unless an explicit
    // existing catalog was given
    let existing = match cli.existing {
        Some(path) => path,
        None => output.clone(),
    };

    let categories_path = cli
        .categories
        .unwrap_or_else(|| PathBuf::from(&config.output.categories_path));
    let categories = CategoriesConfig::load(&categories_path);

    let backend_names: Vec<String> = cli.methods.split(',').map(str::to_string).collect();

    let politeness = Arc::new(Politeness::new(&config.politeness));
    let pipeline = Pipeline::new(&config, &backend_names, categories.clone(), politeness)?;

    if pipeline.backend_count() == 0 {
        tracing::error!("No usable search backends in '{}'", cli.methods);
        anyhow::bail!("no usable search backends in '{}'", cli.methods);
    }

    let mut catalog = collection::load(&existing);
    catalog.metadata.categories = categories.descriptors();

    let new_entries = pipeline
        .run(&mut catalog, &cli.query, cli.limit, !cli.no_verify)
        .await;

    // The one failure that fails the run: not being able to write the output
    collection::persist(&mut catalog, &output)?;

    println!("Found {} new PDFs", new_entries.len());

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pdfscout=info,warn"),
            1 => EnvFilter::new("pdfscout=debug,info"),
            2 => EnvFilter::new("pdfscout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
