//! Partner-Scout main entry point
//!
//! This is the command-line interface for the Partner-Scout contact harvester.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use partner_scout::config::{load_config_with_hash, Config};
use partner_scout::records::{
    export_spreadsheet, print_statistics, read_table, write_table, RecordTable, DEFAULT_HEADER,
};
use partner_scout::scrape::{BatchOutcome, BatchRunner, ListingCollector};
use partner_scout::open_page;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Partner-Scout: partner directory contact harvester
///
/// Visits partner profile pages on directory sites, extracts each partner's
/// website and contact email, and writes the results to CSV or a styled
/// spreadsheet.
#[derive(Parser, Debug)]
#[command(name = "partner-scout")]
#[command(version = "1.0.0")]
#[command(about = "A partner directory contact harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, global = true, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fill in missing or wrong websites and emails in an existing CSV
    Enrich {
        /// CSV with name and profile URL columns (website and email optional)
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the updated CSV
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Collect partners from the configured listing and scrape every profile
    Collect {
        /// Where to write the collected CSV
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Convert a CSV into a styled spreadsheet
    Export {
        /// CSV file to convert
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the .xlsx workbook
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Validate the configuration and show what would run
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration given, using built-in defaults");
            Config::default()
        }
    };

    match cli.command {
        Command::Enrich { input, output } => handle_enrich(&config, &input, &output).await,
        Command::Collect { output } => handle_collect(&config, &output).await,
        Command::Export { input, output } => handle_export(&config, &input, &output),
        Command::Check => handle_check(&config),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("partner_scout=info,warn"),
            1 => EnvFilter::new("partner_scout=debug,info"),
            2 => EnvFilter::new("partner_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles `enrich`: re-scrapes rows whose website or email looks absent or wrong
async fn handle_enrich(config: &Config, input: &Path, output: &Path) -> anyhow::Result<()> {
    let table = read_table(input)
        .with_context(|| format!("Failed to read input CSV {}", input.display()))?;
    tracing::info!("Loaded {} rows from {}", table.records.len(), input.display());

    let mut page = open_page(&config.browser).await?;
    let runner = BatchRunner::from_config(config);
    let outcome = runner.enrich(page.as_mut(), table.records).await;
    page.close().await?;

    finish(table.header, outcome, output)
}

/// Handles `collect`: paginates the listing, then scrapes every partner found
async fn handle_collect(config: &Config, output: &Path) -> anyhow::Result<()> {
    let listing = match &config.listing {
        Some(listing) => listing.clone(),
        None => bail!("The collect command needs a [listing] section in the configuration"),
    };

    let mut page = open_page(&config.browser).await?;
    let mut listing_failures = Vec::new();
    let partners = ListingCollector::new(listing)
        .collect(page.as_mut(), &mut listing_failures)
        .await;

    tracing::info!("Collected {} partner profiles", partners.len());
    if partners.is_empty() {
        page.close().await?;
        bail!("No partners collected");
    }

    let runner = BatchRunner::from_config(config);
    let mut outcome = runner.scrape_all(page.as_mut(), partners).await;
    page.close().await?;
    listing_failures.append(&mut outcome.failures);
    outcome.failures = listing_failures;

    let header = DEFAULT_HEADER.iter().map(|title| title.to_string()).collect();
    finish(header, outcome, output)
}

/// Writes the output CSV and reports the run
fn finish(header: Vec<String>, outcome: BatchOutcome, output: &Path) -> anyhow::Result<()> {
    let BatchOutcome {
        records,
        failures,
        stats,
    } = outcome;

    write_table(output, &RecordTable { header, records })
        .with_context(|| format!("Failed to write output CSV {}", output.display()))?;

    if !failures.is_empty() {
        tracing::warn!("{} pages could not be scraped:", failures.len());
        for failure in &failures {
            tracing::warn!("  {}: {}", failure.url, failure.message);
        }
    }

    println!("\n✓ Results saved to: {}", output.display());
    print_statistics(&stats);
    Ok(())
}

/// Handles `export`: converts a CSV into a styled spreadsheet
fn handle_export(config: &Config, input: &Path, output: &Path) -> anyhow::Result<()> {
    let rows = export_spreadsheet(input, output, &config.spreadsheet).with_context(|| {
        format!(
            "Failed to convert {} to {}",
            input.display(),
            output.display()
        )
    })?;

    println!(
        "✓ Excel file created successfully: {} ({} rows)",
        output.display(),
        rows
    );
    Ok(())
}

/// Handles `check`: shows the effective configuration
fn handle_check(config: &Config) -> anyhow::Result<()> {
    println!("=== Partner-Scout Configuration ===\n");

    println!("Browser:");
    println!("  Engine: {:?}", config.browser.engine);
    if let Some(path) = &config.browser.chrome_path {
        println!("  Chrome binary: {}", path.display());
    }
    println!("  User agent: {}", config.browser.user_agent);
    println!(
        "  Navigation timeout: {}ms",
        config.browser.navigation_timeout_ms
    );
    println!("  Settle delay: {}ms", config.browser.settle_delay_ms);

    println!("\nPacing:");
    println!("  Request delay: {}ms", config.pacing.request_delay_ms);
    println!(
        "  Attempts per URL: {} ({}ms apart)",
        config.pacing.max_attempts, config.pacing.retry_delay_ms
    );

    println!("\nExtraction:");
    println!("  Email deny-list: {}", config.extraction.email_deny.join(", "));
    println!(
        "  Excluded links: {}",
        config.extraction.link_exclude.join(", ")
    );
    println!(
        "  Document markers: {}",
        config.extraction.document_markers.join(", ")
    );
    println!(
        "  Priority keywords: {}",
        config.extraction.priority_keywords.join(", ")
    );

    println!("\nRe-scrape websites containing:");
    for marker in &config.rescrape.bad_website_markers {
        println!("  - {}", marker);
    }

    match &config.listing {
        Some(listing) => {
            println!("\nListing:");
            println!(
                "  Pages {}..={}: {}",
                listing.first_page,
                listing.last_page,
                listing.page_url(listing.first_page)
            );
            println!("  Card selector: {}", listing.card_selector);
        }
        None => println!("\nListing: not configured (collect unavailable)"),
    }

    println!("\n✓ Configuration is valid");
    Ok(())
}
