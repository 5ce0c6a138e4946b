//! Product Scout main entry point
//!
//! This is the command-line interface for the Product Scout product page discoverer.

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use product_scout::config::{load_config_with_hash, usable_domain_roots, validate, Config};
use product_scout::crawler::{crawl_domain, CrawlBudget, HttpFetcher, Transport};
use product_scout::output::{format_domain_report, print_run_summary, ResultsFile};
use product_scout::strategy::{StrategyRegistry, DEFAULT_DOMAINS};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Product Scout: an e-commerce product page discoverer
///
/// Product Scout crawls each domain root, classifies every page it fetches
/// as a product detail page or not, and saves the product URLs as JSON.
#[derive(Parser, Debug)]
#[command(name = "product-scout")]
#[command(version = "1.0.0")]
#[command(about = "An e-commerce product page discoverer", long_about = None)]
struct Cli {
    /// Domain roots to crawl (defaults to the built-in storefronts)
    #[arg(long, value_name = "URL", num_args = 1..)]
    domains: Vec<String>,

    /// Output file path for the JSON results
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Maximum URLs to process per domain
    #[arg(long, value_name = "N")]
    max_urls: Option<usize>,

    /// Number of concurrent requests per domain
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Path to TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate settings and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = load_settings(&cli)?;

    let requested: Vec<String> = if cli.domains.is_empty() {
        DEFAULT_DOMAINS.iter().map(|d| d.to_string()).collect()
    } else {
        cli.domains.clone()
    };
    let domains = usable_domain_roots(&requested).context("No valid --domains to crawl")?;

    let mut registry =
        StrategyRegistry::with_builtin_sites().context("Failed to build site profiles")?;
    for profile in config.site.iter().cloned() {
        registry
            .register(profile)
            .context("Failed to register site profile")?;
    }

    if cli.dry_run {
        handle_dry_run(&config, &domains, &registry)?;
    } else {
        handle_crawl(&config, config_hash, &domains, &registry).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("product_scout=info,warn"),
            1 => EnvFilter::new("product_scout=debug,info"),
            2 => EnvFilter::new("product_scout=trace,debug"),
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

/// Loads the optional config file and applies command-line overrides
fn load_settings(cli: &Cli) -> anyhow::Result<(Config, Option<String>)> {
    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    if let Some(output) = &cli.output {
        config.output.results_path = output.display().to_string();
    }
    if let Some(max_urls) = cli.max_urls {
        config.crawler.max_urls = max_urls;
    }
    if let Some(concurrency) = cli.concurrency {
        config.crawler.concurrency = concurrency;
    }

    validate(&config).context("Invalid settings")?;
    Ok((config, config_hash))
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(
    config: &Config,
    domains: &[String],
    registry: &StrategyRegistry,
) -> anyhow::Result<()> {
    println!("=== Product Scout Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max URLs per domain: {}", config.crawler.max_urls);
    println!("  Concurrency: {}", config.crawler.concurrency);
    println!("  Pacing delay: {}ms", config.crawler.pacing_delay_ms);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  User agent: {}", config.crawler.user_agent);

    println!("\nOutput:");
    println!("  Results: {}", config.output.results_path);

    println!("\nSite Profiles ({}):", registry.len());
    for domain in registry.domains() {
        println!("  - {}", domain);
    }

    println!("\nDomains ({}):", domains.len());
    for domain in domains {
        let strategy = registry.resolve(domain)?;
        println!("  - {} (strategy: {})", domain, strategy.name());
    }

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles the main crawl operation
///
/// Domains are crawled one after another. A failing domain is logged and
/// skipped; results are saved after every domain.
async fn handle_crawl(
    config: &Config,
    config_hash: Option<String>,
    domains: &[String],
    registry: &StrategyRegistry,
) -> anyhow::Result<()> {
    let output_path = Path::new(&config.output.results_path);
    let transport: Arc<dyn Transport> =
        Arc::new(HttpFetcher::new(&config.crawler).context("Failed to build HTTP client")?);
    let budget = CrawlBudget::from_config(&config.crawler);

    let mut results = ResultsFile::load_or_default(output_path);
    results.begin_run(domains.len(), config_hash, Utc::now());

    for domain in domains {
        tracing::info!("Starting crawl for: {}", domain);

        match crawl_domain(domain, registry, Arc::clone(&transport), budget).await {
            Ok(report) => {
                println!("{}", format_domain_report(&report));
                results.record_domain(&report, Utc::now());

                match results.save(output_path) {
                    Ok(()) => {
                        tracing::info!("Saved intermediate results to {}", output_path.display())
                    }
                    Err(e) => {
                        tracing::error!("Failed to save results to {}: {}", output_path.display(), e)
                    }
                }
            }
            Err(e) => {
                tracing::error!("Crawl of {} failed: {}", domain, e);
            }
        }
    }

    results.finish(Utc::now());
    results
        .save(output_path)
        .with_context(|| format!("Failed to save results to {}", output_path.display()))?;

    print_run_summary(&results, output_path);
    Ok(())
}
