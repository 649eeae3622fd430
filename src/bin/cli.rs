//! newsfeed CLI
//!
//! Local execution entry point. For AWS Lambda, use `newsfeed-lambda`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use newsfeed::{
    config,
    error::{AppError, Result},
    models::{ApiKey, Category, QueryParams},
    pipeline::{FetchResult, NewsFeed},
    services::HeadlineFetcher,
};

/// newsfeed - Top headlines at the terminal
#[derive(Parser, Debug)]
#[command(
    name = "newsfeed",
    version,
    about = "Fetch top headlines and filter them locally"
)]
struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "newsfeed.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the current top headlines
    Fetch {
        /// Headline topic
        #[arg(long, value_enum, default_value_t = Category::General)]
        category: Category,

        /// Two-letter country code (default from config)
        #[arg(long)]
        country: Option<String>,

        /// Maximum number of articles (default from config)
        #[arg(long)]
        max: Option<u32>,

        /// Show only articles whose title, description, or content
        /// contains this text
        #[arg(long)]
        search: Option<String>,

        /// Print raw JSON instead of formatted headlines
        #[arg(long)]
        json: bool,
    },

    /// List the available categories
    Categories,

    /// Validate configuration files and credentials
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Fetch {
            category,
            country,
            max,
            search,
            json,
        } => {
            let (config, api_key) = config::load_all(&cli.config)?;

            let params = QueryParams {
                category,
                country: country.unwrap_or_else(|| config.upstream.country.clone()),
                max_results: max.unwrap_or(config.upstream.max_results),
                cache_bust: None,
            };

            log::info!(
                "Fetching {} headlines for {}...",
                params.category,
                params.country
            );

            let fetcher = HeadlineFetcher::new(config, api_key)?;
            let mut feed = NewsFeed::new(Arc::new(fetcher), params);
            if let Some(term) = search {
                feed.set_search(term);
            }

            feed.refresh();
            feed.settled().await;

            match feed.result() {
                FetchResult::Success(_) => {
                    let visible = feed.visible_articles();
                    if json {
                        println!("{}", serde_json::to_string_pretty(&visible)?);
                    } else if visible.is_empty() {
                        println!("No matching articles found");
                    } else {
                        for (n, article) in visible.iter().enumerate() {
                            println!("{}. {}", n + 1, article.title);
                            let source = &article.source.name;
                            if !source.is_empty() {
                                match &article.published_at {
                                    Some(ts) => println!(
                                        "   {} | {}",
                                        source,
                                        ts.format("%Y-%m-%d %H:%M")
                                    ),
                                    None => println!("   {source}"),
                                }
                            }
                            if let Some(description) = &article.description {
                                println!("   {description}");
                            }
                            if !article.url.is_empty() {
                                println!("   {}", article.url);
                            }
                            println!();
                        }
                    }
                }
                FetchResult::Failure(message) => {
                    log::error!("Error loading news: {message}");
                    return Err(AppError::fetch(message));
                }
                FetchResult::Loading => unreachable!("fetch settled"),
            }
        }

        Command::Categories => {
            for category in Category::ALL {
                println!("{category}");
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            let config = config::load_config(&cli.config);
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK (upstream endpoint and HTTP settings)");

            match ApiKey::from_env() {
                Ok(_) => log::info!("✓ API key present"),
                Err(e) => {
                    log::error!("API key check failed: {}", e);
                    return Err(e);
                }
            }

            log::info!("All validations passed!");
        }
    }

    Ok(())
}
