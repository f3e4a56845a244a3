use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newscrawl::aggregator::Aggregator;
use newscrawl::config::Config;
use newscrawl::crawler::Session;
use newscrawl::tools::server::StdioServer;
use newscrawl::tools::{self, ToolRouter};

#[derive(Parser)]
#[command(
    name = "newscrawl",
    version,
    about = "News article extraction, feed discovery and cross-feed search",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML configuration file (defaults to NEWSCRAWL_* environment variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides the configured format
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the tools over line-delimited JSON-RPC on stdin/stdout
    Serve,

    /// Extract a single article
    Crawl {
        /// Article URL
        url: String,

        /// Language of the article
        #[arg(short, long, default_value = "en")]
        language: String,
    },

    /// Extract several articles in order
    Batch {
        /// Article URLs
        #[arg(required = true)]
        urls: Vec<String>,

        /// Language of the articles
        #[arg(short, long, default_value = "en")]
        language: String,
    },

    /// Extract the first articles of an RSS/Atom feed
    Discover {
        /// Feed URL
        rss_url: String,

        /// Maximum number of articles to extract
        #[arg(short, long, default_value = "10")]
        max_articles: usize,
    },

    /// Search feeds for articles mentioning a query
    Search {
        /// Case-insensitive search text
        query: String,

        /// Feed URL to search (repeatable); the configured defaults when omitted
        #[arg(short, long = "feed")]
        feeds: Vec<String>,

        /// Maximum number of results to return
        #[arg(short, long, default_value = "5")]
        max_results: usize,
    },

    /// Summarize a single article
    Summary {
        /// Article URL
        url: String,

        /// Number of sentences for the fallback summary
        #[arg(short = 'n', long, default_value = "5", allow_negative_numbers = true)]
        summary_length: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;

    // Initialize tracing/logging
    let log_format = cli.log_format.as_deref().unwrap_or(&config.logging.format);
    setup_tracing(log_format, &config.logging.level, cli.verbose)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "newscrawl starting");

    if let Err(e) = newscrawl::metrics::init_metrics() {
        tracing::warn!(error = %e, "Metrics disabled");
    }

    let session = Session::open(&config)?;
    let router = ToolRouter::new(Aggregator::with_session(session.clone(), &config));

    let result = run(cli.command, router).await;

    session.close();

    if let Ok(text) = newscrawl::metrics::gather_metrics() {
        tracing::debug!(metrics = %text, "Final metrics");
    }

    result
}

async fn run(command: Commands, router: ToolRouter) -> Result<()> {
    let (tool, arguments) = match command {
        Commands::Serve => return serve(router).await,
        Commands::Crawl { url, language } => {
            (tools::CRAWL_NEWS_ARTICLE, json!({"url": url, "language": language}))
        }
        Commands::Batch { urls, language } => (
            tools::EXTRACT_MULTIPLE_NEWS_ARTICLES,
            json!({"urls": urls, "language": language}),
        ),
        Commands::Discover {
            rss_url,
            max_articles,
        } => (
            tools::DISCOVER_NEWS_FROM_RSS,
            json!({"rss_url": rss_url, "max_articles": max_articles}),
        ),
        Commands::Search {
            query,
            feeds,
            max_results,
        } => {
            let mut arguments = json!({"query": query, "max_results": max_results});
            if !feeds.is_empty() {
                arguments["rss_feeds"] = json!(feeds);
            }
            (tools::SEARCH_AND_EXTRACT_NEWS, arguments)
        }
        Commands::Summary {
            url,
            summary_length,
        } => (
            tools::GET_NEWS_SUMMARY,
            json!({"url": url, "summary_length": summary_length}),
        ),
    };

    tracing::info!(tool = %tool, "Running one-shot command");
    let payload = router.call_tool(tool, arguments).await;
    println!("{payload}");

    Ok(())
}

async fn serve(router: ToolRouter) -> Result<()> {
    let server = StdioServer::new(router);
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    tokio::select! {
        result = server.serve(stdin, stdout) => {
            result.context("Tool server I/O failed")?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted, shutting down");
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Config::from_env().context("Failed to load config from environment"),
    }
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("newscrawl=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("newscrawl={level},warn"))
            .context("Invalid log level")?
    };

    // stdout carries tool payloads; logs go to stderr
    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }

    Ok(())
}
