use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use cw_core::{ArticleStore, NewsFetcher, Result};
use cw_rewrite::{DeepSeekClient, RewriteConfig, Rewriter};
use cw_sources::{DedupConfig, GnewsFetcher, NewsApiFetcher, NewsPipeline, PipelineConfig};
use cw_storage::{MemoryStore, PostgrestConfig, PostgrestStore};
use cw_web::AppState;
use tracing::{info, warn};

const DEFAULT_COUNT: usize = 10;

/// Duration written the way an operator would: `30s`, `15m`, `1h`, `1d`,
/// or combinations like `1h30m`. A bare number means seconds.
#[derive(Debug, Clone)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_value = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if let Ok(num) = current_number.parse::<u64>() {
                match c {
                    's' => total_seconds += num,
                    'm' => total_seconds += num * 60,
                    'h' => total_seconds += num * 3600,
                    'd' => total_seconds += num * 86400,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                }
                current_number.clear();
                has_value = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        if !current_number.is_empty() {
            match current_number.parse::<u64>() {
                Ok(num) => {
                    total_seconds += num;
                    has_value = true;
                }
                Err(_) => return Err("Invalid number in duration".to_string()),
            }
        }

        if !has_value {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "News ingestion and rewriting for the Cinewire site", long_about = None)]
struct Cli {
    /// Spacing between completion calls, e.g. 20s. 0s disables limiting.
    #[arg(long, default_value = "20s")]
    rewrite_interval: HumanDuration,

    /// How many recent articles feed the dedup history.
    #[arg(long, default_value_t = 100)]
    history_window: usize,

    /// Title word-overlap ratio above which two headlines are one story.
    #[arg(long, default_value_t = 0.7)]
    similarity_threshold: f64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API.
    Serve {
        #[arg(long, default_value = "0.0.0.0:3000")]
        addr: String,
    },
    /// Run one ingestion batch, optionally on a repeating interval.
    Fetch {
        #[arg(long, default_value_t = DEFAULT_COUNT)]
        count: usize,
        /// Repeat forever with this spacing (e.g. 1d for the daily run).
        #[arg(long)]
        interval: Option<HumanDuration>,
    },
}

fn build_store() -> Arc<dyn ArticleStore> {
    match (
        std::env::var("SUPABASE_URL").ok(),
        std::env::var("SUPABASE_SERVICE_KEY").ok(),
    ) {
        (Some(url), Some(key)) => {
            info!("🏦 Using PostgREST article store at {}", url);
            Arc::new(PostgrestStore::new(PostgrestConfig::new(url, key)))
        }
        _ => {
            warn!("SUPABASE_URL/SUPABASE_SERVICE_KEY not set, articles will not outlive this process");
            Arc::new(MemoryStore::new())
        }
    }
}

fn build_pipeline(cli: &Cli, store: Arc<dyn ArticleStore>) -> NewsPipeline {
    let fetchers: Vec<Arc<dyn NewsFetcher>> = vec![
        Arc::new(NewsApiFetcher::new(std::env::var("NEWSAPI_KEY").ok())),
        Arc::new(GnewsFetcher::new(std::env::var("GNEWS_API_KEY").ok())),
    ];

    let model = std::env::var("DEEPSEEK_API_KEY")
        .ok()
        .map(|key| Arc::new(DeepSeekClient::new(key)) as Arc<dyn cw_core::CompletionModel>);
    if model.is_none() {
        warn!("DEEPSEEK_API_KEY not set, articles will pass through unrewritten");
    }
    let rewriter = Rewriter::new(
        model,
        RewriteConfig {
            call_interval: cli.rewrite_interval.0,
            ..RewriteConfig::default()
        },
    );

    NewsPipeline::new(
        fetchers,
        rewriter,
        store,
        PipelineConfig {
            history_window: cli.history_window,
            dedup: DedupConfig {
                similarity_threshold: cli.similarity_threshold,
            },
        },
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let store = build_store();
    let pipeline = build_pipeline(&cli, store.clone());

    match cli.command {
        Commands::Serve { addr } => {
            let app = cw_web::create_app(AppState {
                pipeline: Arc::new(pipeline),
                store,
            });
            info!("🎬 Cinewire news API listening on {}", addr);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            axum::serve(listener, app).await.map_err(cw_core::Error::Io)?;
        }
        Commands::Fetch { count, interval } => {
            if let Some(interval) = interval {
                info!(
                    "⏰ Running batches of {} every {}s",
                    count,
                    interval.0.as_secs()
                );
                loop {
                    run_batch(&pipeline, count).await;
                    info!("Waiting {}s before next batch", interval.0.as_secs());
                    tokio::time::sleep(interval.0).await;
                }
            } else {
                run_batch(&pipeline, count).await;
            }
        }
    }

    Ok(())
}

async fn run_batch(pipeline: &NewsPipeline, count: usize) {
    match pipeline.run(count).await {
        Ok(report) => {
            for article in &report.articles {
                info!("  {} ({})", article.title, article.slug);
            }
            info!(
                "✅ Published {} articles (sources: {:?})",
                report.articles.len(),
                report.sources
            );
        }
        Err(e) => warn!(error = %e, "batch failed"),
    }
}
