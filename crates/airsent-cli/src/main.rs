//! airsent CLI: serve the dashboard and inspect its data from the terminal.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use airsent::server::{serve_context, ServerConfig};
use airsent::{read_reviews, DashboardConfig, DashboardContext, SentimentModel};

#[derive(Parser)]
#[command(
    name = "airsent",
    about = "airsent: sentiment dashboard for Airbnb reviews",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web dashboard server
    Serve {
        /// Project root holding the Dataset/, Models/ and Images/ directories
        #[arg(default_value = ".")]
        root: PathBuf,
        /// YAML file overriding the default file locations
        #[arg(long, short)]
        config: Option<PathBuf>,
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to bind to
        #[arg(long, short, default_value_t = 8050)]
        port: u16,
        /// Also write logs to a daily rolling file in this directory
        #[arg(long)]
        log_dir: Option<PathBuf>,
    },
    /// Print the dashboard indicators for the cleaned dataset
    Summary {
        /// Project root
        #[arg(default_value = ".")]
        root: PathBuf,
        /// YAML file overriding the default file locations
        #[arg(long, short)]
        config: Option<PathBuf>,
    },
    /// Classify a piece of text with the sentiment model
    Predict {
        /// Review text to classify
        text: String,
        /// Project root
        #[arg(long, short, default_value = ".")]
        root: PathBuf,
        /// YAML file overriding the default file locations
        #[arg(long, short)]
        config: Option<PathBuf>,
    },
    /// List the reviews submitted through the dashboard
    Reviews {
        /// Project root
        #[arg(default_value = ".")]
        root: PathBuf,
        /// YAML file overriding the default file locations
        #[arg(long, short)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_dir = match &cli.command {
        Commands::Serve { log_dir, .. } => log_dir.clone(),
        _ => None,
    };
    // Dropping the guard flushes the file writer, so it lives until main returns.
    let _guard = init_tracing(log_dir.as_deref());

    match cli.command {
        Commands::Serve {
            root,
            config,
            host,
            port,
            log_dir: _,
        } => {
            cmd_serve(root, config, host, port).await?;
        }
        Commands::Summary { root, config } => {
            cmd_summary(&root, config.as_deref())?;
        }
        Commands::Predict { text, root, config } => {
            cmd_predict(&root, config.as_deref(), &text)?;
        }
        Commands::Reviews { root, config } => {
            cmd_reviews(&root, config.as_deref())?;
        }
    }

    Ok(())
}

fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact();

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "airsent.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer);
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .with(file)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .init();
            None
        }
    }
}

// ─── Command implementations ──────────────────────────────────────────────────

async fn cmd_serve(root: PathBuf, config: Option<PathBuf>, host: String, port: u16) -> Result<()> {
    let server = ServerConfig {
        root_dir: root,
        config_file: config,
        host,
        port,
    };
    let ctx = load_context(&server.dashboard_config()?)?;

    println!("🏠 Airsent Dashboard");
    println!("   Root:    {}", server.root_dir.display());
    println!("   Reviews: {}", ctx.summary().total_reviews);
    println!("   URL:     http://{}:{}", server.host, server.port);
    println!();

    serve_context(ctx, &server).await?;
    Ok(())
}

fn cmd_summary(root: &Path, config: Option<&Path>) -> Result<()> {
    let ctx = load_context(&DashboardConfig::for_root(root, config)?)?;
    let summary = ctx.summary();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(["Indicator", "Value"]);
    table.add_row(["Total Reviews", &summary.total_reviews.to_string()]);
    table.add_row(["Unique Reviewers", &summary.unique_reviewers.to_string()]);
    table.add_row([
        "Reviews per Reviewer",
        &format!("{:.2}", summary.reviews_per_reviewer),
    ]);
    table.add_row(["Positive", &format!("{:.2}%", summary.positive_pct)]);
    table.add_row(["Negative", &format!("{:.2}%", summary.negative_pct)]);
    table.add_row(["Neutral", &format!("{:.2}%", summary.neutral_pct)]);
    println!("{}", table);

    let mut reviewers = Table::new();
    reviewers.load_preset(UTF8_FULL);
    reviewers.set_header(["Top Reviewer", "Reviews"]);
    for (name, count) in ctx.dataset().reviewer_counts().into_iter().take(5) {
        reviewers.add_row([name, count.to_string()]);
    }
    println!("{}", reviewers);

    Ok(())
}

fn cmd_predict(root: &Path, config: Option<&Path>, text: &str) -> Result<()> {
    let config = DashboardConfig::for_root(root, config)?;
    let model = SentimentModel::load(&config.vectorizer, &config.classifier)?;
    let prediction = model.predict_detailed(text);

    println!("Sentiment: {}", prediction.sentiment);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(["Class", "Probability"]);
    for (sentiment, p) in &prediction.probabilities {
        table.add_row([sentiment.label().to_string(), format!("{:.4}", p)]);
    }
    println!("{}", table);

    Ok(())
}

fn cmd_reviews(root: &Path, config: Option<&Path>) -> Result<()> {
    let config = DashboardConfig::for_root(root, config)?;
    let rows = read_reviews(&config.review_log)?;

    if rows.is_empty() {
        println!("No reviews submitted yet");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(["Name", "Review", "Sentiment"]);
    for row in &rows {
        table.add_row([row.name.as_str(), row.review.as_str(), row.sentiment.as_str()]);
    }
    println!("Reviews in: {}", config.review_log.display());
    println!("{}", table);

    Ok(())
}

// ─── Utilities ────────────────────────────────────────────────────────────────

/// Load datasets, model and charts behind a spinner.
fn load_context(config: &DashboardConfig) -> Result<DashboardContext> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message("Loading reviews and model...");
    pb.enable_steady_tick(Duration::from_millis(100));

    match DashboardContext::load(config) {
        Ok(ctx) => {
            pb.finish_and_clear();
            Ok(ctx)
        }
        Err(e) => {
            pb.abandon_with_message("Failed to load dashboard data");
            Err(e.into())
        }
    }
}
