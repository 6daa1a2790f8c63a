mod feed_cmds;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use takes_config::{AppConfig, FinalScoreMode, WeightOverrides};
use takes_trending::{TrendingScorer, load_takes};

#[derive(Debug, Parser)]
#[command(
    name = "takes",
    version,
    about = "Score and rank basketball takes by trending score"
)]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, global = true, default_value = "config/default.toml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the trending score of every take, in feed order.
    Score {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[command(flatten)]
        weights: WeightArgs,
    },
    /// Print the highest-scoring takes.
    Rank {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Number of takes to show (defaults to `feed.default_limit`).
        #[arg(long)]
        limit: Option<usize>,
        /// Emit ranked takes as JSON instead of a table.
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        weights: WeightArgs,
    },
    /// Show the per-component breakdown behind each score.
    Explain {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Only explain the take with this id.
        #[arg(long)]
        id: Option<String>,
        /// Use `round(sum * 100)` for the final value, matching `takes score`.
        #[arg(long)]
        unified: bool,
        #[command(flatten)]
        weights: WeightArgs,
    },
    /// Print the effective configuration.
    Config,
}

/// Per-component weight overrides; unset flags keep the config file value.
#[derive(Debug, Args)]
struct WeightArgs {
    #[arg(long)]
    engagement: Option<f64>,
    #[arg(long)]
    quality: Option<f64>,
    #[arg(long)]
    recency: Option<f64>,
    #[arg(long)]
    momentum: Option<f64>,
}

impl WeightArgs {
    fn into_overrides(self) -> WeightOverrides {
        WeightOverrides {
            engagement: self.engagement,
            quality: self.quality,
            recency: self.recency,
            momentum: self.momentum,
        }
    }
}

fn scorer_for(config: &AppConfig, weights: WeightArgs) -> TrendingScorer {
    let mut config = config.clone();
    config.trending.weights = config.trending.weights.merged_with(weights.into_overrides());
    TrendingScorer::from_config(&config)
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = AppConfig::load_from(&cli.config)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.telemetry.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    debug!(path = %cli.config.display(), "loaded config");

    let mut out = io::stdout().lock();
    match cli.command {
        Commands::Score { file, weights } => {
            let takes = load_takes(&file)?;
            feed_cmds::run_score(&mut out, &scorer_for(&config, weights), &takes)?;
        }
        Commands::Rank {
            file,
            limit,
            json,
            weights,
        } => {
            let takes = load_takes(&file)?;
            let limit = limit.unwrap_or(config.feed.default_limit);
            feed_cmds::run_rank(&mut out, &scorer_for(&config, weights), &takes, limit, json)?;
        }
        Commands::Explain {
            file,
            id,
            unified,
            weights,
        } => {
            let takes = load_takes(&file)?;
            let mut scorer = scorer_for(&config, weights);
            if unified {
                scorer = scorer.with_final_score_mode(FinalScoreMode::ScaleThenRound);
            }
            feed_cmds::run_explain(&mut out, &scorer, &takes, id.as_deref())?;
        }
        Commands::Config => {
            feed_cmds::run_show_config(&mut out, &config)?;
        }
    }

    Ok(())
}
