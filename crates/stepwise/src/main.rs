//! stepwise: step-by-step algorithm visualizer
//!
//! Runs the coin-change DP or the N-Queens backtracking search once, records
//! every decision point, then prints the trace, plays it back interactively
//! or exports it for an external renderer.

mod config;
mod controls;
mod render;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use stepwise_algo::coins::{self, CoinResult};
use stepwise_algo::queens::{self, QueensResult};
use stepwise_algo::{CoinProblem, QueensProblem, input};
use stepwise_trace::{ExportFormat, Playback, Renderer, StepEvent, Trace, TraceWriter};
use tokio::sync::mpsc;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use config::Config;
use render::TextRenderer;

/// Step-by-step visualizer for coin-change DP and N-Queens backtracking
#[derive(Parser)]
#[command(name = "stepwise")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to .stepwise directory or config file (default: search for .stepwise/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Visualize the minimum-coins dynamic program
    Coins {
        #[command(flatten)]
        problem: CoinArgs,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Visualize the N-Queens backtracking search
    Queens {
        #[command(flatten)]
        problem: QueensArgs,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Write a trace to a file for an external renderer
    Export {
        #[command(subcommand)]
        target: ExportTarget,
    },

    /// Initialize a new .stepwise directory with config file
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum ExportTarget {
    /// Export a coin-change trace
    Coins {
        #[command(flatten)]
        problem: CoinArgs,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Export an N-Queens trace
    Queens {
        #[command(flatten)]
        problem: QueensArgs,

        #[command(flatten)]
        export: ExportArgs,
    },
}

#[derive(Args)]
struct CoinArgs {
    /// Comma-separated coin denominations, e.g. "1,3,4"
    #[arg(long)]
    coins: Option<String>,

    /// Target amount (1-20)
    #[arg(long)]
    amount: Option<String>,
}

#[derive(Args)]
struct QueensArgs {
    /// Board size (4-8)
    #[arg(long)]
    size: Option<String>,
}

#[derive(Args)]
struct ViewArgs {
    /// Interactive playback driven by stdin
    #[arg(long, conflicts_with = "json")]
    play: bool,

    /// Auto-play interval in milliseconds (default from config)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    interval_ms: Option<u64>,

    /// Print the trace and result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ExportArgs {
    /// Output file
    #[arg(short, long)]
    output: PathBuf,

    /// Output layout (default: from the file extension, .json or JSONL)
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Jsonl,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Jsonl => ExportFormat::Jsonl,
        }
    }
}

/// Trace plus final answer, as printed by `--json`.
#[derive(Serialize)]
struct Report<'a, T, R> {
    trace: &'a T,
    result: &'a R,
}

/// Initialize logging to stderr.
fn init_logging(verbose: bool) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter(verbose))
        .init();
}

/// Initialize logging for interactive playback.
/// Logs to rotating files in .stepwise/logs/ so the terminal only shows steps.
fn init_file_logging(stepwise_dir: &Path, verbose: bool) {
    let logs_dir = stepwise_dir.join("logs");

    if let Err(e) = std::fs::create_dir_all(&logs_dir) {
        eprintln!("Warning: Failed to create logs directory: {}", e);
        init_logging(verbose);
        return;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &logs_dir, "stepwise.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Dropping the guard stops the background writer.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .with(env_filter(verbose))
        .init();
}

fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Load config from file or auto-discover from `.stepwise/config.toml`.
///
/// Returns the config and the `.stepwise` directory it came from.
fn load_config(override_path: Option<&PathBuf>) -> Result<(Config, Option<PathBuf>)> {
    if let Some(path) = override_path {
        // Explicit path override - either the .stepwise directory or the file itself
        let config_file = if path.is_dir() {
            path.join(config::CONFIG_FILE)
        } else {
            path.clone()
        };
        let stepwise_dir = config_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| path.clone());
        let config = Config::from_file(&config_file)?;
        return Ok((config, Some(stepwise_dir)));
    }

    match Config::find_and_load()? {
        Some((config, stepwise_dir)) => Ok((config, Some(stepwise_dir))),
        None => Ok((Config::default(), None)),
    }
}

fn coin_problem(args: &CoinArgs, config: &Config) -> Result<CoinProblem> {
    let coins = match &args.coins {
        Some(raw) => input::parse_coins(raw)?,
        None => config.coins.default_coins.clone(),
    };
    let amount = match &args.amount {
        Some(raw) => input::parse_amount(raw)?,
        None => config.coins.default_amount,
    };
    Ok(CoinProblem::new(coins, amount)?)
}

fn queens_problem(args: &QueensArgs, config: &Config) -> Result<QueensProblem> {
    match &args.size {
        Some(raw) => Ok(QueensProblem::parse(raw)?),
        None => Ok(QueensProblem::new(config.queens.default_size)?),
    }
}

/// Show a generated trace according to the view flags.
async fn present<E, S, R>(
    trace: Trace<E, S>,
    mut renderer: R,
    view: &ViewArgs,
    config: &Config,
) -> Result<()>
where
    E: StepEvent,
    R: Renderer<E, S>,
{
    if !view.play {
        let total = trace.len();
        for (idx, step) in trace.iter().enumerate() {
            renderer.render(step, idx + 1, total);
        }
        renderer.finished(&trace);
        return Ok(());
    }

    let interval = view
        .interval_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.playback.interval());

    println!("{}\n", controls::HELP);
    let (tx, rx) = mpsc::channel(16);
    controls::spawn_stdin_reader(tx, interval);

    let mut playback = Playback::with_trace(trace);
    let summary = stepwise_trace::run(&mut playback, &mut renderer, rx).await;
    info!(
        rendered = summary.rendered,
        ticks = summary.ticks,
        commands = summary.commands,
        "playback ended"
    );
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize trace")?;
    println!("{}", json);
    Ok(())
}

fn export<E, S>(trace: &Trace<E, S>, args: &ExportArgs) -> Result<()>
where
    E: Serialize,
    S: Serialize,
{
    let mut writer = TraceWriter::new(&args.output)
        .with_context(|| format!("Failed to prepare {}", args.output.display()))?;
    if let Some(format) = args.format {
        writer = writer.with_format(format.into());
    }
    let lines = writer
        .write(trace)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!(
        "Wrote {} steps ({} lines) to {}",
        trace.len(),
        lines,
        writer.path().display()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Defer logging init - interactive playback logs to a file
    let (config, config_dir) = load_config(cli.config.as_ref())?;

    let interactive = matches!(
        &cli.command,
        Commands::Coins { view, .. } | Commands::Queens { view, .. } if view.play
    );
    if interactive {
        let stepwise_dir = config_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(config::STEPWISE_DIR));
        init_file_logging(&stepwise_dir, cli.verbose);
    } else {
        init_logging(cli.verbose);
    }

    match &config_dir {
        Some(dir) => info!("Using config from {}", dir.display()),
        None => tracing::debug!("No .stepwise/config.toml found, using defaults"),
    }

    let errors = config.validate();
    if !errors.is_empty() {
        let details: Vec<String> = errors.iter().map(|e| format!("  {}", e)).collect();
        anyhow::bail!("Invalid configuration:\n{}", details.join("\n"));
    }

    let glyphs = config.playback.glyphs.glyphs();

    match cli.command {
        Commands::Coins { problem, view } => {
            let problem = coin_problem(&problem, &config)?;
            let trace = coins::generate(&problem)?;
            info!(steps = trace.len(), "coin-change trace generated");

            if view.json {
                let result = CoinResult::from_trace(&trace, problem.coins())?;
                return print_json(&Report {
                    trace: &trace,
                    result: &result,
                });
            }
            present(trace, TextRenderer::new(std::io::stdout(), glyphs), &view, &config).await?;
        }

        Commands::Queens { problem, view } => {
            let problem = queens_problem(&problem, &config)?;
            let trace = queens::generate(&problem)?;
            info!(steps = trace.len(), "n-queens trace generated");

            if view.json {
                let result = QueensResult::from_trace(&trace)?;
                return print_json(&Report {
                    trace: &trace,
                    result: &result,
                });
            }
            present(trace, TextRenderer::new(std::io::stdout(), glyphs), &view, &config).await?;
        }

        Commands::Export { target } => match target {
            ExportTarget::Coins { problem, export: args } => {
                let trace = coins::generate(&coin_problem(&problem, &config)?)?;
                export(&trace, &args)?;
            }
            ExportTarget::Queens { problem, export: args } => {
                let trace = queens::generate(&queens_problem(&problem, &config)?)?;
                export(&trace, &args)?;
            }
        },

        Commands::Init { force } => {
            use config::{CONFIG_FILE, DEFAULT_CONFIG, STEPWISE_DIR};

            let stepwise_dir = PathBuf::from(STEPWISE_DIR);
            let config_path = stepwise_dir.join(CONFIG_FILE);

            if config_path.exists() && !force {
                anyhow::bail!(".stepwise/config.toml already exists. Use --force to overwrite.");
            }

            if !stepwise_dir.exists() {
                std::fs::create_dir_all(&stepwise_dir)?;
                info!("Created {}/", stepwise_dir.display());
            }

            std::fs::write(&config_path, DEFAULT_CONFIG)?;
            info!("Created {}", config_path.display());
            info!("Next steps:");
            info!("  1. Edit .stepwise/config.toml to change defaults");
            info!("  2. Run 'stepwise coins --play' or 'stepwise queens --play'");
        }
    }

    Ok(())
}
