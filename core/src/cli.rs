use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, LoggingConfig};
use crate::runtime::{LabelId, Program, Scheduler, Target};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Cadence - cooperative runtime for compiled block scripts", long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default search)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a compiled program (JSON) on a fresh sprite until it retires
    Run {
        /// Program file produced by the compiler
        program: PathBuf,

        /// Stop after this many ticks (overrides scheduler.max_ticks)
        #[arg(long)]
        ticks: Option<u64>,

        /// Do not pace ticks at the configured framerate
        #[arg(long)]
        turbo: bool,
    },

    /// Print the fragment a label resolves to, synthesizing continuations
    Continuation {
        /// Program file produced by the compiler
        program: PathBuf,

        /// Label index in the jump table
        label: u32,
    },

    /// Print the effective configuration
    Config,

    /// Step many looping threads and report throughput
    Bench {
        /// Number of concurrently running threads
        #[arg(long, default_value = "100")]
        threads: usize,

        /// Number of ticks to run
        #[arg(long, default_value = "1000")]
        ticks: u64,

        /// Loop iterations each thread runs per tick
        #[arg(long, default_value = "10")]
        iterations: u32,

        /// Run the loop body inside an atomic procedure
        #[arg(long)]
        warp: bool,
    },
}

/// Run the CLI by parsing process arguments
pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    run_cli_with_args(cli).await
}

/// Run the CLI with provided arguments
pub async fn run_cli_from_args(args: Vec<String>) -> Result<()> {
    let cli = Cli::parse_from(args);
    run_cli_with_args(cli).await
}

async fn run_cli_with_args(cli: Cli) -> Result<()> {
    dotenvy::dotenv().ok();

    // Load and validate configuration before executing any command
    let config = Config::builder()
        .config_path(cli.config.map(PathBuf::from))
        .build()?;
    init_logging(&config.logging);

    match cli.command {
        Commands::Run {
            program,
            ticks,
            turbo,
        } => {
            let program = load_program(&program)?;
            let max_ticks = ticks.or(config.scheduler.max_ticks);
            let framerate = config.scheduler.framerate.max(1);

            let mut scheduler = Scheduler::new(config.scheduler);
            let sprite = scheduler.add_target(Target::new("Sprite1"));
            scheduler.start_script(sprite, program)?;

            let mut interval = tokio::time::interval(Duration::from_secs_f64(1.0 / framerate as f64));
            while scheduler.active_threads() > 0 {
                if max_ticks.is_some_and(|max| scheduler.ticks() >= max) {
                    info!(ticks = scheduler.ticks(), "Tick limit reached");
                    break;
                }
                if !turbo {
                    interval.tick().await;
                }
                let report = scheduler.tick();
                if !report.failed.is_empty() {
                    warn!(tick = scheduler.ticks(), failed = ?report.failed, "Threads failed");
                }
            }

            info!(
                ticks = scheduler.ticks(),
                active = scheduler.active_threads(),
                "Run finished"
            );
            println!("{}", serde_json::to_string_pretty(scheduler.targets())?);
        }

        Commands::Continuation { program, label } => {
            let program = load_program(&program)?;
            let fragment = program.fragment(LabelId(label))?;
            println!("{}", serde_json::to_string_pretty(fragment.as_ref())?);
        }

        Commands::Config => {
            print!("{}", config.to_toml()?);
        }

        Commands::Bench {
            threads,
            ticks,
            iterations,
            warp,
        } => {
            use crate::benchmark;

            let params = benchmark::BenchmarkParams {
                threads,
                ticks,
                iterations,
                warp,
            };
            benchmark::run_benchmark(params, config.scheduler)?;
        }
    }

    Ok(())
}

fn load_program(path: &Path) -> Result<Arc<Program>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read program {}", path.display()))?;
    let program: Program = serde_json::from_str(&source)
        .with_context(|| format!("Failed to parse program {}", path.display()))?;
    Ok(Arc::new(program))
}

fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
