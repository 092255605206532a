use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

use candle_sentiment::sentiment::{ModernBertSize, SentimentAnalysisPipelineBuilder};
use candle_sentiment::shells::{desktop, web};

#[derive(Parser)]
#[command(name = "candle-sentiment", version)]
#[command(about = "Type a sentence, see what the model thinks of it.")]
struct Cli {
    /// Model size to load.
    #[arg(long, value_enum, default_value_t = ModelSize::Base, global = true)]
    model: ModelSize,

    /// Run on this CUDA device instead of the CPU.
    #[arg(long, value_name = "INDEX", global = true)]
    cuda: Option<usize>,

    /// Log level when RUST_LOG is not set.
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the analyzer window in this terminal.
    Desktop {
        /// Write logs here; the window itself owns the terminal.
        #[arg(long, value_name = "PATH")]
        log_file: Option<PathBuf>,
    },
    /// Serve the analyzer page over HTTP.
    Web {
        #[arg(long, value_name = "SOCKET", default_value = web::DEFAULT_ADDR)]
        addr: SocketAddr,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModelSize {
    Base,
    Large,
}

impl From<ModelSize> for ModernBertSize {
    fn from(value: ModelSize) -> Self {
        match value {
            ModelSize::Base => ModernBertSize::Base,
            ModelSize::Large => ModernBertSize::Large,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    validate_log_level(&cli.log_level)?;

    match &cli.command {
        Commands::Desktop { log_file } => {
            if let Some(path) = log_file {
                init_file_logging(&cli.log_level, path)?;
            }
            // Nothing else reaches the screen until the window opens.
            eprintln!("{}", loading_notice(cli.model.into()));
        }
        Commands::Web { .. } => init_stderr_logging(&cli.log_level),
    }

    let mut builder = SentimentAnalysisPipelineBuilder::modernbert(cli.model.into());
    if let Some(index) = cli.cuda {
        builder = builder.cuda(index);
    }
    let pipeline = builder.build().context("Failed to load sentiment model")?;
    tracing::info!(device = ?pipeline.device(), "model ready");

    match cli.command {
        Commands::Desktop { .. } => desktop::run(&pipeline),
        Commands::Web { addr } => {
            let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
            runtime.block_on(web::run(Arc::new(pipeline), addr))
        }
    }
}

fn loading_notice(size: ModernBertSize) -> String {
    format!("Loading {size} sentiment model (the first run downloads it)...")
}

fn validate_log_level(value: &str) -> Result<()> {
    match value {
        "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
        _ => anyhow::bail!("invalid --log-level '{value}'; expected error|warn|info|debug|trace"),
    }
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn init_stderr_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(std::io::stderr)
        .init();
}

fn init_file_logging(level: &str, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
