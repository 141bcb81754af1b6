//! qingxu: Chinese emotion analysis.
//!
//! - `serve`: load the checkpoint, warm up, and serve `POST /emotion/analyze`
//! - `analyze`: classify one text locally
//! - `probe`: classify one text against a running service

mod display;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use qingxu_ai::{DEFAULT_MAX_LENGTH, EncoderConfig, OnnxEmotionModel};
use qingxu_client::AnalyzeClient;
use qingxu_core::EmotionAnalysis;
use qingxu_server::{
    DEFAULT_HOST, DEFAULT_MODEL_DIR, DEFAULT_PORT, DEFAULT_WARMUP_TEXT, InferenceContext,
    ServiceConfig,
};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "qingxu", version, about = "Chinese emotion analysis inference service")]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve(ServeArgs),
    /// Classify a single text with a local checkpoint
    Analyze(AnalyzeArgs),
    /// Classify a single text against a running service
    Probe(ProbeArgs),
}

#[derive(Args)]
struct ModelArgs {
    /// Directory containing model.onnx and tokenizer.json
    #[arg(long, env = "QINGXU_MODEL_DIR", default_value = DEFAULT_MODEL_DIR)]
    model_dir: PathBuf,

    /// Maximum sequence length; longer inputs are truncated
    #[arg(long, env = "QINGXU_MAX_LENGTH", default_value_t = DEFAULT_MAX_LENGTH)]
    max_length: usize,

    /// Pad every input to --max-length
    #[arg(long, env = "QINGXU_PAD_TO_MAX_LENGTH")]
    pad_to_max_length: bool,
}

impl ModelArgs {
    fn encoder(&self) -> EncoderConfig {
        EncoderConfig {
            max_length: self.max_length,
            pad_to_max_length: self.pad_to_max_length,
        }
    }
}

#[derive(Args)]
struct ServeArgs {
    #[command(flatten)]
    model: ModelArgs,

    #[arg(long, env = "QINGXU_HOST", default_value = DEFAULT_HOST)]
    host: String,

    #[arg(long, env = "QINGXU_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Sentence analyzed once before accepting traffic
    #[arg(long, env = "QINGXU_WARMUP_TEXT", default_value = DEFAULT_WARMUP_TEXT)]
    warmup_text: String,
}

impl ServeArgs {
    fn into_config(self) -> ServiceConfig {
        ServiceConfig {
            encoder: self.model.encoder(),
            model_dir: self.model.model_dir,
            host: self.host,
            port: self.port,
            warmup_text: self.warmup_text,
        }
    }
}

#[derive(Args)]
struct AnalyzeArgs {
    #[command(flatten)]
    model: ModelArgs,

    /// Print the raw JSON response body
    #[arg(long)]
    json: bool,

    text: String,
}

#[derive(Args)]
struct ProbeArgs {
    /// Base URL of the service
    #[arg(long, env = "QINGXU_URL", default_value = "http://127.0.0.1:5000")]
    url: String,

    /// Print the raw JSON response body
    #[arg(long)]
    json: bool,

    text: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    tracing::info!("qingxu v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve(args) => qingxu_server::serve(args.into_config()).await,
        Commands::Analyze(args) => {
            let encoder = args.model.encoder();
            let model_dir = args.model.model_dir.clone();
            let text = args.text.clone();
            let analysis = tokio::task::spawn_blocking(move || {
                let model = OnnxEmotionModel::load(&model_dir, &encoder)?;
                InferenceContext::new(Box::new(model)).analyze(&text)
            })
            .await
            .context("inference task panicked")??;
            print_analysis(&args.text, &analysis, args.json)
        }
        Commands::Probe(args) => {
            let client = AnalyzeClient::new(args.url);
            let analysis = client
                .analyze(&args.text)
                .await
                .with_context(|| format!("probe {}", client.base_url()))?;
            print_analysis(&args.text, &analysis, args.json)
        }
    }
}

fn print_analysis(text: &str, analysis: &EmotionAnalysis, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(analysis)?);
    } else {
        print!("{}", display::render(text, analysis));
    }
    Ok(())
}
