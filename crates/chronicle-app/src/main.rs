//! Chronicle application binary - composition root.
//!
//! 1. Load configuration from TOML and apply CLI overrides
//! 2. Load the training corpus and posts (or the built-in sample)
//! 3. Fit the classify-then-extract pipeline
//! 4. Process every post, concurrently when more than one worker is asked for
//! 5. Write the timeline or the extracted records to stdout

mod cli;

use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use chronicle_app::dataset;
use chronicle_app::Pipeline;
use chronicle_core::config::ChronicleConfig;
use chronicle_core::sample;
use chronicle_extract::{JsonTimelineRenderer, PatternRecognizer, TextTimelineRenderer};

use cli::{CliArgs, OutputFormat};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config is read under a stderr subscriber at the CLI/env level so load
    // failures are reported; the global subscriber then uses the config level.
    let config_file = args.resolve_config_path();
    let bootstrap = tracing_subscriber::fmt()
        .with_env_filter(log_filter(&args, "info"))
        .with_writer(std::io::stderr)
        .finish();
    let mut config = tracing::subscriber::with_default(bootstrap, || {
        ChronicleConfig::load_or_default(&config_file)
    });

    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&args, &config.general.log_level))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Chronicle v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration resolved");

    config.timeline.chronological = args.resolve_chronological(config.timeline.chronological);
    let workers = args.resolve_workers(config.pipeline.workers);

    // Data.
    let examples = match &args.corpus {
        Some(path) => dataset::load_training_examples(path)?,
        None => sample::training_examples(),
    };
    let posts = match &args.posts {
        Some(path) => dataset::load_posts(path)?,
        None => sample::posts(),
    };

    // Pipeline.
    let recognizer = Arc::new(PatternRecognizer::new(&config.recognizer)?);
    let pipeline = Arc::new(Pipeline::fit(&examples, recognizer, &config)?);

    let records = if workers > 1 {
        pipeline.process_concurrent(posts, workers).await?
    } else {
        pipeline.process_all(&posts)?
    };

    // Output.
    let stdout = std::io::stdout().lock();
    match args.format {
        OutputFormat::Text => {
            let mut renderer = TextTimelineRenderer::new(stdout, &config.timeline);
            pipeline.render_timeline(&records, &mut renderer)?;
        }
        OutputFormat::Json => {
            let mut renderer = JsonTimelineRenderer::new(stdout);
            pipeline.render_timeline(&records, &mut renderer)?;
        }
        OutputFormat::Records => {
            let mut stdout = stdout;
            serde_json::to_writer_pretty(&mut stdout, &records)?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}

/// `RUST_LOG` when set, otherwise the CLI or configured level.
fn log_filter(args: &CliArgs, config_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.resolve_log_level(config_level)))
}
