//! CLI entry point for bert-bench.

use anyhow::{Context, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use bert_bench::bench::RunOptions;
use bert_bench::cli::Cli;
use bert_bench::config::OutputFormat;
use bert_bench::inference::create_predictor;
use bert_bench::report::classify_sample;
use bert_bench::sample::Sample;

/// Get the Paddle Inference version from the build script.
fn paddle_version() -> &'static str {
    option_env!("PADDLE_INFERENCE_VERSION").unwrap_or("unknown")
}

/// Get the enabled features.
fn enabled_features() -> &'static str {
    if cfg!(feature = "paddle") {
        "paddle"
    } else {
        "none"
    }
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the JSON report.
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();
    let config = cli
        .bench_config()
        .context("Failed to build benchmark configuration")?;

    info!(
        "bert-bench v{} (paddle inference {}, features: {})",
        env!("CARGO_PKG_VERSION"),
        paddle_version(),
        enabled_features()
    );
    info!("Model: {}", config.engine.model);
    info!("Backend: {}", config.engine.backend);

    let mut predictor =
        create_predictor(&config.engine).context("Failed to create predictor")?;
    info!("Predictor created");

    let sample = Sample::sst2_example()?;
    let options = RunOptions {
        warmup: config.warmup,
        repeats: config.repeats,
    };
    let report =
        classify_sample(predictor.as_mut(), &sample, options).context("Benchmark run failed")?;

    match config.format {
        OutputFormat::Text => report.log(),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    Ok(())
}
