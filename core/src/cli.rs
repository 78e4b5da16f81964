//! Command-line interface for bert-bench.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{BenchConfig, FileConfig, OutputFormat, Overrides};
use crate::error::Result;

/// Benchmark a BERT sentiment classifier on Paddle Inference.
#[derive(Parser, Debug)]
#[command(name = "bert-bench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Program file of the inference model.
    #[arg(long = "model_file")]
    pub model_file: Option<String>,

    /// Combined parameters file of the inference model.
    #[arg(long = "params_file")]
    pub params_file: Option<String>,

    /// Directory of the inference model.
    ///
    /// Ignored when --model_file is given.
    #[arg(long = "model_dir")]
    pub model_dir: Option<String>,

    /// Untimed passes run before measuring.
    #[arg(long)]
    pub warmup: Option<u32>,

    /// Timed passes.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub repeats: Option<u32>,

    /// Run on GPU 0 instead of the MKL-DNN CPU backend.
    ///
    /// `--use_gpu=false` forces CPU even when the config file enables GPU.
    #[arg(
        long = "use_gpu",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub use_gpu: Option<bool>,

    /// Optional YAML config file; explicit flags take precedence.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format for the prediction.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Build the run configuration from the flags and the optional file.
    pub fn bench_config(&self) -> Result<BenchConfig> {
        let file = match &self.config {
            Some(path) => FileConfig::from_yaml_file(path)?,
            None => FileConfig::default(),
        };
        BenchConfig::resolve(file, self.overrides())
    }

    fn overrides(&self) -> Overrides {
        Overrides {
            model_file: self.model_file.clone(),
            params_file: self.params_file.clone(),
            model_dir: self.model_dir.clone(),
            warmup: self.warmup,
            repeats: self.repeats,
            use_gpu: self.use_gpu,
            format: self.format,
        }
    }
}
