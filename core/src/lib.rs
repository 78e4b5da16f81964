//! bert-bench: benchmark harness for a BERT sentiment classifier on Paddle Inference.
//!
//! The crate loads an exported Paddle model, binds one fixed tokenized
//! sentence to its inputs, times repeated inference passes, and turns the
//! two output logits into a Negative/Positive label.
//!
//! # Features
//!
//! - **paddle**: Link against the Paddle Inference C library. Without it the
//!   harness builds, but creating a predictor always fails.
//!
//! # Example
//!
//! ```ignore
//! use bert_bench::bench::RunOptions;
//! use bert_bench::config::{Backend, EngineConfig, ModelSource};
//! use bert_bench::inference::create_predictor;
//! use bert_bench::report::classify_sample;
//! use bert_bench::sample::Sample;
//!
//! let config = EngineConfig {
//!     model: ModelSource::Dir("bert_sst2".into()),
//!     backend: Backend::default(),
//!     memory_optim: true,
//! };
//! let mut predictor = create_predictor(&config)?;
//! let sample = Sample::sst2_example()?;
//! let report = classify_sample(predictor.as_mut(), &sample, RunOptions::default())?;
//! println!("{} in {:.2}ms", report.label, report.avg_latency_ms);
//! ```
//!
//! # Building
//!
//! Download the Paddle Inference C library and point the build at it:
//!
//! ```bash
//! export PADDLE_INFERENCE_DIR=/opt/paddle_inference_c
//! cargo build --release --features paddle
//! ```

pub mod bench;
pub mod cli;
pub mod config;
pub mod error;
pub mod inference;
pub mod postprocess;
pub mod report;
pub mod sample;

// Re-export commonly used types
pub use error::{BenchError, Result};
pub use inference::{create_predictor, Predictor, TensorData};
pub use postprocess::{Prediction, Sentiment};
