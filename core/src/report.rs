//! Sample classification and result reporting.

use serde::Serialize;
use tracing::info;

use crate::bench::{self, RunOptions};
use crate::error::{BenchError, Result};
use crate::inference::Predictor;
use crate::postprocess::{Prediction, Sentiment};
use crate::sample::Sample;

/// Outcome of benchmarking one sample.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub data: String,
    pub label: Sentiment,
    pub negative_prob: f32,
    pub positive_prob: f32,
    pub avg_latency_ms: f64,
    pub warmup: u32,
    pub repeats: u32,
    pub output_shape: Vec<usize>,
}

/// Run the benchmark loop on `sample` and classify the final output.
pub fn classify_sample<P: Predictor + ?Sized>(
    predictor: &mut P,
    sample: &Sample,
    options: RunOptions,
) -> Result<Report> {
    let [token_ids, segment_ids] = sample
        .inputs()
        .map(|array| array.as_slice().ok_or_else(|| BenchError::tensor("Input not contiguous")));
    let inputs = [token_ids?, segment_ids?];

    let out = bench::run(predictor, &inputs, sample.shape(), options)?;
    let prediction = Prediction::from_logits(&out.output.to_vec())?;

    Ok(Report {
        data: sample.text.to_string(),
        label: prediction.label,
        negative_prob: prediction.negative_prob(),
        positive_prob: prediction.positive_prob(),
        avg_latency_ms: out.timing.avg_ms(),
        warmup: options.warmup,
        repeats: options.repeats,
        output_shape: out.output.shape().to_vec(),
    })
}

impl Report {
    /// Human-readable result lines.
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Data: {}", self.data),
            format!("  Label: {}", self.label),
            format!("  Negative prob: {}", self.negative_prob),
            format!("  Positive prob: {}", self.positive_prob),
        ]
    }

    /// Emit [`Report::lines`] through the log.
    pub fn log(&self) {
        for line in self.lines() {
            info!("{}", line);
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
