//! Warmup and timed inference loop.

use ndarray::{ArrayD, IxDyn};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::error::{BenchError, PassPhase, Result};
use crate::inference::{numel, Predictor, TensorData};

/// Loop counts for one benchmark run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Untimed passes before measuring.
    pub warmup: u32,
    /// Timed passes; must be at least 1.
    pub repeats: u32,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            warmup: 0,
            repeats: 1,
        }
    }
}

/// Wall-clock time spent in the timed loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub total: Duration,
    pub runs: u32,
}

impl Timing {
    /// Average milliseconds per timed pass.
    pub fn avg_ms(&self) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        self.total.as_secs_f64() * 1000.0 / f64::from(self.runs)
    }
}

/// What a benchmark run leaves behind.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// First declared output, as copied after the last timed pass.
    pub output: TensorData,
    pub timing: Timing,
}

/// Bind `inputs` to the predictor, warm up, then time `repeats` passes.
///
/// Inputs are matched positionally to the engine's declared input names and
/// every one is reshaped to `shape`.
///
/// # Errors
///
/// Any failing engine call aborts the run. Also fails when fewer buffers
/// than declared inputs are given, when a buffer does not match `shape`,
/// or when the model declares no outputs.
pub fn run<P: Predictor + ?Sized>(
    predictor: &mut P,
    inputs: &[&[i64]],
    shape: &[usize],
    options: RunOptions,
) -> Result<RunOutput> {
    if options.repeats == 0 {
        return Err(BenchError::config("repeats must be at least 1"));
    }

    let input_num = numel(shape);
    let input_names = predictor.input_names()?;
    let output_names = predictor.output_names()?;
    let output_name = output_names
        .first()
        .ok_or_else(|| BenchError::tensor("Model declares no outputs"))?;

    if inputs.len() < input_names.len() {
        return Err(BenchError::tensor(format!(
            "Model declares {} inputs, {} given",
            input_names.len(),
            inputs.len()
        )));
    }

    for (name, data) in input_names.iter().zip(inputs) {
        if data.len() != input_num {
            return Err(BenchError::tensor(format!(
                "Input {} has {} elements, shape {:?} needs {}",
                name,
                data.len(),
                shape,
                input_num
            )));
        }
        predictor.copy_input(name, shape, data)?;
        debug!("Bound input {} with shape {:?}", name, shape);
    }

    for i in 0..options.warmup {
        predictor
            .run()
            .map_err(|e| e.in_pass(PassPhase::Warmup, i))?;
    }
    debug!("Finished {} warmup passes", options.warmup);

    let mut out_data: Vec<f32> = Vec::new();
    let mut out_shape: Vec<usize> = Vec::new();

    let start = Instant::now();
    for i in 0..options.repeats {
        predictor
            .run()
            .map_err(|e| e.in_pass(PassPhase::Timed, i))?;
        out_shape = predictor.output_shape(output_name)?;
        out_data.resize(numel(&out_shape), 0.0);
        predictor.copy_output(output_name, &mut out_data)?;
    }
    let timing = Timing {
        total: start.elapsed(),
        runs: options.repeats,
    };
    info!("run avg time is {} ms", timing.avg_ms());

    let data = ArrayD::from_shape_vec(IxDyn(&out_shape), out_data)
        .map_err(|e| BenchError::tensor(format!("Array shape error: {}", e)))?;

    Ok(RunOutput {
        output: TensorData { data },
        timing,
    })
}
