//! Error types for bert-bench.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bert-bench operations.
pub type Result<T> = std::result::Result<T, BenchError>;

/// Which loop an inference pass belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassPhase {
    Warmup,
    Timed,
}

impl fmt::Display for PassPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warmup => write!(f, "warmup"),
            Self::Timed => write!(f, "timed"),
        }
    }
}

/// Everything that can stop a benchmark run.
///
/// None of these are recovered from: the binary logs them and exits non-zero.
#[derive(Debug, Error)]
pub enum BenchError {
    /// Neither a model directory nor a model file was given.
    #[error("No model configured: pass --model_dir or --model_file/--params_file")]
    NoModel,

    /// The binary has no inference engine linked in.
    #[error("Inference engine unavailable: {0}")]
    EngineUnavailable(&'static str),

    /// The engine refused the configured model.
    #[error("Failed to load model from {model}: {reason}")]
    ModelLoad { model: String, reason: String },

    /// A raw engine call reported failure.
    #[error("Engine call failed: {0}")]
    Engine(String),

    /// An inference pass failed; `index` counts from 0 within its phase.
    #[error("{phase} pass {index} failed: {source}")]
    Pass {
        phase: PassPhase,
        index: u32,
        #[source]
        source: Box<BenchError>,
    },

    /// Tensor binding, shape or copy problem.
    #[error("Invalid tensor: {0}")]
    Tensor(String),

    /// Rejected run configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The YAML config file did not parse.
    #[error("Malformed config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The JSON report could not be encoded.
    #[error("Failed to encode report: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A configured model or config path does not exist.
    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),
}

impl BenchError {
    /// Create a model load error for the given model location.
    pub fn model_load(model: impl fmt::Display, reason: impl Into<String>) -> Self {
        Self::ModelLoad {
            model: model.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an engine call error.
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }

    /// Create a tensor error.
    pub fn tensor(msg: impl Into<String>) -> Self {
        Self::Tensor(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Attribute this error to pass `index` of `phase`.
    pub fn in_pass(self, phase: PassPhase, index: u32) -> Self {
        Self::Pass {
            phase,
            index,
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = BenchError::model_load("bert_sst2/", "PD_PredictorCreate returned null");
        assert_eq!(
            format!("{}", err),
            "Failed to load model from bert_sst2/: PD_PredictorCreate returned null"
        );

        let err = BenchError::config("repeats must be at least 1");
        assert_eq!(
            format!("{}", err),
            "Invalid configuration: repeats must be at least 1"
        );

        let err = BenchError::PathNotFound(PathBuf::from("/models/bert/inference.pdmodel"));
        assert_eq!(
            format!("{}", err),
            "Path not found: /models/bert/inference.pdmodel"
        );
    }

    #[test]
    fn pass_error_keeps_engine_cause() {
        let err = BenchError::engine("PD_PredictorRun returned false").in_pass(PassPhase::Warmup, 3);
        assert_eq!(
            err.to_string(),
            "warmup pass 3 failed: Engine call failed: PD_PredictorRun returned false"
        );
        assert!(matches!(
            err.source().and_then(|s| s.downcast_ref::<BenchError>()),
            Some(BenchError::Engine(_))
        ));
    }

    #[test]
    fn test_yaml_error_converts() {
        let yaml_err = serde_yaml::from_str::<u32>("[not, a, number]").unwrap_err();
        let err: BenchError = yaml_err.into();
        assert!(matches!(err, BenchError::Yaml(_)));
    }
}
