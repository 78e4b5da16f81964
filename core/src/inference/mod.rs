//! Predictor sessions.
//!
//! The engine is reached through the [`Predictor`] trait. With the `paddle`
//! feature, [`create_predictor`] builds a Paddle Inference predictor through
//! the C API; without it, predictor creation always fails.

#[cfg(feature = "paddle")]
mod ffi;
#[cfg(feature = "paddle")]
mod paddle;
mod predictor;

#[cfg(feature = "paddle")]
pub use paddle::PaddlePredictor;
pub use predictor::{numel, Predictor, TensorData};

use crate::config::{EngineConfig, ModelSource};
use crate::error::{BenchError, Result};

/// Build a predictor session from the engine configuration.
///
/// # Errors
///
/// Returns [`BenchError::NoModel`] when no model location is configured,
/// [`BenchError::EngineUnavailable`] without the `paddle` feature,
/// [`BenchError::ModelLoad`] when the engine cannot load the model, and
/// [`BenchError::PathNotFound`] when a configured path does not exist.
pub fn create_predictor(config: &EngineConfig) -> Result<Box<dyn Predictor>> {
    if config.model == ModelSource::Unset {
        return Err(BenchError::NoModel);
    }

    #[cfg(feature = "paddle")]
    {
        Ok(Box::new(PaddlePredictor::create(config)?))
    }

    #[cfg(not(feature = "paddle"))]
    {
        Err(BenchError::EngineUnavailable(
            "built without the `paddle` feature; rebuild with `--features paddle`",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Backend;

    #[test]
    fn unset_model_fails_to_load() {
        let config = EngineConfig {
            model: ModelSource::Unset,
            backend: Backend::default(),
            memory_optim: true,
        };
        let err = create_predictor(&config).err().unwrap();
        assert!(matches!(err, BenchError::NoModel));
    }

    #[cfg(not(feature = "paddle"))]
    #[test]
    fn engine_missing_without_feature() {
        let config = EngineConfig {
            model: ModelSource::Dir("bert_sst2".into()),
            backend: Backend::default(),
            memory_optim: true,
        };
        let err = create_predictor(&config).err().unwrap();
        assert!(matches!(err, BenchError::EngineUnavailable(_)));
        assert!(err.to_string().contains("paddle"));
    }

    #[cfg(feature = "paddle")]
    #[test]
    fn missing_model_dir_reported() {
        let config = EngineConfig {
            model: ModelSource::Dir("/nonexistent/bert_sst2".into()),
            backend: Backend::default(),
            memory_optim: true,
        };
        let err = create_predictor(&config).err().unwrap();
        assert!(matches!(err, BenchError::PathNotFound(_)));
    }
}
