//! Configuration types for bert-bench.
//!
//! Two layers live here: the optional YAML file (`FileConfig`) and the
//! resolved, immutable run configuration (`BenchConfig` / `EngineConfig`)
//! that the binary builds once at startup.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{BenchError, Result};

/// GPU memory pool reserved at predictor creation, in MB.
pub const DEFAULT_GPU_MEMORY_POOL_MB: u64 = 100;

/// GPU device used when `use_gpu` is set.
pub const DEFAULT_GPU_DEVICE_ID: i32 = 0;

/// Where the engine loads the model from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// Explicit program file plus combined params file.
    Files {
        model_file: PathBuf,
        params_file: PathBuf,
    },
    /// Directory holding `__model__` and the parameter files.
    Dir(PathBuf),
    /// Nothing configured; predictor creation will fail.
    Unset,
}

impl ModelSource {
    /// Pick the model location from the three path options.
    ///
    /// A non-empty `model_file` wins and is paired with `params_file`
    /// (which may be empty). Otherwise a non-empty `model_dir` is used.
    pub fn resolve(model_file: &str, params_file: &str, model_dir: &str) -> Self {
        if !model_file.is_empty() {
            Self::Files {
                model_file: PathBuf::from(model_file),
                params_file: PathBuf::from(params_file),
            }
        } else if !model_dir.is_empty() {
            Self::Dir(PathBuf::from(model_dir))
        } else {
            Self::Unset
        }
    }
}

impl fmt::Display for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Files {
                model_file,
                params_file,
            } => write!(f, "{} + {}", model_file.display(), params_file.display()),
            Self::Dir(dir) => write!(f, "{}/", dir.display()),
            Self::Unset => write!(f, "<unset>"),
        }
    }
}

/// Execution backend. GPU and the MKL-DNN CPU path never coexist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// CPU execution, optionally with MKL-DNN kernels.
    Cpu { mkldnn: bool },
    /// GPU execution on a single device.
    Gpu { device_id: i32, memory_pool_mb: u64 },
}

impl Backend {
    /// Select the backend from the `use_gpu` switch.
    pub fn select(use_gpu: bool, device_id: i32, memory_pool_mb: u64) -> Self {
        if use_gpu {
            Self::Gpu {
                device_id,
                memory_pool_mb,
            }
        } else {
            Self::Cpu { mkldnn: true }
        }
    }

    pub fn uses_gpu(&self) -> bool {
        matches!(self, Self::Gpu { .. })
    }

    pub fn uses_mkldnn(&self) -> bool {
        matches!(self, Self::Cpu { mkldnn: true })
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self::select(false, DEFAULT_GPU_DEVICE_ID, DEFAULT_GPU_MEMORY_POOL_MB)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu { mkldnn: true } => write!(f, "cpu (mkldnn)"),
            Self::Cpu { mkldnn: false } => write!(f, "cpu"),
            Self::Gpu {
                device_id,
                memory_pool_mb,
            } => write!(f, "gpu:{} ({} MB pool)", device_id, memory_pool_mb),
        }
    }
}

/// Everything the engine needs to build a predictor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub model: ModelSource,
    pub backend: Backend,
    pub memory_optim: bool,
}

/// How the final result is emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Log lines through the tracing subscriber.
    #[default]
    Text,
    /// One JSON object on stdout.
    Json,
}

/// Resolved run configuration, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    pub engine: EngineConfig,
    /// Discarded passes before timing starts.
    pub warmup: u32,
    /// Timed passes; always at least 1.
    pub repeats: u32,
    pub format: OutputFormat,
}

/// Top-level layout of the optional YAML config file.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    /// Model location.
    #[serde(default)]
    pub model: ModelConfig,

    /// Engine options.
    #[serde(default)]
    pub engine: EngineOptions,

    /// Benchmark loop options.
    #[serde(default)]
    pub bench: BenchOptions,
}

/// Model location as written in the config file.
#[derive(Debug, Default, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub model_file: Option<String>,
    #[serde(default)]
    pub params_file: Option<String>,
    #[serde(default)]
    pub model_dir: Option<String>,
}

/// Engine options as written in the config file.
#[derive(Debug, Deserialize)]
pub struct EngineOptions {
    #[serde(default)]
    pub use_gpu: bool,

    #[serde(default = "default_gpu_device_id")]
    pub gpu_device_id: i32,

    #[serde(default = "default_gpu_memory_pool_mb")]
    pub gpu_memory_pool_mb: u64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            use_gpu: false,
            gpu_device_id: default_gpu_device_id(),
            gpu_memory_pool_mb: default_gpu_memory_pool_mb(),
        }
    }
}

/// Loop options as written in the config file.
#[derive(Debug, Deserialize)]
pub struct BenchOptions {
    #[serde(default)]
    pub warmup: u32,

    #[serde(default = "default_repeats")]
    pub repeats: u32,
}

impl Default for BenchOptions {
    fn default() -> Self {
        Self {
            warmup: 0,
            repeats: default_repeats(),
        }
    }
}

fn default_gpu_device_id() -> i32 {
    DEFAULT_GPU_DEVICE_ID
}

fn default_gpu_memory_pool_mb() -> u64 {
    DEFAULT_GPU_MEMORY_POOL_MB
}

fn default_repeats() -> u32 {
    1
}

impl FileConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(BenchError::PathNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // An empty file deserializes to `()`, not a mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: FileConfig = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}

/// Values given explicitly on the command line. `None` keeps the file value.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub model_file: Option<String>,
    pub params_file: Option<String>,
    pub model_dir: Option<String>,
    pub warmup: Option<u32>,
    pub repeats: Option<u32>,
    pub use_gpu: Option<bool>,
    pub format: OutputFormat,
}

impl BenchConfig {
    /// Merge the file configuration with command-line overrides.
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Result<Self> {
        let model_file = overrides
            .model_file
            .or(file.model.model_file)
            .unwrap_or_default();
        let params_file = overrides
            .params_file
            .or(file.model.params_file)
            .unwrap_or_default();
        let model_dir = overrides
            .model_dir
            .or(file.model.model_dir)
            .unwrap_or_default();

        let repeats = overrides.repeats.unwrap_or(file.bench.repeats);
        if repeats == 0 {
            return Err(BenchError::config("repeats must be at least 1"));
        }

        let use_gpu = overrides.use_gpu.unwrap_or(file.engine.use_gpu);

        Ok(Self {
            engine: EngineConfig {
                model: ModelSource::resolve(&model_file, &params_file, &model_dir),
                backend: Backend::select(
                    use_gpu,
                    file.engine.gpu_device_id,
                    file.engine.gpu_memory_pool_mb,
                ),
                memory_optim: true,
            },
            warmup: overrides.warmup.unwrap_or(file.bench.warmup),
            repeats,
            format: overrides.format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_file_takes_precedence_over_dir() {
        let source = ModelSource::resolve("m/inference.pdmodel", "m/inference.pdiparams", "m");
        assert_eq!(
            source,
            ModelSource::Files {
                model_file: PathBuf::from("m/inference.pdmodel"),
                params_file: PathBuf::from("m/inference.pdiparams"),
            }
        );
    }

    #[test]
    fn model_dir_used_without_model_file() {
        assert_eq!(
            ModelSource::resolve("", "ignored.pdiparams", "bert_model"),
            ModelSource::Dir(PathBuf::from("bert_model"))
        );
        assert_eq!(ModelSource::resolve("", "", ""), ModelSource::Unset);
    }

    #[test]
    fn backends_are_mutually_exclusive() {
        let gpu = Backend::select(true, 0, 100);
        assert!(gpu.uses_gpu());
        assert!(!gpu.uses_mkldnn());
        assert_eq!(
            gpu,
            Backend::Gpu {
                device_id: 0,
                memory_pool_mb: 100
            }
        );

        let cpu = Backend::select(false, 0, 100);
        assert!(!cpu.uses_gpu());
        assert!(cpu.uses_mkldnn());
    }

    #[test]
    fn defaults_match_flag_defaults() {
        let config = BenchConfig::resolve(FileConfig::default(), Overrides::default()).unwrap();
        assert_eq!(config.warmup, 0);
        assert_eq!(config.repeats, 1);
        assert_eq!(config.engine.model, ModelSource::Unset);
        assert_eq!(config.engine.backend, Backend::Cpu { mkldnn: true });
        assert!(config.engine.memory_optim);
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn parses_yaml_sections() {
        let yaml = r#"
model:
  model_dir: ./bert_sst2
engine:
  use_gpu: true
  gpu_device_id: 1
  gpu_memory_pool_mb: 512
bench:
  warmup: 10
  repeats: 100
"#;
        let file = FileConfig::from_yaml_str(yaml).unwrap();
        let config = BenchConfig::resolve(file, Overrides::default()).unwrap();
        assert_eq!(config.engine.model, ModelSource::Dir(PathBuf::from("./bert_sst2")));
        assert_eq!(
            config.engine.backend,
            Backend::Gpu {
                device_id: 1,
                memory_pool_mb: 512
            }
        );
        assert_eq!(config.warmup, 10);
        assert_eq!(config.repeats, 100);
    }

    #[test]
    fn empty_yaml_is_default() {
        let file = FileConfig::from_yaml_str("  \n").unwrap();
        assert_eq!(file.bench.repeats, 1);
        assert_eq!(file.engine.gpu_memory_pool_mb, DEFAULT_GPU_MEMORY_POOL_MB);
    }

    #[test]
    fn command_line_overrides_file() {
        let file = FileConfig::from_yaml_str("bench:\n  warmup: 5\n  repeats: 20\n").unwrap();
        let overrides = Overrides {
            model_file: Some("a.pdmodel".into()),
            params_file: Some("a.pdiparams".into()),
            repeats: Some(3),
            ..Default::default()
        };
        let config = BenchConfig::resolve(file, overrides).unwrap();
        assert_eq!(config.warmup, 5);
        assert_eq!(config.repeats, 3);
        assert!(matches!(config.engine.model, ModelSource::Files { .. }));
    }

    #[test]
    fn explicit_cpu_overrides_gpu_file() {
        let yaml = "engine:\n  use_gpu: true\n";

        let file = FileConfig::from_yaml_str(yaml).unwrap();
        let config = BenchConfig::resolve(file, Overrides::default()).unwrap();
        assert!(config.engine.backend.uses_gpu());

        let file = FileConfig::from_yaml_str(yaml).unwrap();
        let overrides = Overrides {
            use_gpu: Some(false),
            ..Default::default()
        };
        let config = BenchConfig::resolve(file, overrides).unwrap();
        assert_eq!(config.engine.backend, Backend::Cpu { mkldnn: true });
    }

    #[test]
    fn memory_optim_always_enabled() {
        let file = FileConfig::from_yaml_str("engine:\n  memory_optim: false\n").unwrap();
        let config = BenchConfig::resolve(file, Overrides::default()).unwrap();
        assert!(config.engine.memory_optim);
    }

    #[test]
    fn zero_repeats_rejected() {
        let file = FileConfig::from_yaml_str("bench:\n  repeats: 0\n").unwrap();
        let err = BenchConfig::resolve(file, Overrides::default()).unwrap_err();
        assert!(matches!(err, BenchError::Config(_)));
    }

    #[test]
    fn missing_config_file() {
        let err = FileConfig::from_yaml_file("/nonexistent/bench.yaml").unwrap_err();
        assert!(matches!(err, BenchError::PathNotFound(_)));
    }
}
