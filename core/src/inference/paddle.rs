//! Safe wrapper over a Paddle Inference predictor.

use std::ffi::{CStr, CString};
use std::path::Path;

use tracing::debug;

use super::ffi;
use super::predictor::{numel, Predictor};
use crate::config::{Backend, EngineConfig, ModelSource};
use crate::error::{BenchError, Result};

/// A Paddle Inference predictor created through the C API.
///
/// # Example
///
/// ```ignore
/// use bert_bench::config::{Backend, EngineConfig, ModelSource};
/// use bert_bench::inference::PaddlePredictor;
///
/// let config = EngineConfig {
///     model: ModelSource::Dir("bert_sst2".into()),
///     backend: Backend::default(),
///     memory_optim: true,
/// };
/// let predictor = PaddlePredictor::create(&config)?;
/// ```
pub struct PaddlePredictor {
    handle: ffi::PredictorHandle,
}

/// Owned `PD_Tensor`, destroyed on drop.
struct Tensor(ffi::TensorHandle);

impl Drop for Tensor {
    fn drop(&mut self) {
        unsafe { ffi::PD_TensorDestroy(self.0) }
    }
}

fn path_cstring(path: &Path) -> Result<CString> {
    CString::new(path.to_string_lossy().as_bytes())
        .map_err(|_| BenchError::model_load(path.display(), "path contains a NUL byte"))
}

fn name_cstring(name: &str) -> Result<CString> {
    CString::new(name).map_err(|_| BenchError::tensor(format!("Invalid tensor name: {}", name)))
}

/// Take ownership of a C string array, copying it into Rust strings.
///
/// # Safety
///
/// `array` must be null or a pointer returned by the Paddle C API that has
/// not been freed yet.
unsafe fn take_cstr_array(array: *mut ffi::OneDimArrayCstr) -> Result<Vec<String>> {
    if array.is_null() {
        return Err(BenchError::tensor("Engine returned no tensor names"));
    }
    let arr = &*array;
    let names = if arr.size == 0 || arr.data.is_null() {
        Vec::new()
    } else {
        std::slice::from_raw_parts(arr.data, arr.size)
            .iter()
            .map(|&ptr| CStr::from_ptr(ptr).to_string_lossy().into_owned())
            .collect()
    };
    ffi::PD_OneDimArrayCstrDestroy(array);
    Ok(names)
}

impl PaddlePredictor {
    /// Configure the engine and load the model.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::PathNotFound`] when a configured model path is
    /// missing and [`BenchError::ModelLoad`] when the engine refuses it.
    pub fn create(config: &EngineConfig) -> Result<Self> {
        // Convert everything up front so no early return leaks the config.
        let model = match &config.model {
            ModelSource::Files {
                model_file,
                params_file,
            } => {
                if !model_file.exists() {
                    return Err(BenchError::PathNotFound(model_file.clone()));
                }
                (path_cstring(model_file)?, Some(path_cstring(params_file)?))
            }
            ModelSource::Dir(dir) => {
                if !dir.exists() {
                    return Err(BenchError::PathNotFound(dir.clone()));
                }
                (path_cstring(dir)?, None)
            }
            ModelSource::Unset => return Err(BenchError::NoModel),
        };

        let pd_config = unsafe { ffi::PD_ConfigCreate() };
        if pd_config.is_null() {
            return Err(BenchError::model_load(&config.model, "PD_ConfigCreate returned null"));
        }

        unsafe {
            match &model {
                (prog, Some(params)) => {
                    ffi::PD_ConfigSetModel(pd_config, prog.as_ptr(), params.as_ptr())
                }
                (dir, None) => ffi::PD_ConfigSetModelDir(pd_config, dir.as_ptr()),
            }

            match config.backend {
                Backend::Gpu {
                    device_id,
                    memory_pool_mb,
                } => ffi::PD_ConfigEnableUseGpu(
                    pd_config,
                    memory_pool_mb,
                    device_id,
                    ffi::PD_PRECISION_FLOAT32,
                ),
                Backend::Cpu { mkldnn: true } => ffi::PD_ConfigEnableMKLDNN(pd_config),
                Backend::Cpu { mkldnn: false } => {}
            }

            if config.memory_optim {
                ffi::PD_ConfigEnableMemoryOptim(pd_config, ffi::PD_TRUE);
            }
        }
        debug!("Paddle config ready: model={} backend={}", config.model, config.backend);

        // The predictor takes ownership of pd_config, even on failure.
        let handle = unsafe { ffi::PD_PredictorCreate(pd_config) };
        if handle.is_null() {
            return Err(BenchError::model_load(
                &config.model,
                "PD_PredictorCreate returned null",
            ));
        }

        Ok(Self { handle })
    }

    fn input_handle(&self, name: &str) -> Result<Tensor> {
        let cname = name_cstring(name)?;
        let handle = unsafe { ffi::PD_PredictorGetInputHandle(self.handle, cname.as_ptr()) };
        if handle.is_null() {
            return Err(BenchError::tensor(format!("No input tensor named {}", name)));
        }
        Ok(Tensor(handle))
    }

    fn output_handle(&self, name: &str) -> Result<Tensor> {
        let cname = name_cstring(name)?;
        let handle = unsafe { ffi::PD_PredictorGetOutputHandle(self.handle, cname.as_ptr()) };
        if handle.is_null() {
            return Err(BenchError::tensor(format!("No output tensor named {}", name)));
        }
        Ok(Tensor(handle))
    }

    fn tensor_shape(tensor: &Tensor) -> Result<Vec<usize>> {
        unsafe {
            let array = ffi::PD_TensorGetShape(tensor.0);
            if array.is_null() {
                return Err(BenchError::tensor("Engine returned no tensor shape"));
            }
            let arr = &*array;
            let dims = if arr.size == 0 || arr.data.is_null() {
                Vec::new()
            } else {
                std::slice::from_raw_parts(arr.data, arr.size).to_vec()
            };
            ffi::PD_OneDimArrayInt32Destroy(array);

            dims.into_iter()
                .map(|d| {
                    usize::try_from(d)
                        .map_err(|_| BenchError::tensor(format!("Negative dimension {}", d)))
                })
                .collect()
        }
    }
}

impl Predictor for PaddlePredictor {
    fn input_names(&self) -> Result<Vec<String>> {
        unsafe { take_cstr_array(ffi::PD_PredictorGetInputNames(self.handle)) }
    }

    fn output_names(&self) -> Result<Vec<String>> {
        unsafe { take_cstr_array(ffi::PD_PredictorGetOutputNames(self.handle)) }
    }

    fn copy_input(&mut self, name: &str, shape: &[usize], data: &[i64]) -> Result<()> {
        if data.len() != numel(shape) {
            return Err(BenchError::tensor(format!(
                "Input {} has {} elements, shape {:?} needs {}",
                name,
                data.len(),
                shape,
                numel(shape)
            )));
        }
        let mut dims = shape
            .iter()
            .map(|&d| {
                i32::try_from(d)
                    .map_err(|_| BenchError::tensor(format!("Dimension {} out of range", d)))
            })
            .collect::<Result<Vec<i32>>>()?;

        let tensor = self.input_handle(name)?;
        unsafe {
            ffi::PD_TensorReshape(tensor.0, dims.len(), dims.as_mut_ptr());
            ffi::PD_TensorCopyFromCpuInt64(tensor.0, data.as_ptr());
        }
        Ok(())
    }

    fn run(&mut self) -> Result<()> {
        let ok = unsafe { ffi::PD_PredictorRun(self.handle) };
        if ok == 0 {
            return Err(BenchError::engine("PD_PredictorRun returned false"));
        }
        Ok(())
    }

    fn output_shape(&self, name: &str) -> Result<Vec<usize>> {
        let tensor = self.output_handle(name)?;
        Self::tensor_shape(&tensor)
    }

    fn copy_output(&self, name: &str, out: &mut [f32]) -> Result<()> {
        let tensor = self.output_handle(name)?;
        let shape = Self::tensor_shape(&tensor)?;
        // CopyToCpu writes numel(shape) floats unconditionally.
        if out.len() != numel(&shape) {
            return Err(BenchError::tensor(format!(
                "Output buffer holds {} elements, tensor {} has shape {:?}",
                out.len(),
                name,
                shape
            )));
        }
        unsafe { ffi::PD_TensorCopyToCpuFloat(tensor.0, out.as_mut_ptr()) };
        Ok(())
    }
}

impl Drop for PaddlePredictor {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            unsafe {
                ffi::PD_PredictorDestroy(self.handle);
            }
        }
    }
}
