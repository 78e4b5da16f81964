//! FFI declarations for the Paddle Inference C API (`paddle_inference_c`).
//!
//! This module contains the raw FFI bindings. Use the safe wrapper in the
//! `paddle` module instead of calling these directly.

#![allow(non_snake_case)]

use std::ffi::c_void;
use std::os::raw::c_char;

/// Opaque handle to a `PD_Config`.
pub type ConfigHandle = *mut c_void;

/// Opaque handle to a `PD_Predictor`.
pub type PredictorHandle = *mut c_void;

/// Opaque handle to a `PD_Tensor`.
pub type TensorHandle = *mut c_void;

/// `PD_Bool`.
pub type PdBool = i8;

/// `PD_PrecisionType`.
pub type PrecisionType = i8;

pub const PD_TRUE: PdBool = 1;

pub const PD_PRECISION_FLOAT32: PrecisionType = 0;

/// `PD_OneDimArrayCstr`.
#[repr(C)]
pub struct OneDimArrayCstr {
    pub size: usize,
    pub data: *mut *mut c_char,
}

/// `PD_OneDimArrayInt32`.
#[repr(C)]
pub struct OneDimArrayInt32 {
    pub size: usize,
    pub data: *mut i32,
}

extern "C" {
    // Config
    pub fn PD_ConfigCreate() -> ConfigHandle;
    pub fn PD_ConfigSetModel(
        config: ConfigHandle,
        prog_file_path: *const c_char,
        params_file_path: *const c_char,
    );
    pub fn PD_ConfigSetModelDir(config: ConfigHandle, model_dir: *const c_char);
    pub fn PD_ConfigEnableUseGpu(
        config: ConfigHandle,
        memory_pool_init_size_mb: u64,
        device_id: i32,
        precision_mode: PrecisionType,
    );
    pub fn PD_ConfigEnableMKLDNN(config: ConfigHandle);
    pub fn PD_ConfigEnableMemoryOptim(config: ConfigHandle, x: PdBool);

    // Predictor lifecycle; PD_PredictorCreate takes ownership of the config.
    pub fn PD_PredictorCreate(config: ConfigHandle) -> PredictorHandle;
    pub fn PD_PredictorDestroy(predictor: PredictorHandle);
    pub fn PD_PredictorGetInputNames(predictor: PredictorHandle) -> *mut OneDimArrayCstr;
    pub fn PD_PredictorGetOutputNames(predictor: PredictorHandle) -> *mut OneDimArrayCstr;
    pub fn PD_PredictorGetInputHandle(
        predictor: PredictorHandle,
        name: *const c_char,
    ) -> TensorHandle;
    pub fn PD_PredictorGetOutputHandle(
        predictor: PredictorHandle,
        name: *const c_char,
    ) -> TensorHandle;
    pub fn PD_PredictorRun(predictor: PredictorHandle) -> PdBool;

    // Tensor operations
    pub fn PD_TensorDestroy(tensor: TensorHandle);
    pub fn PD_TensorReshape(tensor: TensorHandle, shape_size: usize, shape: *mut i32);
    pub fn PD_TensorCopyFromCpuInt64(tensor: TensorHandle, data: *const i64);
    pub fn PD_TensorCopyToCpuFloat(tensor: TensorHandle, data: *mut f32);
    pub fn PD_TensorGetShape(tensor: TensorHandle) -> *mut OneDimArrayInt32;

    // Array cleanup
    pub fn PD_OneDimArrayCstrDestroy(array: *mut OneDimArrayCstr);
    pub fn PD_OneDimArrayInt32Destroy(array: *mut OneDimArrayInt32);
}
