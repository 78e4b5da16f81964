//! The capability surface the runner needs from an inference engine.

use ndarray::ArrayD;

use crate::error::Result;

/// A loaded model that can bind inputs, run, and hand back outputs.
///
/// Tensor handles stay inside the implementation; callers only address
/// inputs and outputs by name. A predictor is owned by one thread and
/// driven sequentially.
pub trait Predictor {
    /// Input names in the engine's declaration order.
    fn input_names(&self) -> Result<Vec<String>>;

    /// Output names in the engine's declaration order.
    fn output_names(&self) -> Result<Vec<String>>;

    /// Reshape the named input to `shape` and copy `data` into it.
    ///
    /// `data.len()` must equal the product of `shape`.
    fn copy_input(&mut self, name: &str, shape: &[usize], data: &[i64]) -> Result<()>;

    /// Execute one inference pass over the bound inputs.
    fn run(&mut self) -> Result<()>;

    /// Shape of the named output as reported after the last pass.
    fn output_shape(&self, name: &str) -> Result<Vec<usize>>;

    /// Copy the named output into `out`.
    ///
    /// `out.len()` must equal the product of [`Predictor::output_shape`].
    fn copy_output(&self, name: &str, out: &mut [f32]) -> Result<()>;
}

/// Number of elements in a tensor of the given shape.
pub fn numel(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Output tensor copied back from the engine.
#[derive(Debug, Clone)]
pub struct TensorData {
    /// The tensor data as a dynamic-dimensional array.
    pub data: ArrayD<f32>,
}

impl TensorData {
    /// Get the shape of the tensor.
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Get the total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the tensor is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat view of the elements in logical order.
    pub fn to_vec(&self) -> Vec<f32> {
        self.data.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    #[test]
    fn numel_is_product_of_dims() {
        assert_eq!(numel(&[1, 19]), 19);
        assert_eq!(numel(&[1, 2]), 2);
        assert_eq!(numel(&[2, 0, 3]), 0);
        // Scalar shape holds one element.
        assert_eq!(numel(&[]), 1);
    }

    #[test]
    fn tensor_data_accessors() {
        let data = ArrayD::from_shape_vec(IxDyn(&[1, 2]), vec![0.25f32, -1.5]).unwrap();
        let tensor = TensorData { data };
        assert_eq!(tensor.shape(), &[1, 2]);
        assert_eq!(tensor.len(), 2);
        assert!(!tensor.is_empty());
        assert_eq!(tensor.to_vec(), vec![0.25, -1.5]);
    }
}
