//! The fixed example sentence fed to the classifier.

use ndarray::Array2;

use crate::error::{BenchError, Result};

/// Raw text of the example sentence.
pub const SENTENCE: &str = "against shimmering cinematography that lends the setting the ethereal beauty of an asian landscape painting";

/// Sequence length of the tokenized sentence, including `[CLS]` and `[SEP]`.
pub const SEQ_LEN: usize = 19;

/// Input shape: batch size 1.
pub const INPUT_SHAPE: [usize; 2] = [1, SEQ_LEN];

/// WordPiece ids of [`SENTENCE`].
pub const TOKEN_IDS: [i64; SEQ_LEN] = [
    101, 2114, 22349, 16434, 2008, 18496, 2015, 1996, 4292, 1996, 28855, 15879, 5053, 1997, 2019,
    4004, 5957, 4169, 102,
];

/// Segment ids of [`SENTENCE`]; single-sentence input is all zeros.
pub const SEGMENT_IDS: [i64; SEQ_LEN] = [0; SEQ_LEN];

/// A tokenized sentence ready to bind to the predictor inputs.
#[derive(Debug, Clone)]
pub struct Sample {
    pub text: &'static str,
    pub token_ids: Array2<i64>,
    pub segment_ids: Array2<i64>,
}

impl Sample {
    /// The built-in example sentence.
    pub fn sst2_example() -> Result<Self> {
        let token_ids = Array2::from_shape_vec(INPUT_SHAPE, TOKEN_IDS.to_vec())
            .map_err(|e| BenchError::tensor(format!("Token ids: {}", e)))?;
        let segment_ids = Array2::from_shape_vec(INPUT_SHAPE, SEGMENT_IDS.to_vec())
            .map_err(|e| BenchError::tensor(format!("Segment ids: {}", e)))?;
        Ok(Self {
            text: SENTENCE,
            token_ids,
            segment_ids,
        })
    }

    /// Input shape shared by both buffers.
    pub fn shape(&self) -> &[usize] {
        self.token_ids.shape()
    }

    /// Inputs in the order the model declares them.
    pub fn inputs(&self) -> [&Array2<i64>; 2] {
        [&self.token_ids, &self.segment_ids]
    }
}
