//! Two-class softmax and label decision.

use serde::Serialize;
use std::fmt;

use crate::error::{BenchError, Result};

/// Binary sentiment outcome, in the model's output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sentiment {
    Negative,
    Positive,
}

impl Sentiment {
    /// `Negative` only when its probability is strictly larger; ties go to `Positive`.
    pub fn from_probs(probs: [f32; 2]) -> Self {
        if probs[0] > probs[1] {
            Self::Negative
        } else {
            Self::Positive
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negative => write!(f, "Negative"),
            Self::Positive => write!(f, "Positive"),
        }
    }
}

/// Softmax over exactly two raw scores.
///
/// No max subtraction is done, so logits above ~88 overflow `f32::exp`.
pub fn softmax2(logits: &[f32]) -> Result<[f32; 2]> {
    let [a, b] = <[f32; 2]>::try_from(logits).map_err(|_| {
        BenchError::tensor(format!(
            "Expected 2 class scores, got {}",
            logits.len()
        ))
    })?;
    let (ea, eb) = (a.exp(), b.exp());
    let sum = ea + eb;
    Ok([ea / sum, eb / sum])
}

/// Class probabilities and the label derived from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// `[negative, positive]`.
    pub probs: [f32; 2],
    pub label: Sentiment,
}

impl Prediction {
    pub fn from_logits(logits: &[f32]) -> Result<Self> {
        let probs = softmax2(logits)?;
        Ok(Self {
            probs,
            label: Sentiment::from_probs(probs),
        })
    }

    pub fn negative_prob(&self) -> f32 {
        self.probs[0]
    }

    pub fn positive_prob(&self) -> f32 {
        self.probs[1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn softmax_sums_to_one() {
        for logits in [[0.0f32, 0.0], [-2.5, 3.1], [10.0, -10.0], [0.3, 0.2]] {
            let probs = softmax2(&logits).unwrap();
            assert_abs_diff_eq!(probs[0] + probs[1], 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn softmax_matches_reference_values() {
        let probs = softmax2(&[1.0, 2.0]).unwrap();
        let e1 = 1.0f32.exp();
        let e2 = 2.0f32.exp();
        assert_abs_diff_eq!(probs[0], e1 / (e1 + e2), epsilon = 1e-7);
        assert_abs_diff_eq!(probs[1], e2 / (e1 + e2), epsilon = 1e-7);
    }

    #[test]
    fn softmax_requires_two_scores() {
        assert!(softmax2(&[1.0]).is_err());
        assert!(softmax2(&[1.0, 2.0, 3.0]).is_err());
        assert!(softmax2(&[]).is_err());
    }

    #[test]
    fn label_decision() {
        assert_eq!(Sentiment::from_probs([0.7, 0.3]), Sentiment::Negative);
        assert_eq!(Sentiment::from_probs([0.3, 0.7]), Sentiment::Positive);
        assert_eq!(Sentiment::from_probs([0.5, 0.5]), Sentiment::Positive);
    }

    #[test]
    fn equal_logits_are_positive() {
        let prediction = Prediction::from_logits(&[0.42, 0.42]).unwrap();
        assert_eq!(prediction.probs[0], prediction.probs[1]);
        assert_eq!(prediction.label, Sentiment::Positive);
    }

    #[test]
    fn sentiment_display() {
        assert_eq!(Sentiment::Negative.to_string(), "Negative");
        assert_eq!(Sentiment::Positive.to_string(), "Positive");
    }
}
