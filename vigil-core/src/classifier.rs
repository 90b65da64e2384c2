//! Classifier seam
//!
//! The deployed model is opaque to the pipeline: a window of conditioned
//! samples goes in, per-class scores come out. The backend lives in the
//! drivers crate; tests inject scripted ones.

use heapless::Vec;

use crate::window::Window;

/// Upper bound on model classes the pipeline carries scores for
pub const MAX_LABELS: usize = 8;

/// Nonzero status returned by the classification backend
///
/// The code is whatever the backend reports; the pipeline only cares that
/// the cycle produced no usable scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClassifyError(pub i32);

/// Rejected at backend construction: the compiled model does not match the
/// geometry the sampler feeds it
///
/// A mismatched backend must never come up half-working; windows read with
/// the wrong frame width classify garbage with full confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModelMismatch {
    /// Scalars per frame differ from the sampler's axis count
    FrameWidth { model: usize, expected: usize },
    /// Total window length differs from the rolling buffer's
    WindowLen { model: usize, expected: usize },
    /// Label set size differs from the one this build maps states from
    LabelCount { model: usize, expected: usize },
    /// Label text at `index` differs from the expected set
    Label { index: usize },
}

/// One window's worth of per-class confidence scores
///
/// Scores align index-for-index with the backend's label set. The anomaly
/// score is absent for models deployed without an anomaly head.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub scores: Vec<f32, MAX_LABELS>,
    pub anomaly: Option<f32>,
}

impl Classification {
    /// Build from a score slice, truncating anything past `MAX_LABELS`
    pub fn from_scores(scores: &[f32], anomaly: Option<f32>) -> Self {
        let take = scores.len().min(MAX_LABELS);
        Self {
            scores: Vec::from_slice(&scores[..take]).unwrap_or_default(),
            anomaly,
        }
    }
}

/// A motion classification backend
pub trait Classifier {
    /// Class labels in the backend's score order
    fn labels(&self) -> &'static [&'static str];

    /// Classify one window of conditioned samples
    fn classify(&mut self, window: &Window) -> Result<Classification, ClassifyError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_scores_copies_in_order() {
        let c = Classification::from_scores(&[0.1, 0.2, 0.7], Some(0.05));
        assert_eq!(c.scores.as_slice(), &[0.1, 0.2, 0.7]);
        assert_eq!(c.anomaly, Some(0.05));
    }

    #[test]
    fn test_from_scores_truncates_past_capacity() {
        let many = [0.1f32; 12];
        let c = Classification::from_scores(&many, None);
        assert_eq!(c.scores.len(), MAX_LABELS);
    }

    #[test]
    fn test_from_scores_empty() {
        let c = Classification::from_scores(&[], None);
        assert!(c.scores.is_empty());
        assert!(c.anomaly.is_none());
    }
}
