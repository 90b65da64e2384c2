//! Label smoothing across consecutive classification windows
//!
//! Windows overlap heavily (one new frame per sample tick, one
//! classification every poll), so a single confident "falling" window inside
//! a walk is noise, not a fall. A label becomes stable only when enough of
//! the recent history agrees on it; until a new label earns that, the
//! previously stable one keeps being reported.

use crate::classifier::{Classification, MAX_LABELS};
use crate::config::{ANOMALY_LOW, CONFIDENCE_HIGH, SMOOTH_HISTORY, SMOOTH_MIN_AGREEMENT};

/// One window's classification reduced to a vote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reading {
    /// Index into the backend's label set; its score cleared the
    /// confidence threshold
    Label(u8),
    /// No class score cleared the threshold
    Uncertain,
    /// Anomaly score flagged the window as unlike anything trained
    Anomalous,
}

impl Reading {
    /// Reduce a classification to a vote
    ///
    /// The strongest class wins its vote only when its score reaches
    /// `CONFIDENCE_HIGH`; an anomaly score past `ANOMALY_LOW` sets the
    /// window aside entirely, however confident the classes look.
    pub fn from_classification(result: &Classification) -> Self {
        if let Some(anomaly) = result.anomaly {
            if anomaly >= ANOMALY_LOW {
                return Reading::Anomalous;
            }
        }

        let mut best: Option<(usize, f32)> = None;
        for (index, &score) in result.scores.iter().enumerate() {
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((index, score)),
            }
        }

        match best {
            Some((index, score)) if score >= CONFIDENCE_HIGH => Reading::Label(index as u8),
            _ => Reading::Uncertain,
        }
    }
}

/// Majority-vote smoother over the last `SMOOTH_HISTORY` readings
#[derive(Debug, Clone)]
pub struct Smoother {
    history: [Reading; SMOOTH_HISTORY],
    cursor: usize,
    stable: Option<u8>,
}

impl Smoother {
    pub const fn new() -> Self {
        Self {
            history: [Reading::Uncertain; SMOOTH_HISTORY],
            cursor: 0,
            stable: None,
        }
    }

    /// Record one vote and report the smoothed outcome
    ///
    /// Returns the stable label index, or `None` while no label has ever
    /// earned stability. A label that loses its majority is still reported
    /// until some other label wins one; only agreement changes the answer.
    pub fn update(&mut self, reading: Reading) -> Option<u8> {
        self.history[self.cursor] = reading;
        self.cursor = (self.cursor + 1) % SMOOTH_HISTORY;

        let mut counts = [0usize; MAX_LABELS];
        for entry in &self.history {
            if let Reading::Label(index) = entry {
                let index = *index as usize;
                if index < MAX_LABELS {
                    counts[index] += 1;
                }
            }
        }

        let mut top: Option<(usize, usize)> = None;
        for (index, &count) in counts.iter().enumerate() {
            match top {
                Some((_, best)) if count <= best => {}
                _ => top = Some((index, count)),
            }
        }

        if let Some((index, count)) = top {
            if count >= SMOOTH_MIN_AGREEMENT {
                self.stable = Some(index as u8);
            }
        }

        self.stable
    }

    /// Currently stable label index, if any
    pub fn stable(&self) -> Option<u8> {
        self.stable
    }
}

impl Default for Smoother {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Classification;

    fn scored(scores: &[f32], anomaly: f32) -> Classification {
        Classification::from_scores(scores, Some(anomaly))
    }

    #[test]
    fn test_confident_class_votes() {
        let r = Reading::from_classification(&scored(&[0.05, 0.85, 0.05, 0.05], 0.02));
        assert_eq!(r, Reading::Label(1));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let r = Reading::from_classification(&scored(&[0.7, 0.1, 0.1, 0.1], 0.0));
        assert_eq!(r, Reading::Label(0));
    }

    #[test]
    fn test_weak_scores_are_uncertain() {
        let r = Reading::from_classification(&scored(&[0.4, 0.3, 0.2, 0.1], 0.02));
        assert_eq!(r, Reading::Uncertain);
    }

    #[test]
    fn test_empty_scores_are_uncertain() {
        let r = Reading::from_classification(&Classification::from_scores(&[], None));
        assert_eq!(r, Reading::Uncertain);
    }

    #[test]
    fn test_anomaly_overrides_confident_class() {
        let r = Reading::from_classification(&scored(&[0.0, 0.95, 0.0, 0.0], 0.6));
        assert_eq!(r, Reading::Anomalous);
    }

    #[test]
    fn test_missing_anomaly_head_never_anomalous() {
        let r = Reading::from_classification(&Classification::from_scores(&[0.9, 0.1], None));
        assert_eq!(r, Reading::Label(0));
    }

    #[test]
    fn test_stability_needs_min_agreement() {
        let mut s = Smoother::new();
        for _ in 0..SMOOTH_MIN_AGREEMENT - 1 {
            assert_eq!(s.update(Reading::Label(2)), None);
        }
        // The seventh agreeing vote tips it
        assert_eq!(s.update(Reading::Label(2)), Some(2));
    }

    #[test]
    fn test_alternating_votes_never_stabilize() {
        let mut s = Smoother::new();
        for i in 0..40 {
            let vote = if i % 2 == 0 { Reading::Label(0) } else { Reading::Label(3) };
            assert_eq!(s.update(vote), None);
        }
    }

    #[test]
    fn test_prior_stable_label_is_held() {
        let mut s = Smoother::new();
        for _ in 0..SMOOTH_HISTORY {
            s.update(Reading::Label(1));
        }
        assert_eq!(s.stable(), Some(1));

        // Disagreement without a new majority keeps reporting the old label
        for i in 0..20 {
            let vote = if i % 2 == 0 { Reading::Label(0) } else { Reading::Label(3) };
            assert_eq!(s.update(vote), Some(1));
        }
    }

    #[test]
    fn test_new_majority_replaces_stable_label() {
        let mut s = Smoother::new();
        for _ in 0..SMOOTH_HISTORY {
            s.update(Reading::Label(1));
        }
        let mut flipped = None;
        for n in 0..SMOOTH_HISTORY {
            let out = s.update(Reading::Label(3));
            if out == Some(3) && flipped.is_none() {
                flipped = Some(n + 1);
            }
        }
        // Exactly min-agreement votes of the new label are needed
        assert_eq!(flipped, Some(SMOOTH_MIN_AGREEMENT));
    }

    #[test]
    fn test_uncertain_and_anomalous_votes_never_stabilize() {
        let mut s = Smoother::new();
        for _ in 0..SMOOTH_HISTORY {
            assert_eq!(s.update(Reading::Uncertain), None);
        }
        for _ in 0..SMOOTH_HISTORY {
            assert_eq!(s.update(Reading::Anomalous), None);
        }
    }

    #[test]
    fn test_out_of_range_label_index_is_ignored() {
        let mut s = Smoother::new();
        for _ in 0..SMOOTH_HISTORY {
            assert_eq!(s.update(Reading::Label(200)), None);
        }
    }
}
