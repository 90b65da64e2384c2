//! Pipeline geometry and thresholds
//!
//! The window geometry is dictated by the deployed model: it was trained on
//! 125 consecutive 3-axis frames at 62.5 Hz. Everything else keys off those
//! three numbers.

/// Accelerometer axes per frame
pub const AXES: usize = 3;

/// Frames per classification window
pub const N_FRAMES: usize = 125;

/// Scalars per classification window
pub const WINDOW_LEN: usize = AXES * N_FRAMES;

/// Sampling period in milliseconds (62.5 Hz, the frame rate the model
/// was trained at)
pub const SAMPLE_INTERVAL_MS: u64 = 16;

/// Best-effort delay between classification attempts, in milliseconds
pub const INFERENCE_INTERVAL_MS: u64 = 200;

/// One-shot delay before the first classification attempt: one full window
/// of samples plus a little margin
pub const STARTUP_DELAY_MS: u64 = SAMPLE_INTERVAL_MS * N_FRAMES as u64 + 100;

/// Largest accepted per-axis reading, in g
pub const MAX_ACCEPTED_RANGE_G: f32 = 2.0;

/// Standard gravity, for converting g readings to m/s^2
pub const GRAVITY_MS2: f32 = 9.80665;

/// Classification results remembered by the label smoother
pub const SMOOTH_HISTORY: usize = 10;

/// Matching results required within the history before a label is stable
pub const SMOOTH_MIN_AGREEMENT: usize = 7;

/// Score a class must reach for its window to count as a vote
pub const CONFIDENCE_HIGH: f32 = 0.7;

/// Anomaly score at which a window is set aside as anomalous
pub const ANOMALY_LOW: f32 = 0.3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_geometry() {
        assert_eq!(WINDOW_LEN, 375);
        assert_eq!(WINDOW_LEN % AXES, 0);
    }

    #[test]
    fn test_startup_covers_one_window() {
        assert!(STARTUP_DELAY_MS > SAMPLE_INTERVAL_MS * N_FRAMES as u64);
    }

    #[test]
    fn test_agreement_fits_history() {
        assert!(SMOOTH_MIN_AGREEMENT <= SMOOTH_HISTORY);
    }
}
