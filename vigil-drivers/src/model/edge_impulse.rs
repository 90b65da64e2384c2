//! Edge Impulse classifier backend
//!
//! Two interchangeable backends sit behind the same type:
//!
//! 1. STUB (default) - a deterministic heuristic over window energy, so the
//!    rest of the pipeline can be built, tested, and demoed without the C++
//!    SDK compiled in. Same labels, same score shape, none of the weights.
//! 2. FFI (`edge-impulse` feature) - the real compiled model, reached
//!    through a small C shim the build script compiles alongside the SDK.
//!
//! Either way, construction checks the model's geometry against the
//! pipeline's before anything is classified.

use vigil_core::classifier::{Classification, Classifier, ClassifyError, ModelMismatch};
use vigil_core::config::{AXES, WINDOW_LEN};
use vigil_core::window::Window;

#[cfg(not(feature = "edge-impulse"))]
use vigil_core::config::{GRAVITY_MS2, N_FRAMES};

/// Class labels in the model's output order (alphabetical, as generated)
pub const LABELS: [&str; 4] = ["falling", "idle", "uncertain", "walking"];

/// The deployed motion model
pub struct EdgeImpulse {
    has_anomaly: bool,
}

impl EdgeImpulse {
    /// Bind the model, checking its geometry against the pipeline's
    ///
    /// A model exported for a different window shape or label set is
    /// refused here, before it can misread a single window.
    pub fn new() -> Result<Self, ModelMismatch> {
        #[cfg(not(feature = "edge-impulse"))]
        return Ok(Self { has_anomaly: true });

        #[cfg(feature = "edge-impulse")]
        return Ok(Self {
            has_anomaly: ffi::probe_geometry()?,
        });
    }
}

impl Classifier for EdgeImpulse {
    fn labels(&self) -> &'static [&'static str] {
        &LABELS
    }

    fn classify(&mut self, window: &Window) -> Result<Classification, ClassifyError> {
        #[cfg(not(feature = "edge-impulse"))]
        return Ok(stub_inference(window, self.has_anomaly));

        #[cfg(feature = "edge-impulse")]
        return ffi::run(window, self.has_anomaly);
    }
}

// ---------------------------------------------------------------------------
// Stub backend - development and host testing without the C++ SDK
// ---------------------------------------------------------------------------

/// Mean squared deviation from 1 g below which a window reads as idle
#[cfg(not(feature = "edge-impulse"))]
const STUB_IDLE_BELOW: f32 = 4.0;

/// Peak squared deviation from 1 g above which a window reads as falling
#[cfg(not(feature = "edge-impulse"))]
const STUB_FALL_ABOVE: f32 = 300.0;

/// Heuristic stand-in for the model: compares each frame's squared
/// magnitude against 1 g and scores by how far and how hard it deviates.
/// Deterministic on purpose - tests feed synthetic windows and rely on the
/// label coming back the same every time.
#[cfg(not(feature = "edge-impulse"))]
fn stub_inference(window: &Window, has_anomaly: bool) -> Classification {
    const GRAVITY_SQ: f32 = GRAVITY_MS2 * GRAVITY_MS2;

    let mut deviation_sum = 0.0f32;
    let mut deviation_peak = 0.0f32;
    for frame in window.chunks_exact(AXES) {
        let magnitude_sq = frame[0] * frame[0] + frame[1] * frame[1] + frame[2] * frame[2];
        let deviation = if magnitude_sq > GRAVITY_SQ {
            magnitude_sq - GRAVITY_SQ
        } else {
            GRAVITY_SQ - magnitude_sq
        };
        deviation_sum += deviation;
        if deviation > deviation_peak {
            deviation_peak = deviation;
        }
    }
    let deviation_mean = deviation_sum / N_FRAMES as f32;

    // Winner takes 0.91, the rest split the remainder
    let winner = if deviation_peak > STUB_FALL_ABOVE {
        0 // falling
    } else if deviation_mean < STUB_IDLE_BELOW {
        1 // idle
    } else {
        3 // walking
    };
    let mut scores = [0.03f32; 4];
    scores[winner] = 0.91;

    // Kept small: the stub only knows trained-looking motion
    let anomaly = if has_anomaly {
        Some((deviation_mean / 2000.0).min(0.2))
    } else {
        None
    };

    Classification::from_scores(&scores, anomaly)
}

// ---------------------------------------------------------------------------
// FFI backend - the compiled Edge Impulse SDK behind the C shim
// ---------------------------------------------------------------------------

#[cfg(feature = "edge-impulse")]
#[allow(unsafe_code)]
mod ffi {
    use core::ffi::{c_char, c_int, CStr};

    use vigil_core::classifier::{Classification, ClassifyError, ModelMismatch, MAX_LABELS};
    use vigil_core::config::{AXES, WINDOW_LEN};
    use vigil_core::window::Window;

    use super::LABELS;

    extern "C" {
        fn vigil_window_len() -> usize;
        fn vigil_frame_width() -> usize;
        fn vigil_label_count() -> usize;
        fn vigil_label(index: usize) -> *const c_char;
        fn vigil_has_anomaly() -> c_int;
        fn vigil_run_classifier(
            window: *const f32,
            len: usize,
            scores_out: *mut f32,
            scores_cap: usize,
            anomaly_out: *mut f32,
        ) -> c_int;
    }

    /// Compare the compiled model's geometry and labels against this
    /// build's. Returns whether the model carries an anomaly head.
    pub(super) fn probe_geometry() -> Result<bool, ModelMismatch> {
        // SAFETY: the shim's metadata calls are pure reads of constants
        // compiled into the SDK.
        unsafe {
            let width = vigil_frame_width();
            if width != AXES {
                return Err(ModelMismatch::FrameWidth {
                    model: width,
                    expected: AXES,
                });
            }
            let len = vigil_window_len();
            if len != WINDOW_LEN {
                return Err(ModelMismatch::WindowLen {
                    model: len,
                    expected: WINDOW_LEN,
                });
            }
            let count = vigil_label_count();
            if count != LABELS.len() {
                return Err(ModelMismatch::LabelCount {
                    model: count,
                    expected: LABELS.len(),
                });
            }
            for (index, expected) in LABELS.iter().enumerate() {
                let label = CStr::from_ptr(vigil_label(index));
                if label.to_bytes() != expected.as_bytes() {
                    return Err(ModelMismatch::Label { index });
                }
            }
            Ok(vigil_has_anomaly() != 0)
        }
    }

    pub(super) fn run(window: &Window, has_anomaly: bool) -> Result<Classification, ClassifyError> {
        let mut scores = [0.0f32; MAX_LABELS];
        let mut anomaly = -1.0f32;
        // SAFETY: the shim reads `len` floats from `window` and writes at
        // most `scores_cap` floats back; both buffers outlive the call.
        let status = unsafe {
            vigil_run_classifier(
                window.as_ptr(),
                window.len(),
                scores.as_mut_ptr(),
                LABELS.len(),
                &mut anomaly,
            )
        };
        if status != 0 {
            return Err(ClassifyError(status));
        }
        Ok(Classification::from_scores(
            &scores[..LABELS.len()],
            has_anomaly.then_some(anomaly),
        ))
    }
}

#[cfg(all(test, not(feature = "edge-impulse")))]
mod tests {
    use super::*;
    use vigil_core::config::ANOMALY_LOW;

    /// Window of identical frames with the given magnitudes in m/s^2
    fn window_of(frame: [f32; AXES]) -> Window {
        let mut window = [0.0; WINDOW_LEN];
        for slot in window.chunks_exact_mut(AXES) {
            slot.copy_from_slice(&frame);
        }
        window
    }

    fn top_label(c: &Classification) -> &'static str {
        let mut best = 0;
        for (index, &score) in c.scores.iter().enumerate() {
            if score > c.scores[best] {
                best = index;
            }
        }
        LABELS[best]
    }

    #[test]
    fn test_geometry_always_accepted() {
        assert!(EdgeImpulse::new().is_ok());
    }

    #[test]
    fn test_scores_align_with_labels() {
        let mut model = EdgeImpulse::new().unwrap();
        let c = model.classify(&window_of([0.0, 0.0, GRAVITY_MS2])).unwrap();
        assert_eq!(c.scores.len(), model.labels().len());
    }

    #[test]
    fn test_resting_window_reads_idle() {
        let mut model = EdgeImpulse::new().unwrap();
        let c = model.classify(&window_of([0.0, 0.0, GRAVITY_MS2])).unwrap();
        assert_eq!(top_label(&c), "idle");
        assert!(c.scores.iter().any(|&s| s > 0.9));
    }

    #[test]
    fn test_active_window_reads_walking() {
        let mut model = EdgeImpulse::new().unwrap();
        // Steady swing: magnitude alternates around 1 g without spiking
        let mut window = window_of([0.0, 0.0, GRAVITY_MS2]);
        for (k, slot) in window.iter_mut().enumerate() {
            if k % 6 < 3 {
                *slot += 3.0;
            }
        }
        let c = model.classify(&window).unwrap();
        assert_eq!(top_label(&c), "walking");
    }

    #[test]
    fn test_spiking_window_reads_falling() {
        let mut model = EdgeImpulse::new().unwrap();
        // One frame of hard impact in an otherwise quiet window
        let mut window = window_of([0.0, 0.0, GRAVITY_MS2]);
        window[0] = 28.0;
        window[1] = -25.0;
        let c = model.classify(&window).unwrap();
        assert_eq!(top_label(&c), "falling");
    }

    #[test]
    fn test_stub_anomaly_stays_below_threshold() {
        // The stub must never trip the smoother's anomaly gate, or
        // synthetic falls would be set aside instead of classified
        let mut model = EdgeImpulse::new().unwrap();
        for frame in [
            [0.0, 0.0, GRAVITY_MS2],
            [15.0, -12.0, 8.0],
            [19.6, 19.6, -19.6],
        ] {
            let c = model.classify(&window_of(frame)).unwrap();
            assert!(c.anomaly.unwrap() < ANOMALY_LOW);
        }
    }
}
