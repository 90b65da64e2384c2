//! Range conditioning for raw accelerometer readings
//!
//! Readings beyond the trained range are clamped rather than passed through:
//! the model never saw a 16 g spike during training, and feeding it one
//! produces garbage scores instead of a graceful saturation.

use crate::config::{AXES, GRAVITY_MS2, MAX_ACCEPTED_RANGE_G};

/// Sign of a reading, with zero counted as positive
fn signum(value: f32) -> f32 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Clamp one axis reading to the accepted range, preserving its sign
///
/// # Arguments
/// * `raw_g` - raw accelerometer reading in g
pub fn clamp_axis(raw_g: f32) -> f32 {
    if raw_g > MAX_ACCEPTED_RANGE_G || raw_g < -MAX_ACCEPTED_RANGE_G {
        signum(raw_g) * MAX_ACCEPTED_RANGE_G
    } else {
        raw_g
    }
}

/// Convert a clamped g reading to m/s^2, the unit the model expects
pub fn to_ms2(g: f32) -> f32 {
    g * GRAVITY_MS2
}

/// Condition a full triple: clamp each axis, then convert
pub fn condition(raw_g: [f32; AXES]) -> [f32; AXES] {
    [
        to_ms2(clamp_axis(raw_g[0])),
        to_ms2(clamp_axis(raw_g[1])),
        to_ms2(clamp_axis(raw_g[2])),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_passes_through() {
        assert_eq!(clamp_axis(0.0), 0.0);
        assert_eq!(clamp_axis(1.0), 1.0);
        assert_eq!(clamp_axis(-1.5), -1.5);
        assert_eq!(clamp_axis(2.0), 2.0);
        assert_eq!(clamp_axis(-2.0), -2.0);
    }

    #[test]
    fn test_out_of_range_clamps_with_sign() {
        assert_eq!(clamp_axis(2.1), 2.0);
        assert_eq!(clamp_axis(16.0), 2.0);
        assert_eq!(clamp_axis(-2.1), -2.0);
        assert_eq!(clamp_axis(-16.0), -2.0);
    }

    #[test]
    fn test_conversion_uses_standard_gravity() {
        assert_eq!(to_ms2(1.0), 9.80665);
        assert_eq!(to_ms2(-2.0), -19.6133);
        assert_eq!(to_ms2(0.0), 0.0);
    }

    #[test]
    fn test_conditioned_magnitude_is_bounded() {
        // Sweep well past the clamp on both sides; every output must stay
        // within the converted range and keep the input's sign
        let bound = MAX_ACCEPTED_RANGE_G * GRAVITY_MS2;
        let mut raw = -50.0f32;
        while raw <= 50.0 {
            let out = to_ms2(clamp_axis(raw));
            assert!(out <= bound && out >= -bound, "unbounded for {raw}");
            if raw > 0.0 {
                assert!(out >= 0.0, "sign flipped for {raw}");
            } else if raw < 0.0 {
                assert!(out <= 0.0, "sign flipped for {raw}");
            }
            raw += 0.37;
        }
    }

    #[test]
    fn test_condition_triple() {
        let out = condition([5.0, 0.5, -9.0]);
        assert_eq!(out[0], 2.0 * GRAVITY_MS2);
        assert_eq!(out[1], 0.5 * GRAVITY_MS2);
        assert_eq!(out[2], -2.0 * GRAVITY_MS2);
    }
}
