//! Rolling sample window
//!
//! The newest triple always occupies the last three slots; the whole buffer
//! is ordered oldest-first, which is exactly the layout the model's signal
//! reader walks.

use crate::config::{AXES, WINDOW_LEN};

/// One full window of samples, oldest-first
pub type Window = [f32; WINDOW_LEN];

/// Rolling buffer of the most recent `N_FRAMES` sample triples
#[derive(Debug, Clone)]
pub struct RollingWindow {
    samples: Window,
}

impl RollingWindow {
    pub const fn new() -> Self {
        Self {
            samples: [0.0; WINDOW_LEN],
        }
    }

    /// Discard the oldest triple, opening three cleared slots at the end
    ///
    /// The shift width is fixed at the axis count. Shifting by anything else
    /// would tear frames apart and silently misalign every axis the model
    /// sees from then on.
    pub fn shift_triple(&mut self) {
        self.samples.copy_within(AXES.., 0);
        for slot in &mut self.samples[WINDOW_LEN - AXES..] {
            *slot = 0.0;
        }
    }

    /// Fill the newest triple's slots
    pub fn write_triple(&mut self, x: f32, y: f32, z: f32) {
        self.samples[WINDOW_LEN - AXES] = x;
        self.samples[WINDOW_LEN - AXES + 1] = y;
        self.samples[WINDOW_LEN - AXES + 2] = z;
    }

    /// Shift and write in one step: the per-tick buffer update
    pub fn push_triple(&mut self, triple: [f32; AXES]) {
        self.shift_triple();
        self.write_triple(triple[0], triple[1], triple[2]);
    }

    /// Oldest-first view of the window
    pub fn as_array(&self) -> &Window {
        &self.samples
    }
}

impl Default for RollingWindow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_zeroed() {
        let w = RollingWindow::new();
        assert!(w.as_array().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_write_fills_last_three_slots() {
        let mut w = RollingWindow::new();
        w.write_triple(1.0, 2.0, 3.0);
        let buf = w.as_array();
        assert_eq!(buf[WINDOW_LEN - 3..], [1.0, 2.0, 3.0]);
        assert!(buf[..WINDOW_LEN - 3].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_push_drops_oldest_keeps_order() {
        let mut w = RollingWindow::new();
        // Fill with distinguishable triples: frame k carries (k, k, k)
        for k in 0..(WINDOW_LEN / AXES) {
            w.push_triple([k as f32; AXES]);
        }
        let before = *w.as_array();
        assert_eq!(before[0], 0.0);
        assert_eq!(before[WINDOW_LEN - 1], 124.0);

        w.push_triple([500.0, 501.0, 502.0]);
        let after = w.as_array();

        // Length is fixed by the type; content slid left one frame
        assert_eq!(after[..WINDOW_LEN - AXES], before[AXES..]);
        assert_eq!(after[WINDOW_LEN - AXES..], [500.0, 501.0, 502.0]);
        assert_eq!(after[0], 1.0);
    }

    #[test]
    fn test_many_pushes_preserve_shift_relation() {
        // The shift/write contract must hold from any prior content, not
        // just a freshly filled buffer
        let mut w = RollingWindow::new();
        let mut n = 0.0f32;
        for _ in 0..300 {
            let before = *w.as_array();
            let triple = [n, n + 0.25, n + 0.5];
            w.push_triple(triple);
            let after = w.as_array();
            assert_eq!(after[..WINDOW_LEN - AXES], before[AXES..]);
            assert_eq!(after[WINDOW_LEN - AXES..], triple);
            n += 1.0;
        }
    }

    #[test]
    fn test_shift_alone_clears_freed_slots() {
        let mut w = RollingWindow::new();
        w.write_triple(7.0, 8.0, 9.0);
        w.shift_triple();
        let buf = w.as_array();
        assert_eq!(buf[WINDOW_LEN - AXES..], [0.0, 0.0, 0.0]);
        // The written triple moved down one frame
        assert_eq!(buf[WINDOW_LEN - 2 * AXES..WINDOW_LEN - AXES], [7.0, 8.0, 9.0]);
    }
}
