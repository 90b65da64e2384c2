//! Single-slot window handoff between the two schedules
//!
//! The sampling side overwrites, the inference side consumes. Nothing is
//! queued: when inference falls behind, intermediate windows are dropped and
//! only the freshest survives. Both sides touch the slot under the same
//! short critical section in firmware, so no flag can be observed half set.

use crate::config::WINDOW_LEN;
use crate::window::Window;

/// Exchange slot for completed windows
#[derive(Debug)]
pub struct WindowSlot {
    window: Window,
    ready: bool,
}

impl WindowSlot {
    pub const fn new() -> Self {
        Self {
            window: [0.0; WINDOW_LEN],
            ready: false,
        }
    }

    /// Publish a completed window, replacing any untaken one
    ///
    /// Returns true when an untaken window was displaced, i.e. data was
    /// dropped rather than queued.
    pub fn publish(&mut self, window: &Window) -> bool {
        let displaced = self.ready;
        self.window = *window;
        self.ready = true;
        displaced
    }

    /// Consume the waiting window, if one is ready
    ///
    /// Readiness clears with the take, so a slot is never consumed twice.
    pub fn take(&mut self) -> Option<Window> {
        if !self.ready {
            return None;
        }
        self.ready = false;
        Some(self.window)
    }

    /// Whether a window is waiting
    pub fn is_ready(&self) -> bool {
        self.ready
    }
}

impl Default for WindowSlot {
    fn default() -> Self {
        Self::new()
    }
}
