//! Strict-period schedule over a monotonic microsecond clock
//!
//! Deadlines advance by exactly one period per tick, anchored to the start
//! instant. A tick that runs long never shifts the phase of every tick after
//! it: the schedule fires late ticks immediately until it has caught back
//! up, and counts each late deadline so overruns are visible instead of
//! silently eaten.

/// Deadline bookkeeping for one periodic loop
#[derive(Debug, Clone)]
pub struct Cadence {
    period_us: u64,
    next_deadline_us: u64,
    missed: u32,
}

impl Cadence {
    /// Start a schedule: the first deadline lands one period after `now_us`
    pub fn start(now_us: u64, period_us: u64) -> Self {
        Self {
            period_us,
            next_deadline_us: now_us + period_us,
            missed: 0,
        }
    }

    /// Advance the schedule by one tick
    ///
    /// Returns the absolute instant the caller should sleep until. When
    /// `now_us` has already passed that instant the caller's sleep becomes a
    /// no-op, the miss is counted, and the following deadline stays anchored
    /// to the original phase.
    pub fn next_wake(&mut self, now_us: u64) -> u64 {
        let wake = self.next_deadline_us;
        if now_us > wake {
            self.missed = self.missed.wrapping_add(1);
        }
        self.next_deadline_us = wake.wrapping_add(self.period_us);
        wake
    }

    /// Deadlines missed since the schedule started
    pub fn missed(&self) -> u32 {
        self.missed
    }

    /// Configured period in microseconds
    pub fn period_us(&self) -> u64 {
        self.period_us
    }
}
