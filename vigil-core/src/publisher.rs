//! State-transition publication
//!
//! Two fields, two owners: the inference schedule proposes transitions, the
//! link schedule commits them when a peer is actually there to hear. A
//! transition proposed while disconnected waits indefinitely; a newer one
//! simply replaces it. The peer always receives the latest state, never a
//! backlog of stale ones.

use vigil_protocol::StateCode;

/// Announced/pending state pair
#[derive(Debug, Clone)]
pub struct StatePublisher {
    current: Option<StateCode>,
    pending: Option<StateCode>,
}

impl StatePublisher {
    pub const fn new() -> Self {
        Self {
            current: None,
            pending: None,
        }
    }

    /// Record a proposed transition from the inference schedule
    ///
    /// `None` carries no actionable state and is dropped here, so it can
    /// never reach the wire. A code equal to the committed state is dropped
    /// too. An already-pending transition is left in place in both cases:
    /// undelivered state survives until something newer replaces it or a
    /// peer takes delivery.
    ///
    /// Returns true when this call staged a transition that was not already
    /// pending.
    pub fn propose(&mut self, proposal: Option<StateCode>) -> bool {
        match proposal {
            Some(code) if Some(code) != self.current => {
                let newly_staged = self.pending != Some(code);
                self.pending = Some(code);
                newly_staged
            }
            _ => false,
        }
    }

    /// Link-schedule delivery check
    ///
    /// With a peer attached, commits the pending transition, clears it, and
    /// returns the code to transmit. This is the only place pending state is
    /// consumed; without a peer it is left untouched.
    pub fn poll(&mut self, connected: bool) -> Option<StateCode> {
        if !connected {
            return None;
        }
        let code = self.pending.take()?;
        self.current = Some(code);
        Some(code)
    }

    /// Last committed (announced) state
    pub fn current(&self) -> Option<StateCode> {
        self.current
    }

    /// Transition awaiting delivery, if any
    pub fn pending(&self) -> Option<StateCode> {
        self.pending
    }
}

impl Default for StatePublisher {
    fn default() -> Self {
        Self::new()
    }
}
