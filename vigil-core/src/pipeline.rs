//! End-to-end pipeline composition
//!
//! [`classify_window`] is the shared classification cycle: the firmware's
//! inference task runs it against the shared handoff slot and publisher,
//! and [`Pipeline`] wires the same stages around owned state so the whole
//! sensing-to-announcement path can be driven on the host, schedule by
//! schedule, with a scripted backend.

use vigil_protocol::StateCode;

use crate::classifier::{Classifier, ClassifyError};
use crate::config::AXES;
use crate::handoff::WindowSlot;
use crate::limits;
use crate::publisher::StatePublisher;
use crate::smoothing::{Reading, Smoother};
use crate::window::{RollingWindow, Window};

/// One classification cycle over a taken window: classify, smooth, map
///
/// Returns the publisher-facing proposal. `Ok(None)` means smoothing has no
/// actionable state yet - either nothing is stable, or the stable label has
/// no peer-facing meaning.
pub fn classify_window<C: Classifier>(
    classifier: &mut C,
    smoother: &mut Smoother,
    window: &Window,
) -> Result<Option<StateCode>, ClassifyError> {
    let result = classifier.classify(window)?;
    let reading = Reading::from_classification(&result);
    let stable = smoother.update(reading);
    Ok(stable
        .and_then(|index| classifier.labels().get(usize::from(index)).copied())
        .and_then(StateCode::from_label))
}

/// What one inference tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleOutcome {
    /// No completed window was waiting
    Empty,
    /// Classified; nothing new to announce
    NoChange,
    /// Classified; a transition is now pending delivery
    Proposed(StateCode),
    /// Backend failed; the cycle was abandoned
    Failed(ClassifyError),
}

/// Full sensing-to-announcement pipeline around one classifier
///
/// Owns every stage the firmware splits across tasks. Scheduling is the
/// caller's job: each method is one tick of the corresponding schedule.
pub struct Pipeline<C> {
    window: RollingWindow,
    slot: WindowSlot,
    classifier: C,
    smoother: Smoother,
    publisher: StatePublisher,
    dropped: u32,
}

impl<C: Classifier> Pipeline<C> {
    pub fn new(classifier: C) -> Self {
        Self {
            window: RollingWindow::new(),
            slot: WindowSlot::new(),
            classifier,
            smoother: Smoother::new(),
            publisher: StatePublisher::new(),
            dropped: 0,
        }
    }

    /// Sampling-schedule tick: condition one raw triple, roll it into the
    /// window, and hand the completed window off
    pub fn sample_tick(&mut self, raw_g: [f32; AXES]) {
        self.window.push_triple(limits::condition(raw_g));
        if self.slot.publish(self.window.as_array()) {
            self.dropped = self.dropped.wrapping_add(1);
        }
    }

    /// Inference-schedule tick: classify a waiting window, if any
    pub fn inference_tick(&mut self) -> CycleOutcome {
        let Some(window) = self.slot.take() else {
            return CycleOutcome::Empty;
        };
        match classify_window(&mut self.classifier, &mut self.smoother, &window) {
            Ok(proposal) => {
                let staged = self.publisher.propose(proposal);
                match proposal {
                    Some(code) if staged => CycleOutcome::Proposed(code),
                    _ => CycleOutcome::NoChange,
                }
            }
            Err(e) => CycleOutcome::Failed(e),
        }
    }

    /// Link-schedule poll: a state code to transmit, if one is due
    pub fn link_poll(&mut self, connected: bool) -> Option<StateCode> {
        self.publisher.poll(connected)
    }

    /// Publisher state, for inspection
    pub fn publisher(&self) -> &StatePublisher {
        &self.publisher
    }

    /// The injected backend
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Windows overwritten before inference took them
    pub fn dropped_windows(&self) -> u32 {
        self.dropped
    }
}
