//! Shared state between embassy tasks
//!
//! Single-writer discipline: each static names its writer and its consumer.
//! The blocking mutexes hold a critical section only long enough to copy or
//! swap the protected value, which keeps the SoftDevice responsive.

use core::cell::RefCell;
use core::sync::atomic::AtomicU32;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use vigil_core::handoff::WindowSlot;
use vigil_core::publisher::StatePublisher;

/// Completed sample windows, sampler -> inference
///
/// Publish overwrites, take consumes. A window the inference task never got
/// to is dropped, not queued.
pub static WINDOW_SLOT: Mutex<CriticalSectionRawMutex, RefCell<WindowSlot>> =
    Mutex::new(RefCell::new(WindowSlot::new()));

/// Staged state transitions, inference -> link
///
/// The inference task proposes; the link task's connected poll is the only
/// place a pending transition is committed and cleared.
pub static PUBLISHER: Mutex<CriticalSectionRawMutex, RefCell<StatePublisher>> =
    Mutex::new(RefCell::new(StatePublisher::new()));

/// Sampling deadlines missed so far (sampler writes, link task reports)
pub static MISSED_DEADLINES: AtomicU32 = AtomicU32::new(0);

/// Windows displaced before inference took them (sampler writes, link task
/// reports)
pub static DROPPED_WINDOWS: AtomicU32 = AtomicU32::new(0);
