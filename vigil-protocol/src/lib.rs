//! Vigil Radio Link Vocabulary
//!
//! This crate defines what the pendant says over its BLE link: the
//! motion-state codes, their wire encoding, and the link identity constants
//! shared between the firmware and peers.
//!
//! # Wire Overview
//!
//! The whole protocol is one GATT characteristic a peer reads or subscribes
//! to. Every announcement is a single little-endian `i32`:
//! ```text
//! ┌────────────┬─────────────────────────────────────────────┐
//! │ STATE CODE │ i32 LE: 1 (idle), 3 (walking), 4 (falling)  │
//! └────────────┴─────────────────────────────────────────────┘
//! ```
//!
//! All codes fit in the low byte, so a peer that only decodes the first two
//! bytes of the characteristic still sees every state correctly.

#![no_std]
#![deny(unsafe_code)]

pub mod link;
pub mod state;

pub use link::{DEVICE_NAME, SERVICE_UUID, SERVICE_UUID_LE, STATE_CHARACTERISTIC_UUID};
pub use state::StateCode;
