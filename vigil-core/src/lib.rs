//! Vigil core - board-agnostic motion sensing pipeline
//!
//! Everything between the accelerometer register read and the BLE
//! characteristic write lives here, free of hardware so it runs under
//! `cargo test` on the host:
//!
//! - Rolling sample window and range conditioning
//! - Single-slot window handoff between the sampling and inference schedules
//! - Classifier seam for the deployed motion model
//! - Label smoothing and state-transition publication
//! - Strict-period cadence bookkeeping
//!
//! The firmware crate supplies scheduling, the drivers crate supplies the
//! sensor and model backends; neither changes what happens to a sample on
//! its way through.

#![no_std]
#![deny(unsafe_code)]

pub mod cadence;
pub mod classifier;
pub mod config;
pub mod handoff;
pub mod limits;
pub mod pipeline;
pub mod publisher;
pub mod smoothing;
pub mod window;
