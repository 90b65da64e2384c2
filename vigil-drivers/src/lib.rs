//! Hardware and model backends for the Vigil pendant
//!
//! Two seams from `vigil-core` are filled in here:
//!
//! - `imu`: the LSM9DS1 accelerometer behind any async I2C bus
//! - `model`: the Edge Impulse classifier, either the compiled C++ SDK
//!   (`edge-impulse` feature) or a deterministic development stub
//!
//! Everything except the FFI boundary in `model` is safe code.

#![no_std]
#![deny(unsafe_code)]

pub mod imu;
pub mod model;
