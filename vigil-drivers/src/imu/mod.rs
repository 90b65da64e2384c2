//! Inertial measurement unit drivers

mod lsm9ds1;

pub use lsm9ds1::{ImuError, Lsm9ds1};
