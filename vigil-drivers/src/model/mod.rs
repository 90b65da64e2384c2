//! Motion model backends

mod edge_impulse;

pub use edge_impulse::{EdgeImpulse, LABELS};
