//! Embassy async tasks
//!
//! Each task runs independently and communicates through `crate::channels`.

pub mod inference;
pub mod link;
pub mod sampler;

pub use inference::inference_task;
pub use link::{link_task, softdevice_task, VigilServer};
pub use sampler::sampler_task;
