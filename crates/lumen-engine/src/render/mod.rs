//! GPU rendering subsystem.
//!
//! Each renderer is responsible for its own GPU resources (pipelines, buffers,
//! bind groups) and creates them once from an acquired device.

mod ctx;
pub mod signal;
pub mod uniform;

pub use ctx::{RenderCtx, RenderTarget};
