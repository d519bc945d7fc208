//! Lumen engine crate.
//!
//! This crate owns the platform + GPU runtime pieces: the window loop, the wgpu
//! device/surface, the signal renderer and the latest-value cell it samples.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod render;
pub mod signal;

mod engine;

pub use engine::SignalEngine;
