//! Signal sources for lumen.
//!
//! A source produces JSON payloads and hands each one to a [`Dispatcher`], which
//! updates the status sink and then invokes the registered callback. Two sources
//! exist and are picked at startup:
//! - [`LiveSource`]: Server-Sent Events over HTTP, reconnecting with backoff
//! - [`MockGenerator`]: a fixed-interval synthetic generator
//!
//! Sources run on their own thread (see [`spawn_source`]) and never block the
//! caller's render loop.

mod backoff;
mod dispatch;
mod error;
mod live;
mod mock;
mod payload;
mod sample;
mod source;
pub mod sse;
mod status;

pub use backoff::{Backoff, DEFAULT_RECONNECT_INITIAL, DEFAULT_RECONNECT_MAX};
pub use dispatch::{Dispatcher, OnData};
pub use error::StreamError;
pub use live::{LiveConfig, LiveSource};
pub use mock::{MockGenerator, DEFAULT_MOCK_INTERVAL};
pub use payload::Payload;
pub use sample::Sample;
pub use source::{run_source, spawn_source, SourceMode};
pub use status::{ConnectionState, ConnectionStatus, LogStatusSink, StatusSink};
