//! Latest-value cell shared between the ingestion path and the render loop.

mod cell;

pub use cell::{IntensityCell, IntensityWriter, DEFAULT_INTENSITY};
