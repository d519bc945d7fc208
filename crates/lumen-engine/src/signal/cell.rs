use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Intensity shown before the first sample arrives.
pub const DEFAULT_INTENSITY: f32 = 1.0;

/// Reader half of the latest-value cell, owned by the render loop.
///
/// The value lives in one atomic word holding the `f32` bit pattern, so a load
/// always observes a whole value written by some `store`. Older values are simply
/// overwritten; nothing is queued.
#[derive(Debug)]
pub struct IntensityCell {
    bits: Arc<AtomicU32>,
}

/// Writer half of the latest-value cell.
///
/// Cheap to clone and safe to call from any thread at any rate.
#[derive(Debug, Clone)]
pub struct IntensityWriter {
    bits: Arc<AtomicU32>,
}

impl IntensityCell {
    pub fn new(initial: f32) -> Self {
        Self {
            bits: Arc::new(AtomicU32::new(initial.to_bits())),
        }
    }

    /// Returns a writer sharing this cell.
    pub fn writer(&self) -> IntensityWriter {
        IntensityWriter {
            bits: Arc::clone(&self.bits),
        }
    }

    /// Reads the most recently stored value.
    #[inline]
    pub fn load(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

impl Default for IntensityCell {
    fn default() -> Self {
        Self::new(DEFAULT_INTENSITY)
    }
}

impl IntensityWriter {
    /// Overwrites the cell. No range check is applied.
    #[inline]
    pub fn store(&self, value: f32) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }
}
