use lumen_engine::signal::IntensityWriter;
use lumen_stream::{OnData, Payload};

/// Payload field carrying the signal intensity.
pub const VALUE_FIELD: &str = "value";

/// Forwards the numeric `value` of each payload to the engine.
///
/// Runs on the source thread. Payloads without a numeric `value` are ignored and
/// the engine keeps showing the previous value.
#[derive(Clone)]
pub struct IngestionBridge {
    writer: IntensityWriter,
}

impl IngestionBridge {
    pub fn new(writer: IntensityWriter) -> Self {
        Self { writer }
    }

    /// Returns `true` if the payload reached the engine.
    pub fn forward(&self, payload: &Payload) -> bool {
        match payload.number(VALUE_FIELD) {
            Some(value) => {
                self.writer.store(value as f32);
                true
            }
            None => false,
        }
    }

    /// Source callback wrapping this bridge.
    pub fn into_callback(self) -> OnData {
        Box::new(move |payload| {
            self.forward(payload);
        })
    }
}
