use std::sync::Arc;

use crate::payload::Payload;
use crate::status::{ConnectionStatus, StatusSink};

/// Callback invoked once per delivered payload, on the source thread.
pub type OnData = Box<dyn FnMut(&Payload) + Send>;

/// Shared delivery path for every source.
///
/// Each payload produces exactly one status update followed by exactly one
/// callback invocation, in that order.
pub struct Dispatcher {
    sink: Arc<dyn StatusSink>,
    on_data: OnData,
    delivered: u64,
}

impl Dispatcher {
    pub fn new(sink: Arc<dyn StatusSink>, on_data: OnData) -> Self {
        Self {
            sink,
            on_data,
            delivered: 0,
        }
    }

    pub fn deliver(&mut self, payload: &Payload) {
        self.sink.payload_received(payload.encoded());
        (self.on_data)(payload);
        self.delivered += 1;
    }

    pub fn connection_changed(&self, status: &ConnectionStatus) {
        self.sink.connection_changed(status);
    }

    /// Number of payloads delivered so far.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }
}
