use std::sync::{Arc, Mutex, MutexGuard};

use lumen_stream::{ConnectionStatus, StatusSink};

/// What the window currently shows about the stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub connection: Option<ConnectionStatus>,
    pub last_payload: Option<String>,
}

impl StatusSnapshot {
    /// Window title: `base`, then the connection label, then the latest payload.
    pub fn title(&self, base: &str) -> String {
        let mut title = base.to_string();
        if let Some(status) = &self.connection {
            title.push_str(" | ");
            title.push_str(status.label);
        }
        if let Some(payload) = &self.last_payload {
            title.push_str(" | ");
            title.push_str(payload);
        }
        title
    }
}

#[derive(Default)]
struct Board {
    snapshot: StatusSnapshot,
    dirty: bool,
}

/// Status sink written by the source thread and polled by the frame loop.
#[derive(Clone, Default)]
pub struct StatusBoard {
    inner: Arc<Mutex<Board>>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the snapshot if it changed since the last call.
    pub fn take_changed(&self) -> Option<StatusSnapshot> {
        let mut board = self.lock();
        if !board.dirty {
            return None;
        }
        board.dirty = false;
        Some(board.snapshot.clone())
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        self.lock().snapshot.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Board> {
        // A panic while holding the lock cannot leave the snapshot half-written.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StatusSink for StatusBoard {
    fn connection_changed(&self, status: &ConnectionStatus) {
        log::info!("stream status: {} ({})", status.label, status.color);
        let mut board = self.lock();
        board.snapshot.connection = Some(*status);
        board.dirty = true;
    }

    fn payload_received(&self, payload: &str) {
        let mut board = self.lock();
        board.snapshot.last_payload = Some(payload.to_owned());
        board.dirty = true;
    }
}
