/// Lifecycle of a live connection.
///
/// ```text
/// Disconnected -> Connecting -> Open -> Streaming
///                     ^                     |
///                     +----- Errored <------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Open,
    Streaming,
    Errored,
}

/// User-facing connection indicator: a label and a hex color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionStatus {
    pub label: &'static str,
    pub color: &'static str,
}

impl ConnectionStatus {
    pub const CONNECTED: Self = Self {
        label: "Connected",
        color: "#4ade80",
    };

    pub const RECONNECTING: Self = Self {
        label: "Error / Reconnecting...",
        color: "#ef4444",
    };
}

/// Receives status updates from a running source.
///
/// Called on the source thread; implementations must not block for long.
pub trait StatusSink: Send + Sync {
    fn connection_changed(&self, status: &ConnectionStatus);

    /// Canonical JSON text of the most recent payload.
    fn payload_received(&self, payload: &str);
}

/// Sink that only logs. Used when no display is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogStatusSink;

impl StatusSink for LogStatusSink {
    fn connection_changed(&self, status: &ConnectionStatus) {
        log::info!("stream status: {} ({})", status.label, status.color);
    }

    fn payload_received(&self, payload: &str) {
        log::trace!("payload: {payload}");
    }
}
