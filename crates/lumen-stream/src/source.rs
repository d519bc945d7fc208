use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::dispatch::{Dispatcher, OnData};
use crate::live::{LiveConfig, LiveSource};
use crate::mock::MockGenerator;
use crate::status::StatusSink;

/// Which source feeds the viewer. Chosen once at startup.
#[derive(Debug, Clone)]
pub enum SourceMode {
    Mock { interval: Duration },
    Live(LiveConfig),
}

/// Runs `mode` on a dedicated `lumen-stream` thread with its own current-thread
/// tokio runtime.
///
/// The thread lives until the process exits; callers are not expected to join it.
pub fn spawn_source(
    mode: SourceMode,
    sink: Arc<dyn StatusSink>,
    on_data: OnData,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("lumen-stream".into())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_io()
                .enable_time()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("failed to start stream runtime: {e}");
                    return;
                }
            };

            let mut dispatcher = Dispatcher::new(sink, on_data);
            rt.block_on(run_source(mode, &mut dispatcher));
        })
}

/// Drives `mode` on the current runtime. Only returns if the live client cannot
/// be built.
pub async fn run_source(mode: SourceMode, dispatcher: &mut Dispatcher) {
    match mode {
        SourceMode::Mock { interval } => {
            MockGenerator::new(interval).run(dispatcher, None).await;
        }
        SourceMode::Live(config) => match LiveSource::new(config) {
            Ok(source) => source.run(dispatcher).await,
            Err(e) => log::error!("failed to create stream client: {e}"),
        },
    }
}
