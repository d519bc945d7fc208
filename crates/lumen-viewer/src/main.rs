mod app;
mod bridge;
mod config;
mod status;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use lumen_engine::SignalEngine;
use lumen_engine::device::GpuInit;
use lumen_engine::logging::init_logging;
use lumen_engine::window::Runtime;
use lumen_stream::{SourceMode, spawn_source};

use app::ViewerApp;
use bridge::IngestionBridge;
use config::Config;
use status::StatusBoard;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_logging(config.logging_config());

    let engine = SignalEngine::new();
    let board = StatusBoard::new();
    let bridge = IngestionBridge::new(engine.writer());

    let mode = config.source_mode();
    match &mode {
        SourceMode::Mock { interval } => {
            log::info!("no endpoint configured, mock data every {interval:?}")
        }
        SourceMode::Live(live) => {
            live.validate().context("unusable --endpoint")?;
            log::info!("streaming from {}", live.url)
        }
    }

    // Detached: the source thread ends with the process.
    spawn_source(mode, Arc::new(board.clone()), bridge.into_callback())
        .context("failed to spawn stream thread")?;

    let app = ViewerApp::new(engine, board, config.title.clone());
    Runtime::run(config.runtime_config(), GpuInit::default(), app)
}
