use lumen_engine::SignalEngine;
use lumen_engine::core::{App, AppControl, FrameCtx};
use lumen_engine::device::Gpu;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{Key, NamedKey};

use crate::status::StatusBoard;

/// The signal engine plus the stream status shown in the window title.
pub struct ViewerApp {
    engine: SignalEngine,
    board: StatusBoard,
    base_title: String,
}

impl ViewerApp {
    pub fn new(engine: SignalEngine, board: StatusBoard, base_title: impl Into<String>) -> Self {
        Self {
            engine,
            board,
            base_title: base_title.into(),
        }
    }
}

impl App for ViewerApp {
    fn on_gpu_ready(&mut self, gpu: &Gpu<'_>) -> anyhow::Result<()> {
        let info = gpu.adapter_info();
        log::info!("adapter: {} ({:?})", info.name, info.backend);
        self.engine.on_gpu_ready(gpu)
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => AppControl::Exit,
            _ => self.engine.on_window_event(event),
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if let Some(status) = self.board.take_changed() {
            ctx.window.set_title(&status.title(&self.base_title));
        }
        self.engine.on_frame(ctx)
    }
}
