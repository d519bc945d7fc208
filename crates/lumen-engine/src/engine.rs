use crate::core::{App, AppControl, FrameCtx, FrameOutcome};
use crate::device::{Gpu, SurfaceErrorAction};
use crate::render::signal::SignalRenderer;
use crate::render::uniform::SignalUniform;
use crate::signal::{IntensityCell, IntensityWriter};

/// Frames between periodic debug reports.
const REPORT_EVERY: u64 = 600;

/// Render engine for the live signal.
///
/// Owns the latest-value cell and, once the GPU is up, the signal renderer. Each
/// frame reads the cell once, packs it with the elapsed time into the uniform
/// block and draws. Values can be pushed before the GPU exists; they simply show
/// up on the first frame.
pub struct SignalEngine {
    cell: IntensityCell,
    writer: IntensityWriter,
    renderer: Option<SignalRenderer>,
}

impl SignalEngine {
    pub fn new() -> Self {
        let cell = IntensityCell::default();
        let writer = cell.writer();
        Self {
            cell,
            writer,
            renderer: None,
        }
    }

    /// Returns a handle for pushing values from another thread.
    pub fn writer(&self) -> IntensityWriter {
        self.writer.clone()
    }

    /// Overwrites the latest value. Never blocks, never validates.
    pub fn update_data(&self, intensity: f32) {
        self.writer.store(intensity);
    }

    /// `true` once GPU resources exist and frames are being drawn.
    pub fn is_ready(&self) -> bool {
        self.renderer.is_some()
    }

    /// Builds the uniform block for a frame at `elapsed` seconds.
    pub fn frame_uniform(&self, elapsed: f32) -> SignalUniform {
        SignalUniform::new(self.cell.load(), elapsed)
    }
}

impl Default for SignalEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl App for SignalEngine {
    fn on_gpu_ready(&mut self, gpu: &Gpu<'_>) -> anyhow::Result<()> {
        let renderer = SignalRenderer::new(gpu.device(), gpu.surface_format());
        log::info!(
            "signal renderer ready ({:?}, {}x{})",
            renderer.format(),
            gpu.size().width,
            gpu.size().height
        );
        self.renderer = Some(renderer);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(renderer) = self.renderer.as_ref() else {
            return AppControl::Continue;
        };

        let uniform = self.frame_uniform(ctx.time.elapsed);

        match ctx.render(|rctx, target| renderer.render(rctx, target, uniform)) {
            FrameOutcome::Presented => {}
            FrameOutcome::Skipped(SurfaceErrorAction::Fatal) => {
                log::warn!("surface out of memory; frame skipped");
            }
            FrameOutcome::Skipped(_) => {}
        }

        if ctx.time.frame_index % REPORT_EVERY == 0 {
            log::debug!(
                "frame {}: intensity {:.3}, t {:.2}s, dt {:.4}s",
                ctx.time.frame_index,
                uniform.intensity,
                uniform.time,
                ctx.time.dt
            );
        }

        AppControl::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_uses_default_intensity() {
        let engine = SignalEngine::new();
        let u = engine.frame_uniform(0.0);
        assert_eq!(u.intensity, 1.0);
        assert_eq!(u.time, 0.0);
    }

    #[test]
    fn updates_before_gpu_are_kept() {
        let engine = SignalEngine::new();
        assert!(!engine.is_ready());
        engine.update_data(0.3);
        assert_eq!(engine.frame_uniform(0.5).intensity, 0.3);
    }

    #[test]
    fn only_the_latest_value_reaches_the_frame() {
        let engine = SignalEngine::new();
        let writer = engine.writer();

        writer.store(0.1);
        writer.store(0.9);

        let u = engine.frame_uniform(2.0);
        assert_eq!(u.intensity, 0.9);
        assert_eq!(u.time, 2.0);
    }

    #[test]
    fn repeated_frames_redraw_the_same_value() {
        let engine = SignalEngine::new();
        engine.update_data(0.6);
        assert_eq!(engine.frame_uniform(1.0).intensity, 0.6);
        assert_eq!(engine.frame_uniform(1.016).intensity, 0.6);
    }

    #[test]
    fn writer_works_across_threads() {
        let engine = SignalEngine::new();
        let writer = engine.writer();
        std::thread::spawn(move || writer.store(0.55)).join().unwrap();
        assert_eq!(engine.frame_uniform(0.0).intensity, 0.55);
    }
}
