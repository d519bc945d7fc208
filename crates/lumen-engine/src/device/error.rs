/// Fatal conditions raised while bringing up the GPU context.
///
/// None of these are retried. They surface as the failed outcome of runtime
/// initialization and the frame loop is never armed.
#[derive(Debug, thiserror::Error)]
pub enum GpuInitError {
    /// The window reported a 0x0 drawable size.
    #[error("window has zero size")]
    ZeroSizedSurface,

    /// No graphics capability at all: the surface cannot be created or no adapter exists.
    #[error("no graphics support in this environment: {0}")]
    UnsupportedEnvironment(String),

    /// An adapter was found but it refused to hand out a device.
    #[error("graphics adapter found but device creation failed: {0}")]
    DeviceAcquisitionFailure(#[from] wgpu::RequestDeviceError),

    /// The surface/adapter pair exposes no usable color format.
    #[error("no supported surface formats")]
    NoSurfaceFormat,
}

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Out of memory. The frame is skipped; the caller decides whether to keep going.
    Fatal,
}
