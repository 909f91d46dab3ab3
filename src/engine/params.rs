//! Per-run engine configuration.
//!
//! [`CoreParams`] describes everything the execution engine needs to know to
//! boot one test image: which CPU backend to use, the video backend, display
//! geometry, debugging flags, the image to boot, and the sink that receives
//! the diagnostic output. A fresh value is built for every test run and
//! discarded once verification finishes.

use std::path::PathBuf;

use super::sink::LogSink;

/// CPU execution backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuBackend {
    /// Cached interpreter. Slower but available everywhere.
    Interpreter,
    /// Dynamic recompiler.
    Jit,
}

/// Video backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpuBackend {
    /// OpenGL ES renderer.
    GlEs,
    /// Null renderer (no visual output).
    Null,
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySize {
    pub width: u32,
    pub height: u32,
}

impl DisplaySize {
    /// Native PSP display size.
    pub const NATIVE: DisplaySize = DisplaySize {
        width: 480,
        height: 272,
    };
}

/// Configuration handed to the execution engine for a single test run.
///
/// Owned by the run; the only part that outlives it is the cloned
/// [`LogSink`] handle the harness keeps for verification.
#[derive(Debug, Clone)]
pub struct CoreParams {
    /// CPU backend to execute with.
    pub cpu_backend: CpuBackend,
    /// Video backend.
    pub gpu_backend: GpuBackend,
    /// Whether to emulate audio output.
    pub enable_sound: bool,
    /// Optional ISO to mount. Autotests boot a bare executable, so `None`.
    pub mount_iso: Option<PathBuf>,
    /// Start the core paused instead of running.
    pub start_paused: bool,
    /// Enable the debugger interface.
    pub enable_debugging: bool,
    /// Also mirror captured diagnostic lines to the host's own log.
    pub mirror_to_host_log: bool,
    /// Run without any display surface.
    pub headless: bool,
    /// Enable the media (video decode) engine.
    pub use_media_engine: bool,
    /// Internal render target size.
    pub render_size: DisplaySize,
    /// Output (window) size.
    pub output_size: DisplaySize,
    /// Physical pixel size.
    pub pixel_size: DisplaySize,
    /// Executable image to boot.
    pub boot_path: PathBuf,
    /// Sink receiving the diagnostic text emitted during execution.
    pub log_sink: LogSink,
}

impl CoreParams {
    /// Parameters for a headless test run of the given image.
    ///
    /// Display geometry is fixed at the native 480x272; sound and backend
    /// selection come from the caller's settings.
    pub fn for_test(
        boot_path: PathBuf,
        cpu_backend: CpuBackend,
        enable_sound: bool,
        log_sink: LogSink,
    ) -> Self {
        Self {
            cpu_backend,
            gpu_backend: GpuBackend::GlEs,
            enable_sound,
            mount_iso: None,
            start_paused: false,
            enable_debugging: false,
            mirror_to_host_log: false,
            headless: false,
            use_media_engine: false,
            render_size: DisplaySize::NATIVE,
            output_size: DisplaySize::NATIVE,
            pixel_size: DisplaySize::NATIVE,
            boot_path,
            log_sink,
        }
    }
}
