//! Execution-engine contract.
//!
//! The emulator core proper (CPU, GPU, kernel HLE, ISO mounting) lives in the
//! host application. The harness drives it exclusively through
//! [`ExecutionEngine`]: boot an image, execute until a target tick, observe
//! the coarse lifecycle state, and power down. Anything the core does
//! internally beyond these operations is invisible to the harness.

use std::path::PathBuf;

use thiserror::Error;

use super::params::CoreParams;

/// Coarse lifecycle state of the execution engine, as observed by the
/// scheduler.
///
/// The scheduler only distinguishes [`Running`](CoreState::Running),
/// [`FrameBoundary`](CoreState::FrameBoundary) and
/// [`PoweredDown`](CoreState::PoweredDown); any other state keeps the poll
/// loop going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreState {
    /// Core is executing instructions.
    Running,
    /// Core yielded at the end of a frame. Transient: the scheduler sets it
    /// back to `Running` and continues.
    FrameBoundary,
    /// Core is halted at a debugger step. Not used by the harness, but a
    /// debugging host can put the core here.
    Stepping,
    /// Core has shut itself down. The sole terminal state.
    PoweredDown,
}

/// Errors that can occur while booting a test image.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InitError {
    /// The executable image could not be found or read.
    #[error("boot image not found: {path:?}")]
    MissingImage {
        /// Path that failed to load.
        path: PathBuf,
    },

    /// The core failed to start, with its own diagnostic message.
    #[error("core failed to start: {0}")]
    Core(String),
}

/// Control contract the harness requires of the emulator core.
///
/// All operations are synchronous and single-threaded. `run_until` is
/// expected to execute entirely within the call and return control once the
/// target tick is reached or the core voluntarily yields (frame boundary,
/// power-down).
pub trait ExecutionEngine {
    /// Load and prepare the image described by `params`.
    ///
    /// On success the core is in [`CoreState::Running`]. On failure the
    /// harness aborts the test without running or verifying.
    fn init(&mut self, params: CoreParams) -> Result<(), InitError>;

    /// Current lifecycle state.
    fn state(&self) -> CoreState;

    /// Force the lifecycle state. Used by the scheduler to acknowledge a
    /// frame boundary by resetting the core to `Running`.
    fn set_state(&mut self, state: CoreState);

    /// Monotonic virtual-time tick counter.
    fn current_tick(&self) -> u64;

    /// Declared tick rate (ticks per virtual second). Used to convert the
    /// scheduler's quantum into ticks.
    fn ticks_per_second(&self) -> u64;

    /// Execute until the tick counter reaches `target_tick`, or until the
    /// core yields on its own.
    fn run_until(&mut self, target_tick: u64);

    /// Tear down the core after a run.
    fn shutdown(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_error_messages() {
        let err = InitError::MissingImage {
            path: PathBuf::from("/memstick/pspautotests/tests/cpu/fpu/fpu.prx"),
        };
        assert!(err.to_string().contains("boot image not found"));

        let err = InitError::Core("ELF load failed".to_string());
        assert_eq!(err.to_string(), "core failed to start: ELF load failed");
    }
}
