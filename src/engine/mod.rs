//! Execution-engine interface.
//!
//! The harness never touches the emulator core's internals; it drives it
//! through the narrow [`ExecutionEngine`] contract defined here:
//! - Boot a test image under a per-run [`CoreParams`] configuration
//! - Execute in bounded virtual-time slices (`run_until`)
//! - Observe the coarse [`CoreState`] lifecycle
//! - Collect diagnostic text through a shared [`LogSink`]
//!
//! [`ScriptedEngine`] is a deterministic stub implementation for tests.

pub mod params;
pub mod scripted;
pub mod sink;
pub mod traits;

pub use params::{CoreParams, CpuBackend, DisplaySize, GpuBackend};
pub use scripted::ScriptedEngine;
pub use sink::LogSink;
pub use traits::{CoreState, ExecutionEngine, InitError};
