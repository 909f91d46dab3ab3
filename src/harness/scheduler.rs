//! Bounded-step execution scheduler.
//!
//! Drives one booted test image to completion. The core executes in fixed
//! virtual-time quanta: the scheduler advances a target tick and asks the
//! engine to run until it is reached, then re-checks the lifecycle state.
//! This is a busy-poll cooperative loop, not a sleep/wait: the engine
//! executes entirely within `run_until` and hands control back once the
//! ticks are consumed or it voluntarily yields at a frame boundary.
//!
//! There is deliberately no timeout: autotest images terminate by powering
//! themselves down, and an image that never does hangs the run. Hosts that
//! want a safety net can opt in with [`Scheduler::with_quantum_limit`].

use crate::engine::{CoreParams, CoreState, ExecutionEngine, InitError};

/// Quanta per virtual second. Each quantum is one tenth of a second's worth
/// of ticks; this only affects how promptly state transitions are observed,
/// never the captured output.
const QUANTA_PER_SECOND: u64 = 10;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The core powered itself down.
    Completed {
        /// Quanta issued over the run.
        quanta: u64,
        /// Virtual ticks consumed.
        ticks: u64,
    },
    /// The opt-in quantum limit was reached before power-down.
    QuantumLimit {
        /// Quanta issued before giving up.
        quanta: u64,
        /// Virtual ticks consumed.
        ticks: u64,
    },
}

/// Drives a test image to completion in bounded virtual-time quanta.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    quantum_limit: Option<u64>,
}

impl Scheduler {
    /// Scheduler with the faithful default behavior: no limit of any kind.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opt-in safety net: give up after `limit` quanta instead of polling
    /// forever. Not part of the original behavior.
    pub fn with_quantum_limit(mut self, limit: u64) -> Self {
        self.quantum_limit = Some(limit);
        self
    }

    /// Boot the image described by `params`.
    ///
    /// On failure the caller must abort the test: no run, no verification.
    pub fn initialize<E: ExecutionEngine>(
        &self,
        engine: &mut E,
        params: CoreParams,
    ) -> Result<(), InitError> {
        engine.init(params)
    }

    /// Poll the engine to completion.
    ///
    /// Returns when the core reaches [`CoreState::PoweredDown`], the sole
    /// terminal state, or when a configured quantum limit runs out. A frame boundary is transient: the scheduler resets the
    /// core to `Running` and keeps going, so a test that signals frame ends
    /// is indistinguishable from one that runs straight through.
    pub fn run_to_completion<E: ExecutionEngine>(&self, engine: &mut E) -> RunOutcome {
        let quantum = engine.ticks_per_second() / QUANTA_PER_SECOND;
        let start_tick = engine.current_tick();
        // `quanta` counts only quanta actually issued to the engine. Polls
        // of a non-Running state issue no ticks and are tracked separately,
        // so they still exhaust the opt-in limit.
        let mut quanta = 0u64;
        let mut empty_polls = 0u64;

        loop {
            while engine.state() == CoreState::Running {
                let target = engine.current_tick() + quantum;
                engine.run_until(target);
                quanta += 1;

                if let Some(limit) = self.quantum_limit {
                    if quanta + empty_polls >= limit && engine.state() != CoreState::PoweredDown {
                        return RunOutcome::QuantumLimit {
                            quanta,
                            ticks: engine.current_tick() - start_tick,
                        };
                    }
                }
            }

            match engine.state() {
                CoreState::FrameBoundary => {
                    // Hand control straight back for the next frame.
                    engine.set_state(CoreState::Running);
                }
                CoreState::PoweredDown => {
                    return RunOutcome::Completed {
                        quanta,
                        ticks: engine.current_tick() - start_tick,
                    };
                }
                // Any other state counts as still running; keep polling.
                _ => {
                    empty_polls += 1;
                    if let Some(limit) = self.quantum_limit {
                        if quanta + empty_polls >= limit {
                            return RunOutcome::QuantumLimit {
                                quanta,
                                ticks: engine.current_tick() - start_tick,
                            };
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::engine::{CpuBackend, LogSink, ScriptedEngine};

    fn boot(engine: &mut ScriptedEngine, sink: LogSink) {
        let params = CoreParams::for_test(
            PathBuf::from("/memstick/pspautotests/tests/cpu/fpu/fpu.prx"),
            CpuBackend::Interpreter,
            false,
            sink,
        );
        Scheduler::new().initialize(engine, params).unwrap();
    }

    #[test]
    fn test_runs_until_power_down() {
        let mut engine = ScriptedEngine::new().with_tick_rate(1000).with_transitions(vec![
            CoreState::Running,
            CoreState::Running,
            CoreState::PoweredDown,
        ]);
        boot(&mut engine, LogSink::new());

        let outcome = Scheduler::new().run_to_completion(&mut engine);

        // Three quanta of 100 ticks each, consumed exactly.
        assert_eq!(
            outcome,
            RunOutcome::Completed {
                quanta: 3,
                ticks: 300
            }
        );
        assert_eq!(engine.current_tick(), 300);
    }

    #[test]
    fn test_frame_boundary_resets_to_running() {
        let mut engine = ScriptedEngine::new().with_tick_rate(1000).with_transitions(vec![
            CoreState::FrameBoundary,
            CoreState::PoweredDown,
        ]);
        boot(&mut engine, LogSink::new());

        let outcome = Scheduler::new().run_to_completion(&mut engine);

        // One reset back to Running, then termination; quanta match ticks.
        assert_eq!(engine.set_state_calls, 1);
        assert_eq!(
            outcome,
            RunOutcome::Completed {
                quanta: 2,
                ticks: 200
            }
        );
        assert_eq!(engine.run_calls, 2);
    }

    #[test]
    fn test_always_running_engine_never_completes() {
        // An engine that never powers down loops forever; the injected
        // quantum limit is the only way out.
        let mut engine = ScriptedEngine::new().with_tick_rate(1000);
        boot(&mut engine, LogSink::new());

        let outcome = Scheduler::new()
            .with_quantum_limit(500)
            .run_to_completion(&mut engine);

        assert_eq!(
            outcome,
            RunOutcome::QuantumLimit {
                quanta: 500,
                ticks: 500 * 100
            }
        );
    }

    #[test]
    fn test_stepping_state_keeps_polling() {
        // Stepping is an engine-internal state the scheduler treats as
        // "still running": the poll loop continues without issuing ticks.
        let mut engine = ScriptedEngine::new()
            .with_tick_rate(1000)
            .with_transitions(vec![CoreState::Stepping]);
        boot(&mut engine, LogSink::new());

        let outcome = Scheduler::new()
            .with_quantum_limit(10)
            .run_to_completion(&mut engine);

        // Only the single quantum issued before entering Stepping counts;
        // the empty polls afterwards exhaust the limit without inflating it.
        assert_eq!(
            outcome,
            RunOutcome::QuantumLimit {
                quanta: 1,
                ticks: 100
            }
        );
        assert_eq!(engine.run_calls, 1);
    }

    #[test]
    fn test_quantum_is_tenth_of_a_second() {
        let mut engine = ScriptedEngine::new()
            .with_tick_rate(222_000_000)
            .with_transitions(vec![CoreState::PoweredDown]);
        boot(&mut engine, LogSink::new());

        let outcome = Scheduler::new().run_to_completion(&mut engine);

        assert_eq!(
            outcome,
            RunOutcome::Completed {
                quanta: 1,
                ticks: 22_200_000
            }
        );
    }
}
