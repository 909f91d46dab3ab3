//! Scripted stub engine.
//!
//! A deterministic [`ExecutionEngine`] implementation driven by a canned
//! state-transition script instead of a real emulator core. Each `run_until`
//! call consumes exactly the requested ticks, emits any pending output lines
//! into the sink, and then advances to the next scripted state. Used by the
//! harness's own tests and by hosts that want to integration-test their
//! wiring without booting the real core.

use std::collections::VecDeque;

use super::params::CoreParams;
use super::sink::LogSink;
use super::traits::{CoreState, ExecutionEngine, InitError};

/// Default tick rate: the PSP's 222 MHz clock.
pub const DEFAULT_TICK_RATE: u64 = 222_000_000;

/// Stub execution engine that follows a pre-written script.
#[derive(Debug)]
pub struct ScriptedEngine {
    /// State entered after each successive `run_until` call. When the script
    /// is exhausted the engine stays in its current state.
    transitions: VecDeque<CoreState>,
    /// Lines written to the sink during the first `run_until` call.
    output_lines: Vec<String>,
    /// Error to return from `init`, if any.
    init_error: Option<InitError>,
    state: CoreState,
    tick: u64,
    tick_rate: u64,
    sink: Option<LogSink>,
    /// Number of `run_until` calls observed.
    pub run_calls: u64,
    /// Number of `set_state` calls observed.
    pub set_state_calls: u64,
    /// Whether `shutdown` has been called.
    pub shut_down: bool,
}

impl ScriptedEngine {
    /// Engine that stays `Running` forever (never powers down).
    pub fn new() -> Self {
        Self {
            transitions: VecDeque::new(),
            output_lines: Vec::new(),
            init_error: None,
            state: CoreState::Running,
            tick: 0,
            tick_rate: DEFAULT_TICK_RATE,
            sink: None,
            run_calls: 0,
            set_state_calls: 0,
            shut_down: false,
        }
    }

    /// Set the states entered after each successive `run_until` call.
    pub fn with_transitions(mut self, transitions: Vec<CoreState>) -> Self {
        self.transitions = transitions.into();
        self
    }

    /// Set the diagnostic lines emitted during the first `run_until` call.
    pub fn with_output_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_lines = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Make `init` fail with the given core diagnostic.
    pub fn with_init_error(mut self, message: impl Into<String>) -> Self {
        self.init_error = Some(InitError::Core(message.into()));
        self
    }

    /// Override the declared tick rate.
    pub fn with_tick_rate(mut self, rate: u64) -> Self {
        self.tick_rate = rate;
        self
    }
}

impl Default for ScriptedEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionEngine for ScriptedEngine {
    fn init(&mut self, params: CoreParams) -> Result<(), InitError> {
        if let Some(err) = self.init_error.take() {
            return Err(err);
        }
        self.sink = Some(params.log_sink);
        self.state = CoreState::Running;
        self.tick = 0;
        Ok(())
    }

    fn state(&self) -> CoreState {
        self.state
    }

    fn set_state(&mut self, state: CoreState) {
        self.set_state_calls += 1;
        self.state = state;
    }

    fn current_tick(&self) -> u64 {
        self.tick
    }

    fn ticks_per_second(&self) -> u64 {
        self.tick_rate
    }

    fn run_until(&mut self, target_tick: u64) {
        debug_assert_ne!(self.state, CoreState::PoweredDown);

        self.run_calls += 1;
        if target_tick > self.tick {
            self.tick = target_tick;
        }

        // Output only while the core is alive; after power-down the sink is
        // frozen.
        if self.run_calls == 1 {
            if let Some(sink) = &self.sink {
                for line in &self.output_lines {
                    sink.append_line(line);
                }
            }
        }

        if let Some(next) = self.transitions.pop_front() {
            self.state = next;
        }
    }

    fn shutdown(&mut self) {
        self.shut_down = true;
    }
}
