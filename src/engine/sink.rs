//! Diagnostic output sink.
//!
//! The emulator core emits diagnostic text (the `printf` output of the test
//! program) while it runs. The harness hands the core a [`LogSink`] at
//! initialization and reads the accumulated text back once the core has
//! powered down. Cloning a sink shares the underlying buffer, so the engine
//! and the harness observe the same text without the engine ever owning it.
//!
//! The sink is single-threaded by construction (`Rc`); the run phase and the
//! verify phase are strictly ordered, so no locking is needed.

use std::cell::RefCell;
use std::rc::Rc;

/// Append-only shared text buffer for captured emulator output.
#[derive(Debug, Clone, Default)]
pub struct LogSink {
    buf: Rc<RefCell<String>>,
}

impl LogSink {
    /// Create a new, empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw text to the buffer.
    pub fn append(&self, text: &str) {
        self.buf.borrow_mut().push_str(text);
    }

    /// Append a line of text, followed by a newline.
    pub fn append_line(&self, line: &str) {
        let mut buf = self.buf.borrow_mut();
        buf.push_str(line);
        buf.push('\n');
    }

    /// Discard everything captured so far.
    pub fn clear(&self) {
        self.buf.borrow_mut().clear();
    }

    /// Whether nothing has been captured yet.
    pub fn is_empty(&self) -> bool {
        self.buf.borrow().is_empty()
    }

    /// Snapshot of the captured text.
    pub fn contents(&self) -> String {
        self.buf.borrow().clone()
    }
}
