//! Test orchestration.
//!
//! Walks the catalog, boots each selected test through the scheduler,
//! captures its output, and verifies it against the golden transcript.
//! Results are returned in catalog order and mirrored to the log.
//!
//! The historical driver ran only the first catalog entry and returned, even
//! though the catalog held eight. That behavior is preserved as the default
//! [`RunPolicy::FirstOnly`]; running everything is a policy value, not a
//! rewrite.

use log::{error, info, warn};

use crate::config::Config;
use crate::engine::{CoreParams, ExecutionEngine, InitError, LogSink};

use super::catalog::TestCatalog;
use super::scheduler::{RunOutcome, Scheduler};
use super::verifier::{self, DiffReport, VerifyError};

/// Which catalog entries to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunPolicy {
    /// Execute only the first entry, then return. The historical default.
    #[default]
    FirstOnly,
    /// Execute every entry in catalog order.
    All,
    /// Execute only the entry at the given index.
    Selected(usize),
}

/// Outcome of one test.
#[derive(Debug)]
pub enum TestOutcome {
    /// Captured output matched the golden transcript.
    Passed,
    /// One or more lines differed.
    Mismatched(DiffReport),
    /// The core failed to boot the image. Aborts the whole invocation.
    InitFailed(InitError),
    /// The golden transcript could not be read; no comparison was made.
    ExpectedUnreadable(VerifyError),
}

/// Result record for one executed test.
#[derive(Debug)]
pub struct TestReport {
    /// Catalog name of the test.
    pub name: String,
    /// How it ended.
    pub outcome: TestOutcome,
}

impl TestReport {
    /// Whether the test ran and its output matched.
    pub fn passed(&self) -> bool {
        matches!(self.outcome, TestOutcome::Passed)
    }
}

/// Execute the selected catalog entries and verify their output.
///
/// For each selected test: build fresh [`CoreParams`] from `config` with a
/// new [`LogSink`], boot a fresh engine from `engine_factory`, poll it to
/// completion, then compare the captured text against the golden file. The
/// run fully completes before the sink is read.
///
/// An init failure aborts the invocation (matching the historical driver's
/// early return); an unreadable golden file is terminal for that test only.
pub fn run_catalog<E, F>(
    catalog: &TestCatalog,
    config: &Config,
    policy: RunPolicy,
    scheduler: &Scheduler,
    mut engine_factory: F,
) -> Vec<TestReport>
where
    E: ExecutionEngine,
    F: FnMut() -> E,
{
    let mut reports = Vec::new();

    for (index, test) in catalog.entries().iter().enumerate() {
        if let RunPolicy::Selected(selected) = policy {
            if index != selected {
                continue;
            }
        }

        info!("Preparing to execute {}", test.name);

        let sink = LogSink::new();
        let params = CoreParams::for_test(
            test.image_path.clone(),
            config.cpu_backend(),
            config.enable_sound(),
            sink.clone(),
        );

        let mut engine = engine_factory();
        if let Err(err) = scheduler.initialize(&mut engine, params) {
            error!("Failed to init autotest {}: {}", test.name, err);
            reports.push(TestReport {
                name: test.name.clone(),
                outcome: TestOutcome::InitFailed(err),
            });
            return reports;
        }

        match scheduler.run_to_completion(&mut engine) {
            RunOutcome::Completed { quanta, ticks } => {
                info!(
                    "Finished running test {} ({} quanta, {} ticks)",
                    test.name, quanta, ticks
                );
            }
            RunOutcome::QuantumLimit { quanta, .. } => {
                warn!(
                    "Test {} gave up after {} quanta without powering down",
                    test.name, quanta
                );
            }
        }
        engine.shutdown();

        let outcome = match verifier::verify_file(&test.expected_path, &sink.contents()) {
            Ok(report) => {
                for m in &report.mismatches {
                    error!(
                        "DIFF! {} vs {}, {} vs {}",
                        m.expected.len(),
                        m.actual.len(),
                        m.expected,
                        m.actual
                    );
                }
                if report.passed() {
                    TestOutcome::Passed
                } else {
                    TestOutcome::Mismatched(report)
                }
            }
            Err(err) => {
                error!("{}", err);
                TestOutcome::ExpectedUnreadable(err)
            }
        };

        info!("Test {} executed.", test.name);
        reports.push(TestReport {
            name: test.name.clone(),
            outcome,
        });

        if policy == RunPolicy::FirstOnly {
            break;
        }
    }

    reports
}
