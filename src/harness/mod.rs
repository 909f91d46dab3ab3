//! Autotest harness.
//!
//! This module holds the regression-test driver proper:
//! - Resolving the test catalog to image and golden-transcript paths
//! - Scheduling a booted image to completion in bounded virtual-time quanta
//! - Verifying captured output against the golden transcript
//! - Orchestrating all three stages per selected test and reporting results

pub mod catalog;
pub mod runner;
pub mod scheduler;
pub mod verifier;

pub use catalog::{TestCatalog, TestDescriptor, STANDARD_TESTS};
pub use runner::{run_catalog, RunPolicy, TestOutcome, TestReport};
pub use scheduler::{RunOutcome, Scheduler};
pub use verifier::{compare_transcripts, verify_file, DiffReport, LineMismatch, VerifyError};
