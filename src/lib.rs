//! psp-autotest library
//!
//! Regression-test driver for a PSP emulator core. Resolves the pspautotests
//! catalog, drives each selected image to completion through the host's
//! execution engine, and verifies the captured diagnostic output against the
//! golden transcript.
//!
//! # Usage
//!
//! ```no_run
//! use psp_autotest::config::Config;
//! use psp_autotest::engine::ScriptedEngine;
//! use psp_autotest::harness::{run_catalog, RunPolicy, Scheduler, TestCatalog};
//!
//! let config = Config::load();
//! let catalog = TestCatalog::standard(&config.memstick_dir());
//! let reports = run_catalog(
//!     &catalog,
//!     &config,
//!     RunPolicy::default(),
//!     &Scheduler::new(),
//!     ScriptedEngine::new, // a real host supplies its own engine here
//! );
//! for report in &reports {
//!     println!("{}: {}", report.name, if report.passed() { "PASS" } else { "FAIL" });
//! }
//! ```

pub mod config;
pub mod engine;
pub mod harness;
