//! Conformance harness for discoeb-core.
//!
//! This crate provides:
//! - Fixtures: JSON reference cases per numerics family
//! - Execution: dispatch a fixture case onto the core kernels
//! - Verification: tolerance-aware comparison of JSON outputs
//! - Structured logging: JSONL run logs plus a SHA-256 artifact index

#![forbid(unsafe_code)]

pub mod config;
pub mod diff;
pub mod error;
pub mod exec;
pub mod fixtures;
pub mod runner;
pub mod structured_log;
pub mod verify;

pub use config::{Tolerance, ToleranceProfile};
pub use error::HarnessError;
pub use exec::{ExecError, execute_fixture_case};
pub use fixtures::{FixtureCase, FixtureSet};
pub use runner::TestRunner;
pub use verify::{VerificationResult, VerificationSummary};
