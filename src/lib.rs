//! covgate - 100% line coverage build gate
//!
//! Reads an LCOV report and fails when any file under the tracked
//! source prefix has uncovered lines:
//! - LCOV parsing with per-record isolation
//! - Root-relative path resolution with absolute fallback
//! - Pass/fail decision with an itemized report

pub mod config;
pub mod coverage;
pub mod error;

pub use config::{GateConfig, Overrides};
pub use coverage::{check_report, evaluate, CoverageRecord, Failure, GateResult, ResolvedPath, Verdict};
pub use error::GateError;
