//! Coverage module
//!
//! Provides:
//! - LCOV parsing
//! - Source path resolution against the project root
//! - The 100% line coverage gate

mod gate;
mod lcov;
mod path;

pub use gate::*;
pub use lcov::*;
pub use path::ResolvedPath;

use std::fmt;

/// Line coverage of a single source file as reported by the coverage tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageRecord {
    pub path: ResolvedPath,
    /// Whether the path falls under the configured prefix
    pub tracked: bool,
    pub lines_found: Option<u64>,
    pub lines_hit: Option<u64>,
}

impl CoverageRecord {
    /// Untracked records and records without instrumented lines always pass.
    /// A missing `LH` counts as zero hits.
    pub fn verdict(&self) -> Verdict {
        if !self.tracked {
            return Verdict::Pass;
        }

        match self.lines_found {
            Some(total) if total > 0 => {
                let hits = self.lines_hit.unwrap_or(0);
                if hits == total {
                    Verdict::Pass
                } else {
                    Verdict::Fail { hits, total }
                }
            }
            _ => Verdict::Pass,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail { hits: u64, total: u64 },
}

/// A tracked file below 100% line coverage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub path: ResolvedPath,
    pub hits: u64,
    pub total: u64,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}/{} lines covered", self.path, self.hits, self.total)
    }
}
