//! 100% line coverage gate

use colored::Colorize;

use super::{parse_lcov, CoverageRecord, Failure, Verdict};
use crate::config::GateConfig;
use crate::error::Result;

/// Outcome of gating a whole report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateResult {
    Pass,
    /// Failing files in report order
    Fail(Vec<Failure>),
}

impl GateResult {
    pub fn passed(&self) -> bool {
        matches!(self, GateResult::Pass)
    }

    pub fn failures(&self) -> &[Failure] {
        match self {
            GateResult::Pass => &[],
            GateResult::Fail(failures) => failures,
        }
    }

    /// Report lines, without the leading `[COVERAGE]` tag on the header
    pub fn summary_lines(&self, prefix: &str) -> Vec<String> {
        match self {
            GateResult::Pass => vec![format!("100% line coverage for all files under {}", prefix)],
            GateResult::Fail(failures) => {
                let mut lines = Vec::with_capacity(failures.len() + 1);
                lines.push(format!(
                    "Expected 100% line coverage for files under {}, got:",
                    prefix
                ));
                lines.extend(failures.iter().map(|failure| format!(" - {}", failure)));
                lines
            }
        }
    }

    pub fn print_summary(&self, prefix: &str) {
        let tag = if self.passed() {
            "[COVERAGE]".green().bold()
        } else {
            "[COVERAGE]".red().bold()
        };

        let mut lines = self.summary_lines(prefix).into_iter();
        if let Some(header) = lines.next() {
            println!("{} {}", tag, header);
        }
        for line in lines {
            println!("{}", line.yellow());
        }
    }
}

/// Collect the failing verdicts of `records`
pub fn evaluate(records: &[CoverageRecord]) -> GateResult {
    let failures: Vec<Failure> = records
        .iter()
        .filter_map(|record| match record.verdict() {
            Verdict::Pass => None,
            Verdict::Fail { hits, total } => Some(Failure {
                path: record.path.clone(),
                hits,
                total,
            }),
        })
        .collect();

    if failures.is_empty() {
        GateResult::Pass
    } else {
        GateResult::Fail(failures)
    }
}

/// Load the configured report and gate it
pub fn check_report(config: &GateConfig) -> Result<GateResult> {
    let records = parse_lcov(&config.report_path(), &config.root, &config.prefix)?;
    Ok(evaluate(&records))
}
