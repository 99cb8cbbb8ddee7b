//! LCOV format parser

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::{CoverageRecord, ResolvedPath};
use crate::error::{GateError, Result};

const SOURCE_FILE: &str = "SF:";
const LINES_FOUND: &str = "LF:";
const LINES_HIT: &str = "LH:";
const END_OF_RECORD: &str = "end_of_record";

/// Fields collected between `SF:` and `end_of_record`
#[derive(Debug, Default)]
struct RecordState {
    path: Option<ResolvedPath>,
    tracked: bool,
    lines_found: Option<u64>,
    lines_hit: Option<u64>,
}

impl RecordState {
    fn open(path: ResolvedPath, prefix: &str) -> Self {
        let tracked = path.starts_with(prefix);
        Self {
            path: Some(path),
            tracked,
            lines_found: None,
            lines_hit: None,
        }
    }

    /// Consume the state, leaving it empty for the next record
    fn close(&mut self) -> Option<CoverageRecord> {
        let state = std::mem::take(self);
        state.path.map(|path| CoverageRecord {
            path,
            tracked: state.tracked,
            lines_found: state.lines_found,
            lines_hit: state.lines_hit,
        })
    }
}

/// Parse an LCOV file
pub fn parse_lcov(path: &Path, root: &Path, prefix: &str) -> Result<Vec<CoverageRecord>> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => GateError::ReportNotFound {
            path: path.to_path_buf(),
        },
        _ => GateError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    parse_lcov_string(&content, root, prefix)
}

/// Parse LCOV content from a string.
///
/// Records are returned in the order they close. Anything other than
/// `SF`, `LF`, `LH` and `end_of_record` is skipped.
pub fn parse_lcov_string(content: &str, root: &Path, prefix: &str) -> Result<Vec<CoverageRecord>> {
    let mut records = Vec::new();
    let mut state = RecordState::default();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();

        if let Some(source) = line.strip_prefix(SOURCE_FILE) {
            state = RecordState::open(ResolvedPath::resolve(source, root), prefix);
        } else if let Some(value) = line.strip_prefix(LINES_FOUND) {
            state.lines_found = Some(parse_count(value, "LF", index + 1)?);
        } else if let Some(value) = line.strip_prefix(LINES_HIT) {
            state.lines_hit = Some(parse_count(value, "LH", index + 1)?);
        } else if line == END_OF_RECORD {
            records.extend(state.close());
        }
    }

    Ok(records)
}

fn parse_count(value: &str, marker: &'static str, line: usize) -> Result<u64> {
    value.trim().parse::<u64>().map_err(|_| GateError::InvalidCount {
        line,
        marker,
        value: value.to_string(),
    })
}
