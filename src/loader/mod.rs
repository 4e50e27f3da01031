//! Log loading
//!
//! Turns a text source into a [`RecordSequence`]. Only lines that start with
//! `RECEIVE` (after trimming) are considered. Candidate lines that fail to
//! parse are skipped, so a noisy log still yields every well-formed entry.
//! An empty result is fatal.
//!
//! # Example
//!
//! ```ignore
//! use osc_replay::loader::load_entries_from_path;
//!
//! let sequence = load_entries_from_path("log.txt")?;
//! println!("{} messages", sequence.len());
//! ```

pub mod parser;

pub use parser::{extract_record, LineParser};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{ReplayError, Result};
use crate::types::{Record, RecordSequence};

/// Literal prefix marking a received-message line
pub const RECEIVE_PREFIX: &str = "RECEIVE";

/// Summary of one load pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Total lines read from the source
    pub lines_read: usize,
    /// Lines starting with `RECEIVE`
    pub candidates: usize,
    /// Candidate lines dropped because they failed to parse
    pub skipped: usize,
}

impl LoadReport {
    /// Candidate lines that produced a record
    pub fn accepted(&self) -> usize {
        self.candidates - self.skipped
    }
}

/// Load a record sequence from any line-oriented reader
///
/// `source_name` is used for logging and for the empty-sequence error.
pub fn load_entries<R: BufRead>(reader: R, source_name: &str) -> Result<RecordSequence> {
    load_entries_with_report(reader, source_name).map(|(sequence, _)| sequence)
}

/// Load a record sequence and return the per-line statistics alongside it
pub fn load_entries_with_report<R: BufRead>(
    reader: R,
    source_name: &str,
) -> Result<(RecordSequence, LoadReport)> {
    let parser = LineParser::global();
    let mut report = LoadReport::default();
    let mut records: Vec<Record> = Vec::new();

    for raw in reader.lines() {
        let raw = raw?;

        // Old Mac-style logs end lines with a bare '\r'
        for segment in raw.strip_suffix('\r').unwrap_or(&raw).split('\r') {
            report.lines_read += 1;

            let line = if report.lines_read == 1 {
                segment.trim_start_matches('\u{feff}').trim()
            } else {
                segment.trim()
            };
            if !line.starts_with(RECEIVE_PREFIX) {
                continue;
            }
            report.candidates += 1;

            match parser.extract(line) {
                Ok(record) => records.push(record),
                Err(e) => {
                    report.skipped += 1;
                    tracing::debug!(
                        "Skipping line {} of {}: {}",
                        report.lines_read,
                        source_name,
                        e
                    );
                }
            }
        }
    }

    let sequence = RecordSequence::new(records, source_name)?;
    tracing::info!(
        "Loaded {} records from {} ({} lines, {} skipped)",
        sequence.len(),
        source_name,
        report.lines_read,
        report.skipped
    );

    Ok((sequence, report))
}

/// Load a record sequence from a file on disk
pub fn load_entries_from_path(path: impl AsRef<Path>) -> Result<RecordSequence> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        ReplayError::Io(e).with_context(format!("Failed to open log file {:?}", path))
    })?;

    load_entries(BufReader::new(file), &path.display().to_string())
}
