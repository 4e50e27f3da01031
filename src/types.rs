//! Core data types for osc-replay
//!
//! This module contains the fundamental types passed between the loader and
//! the replayer:
//!
//! - [`Record`] - One OSC address with its float payload, as found in the log
//! - [`RecordSequence`] - The ordered, non-empty list of records to replay
//!
//! Records carry no timestamps. Replay order is source order.

use crate::error::{ReplayError, Result};

/// One parsed (address, payload) unit extracted from a log line
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// OSC address, exactly as it appeared between `ADDRESS(` and `)`
    pub address: String,
    /// Float arguments in source order (may be empty)
    pub payload: Vec<f64>,
}

impl Record {
    /// Create a new record
    pub fn new(address: impl Into<String>, payload: Vec<f64>) -> Self {
        Self {
            address: address.into(),
            payload,
        }
    }

    /// Number of float arguments
    pub fn arg_count(&self) -> usize {
        self.payload.len()
    }
}

/// Ordered, immutable, non-empty list of records
///
/// The only way to build one is [`RecordSequence::new`], which rejects an
/// empty list, so the replayer never has to handle the zero-record case.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSequence {
    records: Vec<Record>,
}

impl RecordSequence {
    /// Build a sequence, failing with [`ReplayError::EmptySequence`] if `records` is empty
    ///
    /// `source_name` is only used in the error message.
    pub fn new(records: Vec<Record>, source_name: impl Into<String>) -> Result<Self> {
        if records.is_empty() {
            return Err(ReplayError::EmptySequence {
                source_name: source_name.into(),
            });
        }
        Ok(Self { records })
    }

    /// Number of records (always at least one)
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; kept for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in source order
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Records as a slice
    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    /// First record
    pub fn first(&self) -> &Record {
        &self.records[0]
    }
}

impl<'a> IntoIterator for &'a RecordSequence {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sequence_rejected() {
        let err = RecordSequence::new(Vec::new(), "empty.txt").unwrap_err();
        assert!(matches!(err, ReplayError::EmptySequence { ref source_name } if source_name == "empty.txt"));
    }

    #[test]
    fn test_sequence_preserves_order() {
        let seq = RecordSequence::new(
            vec![
                Record::new("/b", vec![2.0]),
                Record::new("/a", vec![]),
                Record::new("/c", vec![1.0, 3.0]),
            ],
            "test",
        )
        .unwrap();

        let addrs: Vec<_> = seq.iter().map(|r| r.address.as_str()).collect();
        assert_eq!(addrs, ["/b", "/a", "/c"]);
        assert_eq!(seq.len(), 3);
        assert!(!seq.is_empty());
        assert_eq!(seq.first().address, "/b");
    }

    #[test]
    fn test_record_arg_count() {
        assert_eq!(Record::new("/x", vec![]).arg_count(), 0);
        assert_eq!(Record::new("/x", vec![1.0, 2.0]).arg_count(), 2);
    }
}
