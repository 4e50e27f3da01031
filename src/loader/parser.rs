//! Single-line record extraction
//!
//! A relevant log line looks like:
//!
//! ```text
//! RECEIVE | ENDPOINT([::ffff:127.0.0.1]:50326) ADDRESS(/mocap/joint/lin_vel) FLOAT(0.01) FLOAT(-0.02)
//! ```
//!
//! The address is the text between the first `ADDRESS(` and the next `)`.
//! Floats are every `FLOAT(...)` token whose body looks numeric. Matching and
//! parsing are separate steps: a token like `FLOAT(1.2.3)` matches the marker
//! pattern but fails to parse, which fails the whole line.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{ReplayError, Result};
use crate::types::Record;

const ADDRESS_PATTERN: &str = r"ADDRESS\(([^\)]+)\)";
const FLOAT_PATTERN: &str = r"FLOAT\((-?[0-9\.eE+-]+)\)";

/// Compiled marker patterns
#[derive(Debug, Clone)]
pub struct LineParser {
    address: Regex,
    float: Regex,
}

impl LineParser {
    /// Compile the marker patterns
    pub fn new() -> Self {
        Self {
            address: Regex::new(ADDRESS_PATTERN).expect("ADDRESS pattern is valid"),
            float: Regex::new(FLOAT_PATTERN).expect("FLOAT pattern is valid"),
        }
    }

    /// Shared parser instance
    pub fn global() -> &'static LineParser {
        static PARSER: OnceLock<LineParser> = OnceLock::new();
        PARSER.get_or_init(LineParser::new)
    }

    /// Extract the address and float payload from one line
    pub fn extract(&self, line: &str) -> Result<Record> {
        let address = self
            .address
            .captures(line)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| ReplayError::MissingAddress {
                line: line.to_string(),
            })?
            .as_str();

        let payload = self
            .float
            .captures_iter(line)
            .filter_map(|caps| caps.get(1))
            .map(|token| {
                let token = token.as_str();
                token
                    .parse::<f64>()
                    .map_err(|source| ReplayError::InvalidFloat {
                        token: token.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<f64>>>()?;

        Ok(Record::new(address, payload))
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract a [`Record`] from one log line
///
/// Fails with [`ReplayError::MissingAddress`] when no `ADDRESS(...)` token is
/// present, and with [`ReplayError::InvalidFloat`] when a `FLOAT(...)` token
/// does not parse.
pub fn extract_record(line: &str) -> Result<Record> {
    LineParser::global().extract(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_address_and_floats() {
        let record =
            extract_record("RECEIVE | t=1 ADDRESS(/a) FLOAT(1.0) FLOAT(-2.5)").unwrap();
        assert_eq!(record.address, "/a");
        assert_eq!(record.payload, vec![1.0, -2.5]);
    }

    #[test]
    fn test_extract_without_floats() {
        let record = extract_record("RECEIVE | t=2 ADDRESS(/b)").unwrap();
        assert_eq!(record, Record::new("/b", vec![]));
    }

    #[test]
    fn test_address_is_taken_verbatim() {
        let record = extract_record("RECEIVE | ADDRESS(/mocap/joint 3/lin_vel) FLOAT(0)").unwrap();
        assert_eq!(record.address, "/mocap/joint 3/lin_vel");
    }

    #[test]
    fn test_exponent_and_sign_forms() {
        let record = extract_record(
            "RECEIVE | ADDRESS(/x) FLOAT(1e-3) FLOAT(-2.5E+2) FLOAT(.5) FLOAT(+4) FLOAT(7.)",
        )
        .unwrap();
        assert_eq!(record.payload, vec![0.001, -250.0, 0.5, 4.0, 7.0]);
    }

    #[test]
    fn test_missing_address() {
        let err = extract_record("RECEIVE | FLOAT(1.0)").unwrap_err();
        assert!(matches!(err, ReplayError::MissingAddress { .. }));
    }

    #[test]
    fn test_empty_address_is_missing() {
        let err = extract_record("RECEIVE | ADDRESS() FLOAT(1.0)").unwrap_err();
        assert!(matches!(err, ReplayError::MissingAddress { .. }));
    }

    #[test]
    fn test_malformed_float_fails_line() {
        let err = extract_record("RECEIVE | ADDRESS(/a) FLOAT(1.0) FLOAT(1.2.3)").unwrap_err();
        match err {
            ReplayError::InvalidFloat { token, .. } => assert_eq!(token, "1.2.3"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_lone_sign_fails_line() {
        assert!(extract_record("RECEIVE | ADDRESS(/a) FLOAT(-)").is_err());
        assert!(extract_record("RECEIVE | ADDRESS(/a) FLOAT(e)").is_err());
    }

    #[test]
    fn test_non_numeric_float_body_is_ignored() {
        // Letters outside [eE] never match the marker pattern at all
        let record = extract_record("RECEIVE | ADDRESS(/a) FLOAT(nan) FLOAT(2)").unwrap();
        assert_eq!(record.payload, vec![2.0]);
    }

    #[test]
    fn test_first_address_wins() {
        let record = extract_record("RECEIVE | ADDRESS(/first) ADDRESS(/second)").unwrap();
        assert_eq!(record.address, "/first");
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_round_trip(
            addr in "/[a-z][a-z0-9_/]{0,20}",
            floats in prop::collection::vec(-1.0e6f64..1.0e6, 0..12),
            prefix in "[a-z0-9=:. ]{0,16}",
        ) {
            let mut line = format!("RECEIVE | {} ADDRESS({})", prefix, addr);
            for f in &floats {
                line.push_str(&format!(" FLOAT({:?})", f));
            }

            let record = extract_record(&line).unwrap();

            prop_assert_eq!(record.address, addr);
            prop_assert_eq!(record.payload, floats);
        }
    }
}
