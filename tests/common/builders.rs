//! Test data builders for capture logs

use osc_replay::{Record, RecordSequence};

/// Builder for a single `RECEIVE` log line
pub struct LineBuilder {
    address: Option<String>,
    floats: Vec<String>,
    tick: u32,
}

impl LineBuilder {
    pub fn new(address: &str) -> Self {
        Self {
            address: Some(address.to_string()),
            floats: Vec::new(),
            tick: 0,
        }
    }

    /// A `RECEIVE` line with no `ADDRESS(...)` token
    pub fn without_address() -> Self {
        Self {
            address: None,
            floats: Vec::new(),
            tick: 0,
        }
    }

    pub fn float(mut self, value: f64) -> Self {
        self.floats.push(format!("{:?}", value));
        self
    }

    /// Raw token text, for malformed numbers
    pub fn raw_float(mut self, token: &str) -> Self {
        self.floats.push(token.to_string());
        self
    }

    pub fn tick(mut self, tick: u32) -> Self {
        self.tick = tick;
        self
    }

    pub fn build(self) -> String {
        let mut line = format!(
            "RECEIVE | ENDPOINT([::ffff:127.0.0.1]:50326) t={}",
            self.tick
        );
        if let Some(address) = self.address {
            line.push_str(&format!(" ADDRESS({})", address));
        }
        for token in self.floats {
            line.push_str(&format!(" FLOAT({})", token));
        }
        line
    }
}

/// Builder for a whole capture log
#[derive(Default)]
pub struct LogBuilder {
    lines: Vec<String>,
}

impl LogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn receive(self, line: LineBuilder) -> Self {
        self.line(line.build())
    }

    pub fn build(self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

/// Sequence of `count` records addressed `/r/0`, `/r/1`, ...
pub fn numbered_sequence(count: usize) -> RecordSequence {
    let records = (0..count)
        .map(|i| Record::new(format!("/r/{}", i), vec![i as f64]))
        .collect();
    RecordSequence::new(records, "numbered").expect("count > 0")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_builder() {
        let line = LineBuilder::new("/a").float(1.0).float(-2.5).tick(3).build();
        assert!(line.starts_with("RECEIVE"));
        assert!(line.ends_with("ADDRESS(/a) FLOAT(1.0) FLOAT(-2.5)"));
    }
}
