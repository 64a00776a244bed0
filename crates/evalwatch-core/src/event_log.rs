//! Append-only event log with reset semantics

use crate::types::{LogLine, Severity};

/// Ordered sequence of [`LogLine`]s in arrival order.
///
/// Lines are only ever appended or cleared wholesale. Sequence numbers keep
/// increasing across clears, so a line appended after a reset always sorts
/// after every line that existed before it.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    lines: Vec<LogLine>,
    next_seq: u64,
    /// Number of clear-to-empty transitions since creation
    clears: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line and return a reference to it
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) -> &LogLine {
        let line = LogLine::new(self.next_seq, severity, message);
        self.next_seq += 1;
        self.lines.push(line);
        &self.lines[self.lines.len() - 1]
    }

    pub fn info(&mut self, message: impl Into<String>) -> &LogLine {
        self.push(Severity::Info, message)
    }

    pub fn success(&mut self, message: impl Into<String>) -> &LogLine {
        self.push(Severity::Success, message)
    }

    pub fn warn(&mut self, message: impl Into<String>) -> &LogLine {
        self.push(Severity::Warning, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> &LogLine {
        self.push(Severity::Error, message)
    }

    /// Drop every line. Sequence numbering continues.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.clears += 1;
    }

    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    pub fn last(&self) -> Option<&LogLine> {
        self.lines.last()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear_count(&self) -> u64 {
        self.clears
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_arrival_order() {
        let mut log = EventLog::new();
        log.info("one");
        log.warn("two");
        log.error("three");

        let messages: Vec<_> = log.lines().iter().map(|l| l.message.as_str()).collect();
        assert_eq!(messages, vec!["one", "two", "three"]);

        let seqs: Vec<_> = log.lines().iter().map(|l| l.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2]);
    }

    #[test]
    fn test_clear_empties_and_keeps_sequence_monotonic() {
        let mut log = EventLog::new();
        log.info("before");
        log.info("before again");
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.clear_count(), 1);

        let seq = log.success("after").seq;
        assert_eq!(seq, 2);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_push_returns_appended_line() {
        let mut log = EventLog::new();
        let line = log.success("done");
        assert_eq!(line.severity, Severity::Success);
        assert_eq!(line.message, "done");
        assert_eq!(log.last().map(|l| l.message.as_str()), Some("done"));
    }
}
