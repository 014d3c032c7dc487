//! Snapshot history for an open document.
//!
//! The buffer is independent of the editor's native undo stack: the backend
//! feeds it debounced full-text snapshots, so one entry covers a burst of
//! typing rather than a single keystroke. A new edit after restoring to a past
//! point truncates the abandoned future, keeping the history linear.

use chrono::{DateTime, Utc};

/// Maximum number of snapshots retained per document.
pub const HISTORY_CAPACITY: usize = 50;

/// A single text snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub text: String,
}

/// Bounded, branch-truncating snapshot buffer with a current position.
///
/// Never empty: it is seeded with the initial document text and the index
/// always points at a live entry.
#[derive(Debug)]
pub struct HistoryBuffer {
    entries: Vec<HistoryEntry>,
    index: usize,
}

impl HistoryBuffer {
    pub fn new(initial_text: String, now: DateTime<Utc>) -> Self {
        Self {
            entries: vec![HistoryEntry {
                timestamp: now,
                text: initial_text,
            }],
            index: 0,
        }
    }

    /// Records a snapshot. No-op when `text` equals the entry at the current
    /// position; otherwise entries beyond the position are discarded (a new
    /// edit after an undo destroys the redone future), the snapshot is
    /// appended, and the oldest entry is evicted once the buffer exceeds
    /// [`HISTORY_CAPACITY`].
    ///
    /// Returns whether an entry was added.
    pub fn record(&mut self, text: &str, now: DateTime<Utc>) -> bool {
        if self.entries[self.index].text == text {
            return false;
        }

        self.entries.truncate(self.index + 1);
        self.entries.push(HistoryEntry {
            timestamp: now,
            text: text.to_string(),
        });
        self.index = self.entries.len() - 1;

        // Eviction runs after truncation and append, never before.
        if self.entries.len() > HISTORY_CAPACITY {
            self.entries.remove(0);
            self.index -= 1;
        }

        true
    }

    /// Moves the current position to `target` and returns that entry's text.
    ///
    /// Restoring is not itself an edit: it does not record, so typing after a
    /// restore is what starts the new branch. Out-of-range targets are a no-op.
    pub fn restore(&mut self, target: usize) -> Option<&str> {
        if target >= self.entries.len() {
            return None;
        }
        self.index = target;
        Some(&self.entries[target].text)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Text at the current position.
    pub fn current_text(&self) -> &str {
        &self.entries[self.index].text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(seconds, 0).unwrap()
    }

    fn buffer_with(texts: &[&str]) -> HistoryBuffer {
        let mut buffer = HistoryBuffer::new("initial".to_string(), t(0));
        for (i, text) in texts.iter().enumerate() {
            buffer.record(text, t(i as i64 + 1));
        }
        buffer
    }

    #[test]
    fn test_starts_with_initial_entry() {
        let buffer = HistoryBuffer::new("hello".to_string(), t(0));
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.index(), 0);
        assert_eq!(buffer.current_text(), "hello");
    }

    #[test]
    fn test_record_appends_and_advances() {
        let buffer = buffer_with(&["a", "b", "c"]);
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.index(), 3);
        assert_eq!(buffer.current_text(), "c");
    }

    #[test]
    fn test_record_unchanged_text_is_noop() {
        let mut buffer = buffer_with(&["a"]);
        assert!(!buffer.record("a", t(99)));
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.index(), 1);
    }

    #[test]
    fn test_restore_moves_index_without_recording() {
        let mut buffer = buffer_with(&["a", "b", "c"]);
        assert_eq!(buffer.restore(1), Some("a"));
        assert_eq!(buffer.index(), 1);
        assert_eq!(buffer.len(), 4);
    }

    #[test]
    fn test_restore_out_of_range_is_noop() {
        let mut buffer = buffer_with(&["a"]);
        assert_eq!(buffer.restore(5), None);
        assert_eq!(buffer.index(), 1);
    }

    #[test]
    fn test_record_after_restore_truncates_future() {
        // Buffer [initial, a, b, c] at index 3; restore(1) then record.
        let mut buffer = buffer_with(&["a", "b", "c"]);
        buffer.restore(1);
        assert!(buffer.record("d", t(10)));

        let texts: Vec<&str> = buffer.entries().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["initial", "a", "d"]);
        assert_eq!(buffer.index(), 2);
    }

    #[test]
    fn test_record_equal_to_restored_entry_is_noop() {
        // Restore re-enters a past point; an equal-text record afterwards must
        // not branch.
        let mut buffer = buffer_with(&["a", "b"]);
        buffer.restore(1);
        assert!(!buffer.record("a", t(10)));
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.index(), 1);
    }

    #[test]
    fn test_eviction_shifts_indices() {
        let mut buffer = HistoryBuffer::new("initial".to_string(), t(0));
        for i in 0..(HISTORY_CAPACITY - 1) {
            assert!(buffer.record(&format!("text-{i}"), t(i as i64 + 1)));
        }
        assert_eq!(buffer.len(), HISTORY_CAPACITY);
        assert_eq!(buffer.index(), HISTORY_CAPACITY - 1);

        // One more distinct entry evicts the seed; everything shifts down.
        assert!(buffer.record("overflow", t(1000)));
        assert_eq!(buffer.len(), HISTORY_CAPACITY);
        assert_eq!(buffer.index(), HISTORY_CAPACITY - 1);
        assert_eq!(buffer.entries()[0].text, "text-0");
        assert_eq!(buffer.current_text(), "overflow");
    }

    #[test]
    fn test_timestamps_are_preserved() {
        let buffer = buffer_with(&["a"]);
        assert_eq!(buffer.entries()[0].timestamp, t(0));
        assert_eq!(buffer.entries()[1].timestamp, t(1));
    }
}
