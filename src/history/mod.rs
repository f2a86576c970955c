//! Linear undo/redo tape
//!
//! [`History`] stores a full copy of the structure after every committed
//! mutation, plus a cursor at the entry currently on screen. Entries past the
//! cursor exist only after an undo; the next commit truncates them before
//! appending. The tape never branches.
//!
//! Entries are never mutated once appended. Optionally the tape keeps at
//! most `limit` entries, dropping the oldest first.

use std::time::SystemTime;

/// One committed state
#[derive(Debug, Clone)]
pub struct HistoryEntry<S> {
    pub state: S,
    pub label: String,
    pub timestamp: SystemTime,
}

impl<S> HistoryEntry<S> {
    fn new(state: S, label: impl Into<String>) -> Self {
        HistoryEntry {
            state,
            label: label.into(),
            timestamp: SystemTime::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct History<S> {
    entries: Vec<HistoryEntry<S>>,
    cursor: usize,
    limit: Option<usize>,
}

impl<S: Clone> History<S> {
    /// Tape holding only `initial`
    pub fn new(initial: S, label: impl Into<String>) -> Self {
        History {
            entries: vec![HistoryEntry::new(initial, label)],
            cursor: 0,
            limit: None,
        }
    }

    /// Keep at most `limit` entries (at least one)
    pub fn with_limit(initial: S, label: impl Into<String>, limit: usize) -> Self {
        let mut history = Self::new(initial, label);
        history.limit = Some(limit.max(1));
        history
    }

    /// Drop any redo future, append `state` and move the cursor onto it
    pub fn commit(&mut self, label: impl Into<String>, state: S) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(HistoryEntry::new(state, label));
        if let Some(limit) = self.limit {
            let excess = self.entries.len().saturating_sub(limit);
            self.entries.drain(..excess);
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Step back one entry, `None` at the start of the tape
    pub fn undo(&mut self) -> Option<&HistoryEntry<S>> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step forward one entry, `None` at the end of the tape
    pub fn redo(&mut self) -> Option<&HistoryEntry<S>> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    /// Throw everything away and start over from `initial`
    pub fn reset(&mut self, initial: S, label: impl Into<String>) {
        self.entries.clear();
        self.entries.push(HistoryEntry::new(initial, label));
        self.cursor = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn current(&self) -> &HistoryEntry<S> {
        &self.entries[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn entries(&self) -> &[HistoryEntry<S>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false, a tape holds at least its initial entry
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states(history: &History<char>) -> Vec<char> {
        history.entries().iter().map(|e| e.state).collect()
    }

    #[test]
    fn commit_after_undo_truncates_future() {
        let mut history = History::new('A', "start");
        history.commit("b", 'B');
        history.commit("c", 'C');
        assert_eq!(history.undo().map(|e| e.state), Some('B'));

        history.commit("d", 'D');
        assert_eq!(states(&history), vec!['A', 'B', 'D']);
        assert_eq!(history.cursor(), 2);
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_and_redo_clamp_at_the_ends() {
        let mut history = History::new(1, "start");
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());

        history.commit("two", 2);
        assert_eq!(history.undo().map(|e| e.state), Some(1));
        assert!(history.undo().is_none());
        assert_eq!(history.redo().map(|e| e.state), Some(2));
        assert!(history.redo().is_none());
        assert_eq!(history.current().state, 2);
    }

    #[test]
    fn limit_drops_oldest_entries() {
        let mut history = History::with_limit('A', "start", 3);
        for (i, c) in ['B', 'C', 'D', 'E'].into_iter().enumerate() {
            history.commit(format!("{}", i), c);
        }
        assert_eq!(states(&history), vec!['C', 'D', 'E']);
        assert_eq!(history.cursor(), 2);
        assert_eq!(history.current().state, 'E');
    }

    #[test]
    fn reset_leaves_a_single_entry() {
        let mut history = History::new(0, "start");
        history.commit("one", 1);
        history.reset(0, "Cleared");
        assert_eq!(history.len(), 1);
        assert_eq!(history.current().label, "Cleared");
        assert!(!history.can_undo());
    }
}
