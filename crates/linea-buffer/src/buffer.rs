//! Core line buffer implementation.
//!
//! The buffer is a bounded `Vec<String>`: at most `max_lines` rows, each
//! row an independently owned string. Every mutation captures a deep
//! copy of the whole line sequence into [`History`] before touching the
//! live state, so undo/redo is a straight swap of line vectors.
//!
//! ## Learning: Snapshot-Then-Mutate
//!
//! Precondition checks run strictly before the snapshot, and the
//! snapshot strictly before the mutation. A failed precondition
//! therefore leaves both the buffer and the history untouched, and a
//! recorded snapshot always describes a state the buffer really was in.

use crate::history::{EditKind, History, Snapshot};
use crate::{Cursor, EditError, EditResult};

/// Default maximum number of lines the buffer will hold.
pub const DEFAULT_MAX_LINES: usize = 25;

/// Default undo/redo depth.
pub const DEFAULT_UNDO_DEPTH: usize = 3;

/// Configuration for buffer behavior
#[derive(Debug, Clone)]
pub struct BufferConfig {
    /// Maximum number of lines the buffer may hold
    pub max_lines: usize,

    /// Maximum history entries to keep per stack
    pub undo_depth: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_MAX_LINES,
            undo_depth: DEFAULT_UNDO_DEPTH,
        }
    }
}

/// A bounded, line-oriented text buffer with undo/redo.
///
/// One `LineBuffer` instance represents one editing session. It owns
/// both the live lines and the history; there is no shared or global
/// state, so multiple independent sessions are just multiple instances.
///
/// # Thread Safety
///
/// `LineBuffer` is `Send` but not `Sync` - it can be moved between
/// threads but is designed for single-threaded, synchronous use: every
/// operation runs to completion before the next one starts.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    /// The live ordered sequence of lines
    lines: Vec<String>,

    /// Snapshot history for undo/redo
    history: History,

    /// Buffer-specific settings
    config: BufferConfig,
}

impl LineBuffer {
    /// Creates a new empty buffer with default limits (25 lines,
    /// undo depth 3).
    ///
    /// # Example
    /// ```
    /// use linea_buffer::LineBuffer;
    ///
    /// let buffer = LineBuffer::new();
    /// assert!(buffer.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_config(BufferConfig::default())
    }

    /// Creates a buffer with custom configuration.
    pub fn with_config(config: BufferConfig) -> Self {
        Self {
            lines: Vec::with_capacity(config.max_lines),
            history: History::new(config.undo_depth),
            config,
        }
    }

    // ==================== Measurements ====================

    /// Returns true if the buffer holds no lines.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the number of lines in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns the maximum number of lines the buffer may hold.
    #[inline]
    pub fn max_lines(&self) -> usize {
        self.config.max_lines
    }

    /// Returns a specific line (0-indexed), or `None` if out of range.
    pub fn line(&self, line_idx: usize) -> Option<&str> {
        self.lines.get(line_idx).map(String::as_str)
    }

    /// Borrows the full line sequence.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the buffer's configuration.
    pub fn config(&self) -> &BufferConfig {
        &self.config
    }

    // ==================== Line Mutations ====================

    /// Inserts `text` as a new line at `position`, shifting subsequent
    /// lines down.
    ///
    /// If `position` is beyond the current end, the gap is padded with
    /// empty lines first so the insert index is always valid. This is
    /// intentional sparse-position semantics, not an error: inserting
    /// at position 5 into an empty buffer yields a 6-line buffer whose
    /// first five lines are empty.
    ///
    /// Returns the new line count on success.
    ///
    /// # Errors
    ///
    /// `CapacityExceeded` if the buffer is already full, or if padding
    /// up to `position` would push it past `max_lines`. The buffer and
    /// history are untouched on error.
    pub fn insert_line(&mut self, position: usize, text: impl Into<String>) -> EditResult<usize> {
        let max = self.config.max_lines;
        if self.lines.len() >= max || position >= max {
            return Err(EditError::CapacityExceeded { max });
        }

        // Pad before snapshotting: undo of a sparse insert restores the
        // padded buffer, matching the established observable behavior.
        while position > self.lines.len() {
            self.lines.push(String::new());
        }

        self.snapshot(EditKind::Insert);
        if position == self.lines.len() {
            self.lines.push(text.into());
        } else {
            self.lines.insert(position, text.into());
        }
        Ok(self.lines.len())
    }

    /// Replaces the tail of a line: truncates it to `start_pos`
    /// characters and appends `new_text`.
    ///
    /// This is a destructive replace-from-position, not an insertion -
    /// everything after `start_pos` is discarded even when `new_text`
    /// is shorter than what it replaces.
    ///
    /// If `start_pos` is past the end of the line the content is left
    /// alone, but the snapshot has already been recorded; a guarded
    /// no-op still costs one undo step. Known wart, kept for
    /// compatibility with the established behavior.
    ///
    /// # Errors
    ///
    /// `InvalidLineNumber` if `line` is out of range.
    pub fn update_line(&mut self, line: usize, start_pos: usize, new_text: &str) -> EditResult<()> {
        let len = self.lines.len();
        if line >= len {
            return Err(EditError::InvalidLineNumber { line, len });
        }

        self.snapshot(EditKind::Update);
        let row = &mut self.lines[line];
        if start_pos <= row.chars().count() {
            let at = byte_offset(row, start_pos);
            row.truncate(at);
            row.push_str(new_text);
        }
        Ok(())
    }

    /// Deletes the line at `line`, shifting subsequent lines up.
    ///
    /// Returns the new line count on success.
    ///
    /// # Errors
    ///
    /// `InvalidLineNumber` if `line` is out of range.
    pub fn delete_line(&mut self, line: usize) -> EditResult<usize> {
        let len = self.lines.len();
        if line >= len {
            return Err(EditError::InvalidLineNumber { line, len });
        }

        self.snapshot(EditKind::Delete);
        self.lines.remove(line);
        Ok(self.lines.len())
    }

    // ==================== Word Mutations ====================
    //
    // Word-level operations are tolerant: a cursor whose line index is
    // out of range makes them return without error, without mutating,
    // and without recording a snapshot. Callers holding a stale cursor
    // get a quiet no-op rather than a failure. This policy is part of
    // the observable contract; do not tighten it to an error.

    /// Splices `word` into the cursor's line at the cursor's column.
    ///
    /// A column past the end of the line appends at the end rather than
    /// failing.
    pub fn insert_word(&mut self, cursor: Cursor, word: &str) {
        if cursor.line >= self.lines.len() {
            return;
        }

        self.snapshot(EditKind::Update);
        let row = &mut self.lines[cursor.line];
        let at = byte_offset(row, cursor.column);
        row.insert_str(at, word);
    }

    /// Replaces the first occurrence of `old_word` at or after the
    /// cursor's column, on the cursor's line only, with `new_word`.
    ///
    /// The words may differ in length; the rest of the line shifts
    /// accordingly. When `old_word` does not occur, the content is
    /// unchanged but a snapshot has already been recorded (same wart as
    /// [`update_line`](Self::update_line)).
    pub fn update_word(&mut self, cursor: Cursor, old_word: &str, new_word: &str) {
        if cursor.line >= self.lines.len() {
            return;
        }

        self.snapshot(EditKind::Update);
        let row = &mut self.lines[cursor.line];
        let start = byte_offset(row, cursor.column);
        if let Some(found) = row[start..].find(old_word) {
            let at = start + found;
            row.replace_range(at..at + old_word.len(), new_word);
        }
    }

    /// Removes the first occurrence of `word` at or after the cursor's
    /// column, on the cursor's line only.
    ///
    /// Records a snapshot even when `word` is not found.
    pub fn delete_word(&mut self, cursor: Cursor, word: &str) {
        if cursor.line >= self.lines.len() {
            return;
        }

        self.snapshot(EditKind::Delete);
        let row = &mut self.lines[cursor.line];
        let start = byte_offset(row, cursor.column);
        if let Some(found) = row[start..].find(word) {
            let at = start + found;
            row.replace_range(at..at + word.len(), "");
        }
    }

    // ==================== Search ====================

    /// Finds the first occurrence of `word` in line-major order: lines
    /// are scanned in increasing index order, and within a line the
    /// leftmost match wins.
    ///
    /// Returns `None` when no line contains `word`. Read-only: no
    /// snapshot is recorded, and repeated calls on the same buffer
    /// state return the same result.
    pub fn search_word(&self, word: &str) -> Option<Cursor> {
        self.lines.iter().enumerate().find_map(|(line, row)| {
            row.find(word)
                .map(|byte_idx| Cursor::new(line, char_offset(row, byte_idx)))
        })
    }

    // ==================== Undo/Redo ====================

    /// Undoes the most recent mutation, restoring the snapshot recorded
    /// just before it. The pre-undo state moves onto the redo stack.
    ///
    /// Returns false (and changes nothing) when there is nothing to
    /// undo. That outcome is informational, not an error.
    pub fn undo(&mut self) -> bool {
        if !self.history.can_undo() {
            return false;
        }
        let current = Snapshot::new(self.lines.clone(), EditKind::Update);
        match self.history.undo(current) {
            Some(snapshot) => {
                self.lines = snapshot.into_lines();
                true
            }
            None => false,
        }
    }

    /// Redoes the most recently undone mutation.
    ///
    /// Only valid immediately after an undo: any intervening mutation
    /// clears the redo stack. Returns false when there is nothing to
    /// redo.
    pub fn redo(&mut self) -> bool {
        if !self.history.can_redo() {
            return false;
        }
        let current = Snapshot::new(self.lines.clone(), EditKind::Update);
        match self.history.redo(current) {
            Some(snapshot) => {
                self.lines = snapshot.into_lines();
                true
            }
            None => false,
        }
    }

    /// Returns true if there are mutations to undo.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns true if there are undone mutations to redo.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Returns the number of undo steps currently held.
    pub fn undo_count(&self) -> usize {
        self.history.undo_count()
    }

    /// Returns the number of redo steps currently held.
    pub fn redo_count(&self) -> usize {
        self.history.redo_count()
    }

    fn snapshot(&mut self, kind: EditKind) {
        self.history.record(Snapshot::new(self.lines.clone(), kind));
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a character offset into a byte offset, clamping past-end
/// offsets to the end of the string.
fn byte_offset(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(b, _)| b)
        .unwrap_or(s.len())
}

/// Converts a byte offset (assumed to lie on a char boundary) into a
/// character offset.
fn char_offset(s: &str, byte_idx: usize) -> usize {
    s[..byte_idx].chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn filled(lines: &[&str]) -> LineBuffer {
        let mut buffer = LineBuffer::new();
        for (i, line) in lines.iter().enumerate() {
            buffer.insert_line(i, *line).unwrap();
        }
        buffer
    }

    #[test]
    fn test_capacity_rejected_when_full() {
        let mut buffer = LineBuffer::with_config(BufferConfig {
            max_lines: 2,
            undo_depth: 3,
        });
        buffer.insert_line(0, "a").unwrap();
        buffer.insert_line(1, "b").unwrap();

        let err = buffer.insert_line(2, "c").unwrap_err();
        assert!(matches!(err, EditError::CapacityExceeded { max: 2 }));
        // Failed precondition: no mutation, no snapshot.
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.undo_count(), 2);
    }

    #[test]
    fn test_padding_cannot_overflow_capacity() {
        let mut buffer = LineBuffer::with_config(BufferConfig {
            max_lines: 4,
            undo_depth: 3,
        });
        let err = buffer.insert_line(4, "x").unwrap_err();
        assert!(matches!(err, EditError::CapacityExceeded { .. }));
        assert!(buffer.is_empty());

        assert_eq!(buffer.insert_line(3, "x").unwrap(), 4);
    }

    #[test]
    fn test_sparse_insert_pads_with_empty_lines() {
        let mut buffer = LineBuffer::new();
        let size = buffer.insert_line(5, "x").unwrap();

        assert_eq!(size, 6);
        assert_eq!(buffer.lines()[..5], vec![String::new(); 5][..]);
        assert_eq!(buffer.line(5), Some("x"));
    }

    #[test]
    fn test_insert_shifts_lines_down() {
        let mut buffer = filled(&["a", "c"]);
        buffer.insert_line(1, "b").unwrap();
        assert_eq!(buffer.lines(), ["a", "b", "c"]);
    }

    #[test]
    fn test_update_line_replaces_tail() {
        let mut buffer = filled(&["hello world"]);
        buffer.update_line(0, 6, "there").unwrap();
        assert_eq!(buffer.line(0), Some("hello there"));
    }

    #[test]
    fn test_update_line_out_of_range() {
        let mut buffer = filled(&["a"]);
        let err = buffer.update_line(3, 0, "x").unwrap_err();
        assert!(matches!(err, EditError::InvalidLineNumber { line: 3, len: 1 }));
        assert_eq!(buffer.undo_count(), 1); // only the insert
    }

    #[test]
    fn test_update_line_past_end_is_content_noop_but_snapshots() {
        let mut buffer = filled(&["short"]);
        let before = buffer.undo_count();

        buffer.update_line(0, 100, "abc").unwrap();

        assert_eq!(buffer.line(0), Some("short"));
        assert_eq!(buffer.undo_count(), before + 1);
    }

    #[test]
    fn test_delete_only_line_empties_buffer() {
        let mut buffer = filled(&["solo"]);
        assert_eq!(buffer.delete_line(0).unwrap(), 0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_delete_line_out_of_range() {
        let mut buffer = LineBuffer::new();
        let err = buffer.delete_line(0).unwrap_err();
        assert!(matches!(err, EditError::InvalidLineNumber { line: 0, len: 0 }));
    }

    #[test]
    fn test_search_line_major_leftmost() {
        let buffer = filled(&["cat dog", "dog cat"]);
        assert_eq!(buffer.search_word("dog"), Some(Cursor::new(0, 4)));
        assert_eq!(buffer.search_word("cat"), Some(Cursor::new(0, 0)));
        assert_eq!(buffer.search_word("bird"), None);
    }

    #[test]
    fn test_search_is_restartable() {
        let buffer = filled(&["cat dog", "dog cat"]);
        assert_eq!(buffer.search_word("dog"), buffer.search_word("dog"));
    }

    #[test]
    fn test_insert_word_mid_line() {
        let mut buffer = filled(&["helloworld"]);
        buffer.insert_word(Cursor::new(0, 5), ", ");
        assert_eq!(buffer.line(0), Some("hello, world"));
    }

    #[test]
    fn test_insert_word_past_end_appends() {
        let mut buffer = filled(&["abc"]);
        buffer.insert_word(Cursor::new(0, 99), "def");
        assert_eq!(buffer.line(0), Some("abcdef"));
    }

    #[test]
    fn test_word_ops_tolerate_stale_cursor() {
        let mut buffer = filled(&["abc"]);
        let before = buffer.undo_count();
        let stale = Cursor::new(7, 0);

        buffer.insert_word(stale, "x");
        buffer.update_word(stale, "a", "b");
        buffer.delete_word(stale, "abc");

        // No error, no mutation, no snapshot.
        assert_eq!(buffer.lines(), ["abc"]);
        assert_eq!(buffer.undo_count(), before);
    }

    #[test]
    fn test_update_word_from_cursor_column() {
        let mut buffer = filled(&["dog cat dog"]);
        // Column 1 skips the leading occurrence.
        buffer.update_word(Cursor::new(0, 1), "dog", "fox");
        assert_eq!(buffer.line(0), Some("dog cat fox"));
    }

    #[test]
    fn test_update_word_length_change_shifts_line() {
        let mut buffer = filled(&["a dog here"]);
        buffer.update_word(Cursor::new(0, 0), "dog", "crocodile");
        assert_eq!(buffer.line(0), Some("a crocodile here"));
    }

    #[test]
    fn test_update_word_not_found_still_snapshots() {
        let mut buffer = filled(&["abc"]);
        let before = buffer.undo_count();
        buffer.update_word(Cursor::new(0, 0), "zzz", "x");
        assert_eq!(buffer.line(0), Some("abc"));
        assert_eq!(buffer.undo_count(), before + 1);
    }

    #[test]
    fn test_delete_word() {
        let mut buffer = filled(&["one two three"]);
        buffer.delete_word(Cursor::new(0, 0), "two ");
        assert_eq!(buffer.line(0), Some("one three"));
    }

    #[test]
    fn test_undo_restores_pre_mutation_state() {
        let mut buffer = filled(&["a", "b"]);
        buffer.delete_line(0).unwrap();
        assert_eq!(buffer.lines(), ["b"]);

        assert!(buffer.undo());
        assert_eq!(buffer.lines(), ["a", "b"]);
    }

    #[test]
    fn test_redo_round_trip() {
        let mut buffer = filled(&["a"]);
        buffer.update_line(0, 0, "z").unwrap();

        assert!(buffer.undo());
        assert_eq!(buffer.lines(), ["a"]);
        assert!(buffer.redo());
        assert_eq!(buffer.lines(), ["z"]);
    }

    #[test]
    fn test_new_edit_invalidates_redo() {
        let mut buffer = filled(&["a"]);
        buffer.insert_line(1, "b").unwrap();
        buffer.undo();
        assert!(buffer.can_redo());

        buffer.insert_line(1, "c").unwrap();
        assert!(!buffer.can_redo());
        assert!(!buffer.redo());
        assert_eq!(buffer.lines(), ["a", "c"]);
    }

    #[test]
    fn test_undo_on_fresh_buffer_is_noop() {
        let mut buffer = LineBuffer::new();
        assert!(!buffer.undo());
        assert!(!buffer.redo());
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_undo_depth_evicts_oldest() {
        let mut buffer = LineBuffer::new();
        for (i, line) in ["a", "b", "c", "d"].iter().enumerate() {
            buffer.insert_line(i, *line).unwrap();
        }
        assert_eq!(buffer.undo_count(), 3);

        assert!(buffer.undo());
        assert!(buffer.undo());
        assert!(buffer.undo());
        // The pre-"a" (empty) snapshot was evicted: three undos walk
        // back to the one-line state and a fourth finds nothing.
        assert_eq!(buffer.lines(), ["a"]);
        assert!(!buffer.undo());
    }

    #[test]
    fn test_sparse_insert_undo_keeps_padding() {
        let mut buffer = LineBuffer::new();
        buffer.insert_line(5, "x").unwrap();
        assert!(buffer.undo());
        // The snapshot was taken after padding: undo removes the
        // inserted line but keeps the five pad lines.
        assert_eq!(buffer.lines(), vec![String::new(); 5]);
    }

    // ==================== Properties ====================

    /// A mutating operation the property tests can throw at the buffer.
    #[derive(Debug, Clone)]
    enum Op {
        InsertLine(usize, String),
        UpdateLine(usize, usize, String),
        DeleteLine(usize),
        InsertWord(usize, usize, String),
        DeleteWord(usize, usize, String),
        Undo,
        Redo,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        let word = "[a-z]{0,6}";
        prop_oneof![
            (0..30usize, word).prop_map(|(p, t)| Op::InsertLine(p, t)),
            (0..30usize, 0..12usize, word).prop_map(|(l, s, t)| Op::UpdateLine(l, s, t)),
            (0..30usize).prop_map(Op::DeleteLine),
            (0..30usize, 0..12usize, word).prop_map(|(l, c, w)| Op::InsertWord(l, c, w)),
            (0..30usize, 0..12usize, word).prop_map(|(l, c, w)| Op::DeleteWord(l, c, w)),
            Just(Op::Undo),
            Just(Op::Redo),
        ]
    }

    /// Applies an operation, returning true if its snapshot captured
    /// the exact pre-call state (so undo restores it). Rejected ops,
    /// tolerant no-ops, undo/redo, and sparse inserts (whose snapshot
    /// is taken after gap padding) return false.
    fn apply(buffer: &mut LineBuffer, op: &Op) -> bool {
        match op {
            Op::InsertLine(p, t) => {
                let padded = *p > buffer.len();
                buffer.insert_line(*p, t.clone()).is_ok() && !padded
            }
            Op::UpdateLine(l, s, t) => buffer.update_line(*l, *s, t).is_ok(),
            Op::DeleteLine(l) => buffer.delete_line(*l).is_ok(),
            Op::InsertWord(l, c, w) => {
                let in_range = *l < buffer.len();
                buffer.insert_word(Cursor::new(*l, *c), w);
                in_range
            }
            Op::DeleteWord(l, c, w) => {
                let in_range = *l < buffer.len();
                buffer.delete_word(Cursor::new(*l, *c), w);
                in_range
            }
            Op::Undo => {
                buffer.undo();
                false
            }
            Op::Redo => {
                buffer.redo();
                false
            }
        }
    }

    proptest! {
        /// The line count never exceeds the configured maximum, and the
        /// history stacks never exceed the configured depth, no matter
        /// what sequence of operations runs.
        #[test]
        fn prop_bounds_hold(ops in proptest::collection::vec(op_strategy(), 0..60)) {
            let mut buffer = LineBuffer::new();
            for op in &ops {
                apply(&mut buffer, op);
                prop_assert!(buffer.len() <= buffer.max_lines());
                prop_assert!(buffer.undo_count() <= DEFAULT_UNDO_DEPTH);
                prop_assert!(buffer.redo_count() <= DEFAULT_UNDO_DEPTH);
            }
        }

        /// Undo directly after any successful mutation restores the
        /// exact pre-mutation line sequence, and redo restores the
        /// post-mutation sequence.
        #[test]
        fn prop_undo_redo_round_trip(
            setup in proptest::collection::vec(op_strategy(), 0..20),
            op in op_strategy(),
        ) {
            let mut buffer = LineBuffer::new();
            for s in &setup {
                apply(&mut buffer, s);
            }

            let before = buffer.lines().to_vec();
            let recorded = apply(&mut buffer, &op);
            let after = buffer.lines().to_vec();

            if recorded {
                prop_assert!(buffer.undo());
                prop_assert_eq!(buffer.lines(), &before[..]);
                prop_assert!(buffer.redo());
                prop_assert_eq!(buffer.lines(), &after[..]);
            }
        }

        /// Search is deterministic and returns a valid in-bounds cursor
        /// pointing at an actual match.
        #[test]
        fn prop_search_finds_real_match(
            lines in proptest::collection::vec("[a-c ]{0,8}", 0..10),
            word in "[a-c]{1,3}",
        ) {
            let mut buffer = LineBuffer::new();
            for (i, line) in lines.iter().enumerate() {
                buffer.insert_line(i, line.clone()).unwrap();
            }

            match buffer.search_word(&word) {
                Some(cursor) => {
                    let row = buffer.line(cursor.line).unwrap();
                    prop_assert_eq!(&row[cursor.column..cursor.column + word.len()], &word[..]);
                    // Line-major: no earlier line contains the word.
                    for earlier in &buffer.lines()[..cursor.line] {
                        prop_assert!(!earlier.contains(&word[..]));
                    }
                }
                None => {
                    for line in buffer.lines() {
                        prop_assert!(!line.contains(&word[..]));
                    }
                }
            }
        }
    }
}
