//! Cursor type for addressing positions in the buffer.
//!
//! ## Learning: Newtype Pattern
//!
//! `Cursor` wraps line/column coordinates in a named struct.
//! This is better than using `(usize, usize)` because:
//! - Type safety: Can't accidentally swap line and column
//! - Named fields: Self-documenting code
//! - Methods: Can add behavior specific to positions

use serde::{Deserialize, Serialize};

/// A position in the buffer: a line index and a character offset into
/// that line.
///
/// Both fields are 0-indexed. A valid cursor satisfies
/// `line < buffer.len()` and `column <= line length`, but cursors are
/// plain values and may go stale after an edit; consumers re-validate
/// the line index before use.
///
/// "No match" is represented as `Option<Cursor>` being `None`, not as a
/// sentinel value inside the struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cursor {
    /// Line index (0-indexed)
    pub line: usize,
    /// Character offset within the line (0-indexed, in characters not bytes)
    pub column: usize,
}

impl Cursor {
    /// Creates a new cursor.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Cursor at the start of the buffer.
    pub const ZERO: Cursor = Cursor { line: 0, column: 0 };

    /// Returns true if this cursor is before another in line-major order.
    pub fn is_before(&self, other: &Cursor) -> bool {
        self.line < other.line || (self.line == other.line && self.column < other.column)
    }
}

impl PartialOrd for Cursor {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cursor {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.line.cmp(&other.line) {
            std::cmp::Ordering::Equal => self.column.cmp(&other.column),
            other => other,
        }
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 1-indexed line for user-facing output; column stays a raw
        // character offset, matching what search reports.
        write!(f, "line {}, position {}", self.line + 1, self.column)
    }
}
