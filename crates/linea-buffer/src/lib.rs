//! # Linea Buffer
//!
//! A bounded, in-memory, line-oriented text buffer with undo/redo.
//!
//! ## Key Concepts for Learning Rust
//!
//! ### Ownership & Borrowing
//! - `LineBuffer` owns the live line sequence and its history
//! - Methods like `line()` return borrowed references (`&str`)
//! - Mutations require `&mut self` (exclusive access)
//!
//! ### Memory Safety
//! - History snapshots are deep copies, never aliased with the live buffer
//! - Line indices are validated before any mutation
//! - The buffer never exceeds its configured maximum line count

mod buffer;
mod cursor;
mod history;

pub use buffer::{BufferConfig, LineBuffer, DEFAULT_MAX_LINES, DEFAULT_UNDO_DEPTH};
pub use cursor::Cursor;
pub use history::{EditKind, History, Snapshot};

/// Result type for buffer operations
pub type EditResult<T> = Result<T, EditError>;

/// Errors that can occur during buffer operations
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("Cannot insert line: buffer is full (maximum {max} lines)")]
    CapacityExceeded { max: usize },

    #[error("Invalid line number: {line} (buffer has {len} lines)")]
    InvalidLineNumber { line: usize, len: usize },
}
