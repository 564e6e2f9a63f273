//! Undo/redo history management.
//!
//! ## Learning: Snapshots vs Commands
//!
//! There are two classic ways to implement undo:
//! - Command pattern: store each edit and its inverse
//! - Memento pattern: store full copies of the state
//!
//! This crate uses mementos. The buffer is tiny and bounded, so a deep
//! copy per edit is cheap, and restoring state is a single move with no
//! inverse-operation logic to get wrong.
//!
//! ## Learning: VecDeque
//!
//! We use `VecDeque` instead of `Vec` for the stacks because we need
//! efficient:
//! - Push to back (new snapshots)
//! - Pop from front (eviction when at capacity)
//! - Pop from back (for undo/redo)

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// The kind of mutation that produced a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditKind {
    /// A line was inserted
    Insert,
    /// A line or word was deleted
    Delete,
    /// Line or word content was rewritten
    Update,
}

/// An immutable deep copy of the buffer, captured before a mutation.
///
/// Snapshots exist only inside history stacks. They own their lines
/// outright and are never aliased with the live buffer, so later edits
/// cannot retroactively corrupt a stored snapshot.
#[derive(Debug, Clone)]
pub struct Snapshot {
    lines: Vec<String>,
    kind: EditKind,
}

impl Snapshot {
    /// Creates a snapshot from a copy of the buffer's lines.
    pub fn new(lines: Vec<String>, kind: EditKind) -> Self {
        Self { lines, kind }
    }

    /// The mutation kind that produced this snapshot.
    pub fn kind(&self) -> EditKind {
        self.kind
    }

    /// Borrows the captured lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consumes the snapshot, yielding the captured lines.
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// Manages the undo and redo stacks.
///
/// ## Design Decisions
///
/// 1. **Bounded depth**: both stacks evict their oldest entry once they
///    exceed `depth`, keeping memory use fixed for long sessions
/// 2. **Linear history**: recording a new snapshot clears the redo
///    stack, so redo is only valid immediately after undo
#[derive(Debug, Clone)]
pub struct History {
    /// Stack of pre-mutation snapshots
    undo_stack: VecDeque<Snapshot>,
    /// Stack of snapshots captured by undo, waiting for redo
    redo_stack: VecDeque<Snapshot>,
    /// Maximum entries kept per stack
    depth: usize,
}

impl History {
    /// Creates a new history bounded to `depth` entries per stack.
    pub fn new(depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(depth),
            redo_stack: VecDeque::with_capacity(depth),
            depth,
        }
    }

    /// Records a pre-mutation snapshot.
    ///
    /// Clears the redo stack (branching history is not supported) and
    /// evicts the oldest undo entry when over capacity.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.redo_stack.clear();
        self.undo_stack.push_back(snapshot);
        while self.undo_stack.len() > self.depth {
            self.undo_stack.pop_front();
        }
    }

    /// Pops the most recent undo snapshot, saving `current` for redo.
    ///
    /// Returns `None` (and drops `current`) if there is nothing to undo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let restored = self.undo_stack.pop_back()?;
        self.redo_stack.push_back(current);
        while self.redo_stack.len() > self.depth {
            self.redo_stack.pop_front();
        }
        Some(restored)
    }

    /// Pops the most recent redo snapshot, saving `current` for undo.
    ///
    /// Moving `current` back onto the undo stack goes through a plain
    /// push, not [`record`](Self::record), so the redo stack survives.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let restored = self.redo_stack.pop_back()?;
        self.undo_stack.push_back(current);
        while self.undo_stack.len() > self.depth {
            self.undo_stack.pop_front();
        }
        Some(restored)
    }

    /// Returns true if there are snapshots to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are snapshots to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Returns the number of undo steps available.
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Returns the number of redo steps available.
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}
