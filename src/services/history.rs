//! Bounded undo/redo stack of grid snapshots.
//!
//! Snapshots are taken *before* each user action. The live state after the
//! most recent action is therefore not on the stack; the first `undo` after
//! a push records it so that `redo` can return to it.

use crate::models::GridSnapshot;

/// Maximum number of snapshots kept. The oldest is dropped first.
pub const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<GridSnapshot>,
    /// Position of the live state. Equal to `entries.len()` when the live
    /// state has not been recorded yet.
    index: usize,
    limit: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            index: 0,
            limit: limit.max(1),
        }
    }

    /// Record the state before an action, discarding any redo branch.
    pub fn push(&mut self, snapshot: GridSnapshot) {
        self.entries.truncate(self.index);
        self.entries.push(snapshot);
        self.index = self.entries.len();
        self.enforce_limit();
    }

    /// Step back one action. `live` is only called when the current state
    /// still needs recording.
    pub fn undo(&mut self, live: impl FnOnce() -> GridSnapshot) -> Option<GridSnapshot> {
        if self.index == 0 {
            return None;
        }
        if self.index == self.entries.len() {
            self.entries.push(live());
            self.enforce_limit();
        }
        self.index -= 1;
        Some(self.entries[self.index].clone())
    }

    /// Step forward one action, if an undo has not been superseded.
    pub fn redo(&mut self) -> Option<GridSnapshot> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.entries[self.index].clone())
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index = 0;
    }

    fn enforce_limit(&mut self) {
        while self.entries.len() > self.limit {
            self.entries.remove(0);
            self.index = self.index.saturating_sub(1);
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
