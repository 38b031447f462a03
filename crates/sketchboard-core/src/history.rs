//! Linear undo/redo over full element-list snapshots.

use crate::shapes::Element;

/// Ordered snapshots of the element list plus a cursor.
///
/// Snapshots after the cursor are redoable until the next commit.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    snapshots: Vec<Vec<Element>>,
    cursor: usize,
    /// Oldest snapshots are dropped past this many. None keeps everything.
    limit: Option<usize>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// History holding a single empty board.
    pub fn new() -> Self {
        Self::with_limit(None)
    }

    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            snapshots: vec![Vec::new()],
            cursor: 0,
            limit: limit.map(|l| l.max(1)),
        }
    }

    /// Record `snapshot`, discarding everything after the cursor.
    pub fn commit(&mut self, snapshot: Vec<Element>) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        self.cursor = self.snapshots.len() - 1;

        if let Some(limit) = self.limit {
            let excess = self.snapshots.len().saturating_sub(limit);
            if excess > 0 {
                self.snapshots.drain(..excess);
                self.cursor -= excess;
            }
        }
        log::debug!("history commit: depth={} cursor={}", self.depth(), self.cursor);
    }

    /// Step back. Returns the snapshot to restore, or None at the start.
    pub fn undo(&mut self) -> Option<&[Element]> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        log::debug!("undo -> cursor={}", self.cursor);
        Some(&self.snapshots[self.cursor])
    }

    /// Step forward. Returns the snapshot to restore, or None at the end.
    pub fn redo(&mut self) -> Option<&[Element]> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        log::debug!("redo -> cursor={}", self.cursor);
        Some(&self.snapshots[self.cursor])
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Number of stored snapshots, including the initial one.
    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Snapshot at the cursor.
    pub fn current(&self) -> &[Element] {
        &self.snapshots[self.cursor]
    }
}
