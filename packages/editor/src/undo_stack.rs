//! # Undo/Redo Stack
//!
//! Snapshot history for the component tree.
//!
//! ## Design
//!
//! - A deep copy of the tree is pushed right before each structural edit
//! - Undo swaps the current tree with the newest snapshot and parks the
//!   current tree on the redo stack; redo is symmetric
//! - New snapshots clear the redo stack (linear history)
//! - Batches collapse several edits into one undo step
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//!
//! stack.snapshot(&components);
//! components = tree::delete_component(&components, "text-1");
//!
//! if let Some(previous) = stack.undo(&components) {
//!     components = previous;
//! }
//! ```

use mailcraft_model::EmailComponent;

/// A captured tree
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub components: Vec<EmailComponent>,

    /// Optional description of the edit that followed the snapshot
    pub description: Option<String>,
}

#[derive(Debug, Default)]
struct BatchState {
    captured: bool,
    description: Option<String>,
}

/// Undo/redo stack for the editing session
#[derive(Debug)]
pub struct UndoStack {
    /// Snapshots before each edit (most recent last)
    undo_stack: Vec<HistoryEntry>,

    /// Trees replaced by undo (most recent last)
    redo_stack: Vec<HistoryEntry>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Currently building a batch
    current_batch: Option<BatchState>,
}

impl UndoStack {
    /// Create an unbounded undo stack
    pub fn new() -> Self {
        Self::with_max_levels(0)
    }

    /// Create an undo stack that keeps at most `max_levels` steps
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Record `components` as the state to return to on the next undo
    pub fn snapshot(&mut self, components: &[EmailComponent]) {
        self.snapshot_with_description(components, None);
    }

    pub fn snapshot_with_description(
        &mut self,
        components: &[EmailComponent],
        description: Option<String>,
    ) {
        if let Some(batch) = &mut self.current_batch {
            // Only the state before the first edit of a batch matters
            if batch.captured {
                return;
            }
            batch.captured = true;
            let description = batch.description.clone().or(description);
            self.push_entry(components, description);
            return;
        }

        self.push_entry(components, description);
    }

    /// Start a batch of edits (undone/redone together)
    pub fn begin_batch(&mut self) {
        self.current_batch = Some(BatchState::default());
    }

    /// End the current batch
    pub fn end_batch(&mut self) {
        self.current_batch = None;
    }

    /// Set description for current batch (if batching)
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            let description = description.into();
            if batch.captured {
                if let Some(entry) = self.undo_stack.last_mut() {
                    entry.description = Some(description.clone());
                }
            }
            batch.description = Some(description);
        }
    }

    pub fn is_batching(&self) -> bool {
        self.current_batch.is_some()
    }

    fn push_entry(&mut self, components: &[EmailComponent], description: Option<String>) {
        self.undo_stack.push(HistoryEntry {
            components: components.to_vec(),
            description,
        });

        // Trim if exceeded max levels
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // Clear redo stack (new action invalidates future)
        self.redo_stack.clear();
    }

    /// Step back. Returns the tree that becomes current, or `None` when there
    /// is nothing to undo.
    pub fn undo(&mut self, current: &[EmailComponent]) -> Option<Vec<EmailComponent>> {
        let entry = self.undo_stack.pop()?;
        self.reopen_batch();
        self.redo_stack.push(HistoryEntry {
            components: current.to_vec(),
            description: entry.description.clone(),
        });
        Some(entry.components)
    }

    /// Step forward again after an undo
    pub fn redo(&mut self, current: &[EmailComponent]) -> Option<Vec<EmailComponent>> {
        let entry = self.redo_stack.pop()?;
        self.reopen_batch();
        self.undo_stack.push(HistoryEntry {
            components: current.to_vec(),
            description: entry.description.clone(),
        });
        Some(entry.components)
    }

    /// After undo/redo inside a batch the next edit starts a fresh step
    fn reopen_batch(&mut self) {
        if let Some(batch) = &mut self.current_batch {
            batch.captured = false;
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the number of undo levels available
    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of redo levels available
    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
