//! # Mailcraft Editor
//!
//! Editing engine for email templates.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host UI: clicks, drops, keystrokes          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - Snapshot history (undo/redo)             │
//! │  - Mutations over the component tree        │
//! │  - Selection mirror, spacing controls       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html: tree → table-based HTML      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Value trees**: every edit builds a new tree, old trees stay valid
//! 2. **Two-tier history**: structural edits are undoable, live field edits are not
//! 3. **Nothing is fatal**: unknown ids and types are no-ops
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mailcraft_editor::{EditSession, Direction};
//! use mailcraft_model::SequentialIds;
//!
//! let mut session = EditSession::new(SequentialIds::new("tpl"));
//!
//! let columns = session.add_component("column2", None, None, None).unwrap();
//! session.add_component("button", Some(0), Some(&columns), Some(1));
//! session.move_component(columns.as_str(), Direction::Down);
//!
//! session.undo();
//! let html = session.export();
//! ```

mod errors;
mod mutations;
mod patch;
mod session;
mod spacing;
pub mod tree;
mod undo_stack;

pub use errors::EditorError;
pub use mutations::{Mutation, MutationError, MutationResult};
pub use patch::ComponentPatch;
pub use session::EditSession;
pub use spacing::{
    read_spacing, side_patch, unified_patch, unified_value, SpacingControl, SpacingGroup,
    SpacingMode, SpacingSide,
};
pub use tree::{ComponentRef, Direction, DropTarget};
pub use undo_stack::{HistoryEntry, UndoStack};

// Re-export model types for convenience
pub use mailcraft_model::{CanvasSettings, EmailComponent, EmailTemplate};
