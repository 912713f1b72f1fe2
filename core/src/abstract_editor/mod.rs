//! Abstract editor framework for reversible editing operations.
//!
//! This module provides the foundational traits and types for building
//! an undo/redo-capable editor system. It is decoupled from specific
//! editable types (sprite scenes, texture canvases) so that higher-level
//! crates can implement concrete editors.
//!
//! - [`Editable`]: marker trait for types that can be edited
//! - [`EditAction`]: an edit operation (Command pattern)
//! - [`Action`]: an edit operation assembled from closures
//! - [`ActionGroup`]: several actions committed and reverted as one step
//! - [`ActionManager`]: cursor-based undo/redo history
//!
//! # Content vs selection actions
//!
//! Every committed action is undoable. Actions can return `false` from
//! [`EditAction::modifies_content`] to indicate they represent UI state
//! changes (such as node selection) rather than document edits. They do not
//! affect [`ActionManager::has_unsaved_changes`].

mod action;
mod action_group;
mod history;

pub use action::{Action, EditAction, EditActionError, EditActionResult, Editable};
pub use action_group::ActionGroup;
pub use history::ActionManager;
