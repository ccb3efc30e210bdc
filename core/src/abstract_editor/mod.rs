//! Abstract editor framework for reversible editing operations.
//!
//! This module provides the foundational traits and types for building
//! an undo/redo-capable editor. It is decoupled from the level data model
//! so the editor crate can implement concrete actions on its own target.
//!
//! - [`Editable`] - marker trait for types that can be edited
//! - [`EditAction`] - an edit operation (Command pattern)
//! - [`ActionManager`] - linear undo/redo history with a cursor
//!
//! # Coalescing
//!
//! [`ActionManager::push_action`] takes a `coalesce` flag. Continuous edit
//! sources (slider drags) push every intermediate frame with the flag set,
//! and the previous history entry absorbs the new state through
//! [`EditAction::merge`], so one undo reverts the whole drag.

mod action;
mod history;

pub use action::{ActionDescription, AsAny, EditAction, EditActionError, EditActionResult, Editable};
pub use history::{ActionLogEntry, ActionLogKind, ActionManager};
