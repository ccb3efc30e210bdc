//! Undoable edits and the targets they operate on.
//!
//! - [`Editable`] - implemented by whatever an editor mutates (the level
//!   editor's context)
//! - [`EditAction`] - one undoable edit holding its own before/after data
//! - [`ActionDescription`] - title and body written to the log and shown in
//!   the history panel
//! - [`EditActionError`] / [`EditActionResult`] - failures reported by
//!   `apply` and `undo`
//!
//! An action owns everything it needs to run in both directions: object
//! snapshots, ids and floors. It never borrows from the target.

use std::any::Any;
use std::fmt;

use thiserror::Error;

/// `&dyn Any` access for boxed actions, so [`EditAction::merge`] can check
/// whether the incoming action has the same concrete type.
pub trait AsAny: 'static {
    fn as_any(&self) -> &dyn Any;
}

impl<T: 'static> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Something an [`ActionManager`](super::ActionManager) can edit.
pub trait Editable: 'static {}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditActionError {
    /// An id or floor referenced by the action no longer exists.
    #[error("target not found: {0}")]
    TargetNotFound(String),
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("{0}")]
    Custom(String),
}

pub type EditActionResult<T = ()> = Result<T, EditActionError>;

/// Human readable summary of an action: a one-line title and a body
/// describing the captured snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionDescription {
    pub title: String,
    pub body: String,
}

impl ActionDescription {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

impl fmt::Display for ActionDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.title, self.body)
    }
}

/// One undoable edit.
///
/// `apply` runs when the action is pushed and again on each redo, and must
/// reach the same state both times. `undo` puts the target back exactly as
/// it was before `apply`.
///
/// Continuous edits, such as the frames of a slider drag, override
/// [`merge`](Self::merge) so that a run of them becomes one history entry:
///
/// ```ignore
/// fn merge(
///     &mut self,
///     other: Box<dyn EditAction<EditorContext>>,
/// ) -> Option<Box<dyn EditAction<EditorContext>>> {
///     match (*other).as_any().downcast_ref::<UpdateObjectAction>() {
///         Some(next) if next.new.object_id == self.new.object_id => {
///             self.new = next.new;
///             None
///         }
///         _ => Some(other),
///     }
/// }
/// ```
pub trait EditAction<T: Editable>: fmt::Debug + AsAny {
    fn apply(&mut self, target: &mut T) -> EditActionResult;

    fn undo(&mut self, target: &mut T) -> EditActionResult;

    fn description(&self) -> ActionDescription;

    /// Absorbs `other` into `self`, keeping `self`'s before-state and
    /// taking `other`'s after-state. Returns `None` when merged, or hands
    /// `other` back untouched.
    fn merge(&mut self, other: Box<dyn EditAction<T>>) -> Option<Box<dyn EditAction<T>>> {
        Some(other)
    }
}
