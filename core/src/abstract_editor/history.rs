//! Undo/redo action history.
//!
//! [`ActionManager`] keeps a linear history of [`EditAction`] trait objects
//! and a cursor. `history[..cursor]` are the applied actions in application
//! order; `history[cursor..]` are available for redo. Pushing a new action
//! while the cursor is not at the end discards the redo tail.

use std::fmt;

use super::action::{ActionDescription, EditAction, Editable};

/// What produced an [`ActionLogEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionLogKind {
    Push,
    Undo,
    Redo,
}

impl ActionLogKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Push => "PUSH",
            Self::Undo => "UNDO",
            Self::Redo => "REDO",
        }
    }
}

/// One line pair of the append-only history log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionLogEntry {
    pub kind: ActionLogKind,
    pub title: String,
    pub body: String,
}

/// Manages a linear undo/redo history of editor actions.
///
/// # Example
///
/// ```ignore
/// let mut actions = ActionManager::new();
/// let mut target = MyLevel::new();
///
/// // Execute and record an action
/// actions.push_action(Box::new(my_action), &mut target, false);
///
/// actions.undo_action(&mut target);
/// actions.redo_action(&mut target);
/// ```
pub struct ActionManager<T: Editable> {
    history: Vec<Box<dyn EditAction<T>>>,
    /// Number of actions currently applied, starting from `history[0]`.
    cursor: usize,
    log: Vec<ActionLogEntry>,
}

impl<T: Editable> ActionManager<T> {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
            cursor: 0,
            log: Vec::new(),
        }
    }

    /// Applies `action` to the target and records it.
    ///
    /// With `coalesce` set, the cursor at the end of the history and the
    /// previous action willing to [merge](EditAction::merge) with this one,
    /// the previous entry absorbs the new "after" state instead of a new
    /// entry being appended. Otherwise the redo tail is discarded and the
    /// action is appended.
    ///
    /// An action whose `apply` fails is logged and not recorded. Returns
    /// `true` when the action was recorded or merged.
    pub fn push_action(
        &mut self,
        mut action: Box<dyn EditAction<T>>,
        target: &mut T,
        coalesce: bool,
    ) -> bool {
        if let Err(e) = action.apply(target) {
            log::warn!("Action '{}' failed: {e}", action.description().title);
            return false;
        }

        if coalesce
            && self.cursor == self.history.len()
            && let Some(last) = self.history.last_mut()
        {
            match last.merge(action) {
                None => {
                    log::debug!("Coalesced into '{}'", last.description().title);
                    return true;
                }
                Some(returned) => action = returned,
            }
        }

        self.history.truncate(self.cursor);
        let description = action.description();
        self.history.push(action);
        self.cursor = self.history.len();
        self.record(ActionLogKind::Push, description);
        true
    }

    /// Undoes the most recently applied action.
    ///
    /// A no-op (logged) when nothing is applied. Returns `true` if an action
    /// was undone. An action whose `undo` fails is dropped from the history
    /// so the entries before it stay reachable.
    pub fn undo_action(&mut self, target: &mut T) -> bool {
        if self.cursor == 0 {
            log::info!("Nothing to undo");
            return false;
        }
        let action = &mut self.history[self.cursor - 1];
        if let Err(e) = action.undo(target) {
            log::warn!(
                "Undo of '{}' failed, dropping it: {e}",
                action.description().title
            );
            self.history.remove(self.cursor - 1);
            self.cursor -= 1;
            return false;
        }
        let description = action.description();
        self.cursor -= 1;
        self.record(ActionLogKind::Undo, description);
        true
    }

    /// Re-applies the next undone action.
    ///
    /// A no-op (logged) when the cursor is at the end of the history.
    /// Returns `true` if an action was redone. A failing redo discards the
    /// redo tail, since the later entries were recorded on top of it.
    pub fn redo_action(&mut self, target: &mut T) -> bool {
        if self.cursor == self.history.len() {
            log::info!("Nothing to redo");
            return false;
        }
        let action = &mut self.history[self.cursor];
        if let Err(e) = action.apply(target) {
            log::warn!(
                "Redo of '{}' failed, dropping the redo history: {e}",
                action.description().title
            );
            self.history.truncate(self.cursor);
            return false;
        }
        let description = action.description();
        self.cursor += 1;
        self.record(ActionLogKind::Redo, description);
        true
    }

    /// Undoes the newest action and forgets it, as if it had never been
    /// pushed. Only acts when that action is applied (the cursor is at the
    /// end of the history). Returns `true` if the target was restored.
    pub fn discard_last(&mut self, target: &mut T) -> bool {
        if self.cursor == 0 || self.cursor != self.history.len() {
            return false;
        }
        let Some(mut action) = self.history.pop() else {
            return false;
        };
        self.cursor -= 1;
        let description = action.description();
        if let Err(e) = action.undo(target) {
            log::warn!("Discarding '{}' failed: {e}", description.title);
            return false;
        }
        self.record(ActionLogKind::Undo, description);
        true
    }

    /// Drops every recorded action. The log is kept.
    pub fn clear(&mut self) {
        self.history.clear();
        self.cursor = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.history.len()
    }

    /// Number of recorded actions (applied and redoable).
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Number of actions currently applied.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Descriptions of every recorded action, oldest first.
    pub fn descriptions(&self) -> impl Iterator<Item = ActionDescription> + '_ {
        self.history.iter().map(|a| a.description())
    }

    /// The append-only log of pushes, undos and redos.
    pub fn log(&self) -> &[ActionLogEntry] {
        &self.log
    }

    fn record(&mut self, kind: ActionLogKind, description: ActionDescription) {
        log::info!("{}: {}", kind.label(), description.title);
        log::info!("{}", description.body);
        self.log.push(ActionLogEntry {
            kind,
            title: description.title,
            body: description.body,
        });
    }
}

impl<T: Editable> Default for ActionManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Editable> fmt::Debug for ActionManager<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionManager")
            .field("history_len", &self.history.len())
            .field("cursor", &self.cursor)
            .field("log_len", &self.log.len())
            .finish()
    }
}
