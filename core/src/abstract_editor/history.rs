//! Undo/redo action history.
//!
//! [`ActionManager`] keeps every committed [`EditAction`] in one ordered list
//! together with a cursor that points one past the last applied entry.
//! Entries before the cursor are applied; entries at or after it can be
//! redone. Committing a new action while the cursor is not at the end
//! destroys the redo branch (standard editor behavior).

use std::collections::VecDeque;
use std::fmt;

use super::action::{EditAction, EditActionResult, Editable};

/// Manages the undo/redo history of editor actions.
///
/// The manager is the single entry point through which edits reach the
/// document. It knows nothing about the document itself: every effect goes
/// through the actions' callbacks.
///
/// # Invariants
///
/// - `cursor <= len` at all times.
/// - Every entry is initialized exactly once (at commit) and destroyed
///   exactly once (at truncation, capacity overflow, [`clear`](Self::clear),
///   or drop).
///
/// # Example
///
/// ```ignore
/// let mut history = ActionManager::new();
/// let mut document = MyDocument::new();
///
/// // Commit an action: it takes effect immediately
/// history.do_action(Box::new(my_action), &mut document)?;
///
/// // Undo the last action
/// history.undo(&mut document)?;
///
/// // Redo it
/// history.redo(&mut document)?;
/// ```
pub struct ActionManager<T: Editable> {
    actions: VecDeque<Box<dyn EditAction<T>>>,
    cursor: usize,
    max_undo: Option<usize>,
    /// Cursor position of the last save.
    ///
    /// `None` if never reachable again (the saved entry was truncated or
    /// dropped by capacity overflow).
    saved_at: Option<usize>,
}

impl<T: Editable> ActionManager<T> {
    /// Creates an empty, unbounded history.
    pub fn new() -> Self {
        Self::with_max_undo(None)
    }

    /// Creates an empty history that keeps at most `max_undo` applied entries.
    ///
    /// When the limit is exceeded, the oldest entry is destroyed and dropped.
    /// `None` means unbounded.
    pub fn with_max_undo(max_undo: Option<usize>) -> Self {
        Self {
            actions: VecDeque::new(),
            cursor: 0,
            max_undo,
            saved_at: Some(0),
        }
    }

    /// Commits a new action.
    ///
    /// 1. Destroys every entry at or after the cursor, in forward order.
    /// 2. Appends the action and runs its [`init`](EditAction::init).
    /// 3. Runs its [`apply`](EditAction::apply).
    /// 4. Advances the cursor past it.
    ///
    /// If `init` or `apply` fails, the action is destroyed and removed again
    /// and the error is returned. The redo branch stays truncated.
    pub fn do_action(&mut self, action: Box<dyn EditAction<T>>, target: &mut T) -> EditActionResult {
        self.truncate_future();

        self.actions.push_back(action);
        let index = self.actions.len() - 1;
        let committed = {
            let action = &mut self.actions[index];
            action.init(target).and_then(|()| action.apply(target))
        };
        if let Err(e) = committed {
            if let Some(mut failed) = self.actions.pop_back() {
                log::warn!("Action \"{}\" failed: {e}", failed.description());
                failed.destroy();
            }
            return Err(e);
        }

        self.cursor = self.actions.len();
        log::debug!(
            "Committed \"{}\" ({} in history)",
            self.actions[index].description(),
            self.actions.len()
        );
        self.enforce_capacity();
        Ok(())
    }

    /// Undoes the most recently applied action.
    ///
    /// Returns `Ok(false)` without doing anything when there is nothing to
    /// undo. If the action's undo fails, the cursor does not move.
    pub fn undo(&mut self, target: &mut T) -> EditActionResult<bool> {
        if self.cursor == 0 {
            return Ok(false);
        }
        let action = &mut self.actions[self.cursor - 1];
        action.undo(target)?;
        log::debug!("Undo \"{}\"", action.description());
        self.cursor -= 1;
        Ok(true)
    }

    /// Redoes the action at the cursor.
    ///
    /// Returns `Ok(false)` without doing anything when there is nothing to
    /// redo. If the action's apply fails, the cursor does not move.
    pub fn redo(&mut self, target: &mut T) -> EditActionResult<bool> {
        if self.cursor == self.actions.len() {
            return Ok(false);
        }
        let action = &mut self.actions[self.cursor];
        action.apply(target)?;
        log::debug!("Redo \"{}\"", action.description());
        self.cursor += 1;
        Ok(true)
    }

    /// Returns `true` if there are actions that can be undone.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Returns `true` if there are actions that can be redone.
    pub fn can_redo(&self) -> bool {
        self.cursor < self.actions.len()
    }

    /// Position one past the last applied action.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total number of entries, applied and redoable.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` if the history holds no entries.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions that can be undone.
    pub fn undo_count(&self) -> usize {
        self.cursor
    }

    /// Returns the number of actions that can be redone.
    pub fn redo_count(&self) -> usize {
        self.actions.len() - self.cursor
    }

    /// Label of the action the next undo would revert, for the edit menu.
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_descriptions().next()
    }

    /// Label of the action the next redo would re-apply, for the edit menu.
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_descriptions().next()
    }

    /// Returns an iterator over undo action descriptions, most recent first.
    pub fn undo_descriptions(&self) -> impl Iterator<Item = &str> {
        self.actions
            .range(..self.cursor)
            .rev()
            .map(|a| a.description())
    }

    /// Returns an iterator over redo action descriptions, next to redo first.
    pub fn redo_descriptions(&self) -> impl Iterator<Item = &str> {
        self.actions.range(self.cursor..).map(|a| a.description())
    }

    /// Returns the maximum undo depth, if bounded.
    pub fn max_undo(&self) -> Option<usize> {
        self.max_undo
    }

    /// Records the current state as the saved state.
    ///
    /// After calling this, [`has_unsaved_changes`](Self::has_unsaved_changes)
    /// returns `false` until a content-modifying action is committed, undone,
    /// or redone.
    pub fn mark_saved(&mut self) {
        self.saved_at = Some(self.cursor);
    }

    /// Returns `true` if the current state differs from the last saved state.
    ///
    /// Entries whose [`modifies_content`](EditAction::modifies_content) is
    /// `false` (selection changes) do not count. A save point that was
    /// truncated or dropped by capacity overflow is unreachable, so the
    /// document stays dirty.
    pub fn has_unsaved_changes(&self) -> bool {
        match self.saved_at {
            Some(saved) => self.content_changes_between(saved, self.cursor),
            None => true,
        }
    }

    /// Destroys every entry in history order and resets the cursor.
    ///
    /// If the current state was the saved state, it remains so after
    /// clearing. Otherwise the save point is permanently lost.
    pub fn clear(&mut self) {
        let clean = !self.has_unsaved_changes();
        for mut action in self.actions.drain(..) {
            log::trace!("Destroying \"{}\"", action.description());
            action.destroy();
        }
        self.cursor = 0;
        self.saved_at = clean.then_some(0);
    }

    /// Destroys the redo branch, keeping the save point when it is still
    /// reachable content-wise.
    fn truncate_future(&mut self) {
        if self.cursor == self.actions.len() {
            return;
        }
        if let Some(saved) = self.saved_at
            && saved > self.cursor
        {
            self.saved_at = if self.content_changes_between(self.cursor, saved) {
                None
            } else {
                Some(self.cursor)
            };
        }
        for mut action in self.actions.drain(self.cursor..) {
            log::trace!("Evicting \"{}\"", action.description());
            action.destroy();
        }
    }

    fn enforce_capacity(&mut self) {
        let Some(max_undo) = self.max_undo else {
            return;
        };
        while self.cursor > max_undo {
            let Some(mut oldest) = self.actions.pop_front() else {
                break;
            };
            log::trace!("Dropping \"{}\" (undo limit {max_undo})", oldest.description());
            oldest.destroy();
            self.cursor -= 1;
            self.saved_at = match self.saved_at {
                Some(saved) if saved > 0 => Some(saved - 1),
                _ => None,
            };
        }
    }

    fn content_changes_between(&self, a: usize, b: usize) -> bool {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        self.actions.range(lo..hi).any(|a| a.modifies_content())
    }
}

impl<T: Editable> Default for ActionManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Editable> Drop for ActionManager<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Editable> fmt::Debug for ActionManager<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionManager")
            .field("len", &self.actions.len())
            .field("cursor", &self.cursor)
            .field("max_undo", &self.max_undo)
            .field("saved_at", &self.saved_at)
            .finish()
    }
}
