//! Composite actions committed and reverted as a single undo step.

use std::fmt;

use super::action::{EditAction, EditActionResult, Editable};

/// An ordered sequence of child actions treated as one history entry.
///
/// A single gesture that touches several independent targets (moving three
/// selected sprites, creating a sprite and selecting it) becomes one undo
/// step while each child keeps its own before/after capture.
///
/// Every lifecycle call is forwarded to the children **in insertion order**,
/// for undo as well as for apply. Children are independent mutations, and
/// authoring order lets a "restore node" child re-establish a target before
/// a later child in the same group touches it. Groups may nest.
///
/// If a child fails, the pass stops at that child and the error is
/// returned; children after it are not run. On a failed `apply` the
/// children that already ran are undone, and on a failed `undo` they are
/// re-applied, both in insertion order, so a failed pass leaves the target
/// as it was before the call. `init` only captures state and is not rolled
/// back.
pub struct ActionGroup<T: Editable> {
    name: String,
    actions: Vec<Box<dyn EditAction<T>>>,
}

impl<T: Editable> ActionGroup<T> {
    /// Creates an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            actions: Vec::new(),
        }
    }

    /// Creates a group from an initial list of children.
    pub fn with_actions(name: impl Into<String>, actions: Vec<Box<dyn EditAction<T>>>) -> Self {
        Self {
            name: name.into(),
            actions,
        }
    }

    /// Appends a child. The group takes ownership.
    pub fn add_action(&mut self, action: Box<dyn EditAction<T>>) {
        self.actions.push(action);
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` if the group has no children.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Descriptions of the direct children, in insertion order.
    pub fn descriptions(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|a| a.description())
    }
}

impl<T: Editable> EditAction<T> for ActionGroup<T> {
    fn apply(&mut self, target: &mut T) -> EditActionResult {
        for index in 0..self.actions.len() {
            if let Err(e) = self.actions[index].apply(target) {
                for done in &mut self.actions[..index] {
                    if let Err(rollback) = done.undo(target) {
                        log::warn!("\"{}\": rollback undo failed: {rollback}", done.description());
                    }
                }
                return Err(e);
            }
        }
        Ok(())
    }

    fn undo(&mut self, target: &mut T) -> EditActionResult {
        for index in 0..self.actions.len() {
            if let Err(e) = self.actions[index].undo(target) {
                for done in &mut self.actions[..index] {
                    if let Err(rollback) = done.apply(target) {
                        log::warn!("\"{}\": rollback apply failed: {rollback}", done.description());
                    }
                }
                return Err(e);
            }
        }
        Ok(())
    }

    fn description(&self) -> &str {
        &self.name
    }

    fn init(&mut self, target: &mut T) -> EditActionResult {
        for action in &mut self.actions {
            action.init(target)?;
        }
        Ok(())
    }

    fn destroy(&mut self) {
        for action in &mut self.actions {
            action.destroy();
        }
    }

    fn modifies_content(&self) -> bool {
        self.actions.iter().any(|a| a.modifies_content())
    }
}

impl<T: Editable> fmt::Debug for ActionGroup<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionGroup")
            .field("name", &self.name)
            .field("actions", &self.actions)
            .finish()
    }
}
