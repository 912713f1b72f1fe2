//! Editable targets and reversible editor actions.
//!
//! This module defines the core abstractions for an undo/redo editor system:
//!
//! - [`Editable`]: marker trait for types that can be edited
//! - [`EditAction`]: a reversible edit operation (Command pattern)
//! - [`Action`]: an [`EditAction`] assembled from closures
//! - [`EditActionError`] / [`EditActionResult`]: error handling for actions
//!
//! EditActions are self-contained: each implementation internally stores whatever
//! data it needs (target handles, before/after snapshots, etc.).

use std::fmt;

/// Marker trait for types that serve as editing targets.
///
/// Implement this on the document context that actions operate on: a scene
/// graph together with its selection, a texture being painted, etc.
///
/// # Example
///
/// ```ignore
/// struct MyDocument { /* ... */ }
/// impl Editable for MyDocument {}
/// ```
pub trait Editable: 'static {}

/// Error type for action execution failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditActionError {
    /// The target object was not found.
    TargetNotFound(String),
    /// The target is in an invalid state for this action.
    InvalidState(String),
    /// A custom error with a description.
    Custom(String),
}

impl fmt::Display for EditActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetNotFound(msg) => write!(f, "target not found: {msg}"),
            Self::InvalidState(msg) => write!(f, "invalid state: {msg}"),
            Self::Custom(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for EditActionError {}

/// Result type for action operations.
pub type EditActionResult<T = ()> = Result<T, EditActionError>;

/// A reversible editor action (Command pattern).
///
/// EditActions encapsulate a single logical edit and capture enough state to
/// undo the change and redo it. Each implementation stores its own data
/// internally. There is no prescribed property system.
///
/// # Lifecycle
///
/// The [`ActionManager`](super::ActionManager) drives every action through
/// the same protocol:
///
/// 1. [`init`](Self::init) runs exactly once when the action is committed.
/// 2. [`apply`](Self::apply) runs immediately afterwards ("do" and "redo"
///    are the same operation), and again on every redo.
/// 3. [`undo`](Self::undo) runs on every undo.
/// 4. [`destroy`](Self::destroy) runs exactly once when the action is
///    permanently evicted from history, either because a new action
///    truncated the redo branch or because the manager was torn down.
///
/// `apply` followed by `undo` must restore the observable state of the
/// target exactly.
///
/// # Object Safety
///
/// This trait is dyn-compatible so that different action types can be stored
/// in a single [`ActionManager`](super::ActionManager) history as
/// `Box<dyn EditAction<T>>`.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug)]
/// struct MoveNode {
///     node: NodeId,
///     old_pos: Vec2,
///     new_pos: Vec2,
/// }
///
/// impl EditAction<Document> for MoveNode {
///     fn apply(&mut self, target: &mut Document) -> EditActionResult {
///         target.set_position(self.node, self.new_pos);
///         Ok(())
///     }
///
///     fn undo(&mut self, target: &mut Document) -> EditActionResult {
///         target.set_position(self.node, self.old_pos);
///         Ok(())
///     }
///
///     fn description(&self) -> &str {
///         "Move node"
///     }
/// }
/// ```
pub trait EditAction<T: Editable>: fmt::Debug + Send {
    /// Applies the action to the target (forward / redo direction).
    ///
    /// Returns `Ok(())` on success, or an [`EditActionError`] if the action
    /// could not be applied.
    fn apply(&mut self, target: &mut T) -> EditActionResult;

    /// Reverses the action (undo direction).
    ///
    /// Must restore the target to the state before [`apply`](Self::apply)
    /// was called.
    fn undo(&mut self, target: &mut T) -> EditActionResult;

    /// A short, human-readable description for display in the edit menu.
    ///
    /// Examples: `"Move Sprite"`, `"Create Sprite"`, `"Select"`.
    fn description(&self) -> &str;

    /// Runs once when the action is committed, before the first
    /// [`apply`](Self::apply).
    ///
    /// Default: no-op.
    fn init(&mut self, _target: &mut T) -> EditActionResult {
        Ok(())
    }

    /// Runs once when the action leaves the history for good.
    ///
    /// Releases whatever the action captured (shared handles, detached
    /// nodes). The target is not available here: a destroyed action never
    /// touches the document again.
    ///
    /// Default: no-op.
    fn destroy(&mut self) {}

    /// Whether this action changes document content.
    ///
    /// Return `false` for actions that only change UI state, such as
    /// selection. They remain fully undoable but are ignored by
    /// [`ActionManager::has_unsaved_changes`](super::ActionManager::has_unsaved_changes).
    ///
    /// Default: `true`.
    fn modifies_content(&self) -> bool {
        true
    }
}

type Behavior<T> = Box<dyn FnMut(&mut T) + Send>;
type DestroyBehavior = Box<dyn FnMut() + Send>;

/// An [`EditAction`] built from closures.
///
/// The redo and undo behaviors are bound to their captured data (snapshots,
/// shared handles) at construction time. Init and destroy default to no-ops.
///
/// Anything captured by the closures is released when the action is
/// destroyed, not when it is merely undone, so a handle referenced by an
/// undo step stays alive for as long as the step can still be replayed.
///
/// # Example
///
/// ```
/// use seed_core::abstract_editor::{Action, EditAction, Editable};
///
/// struct Counter(i32);
/// impl Editable for Counter {}
///
/// let mut action = Action::new("Add", |c: &mut Counter| c.0 += 1, |c: &mut Counter| c.0 -= 1);
/// let mut counter = Counter(0);
/// action.apply(&mut counter).unwrap();
/// assert_eq!(counter.0, 1);
/// action.undo(&mut counter).unwrap();
/// assert_eq!(counter.0, 0);
/// ```
pub struct Action<T: Editable> {
    name: String,
    on_redo: Option<Behavior<T>>,
    on_undo: Option<Behavior<T>>,
    on_init: Option<Behavior<T>>,
    on_destroy: Option<DestroyBehavior>,
    modifies_content: bool,
}

impl<T: Editable> Action<T> {
    /// Creates an action from its redo and undo behaviors.
    pub fn new(
        name: impl Into<String>,
        on_redo: impl FnMut(&mut T) + Send + 'static,
        on_undo: impl FnMut(&mut T) + Send + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            on_redo: Some(Box::new(on_redo)),
            on_undo: Some(Box::new(on_undo)),
            on_init: None,
            on_destroy: None,
            modifies_content: true,
        }
    }

    /// Sets the behavior run once at commit time.
    pub fn with_init(mut self, on_init: impl FnMut(&mut T) + Send + 'static) -> Self {
        self.on_init = Some(Box::new(on_init));
        self
    }

    /// Sets the behavior run once at eviction time.
    pub fn with_destroy(mut self, on_destroy: impl FnMut() + Send + 'static) -> Self {
        self.on_destroy = Some(Box::new(on_destroy));
        self
    }

    /// Marks the action as a UI-state change that does not dirty the document.
    pub fn selection_only(mut self) -> Self {
        self.modifies_content = false;
        self
    }

    /// Returns `true` once [`destroy`](EditAction::destroy) has released the behaviors.
    pub fn is_destroyed(&self) -> bool {
        self.on_redo.is_none() && self.on_undo.is_none()
    }

    fn run(behavior: &mut Option<Behavior<T>>, target: &mut T, what: &str) -> EditActionResult {
        match behavior {
            Some(f) => {
                f(target);
                Ok(())
            }
            None => Err(EditActionError::InvalidState(format!(
                "{what} called on a destroyed action"
            ))),
        }
    }
}

impl<T: Editable> EditAction<T> for Action<T> {
    fn apply(&mut self, target: &mut T) -> EditActionResult {
        Self::run(&mut self.on_redo, target, "redo")
    }

    fn undo(&mut self, target: &mut T) -> EditActionResult {
        Self::run(&mut self.on_undo, target, "undo")
    }

    fn description(&self) -> &str {
        &self.name
    }

    fn init(&mut self, target: &mut T) -> EditActionResult {
        if let Some(f) = &mut self.on_init {
            f(target);
        }
        Ok(())
    }

    fn destroy(&mut self) {
        if let Some(mut f) = self.on_destroy.take() {
            f();
        }
        // Dropping the closures releases every captured handle.
        self.on_redo = None;
        self.on_undo = None;
        self.on_init = None;
    }

    fn modifies_content(&self) -> bool {
        self.modifies_content
    }
}

impl<T: Editable> fmt::Debug for Action<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("has_init", &self.on_init.is_some())
            .field("has_destroy", &self.on_destroy.is_some())
            .field("destroyed", &self.is_destroyed())
            .field("modifies_content", &self.modifies_content)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct Counter {
        value: i32,
    }

    impl Editable for Counter {}

    #[derive(Debug)]
    struct Add {
        amount: i32,
    }

    impl EditAction<Counter> for Add {
        fn apply(&mut self, target: &mut Counter) -> EditActionResult {
            target.value += self.amount;
            Ok(())
        }

        fn undo(&mut self, target: &mut Counter) -> EditActionResult {
            target.value -= self.amount;
            Ok(())
        }

        fn description(&self) -> &str {
            "Add"
        }
    }

    fn add_closure(amount: i32) -> Action<Counter> {
        Action::new(
            "Add",
            move |c: &mut Counter| c.value += amount,
            move |c: &mut Counter| c.value -= amount,
        )
    }

    #[test]
    fn apply_modifies_target() {
        let mut counter = Counter { value: 0 };
        let mut action = Add { amount: 5 };
        action.apply(&mut counter).unwrap();
        assert_eq!(counter.value, 5);
    }

    #[test]
    fn undo_reverses_apply() {
        let mut counter = Counter { value: 0 };
        let mut action = Add { amount: 5 };
        action.apply(&mut counter).unwrap();
        action.undo(&mut counter).unwrap();
        assert_eq!(counter.value, 0);
    }

    #[test]
    fn action_error_display() {
        assert_eq!(
            EditActionError::TargetNotFound("node 42".into()).to_string(),
            "target not found: node 42"
        );
        assert_eq!(
            EditActionError::InvalidState("locked".into()).to_string(),
            "invalid state: locked"
        );
        assert_eq!(
            EditActionError::Custom("something went wrong".into()).to_string(),
            "something went wrong"
        );
    }

    #[test]
    fn action_is_dyn_compatible() {
        let mut counter = Counter { value: 0 };
        let mut boxed: Box<dyn EditAction<Counter>> = Box::new(Add { amount: 3 });
        boxed.apply(&mut counter).unwrap();
        assert_eq!(counter.value, 3);
        boxed.undo(&mut counter).unwrap();
        assert_eq!(counter.value, 0);
    }

    #[test]
    fn trait_defaults() {
        let mut counter = Counter { value: 0 };
        let mut action = Add { amount: 1 };
        assert!(action.modifies_content());
        action.init(&mut counter).unwrap();
        action.destroy();
        assert_eq!(counter.value, 0);
    }

    #[test]
    fn closure_action_round_trip() {
        let mut counter = Counter { value: 10 };
        let mut action = add_closure(7);
        assert_eq!(action.description(), "Add");
        action.apply(&mut counter).unwrap();
        assert_eq!(counter.value, 17);
        action.undo(&mut counter).unwrap();
        assert_eq!(counter.value, 10);
    }

    #[test]
    fn closure_init_runs_on_target() {
        let mut counter = Counter { value: 0 };
        let mut action = add_closure(1).with_init(|c: &mut Counter| c.value = 100);
        action.init(&mut counter).unwrap();
        assert_eq!(counter.value, 100);
    }

    #[test]
    fn destroy_runs_once_and_releases_captures() {
        let destroyed = Arc::new(AtomicUsize::new(0));
        let captured = Arc::new(());
        let held = Arc::clone(&captured);

        let counter_ref = Arc::clone(&destroyed);
        let mut action = Action::new(
            "Hold",
            move |_: &mut Counter| {
                let _ = &held;
            },
            |_: &mut Counter| {},
        )
        .with_destroy(move || {
            counter_ref.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(Arc::strong_count(&captured), 2);
        action.destroy();
        action.destroy();
        assert_eq!(destroyed.load(Ordering::SeqCst), 1);
        assert_eq!(Arc::strong_count(&captured), 1);
        assert!(action.is_destroyed());
    }

    #[test]
    fn destroyed_action_refuses_to_run() {
        let mut counter = Counter { value: 0 };
        let mut action = add_closure(1);
        action.destroy();
        assert!(matches!(
            action.apply(&mut counter),
            Err(EditActionError::InvalidState(_))
        ));
        assert_eq!(counter.value, 0);
    }

    #[test]
    fn selection_only_does_not_modify_content() {
        let action = add_closure(1).selection_only();
        assert!(!action.modifies_content());
        let debug = format!("{action:?}");
        assert!(debug.contains("modifies_content: false"));
    }
}
