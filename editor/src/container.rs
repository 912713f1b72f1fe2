//! Reference-counted node handles.
//!
//! A [`NodeContainer`] is the stable identity of an editable scene entity.
//! The live selection and every history entry that refers to the entity hold
//! a [`NodeHandle`] (an `Arc`); the container stays alive for as long as any
//! of them does, even after its node was deleted from the scene. Undoing the
//! deletion relinks the same container, so selections survive the round trip.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::outline::RowId;
use crate::scene::NodeId;
use crate::snapshot::SpriteValues;

/// Shared handle to a container.
pub type NodeHandle = Arc<NodeContainer>;

/// Process-unique container identifier, for logs and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(u64);

impl ContainerId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

#[derive(Default)]
struct ContainerState {
    node: Option<NodeId>,
    outline_row: Option<RowId>,
    state_on_down: Option<SpriteValues>,
}

/// Stable identity of a scene entity, independent of its presence in the scene.
pub struct NodeContainer {
    id: ContainerId,
    state: Mutex<ContainerState>,
}

impl NodeContainer {
    /// Creates an unlinked container.
    pub fn new() -> NodeHandle {
        Arc::new(Self {
            id: ContainerId::next(),
            state: Mutex::new(ContainerState::default()),
        })
    }

    /// Creates a container linked to `node`.
    pub fn for_node(node: NodeId) -> NodeHandle {
        let handle = Self::new();
        handle.set_node(Some(node));
        handle
    }

    pub fn id(&self) -> ContainerId {
        self.id
    }

    /// Live scene node, `None` while the node is deleted.
    pub fn node(&self) -> Option<NodeId> {
        self.state.lock().node
    }

    pub fn set_node(&self, node: Option<NodeId>) {
        self.state.lock().node = node;
    }

    /// Outline row representing the node, if any.
    pub fn outline_row(&self) -> Option<RowId> {
        self.state.lock().outline_row
    }

    pub fn set_outline_row(&self, row: Option<RowId>) {
        self.state.lock().outline_row = row;
    }

    /// Stores the snapshot taken when a drag gesture starts.
    pub fn set_state_on_down(&self, values: Option<SpriteValues>) {
        self.state.lock().state_on_down = values;
    }

    pub fn state_on_down(&self) -> Option<SpriteValues> {
        self.state.lock().state_on_down.clone()
    }

    /// Removes and returns the drag snapshot.
    pub fn take_state_on_down(&self) -> Option<SpriteValues> {
        self.state.lock().state_on_down.take()
    }

    /// Identity comparison.
    pub fn same(a: &NodeHandle, b: &NodeHandle) -> bool {
        Arc::ptr_eq(a, b)
    }
}

impl fmt::Debug for NodeContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("NodeContainer")
            .field("id", &self.id)
            .field("node", &state.node)
            .field("outline_row", &state.outline_row)
            .field("dragging", &state.state_on_down.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Node, Scene};

    #[test]
    fn identity_is_by_pointer() {
        let a = NodeContainer::new();
        let b = NodeContainer::new();
        let a2 = Arc::clone(&a);
        assert!(NodeContainer::same(&a, &a2));
        assert!(!NodeContainer::same(&a, &b));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn link_survives_unlink() {
        let mut scene = Scene::new();
        let id = scene.add_node(Node::new("n"), None);
        let handle = NodeContainer::for_node(id);
        assert_eq!(handle.node(), Some(id));
        handle.set_node(None);
        assert_eq!(handle.node(), None);
        handle.set_node(Some(id));
        assert_eq!(handle.node(), Some(id));
    }

    #[test]
    fn state_on_down_is_taken_once() {
        let mut scene = Scene::new();
        let id = scene.add_sprite("a.png", None);
        let handle = NodeContainer::for_node(id);
        handle.set_state_on_down(SpriteValues::capture(&scene, id));
        assert!(handle.state_on_down().is_some());
        assert!(handle.take_state_on_down().is_some());
        assert!(handle.take_state_on_down().is_none());
    }
}
