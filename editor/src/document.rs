//! The editing context every action operates on.
//!
//! [`Document`] bundles the scene, the outline rows, the current selection
//! and the property panel mirror. Actions receive it explicitly instead of
//! reaching for globals, so history can be exercised without any UI.

use std::collections::HashMap;

use seed_core::abstract_editor::Editable;
use seed_core::math::{Color, Vec2};

use crate::container::{NodeContainer, NodeHandle};
use crate::outline::{Outline, OutlineRow};
use crate::scene::{DetachedNode, Node, NodeId, Scene};

/// Values displayed by the property panel for the last selected node.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyPanel {
    /// `false` when nothing editable is selected.
    pub enabled: bool,
    pub texture: String,
    pub position: Vec2,
    pub scale: Vec2,
    pub align: Vec2,
    pub angle: f32,
    /// Tint without alpha.
    pub color: Color,
    /// Alpha in percent, `0..=100`.
    pub alpha_percent: f32,
}

impl Default for PropertyPanel {
    fn default() -> Self {
        Self {
            enabled: false,
            texture: String::new(),
            position: Vec2::zeros(),
            scale: Vec2::new(1.0, 1.0),
            align: Vec2::new(0.5, 0.5),
            angle: 0.0,
            color: Color::WHITE,
            alpha_percent: 100.0,
        }
    }
}

impl PropertyPanel {
    /// Recomputes the fields from the last live node of `selection`.
    pub fn refresh(&mut self, scene: &Scene, selection: &[NodeHandle]) {
        let node = selection
            .iter()
            .rev()
            .filter_map(|c| c.node())
            .find_map(|id| scene.node(id));
        let Some(node) = node else {
            *self = Self::default();
            return;
        };
        *self = Self {
            enabled: true,
            texture: node.texture().unwrap_or_default().to_owned(),
            position: node.position,
            scale: node.scale,
            align: node.align().unwrap_or(Vec2::new(0.5, 0.5)),
            angle: node.angle,
            color: node.color.with_alpha(1.0),
            alpha_percent: node.color.a * 100.0,
        };
    }
}

/// A container's link to a node inside a removed subtree.
#[derive(Debug)]
struct RemovedLink {
    container: NodeHandle,
    node: NodeId,
    row: Option<(usize, OutlineRow)>,
}

/// Everything needed to put a deleted subtree back exactly as it was.
#[derive(Debug)]
pub struct RemovedNode {
    detached: DetachedNode,
    links: Vec<RemovedLink>,
}

impl RemovedNode {
    /// Id of the removed subtree root.
    pub fn id(&self) -> NodeId {
        self.detached.id()
    }
}

/// Scene, selection, outline and property panel of one open document.
#[derive(Debug, Default)]
pub struct Document {
    pub scene: Scene,
    pub outline: Outline,
    selection: Vec<NodeHandle>,
    properties: PropertyPanel,
    containers: HashMap<NodeId, NodeHandle>,
}

impl Editable for Document {}

impl Document {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            ..Self::default()
        }
    }

    /// Current selection, in selection order.
    pub fn selection(&self) -> &[NodeHandle] {
        &self.selection
    }

    /// Replaces the selection and refreshes the property panel.
    pub fn set_selection(&mut self, selection: Vec<NodeHandle>) {
        self.selection = selection;
        self.refresh();
    }

    pub fn is_selected(&self, container: &NodeHandle) -> bool {
        self.selection.iter().any(|c| NodeContainer::same(c, container))
    }

    /// Selected containers whose node is currently in the scene.
    pub fn live_selection(&self) -> Vec<(NodeHandle, NodeId)> {
        self.selection
            .iter()
            .filter_map(|c| {
                let id = c.node().filter(|&id| self.scene.contains(id))?;
                Some((NodeHandle::clone(c), id))
            })
            .collect()
    }

    pub fn properties(&self) -> &PropertyPanel {
        &self.properties
    }

    /// Container registered for a live node, created on first use.
    pub fn container_for(&mut self, id: NodeId) -> Option<NodeHandle> {
        if !self.scene.contains(id) {
            return None;
        }
        let handle = self
            .containers
            .entry(id)
            .or_insert_with(|| NodeContainer::for_node(id));
        Some(NodeHandle::clone(handle))
    }

    /// Registered container for `id`, without creating one.
    pub fn find_container(&self, id: NodeId) -> Option<&NodeHandle> {
        self.containers.get(&id)
    }

    /// Adds `node` to the scene, gives it an outline row and links it to `container`.
    pub fn attach_new_node(
        &mut self,
        container: &NodeHandle,
        node: Node,
        parent: Option<NodeId>,
    ) -> NodeId {
        let label = node.name.clone();
        let id = self.scene.add_node(node, parent);
        let row = self.outline.add_row(label);
        container.set_node(Some(id));
        container.set_outline_row(Some(row));
        self.containers.insert(id, NodeHandle::clone(container));
        log::trace!("Attached {} to node {id}", container.id());
        id
    }

    /// Removes the container's node and its descendants from the scene.
    ///
    /// Every container linked into the subtree is unlinked and its outline
    /// row removed. Returns `None` if the container has no live node.
    pub fn remove_node(&mut self, container: &NodeHandle) -> Option<RemovedNode> {
        let id = container.node()?;
        let detached = self.scene.remove_subtree(id)?;
        let links = detached
            .ids()
            .into_iter()
            .filter_map(|node| {
                let container = self.containers.remove(&node)?;
                container.set_node(None);
                let row = container
                    .outline_row()
                    .and_then(|row| self.outline.remove_row(row));
                Some(RemovedLink {
                    container,
                    node,
                    row,
                })
            })
            .collect();
        log::trace!("Removed node {id} ({})", container.id());
        Some(RemovedNode { detached, links })
    }

    /// Restores a subtree removed by [`remove_node`](Self::remove_node) and
    /// relinks its containers.
    pub fn restore_node(&mut self, removed: RemovedNode) -> NodeId {
        let RemovedNode { detached, links } = removed;
        let id = self.scene.restore_subtree(detached);
        // Rows come back in reverse removal order so saved indices stay valid.
        for link in links.into_iter().rev() {
            link.container.set_node(Some(link.node));
            if let Some((index, row)) = link.row {
                self.outline.restore_row(index, row);
            }
            self.containers.insert(link.node, link.container);
        }
        log::trace!("Restored node {id}");
        id
    }

    /// Resynchronizes derived UI state with the scene.
    pub fn refresh(&mut self) {
        self.properties.refresh(&self.scene, &self.selection);
    }
}
