//! In-memory hierarchical sprite scene.
//!
//! Nodes live in a map keyed by [`NodeId`]; the hierarchy is stored as
//! parent links plus ordered child lists. Draw order is depth-first, parent
//! before children, siblings in insertion order, so hit-testing walks the
//! same order backwards (front to back).
//!
//! A node is either a plain transform node or carries the [`SpriteData`]
//! capability (texture + pivot). Callers query the capability instead of
//! matching on node kinds.

use std::collections::HashMap;
use std::fmt;

use seed_core::math::{self, Color, Mat3, Vec2};

/// Stable identifier of a scene node. Never reused within a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Raw numeric value, for display.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Sprite capability of a node.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteData {
    /// Texture identifier (file name).
    pub texture: String,
    /// Pivot inside the texture, `(0, 0)` top-left, `(1, 1)` bottom-right.
    pub align: Vec2,
}

/// A scene node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub position: Vec2,
    pub scale: Vec2,
    /// Rotation in degrees.
    pub angle: f32,
    pub color: Color,
    /// Present on sprite nodes only.
    pub sprite: Option<SpriteData>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// Creates a plain transform node at the origin.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Vec2::zeros(),
            scale: Vec2::new(1.0, 1.0),
            angle: 0.0,
            color: Color::WHITE,
            sprite: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Creates a sprite node using `texture`, centered on its position.
    pub fn sprite(texture: impl Into<String>) -> Self {
        let texture = texture.into();
        Self {
            sprite: Some(SpriteData {
                texture: texture.clone(),
                align: Vec2::new(0.5, 0.5),
            }),
            ..Self::new(texture)
        }
    }

    /// Sets the position (builder style).
    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Texture name, for sprite nodes.
    pub fn texture(&self) -> Option<&str> {
        self.sprite.as_ref().map(|s| s.texture.as_str())
    }

    /// Pivot, for sprite nodes.
    pub fn align(&self) -> Option<Vec2> {
        self.sprite.as_ref().map(|s| s.align)
    }

    /// Transform relative to the parent.
    pub fn local_transform(&self) -> Mat3 {
        math::affine_2d(self.position, self.scale, self.angle)
    }
}

/// A subtree removed from the scene, ready to be restored with the same ids.
#[derive(Debug, Clone)]
pub struct DetachedNode {
    id: NodeId,
    node: Node,
    /// Position among the parent's children (or among the roots).
    index: usize,
    children: Vec<DetachedNode>,
}

impl DetachedNode {
    /// Id of the subtree root.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The detached root node.
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Every id in the subtree, depth-first, root first.
    pub fn ids(&self) -> Vec<NodeId> {
        let mut ids = vec![self.id];
        for child in &self.children {
            ids.extend(child.ids());
        }
        ids
    }
}

/// Size assumed for textures that were never registered.
pub const DEFAULT_FALLBACK_TEXTURE_SIZE: [f32; 2] = [64.0, 64.0];

/// The scene graph edited by the document.
pub struct Scene {
    nodes: HashMap<NodeId, Node>,
    roots: Vec<NodeId>,
    next_id: u64,
    textures: HashMap<String, Vec2>,
    fallback_texture_size: Vec2,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        let [w, h] = DEFAULT_FALLBACK_TEXTURE_SIZE;
        Self {
            nodes: HashMap::new(),
            roots: Vec::new(),
            next_id: 1,
            textures: HashMap::new(),
            fallback_texture_size: Vec2::new(w, h),
        }
    }

    /// Sets the size used for unknown textures.
    pub fn set_fallback_texture_size(&mut self, size: Vec2) {
        self.fallback_texture_size = size;
    }

    /// Records the pixel size of a texture.
    pub fn register_texture(&mut self, name: impl Into<String>, size: Vec2) {
        self.textures.insert(name.into(), size);
    }

    /// Pixel size of a texture, or the fallback size if unknown.
    pub fn texture_size(&self, name: &str) -> Vec2 {
        self.textures
            .get(name)
            .copied()
            .unwrap_or(self.fallback_texture_size)
    }

    /// Inserts a node under `parent` (or at the root) and returns its id.
    ///
    /// A parent that does not exist is ignored and the node becomes a root.
    pub fn add_node(&mut self, mut node: Node, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;

        let parent = parent.filter(|p| {
            let exists = self.nodes.contains_key(p);
            if !exists {
                log::warn!("Parent {p} not found, adding node {id} at the root");
            }
            exists
        });
        node.parent = parent;
        node.children.clear();
        match parent.and_then(|p| self.nodes.get_mut(&p)) {
            Some(parent_node) => parent_node.children.push(id),
            None => self.roots.push(id),
        }
        self.nodes.insert(id, node);
        id
    }

    /// Inserts a sprite node with default transform using `texture`.
    pub fn add_sprite(&mut self, texture: impl Into<String>, parent: Option<NodeId>) -> NodeId {
        self.add_node(Node::sprite(texture), parent)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level nodes in draw order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Removes `id` and all its descendants.
    ///
    /// Returns `None` if the node does not exist.
    pub fn remove_subtree(&mut self, id: NodeId) -> Option<DetachedNode> {
        let parent = self.nodes.get(&id)?.parent;
        let siblings = match parent.and_then(|p| self.nodes.get_mut(&p)) {
            Some(parent_node) => &mut parent_node.children,
            None => &mut self.roots,
        };
        let index = siblings.iter().position(|&s| s == id).unwrap_or(siblings.len());
        siblings.retain(|&s| s != id);
        self.take_subtree(id, index)
    }

    fn take_subtree(&mut self, id: NodeId, index: usize) -> Option<DetachedNode> {
        let node = self.nodes.remove(&id)?;
        let children = node
            .children
            .iter()
            .enumerate()
            .filter_map(|(i, &child)| self.take_subtree(child, i))
            .collect();
        Some(DetachedNode {
            id,
            node,
            index,
            children,
        })
    }

    /// Reinserts a detached subtree with its original ids, parent and
    /// sibling position.
    ///
    /// If the original parent no longer exists the subtree becomes a root.
    pub fn restore_subtree(&mut self, detached: DetachedNode) -> NodeId {
        let id = detached.id;
        let parent = detached.node.parent.filter(|p| self.nodes.contains_key(p));
        let siblings = match parent.and_then(|p| self.nodes.get_mut(&p)) {
            Some(parent_node) => &mut parent_node.children,
            None => &mut self.roots,
        };
        let index = detached.index.min(siblings.len());
        siblings.insert(index, id);
        self.put_subtree(detached, parent);
        id
    }

    fn put_subtree(&mut self, detached: DetachedNode, parent: Option<NodeId>) {
        let DetachedNode {
            id,
            mut node,
            children,
            ..
        } = detached;
        node.parent = parent;
        node.children = children.iter().map(|c| c.id).collect();
        self.nodes.insert(id, node);
        for child in children {
            self.put_subtree(child, Some(id));
        }
    }

    /// World transform of a node (identity if it does not exist).
    pub fn world_transform(&self, id: NodeId) -> Mat3 {
        let Some(node) = self.nodes.get(&id) else {
            return Mat3::identity();
        };
        self.parent_world_transform(id) * node.local_transform()
    }

    /// World transform of the node's parent (identity for roots).
    pub fn parent_world_transform(&self, id: NodeId) -> Mat3 {
        match self.nodes.get(&id).and_then(|n| n.parent) {
            Some(parent) => self.world_transform(parent),
            None => Mat3::identity(),
        }
    }

    /// Every node in draw order (back to front).
    pub fn draw_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(node) = self.nodes.get(&id) {
                stack.extend(node.children.iter().rev());
            }
        }
        order
    }

    /// Visits every node back to front (draw order).
    pub fn visit_back_to_front(&self, mut visit: impl FnMut(NodeId, &Node)) {
        for id in self.draw_order() {
            if let Some(node) = self.nodes.get(&id) {
                visit(id, node);
            }
        }
    }

    /// Visits nodes front to back until `visit` returns `true`; returns that node.
    pub fn visit_front_to_back(
        &self,
        mut visit: impl FnMut(NodeId, &Node) -> bool,
    ) -> Option<NodeId> {
        self.draw_order()
            .into_iter()
            .rev()
            .find(|&id| self.nodes.get(&id).is_some_and(|node| visit(id, node)))
    }

    /// Local-space rectangle `(min, max)` covered by the node's visual, if
    /// it has one.
    pub fn local_extent(&self, id: NodeId) -> Option<(Vec2, Vec2)> {
        let sprite = self.nodes.get(&id)?.sprite.as_ref()?;
        let size = self.texture_size(&sprite.texture);
        let min = Vec2::new(-size.x * sprite.align.x, -size.y * sprite.align.y);
        Some((min, min + size))
    }

    /// World-space axis-aligned bounding box of the node's visual.
    pub fn bounds_world(&self, id: NodeId) -> Option<(Vec2, Vec2)> {
        let (min, max) = self.local_extent(id)?;
        let world = self.world_transform(id);
        let corners = [
            Vec2::new(min.x, min.y),
            Vec2::new(max.x, min.y),
            Vec2::new(max.x, max.y),
            Vec2::new(min.x, max.y),
        ]
        .map(|c| math::transform_point(&world, c));
        let lo = corners.iter().fold(corners[0], |acc, c| acc.inf(c));
        let hi = corners.iter().fold(corners[0], |acc, c| acc.sup(c));
        Some((lo, hi))
    }

    /// Topmost node whose visual contains `world_point`.
    pub fn hit_test(&self, world_point: Vec2) -> Option<NodeId> {
        self.visit_front_to_back(|id, _| {
            let Some((min, max)) = self.local_extent(id) else {
                return false;
            };
            let inverse = math::invert_affine(&self.world_transform(id));
            let p = math::transform_point(&inverse, world_point);
            p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
        })
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("nodes", &self.nodes.len())
            .field("roots", &self.roots)
            .field("textures", &self.textures.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).norm() < 1e-4
    }

    #[test]
    fn add_and_lookup() {
        let mut scene = Scene::new();
        let a = scene.add_node(Node::sprite("a.png").at(Vec2::new(1.0, 2.0)), None);
        assert!(scene.contains(a));
        assert_eq!(scene.node(a).unwrap().position, Vec2::new(1.0, 2.0));
        assert_eq!(scene.node(a).unwrap().texture(), Some("a.png"));
        assert_eq!(scene.roots(), &[a]);
    }

    #[test]
    fn missing_parent_falls_back_to_root() {
        let mut scene = Scene::new();
        let a = scene.add_node(Node::new("a"), None);
        let b = scene.add_node(Node::new("b"), Some(a));
        scene.remove_subtree(a);
        let c = scene.add_node(Node::new("c"), Some(b));
        assert_eq!(scene.roots(), &[c]);
        assert!(scene.node(c).unwrap().parent().is_none());
    }

    #[test]
    fn ids_are_never_reused() {
        let mut scene = Scene::new();
        let a = scene.add_node(Node::new("a"), None);
        scene.remove_subtree(a);
        let b = scene.add_node(Node::new("b"), None);
        assert_ne!(a, b);
    }

    #[test]
    fn draw_order_is_depth_first() {
        let mut scene = Scene::new();
        let a = scene.add_node(Node::new("a"), None);
        let b = scene.add_node(Node::new("b"), None);
        let a1 = scene.add_node(Node::new("a1"), Some(a));
        let a2 = scene.add_node(Node::new("a2"), Some(a));
        assert_eq!(scene.draw_order(), vec![a, a1, a2, b]);
    }

    #[test]
    fn back_to_front_visits_every_node() {
        let mut scene = Scene::new();
        let a = scene.add_sprite("a.png", None);
        let b = scene.add_sprite("b.png", Some(a));
        let mut seen = Vec::new();
        scene.visit_back_to_front(|id, _| seen.push(id));
        assert_eq!(seen, vec![a, b]);
    }

    #[test]
    fn remove_and_restore_keeps_ids_and_order() {
        let mut scene = Scene::new();
        let a = scene.add_node(Node::new("a"), None);
        let b = scene.add_node(Node::new("b"), None);
        let c = scene.add_node(Node::new("c"), None);
        let b1 = scene.add_node(Node::new("b1"), Some(b));

        let detached = scene.remove_subtree(b).unwrap();
        assert_eq!(detached.ids(), vec![b, b1]);
        assert!(!scene.contains(b) && !scene.contains(b1));
        assert_eq!(scene.roots(), &[a, c]);

        assert_eq!(scene.restore_subtree(detached), b);
        assert_eq!(scene.roots(), &[a, b, c]);
        assert_eq!(scene.node(b1).unwrap().parent(), Some(b));
        assert_eq!(scene.node(b).unwrap().children(), &[b1]);
    }

    #[test]
    fn remove_missing_is_none() {
        let mut scene = Scene::new();
        let a = scene.add_node(Node::new("a"), None);
        scene.remove_subtree(a);
        assert!(scene.remove_subtree(a).is_none());
    }

    #[test]
    fn world_transform_composes_parents() {
        let mut scene = Scene::new();
        let parent = scene.add_node(Node::new("p").at(Vec2::new(100.0, 0.0)), None);
        scene.node_mut(parent).unwrap().scale = Vec2::new(2.0, 2.0);
        let child = scene.add_node(Node::new("c").at(Vec2::new(10.0, 5.0)), Some(parent));

        let world = scene.world_transform(child);
        assert!(approx(math::translation(&world), Vec2::new(120.0, 10.0)));
        let parent_world = scene.parent_world_transform(child);
        assert!(approx(math::translation(&parent_world), Vec2::new(100.0, 0.0)));
    }

    #[test]
    fn hit_test_prefers_front_most() {
        let mut scene = Scene::new();
        scene.register_texture("big.png", Vec2::new(100.0, 100.0));
        let back = scene.add_node(Node::sprite("big.png").at(Vec2::new(50.0, 50.0)), None);
        let front = scene.add_node(Node::sprite("big.png").at(Vec2::new(80.0, 80.0)), None);

        assert_eq!(scene.hit_test(Vec2::new(90.0, 90.0)), Some(front));
        assert_eq!(scene.hit_test(Vec2::new(10.0, 10.0)), Some(back));
        assert_eq!(scene.hit_test(Vec2::new(500.0, 500.0)), None);
    }

    #[test]
    fn hit_test_respects_align_and_rotation() {
        let mut scene = Scene::new();
        scene.register_texture("bar.png", Vec2::new(100.0, 10.0));
        let bar = scene.add_node(Node::sprite("bar.png"), None);
        scene.node_mut(bar).unwrap().sprite.as_mut().unwrap().align = Vec2::new(0.0, 0.5);

        assert_eq!(scene.hit_test(Vec2::new(90.0, 0.0)), Some(bar));
        assert_eq!(scene.hit_test(Vec2::new(-10.0, 0.0)), None);

        scene.node_mut(bar).unwrap().angle = 90.0;
        assert_eq!(scene.hit_test(Vec2::new(0.0, 90.0)), Some(bar));
        assert_eq!(scene.hit_test(Vec2::new(90.0, 0.0)), None);
    }

    #[test]
    fn plain_nodes_are_not_hit() {
        let mut scene = Scene::new();
        scene.add_node(Node::new("group"), None);
        assert_eq!(scene.hit_test(Vec2::zeros()), None);
    }

    #[test]
    fn bounds_and_fallback_texture_size() {
        let mut scene = Scene::new();
        scene.set_fallback_texture_size(Vec2::new(20.0, 10.0));
        let s = scene.add_node(Node::sprite("unknown.png").at(Vec2::new(100.0, 100.0)), None);
        let (lo, hi) = scene.bounds_world(s).unwrap();
        assert!(approx(lo, Vec2::new(90.0, 95.0)));
        assert!(approx(hi, Vec2::new(110.0, 105.0)));
    }
}
