//! Before/after snapshots of editable sprite state.
//!
//! Every edit follows the same protocol: capture a [`SpriteState`] for each
//! affected container, mutate the live node, capture again, and commit an
//! action whose redo applies the second snapshot and whose undo applies the
//! first.

use seed_core::math::{Color, Mat3, Vec2};

use crate::container::NodeHandle;
use crate::scene::{NodeId, Scene};

/// Editable fields of a node at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteValues {
    /// `None` for nodes without the sprite capability.
    pub texture: Option<String>,
    pub position: Vec2,
    pub scale: Vec2,
    pub angle: f32,
    pub color: Color,
    pub align: Option<Vec2>,
    pub world_transform: Mat3,
    pub parent_world_transform: Mat3,
}

impl SpriteValues {
    /// Reads the node's current values. `None` if the node does not exist.
    pub fn capture(scene: &Scene, id: NodeId) -> Option<Self> {
        let node = scene.node(id)?;
        Some(Self {
            texture: node.texture().map(str::to_owned),
            position: node.position,
            scale: node.scale,
            angle: node.angle,
            color: node.color,
            align: node.align(),
            world_transform: scene.world_transform(id),
            parent_world_transform: scene.parent_world_transform(id),
        })
    }

    /// Writes the editable fields back onto the node. Transforms are derived
    /// and not written. Missing nodes are ignored.
    pub fn apply_to(&self, scene: &mut Scene, id: NodeId) {
        let Some(node) = scene.node_mut(id) else {
            return;
        };
        node.position = self.position;
        node.scale = self.scale;
        node.angle = self.angle;
        node.color = self.color;
        if let Some(sprite) = node.sprite.as_mut() {
            if let Some(texture) = &self.texture {
                sprite.texture.clone_from(texture);
            }
            if let Some(align) = self.align {
                sprite.align = align;
            }
        }
    }

    /// Compares the user-editable fields only.
    pub fn same_editable(&self, other: &Self) -> bool {
        self.texture == other.texture
            && self.position == other.position
            && self.scale == other.scale
            && self.angle == other.angle
            && self.color == other.color
            && self.align == other.align
    }
}

/// A snapshot tied to the container it was captured from.
#[derive(Debug, Clone)]
pub struct SpriteState {
    pub container: NodeHandle,
    pub values: SpriteValues,
}

impl SpriteState {
    /// Captures the container's node. `None` if it has no live node.
    pub fn capture(container: &NodeHandle, scene: &Scene) -> Option<Self> {
        let id = container.node()?;
        Some(Self {
            container: NodeHandle::clone(container),
            values: SpriteValues::capture(scene, id)?,
        })
    }

    /// Pushes the captured values onto the container's live node.
    ///
    /// Silent no-op when the container is currently unlinked.
    pub fn apply(&self, scene: &mut Scene) {
        if let Some(id) = self.container.node() {
            self.values.apply_to(scene, id);
        }
    }

    pub fn same_values(&self, other: &Self) -> bool {
        self.values.same_editable(&other.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::NodeContainer;

    #[test]
    fn capture_apply_round_trip() {
        let mut scene = Scene::new();
        let id = scene.add_sprite("a.png", None);
        let handle = NodeContainer::for_node(id);
        let before = SpriteState::capture(&handle, &scene).unwrap();

        let node = scene.node_mut(id).unwrap();
        node.position = Vec2::new(10.0, 20.0);
        node.angle = 45.0;
        node.sprite.as_mut().unwrap().texture = "b.png".into();
        let after = SpriteState::capture(&handle, &scene).unwrap();
        assert!(!before.same_values(&after));

        before.apply(&mut scene);
        assert_eq!(SpriteValues::capture(&scene, id).unwrap(), before.values);
        after.apply(&mut scene);
        assert_eq!(scene.node(id).unwrap().texture(), Some("b.png"));
        assert_eq!(scene.node(id).unwrap().angle, 45.0);
    }

    #[test]
    fn apply_on_unlinked_container_is_noop() {
        let mut scene = Scene::new();
        let id = scene.add_sprite("a.png", None);
        let handle = NodeContainer::for_node(id);
        let mut state = SpriteState::capture(&handle, &scene).unwrap();
        state.values.position = Vec2::new(99.0, 99.0);

        handle.set_node(None);
        state.apply(&mut scene);
        assert_eq!(scene.node(id).unwrap().position, Vec2::zeros());
        assert!(SpriteState::capture(&handle, &scene).is_none());
    }

    #[test]
    fn captures_parent_transform() {
        let mut scene = Scene::new();
        let parent = scene.add_node(crate::scene::Node::new("p").at(Vec2::new(5.0, 0.0)), None);
        let child = scene.add_sprite("a.png", Some(parent));
        let values = SpriteValues::capture(&scene, child).unwrap();
        assert_eq!(values.parent_world_transform, scene.world_transform(parent));
        assert_eq!(values.world_transform, scene.world_transform(child));
    }

    #[test]
    fn same_editable_ignores_derived_transforms() {
        let mut scene = Scene::new();
        let parent = scene.add_node(crate::scene::Node::new("p"), None);
        let child = scene.add_sprite("a.png", Some(parent));
        let before = SpriteValues::capture(&scene, child).unwrap();
        scene.node_mut(parent).unwrap().position = Vec2::new(1.0, 1.0);
        let after = SpriteValues::capture(&scene, child).unwrap();
        assert!(before.same_editable(&after));
        assert_ne!(before, after);
    }
}
