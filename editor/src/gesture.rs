//! Pointer drag gestures: move, scale by handle, rotate.
//!
//! A gesture goes `Idle -> AboutTo -> Dragging -> Idle`. A press only
//! becomes a drag once the pointer travels past the dead zone; at that
//! point every selected container stores its state-on-down. While dragging,
//! nodes are edited live. Release commits one group with a snapshot action
//! per selected node; a press that never left `AboutTo` commits nothing.

use seed_core::abstract_editor::EditActionResult;
use seed_core::input::{Modifiers, PointerButton};
use seed_core::math::{self, Vec2};

use crate::commands::{self, History};
use crate::container::NodeHandle;
use crate::document::Document;
use crate::snapshot::{SpriteState, SpriteValues};

/// Gizmo handle under the pointer, resolved by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    /// Edge or corner handle; each component is -1, 0 or 1.
    Scale { x: i8, y: i8 },
    Rotate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Move,
    Scale { x: i8, y: i8 },
    Rotate,
}

impl GestureKind {
    pub fn from_handle(handle: Option<Handle>) -> Self {
        match handle {
            None => Self::Move,
            Some(Handle::Scale { x, y }) => Self::Scale { x, y },
            Some(Handle::Rotate) => Self::Rotate,
        }
    }

    /// History label of the committed step.
    pub fn description(self) -> &'static str {
        match self {
            Self::Move => "Move Sprite",
            Self::Scale { .. } => "Scale Sprite",
            Self::Rotate => "Rotate Sprite",
        }
    }
}

/// One pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Vec2,
    pub button: PointerButton,
    pub modifiers: Modifiers,
    pub handle: Option<Handle>,
}

impl PointerEvent {
    pub fn new(position: Vec2, button: PointerButton) -> Self {
        Self {
            position,
            button,
            modifiers: Modifiers::NONE,
            handle: None,
        }
    }

    /// Left button event at `(x, y)`.
    pub fn left(x: f32, y: f32) -> Self {
        Self::new(Vec2::new(x, y), PointerButton::Left)
    }

    /// Middle button event at `(x, y)`.
    pub fn middle(x: f32, y: f32) -> Self {
        Self::new(Vec2::new(x, y), PointerButton::Middle)
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_handle(mut self, handle: Handle) -> Self {
        self.handle = Some(handle);
        self
    }
}

/// Gesture state machine.
#[derive(Debug, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Middle-button camera drag.
    Panning {
        camera_on_down: Vec2,
        pointer_on_down: Vec2,
    },
    /// Button held, pointer still inside the dead zone.
    AboutTo {
        kind: GestureKind,
        pointer_on_down: Vec2,
        /// Container to select alone if the press ends as a bare click.
        select_on_click: Option<NodeHandle>,
    },
    Dragging {
        kind: GestureKind,
        pointer_on_down: Vec2,
        /// World-space rotation pivot, fixed for the whole gesture.
        pivot: Vec2,
    },
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Button holding the gesture: middle for panning, left otherwise.
    pub fn button(&self) -> Option<PointerButton> {
        match self {
            Self::Idle => None,
            Self::Panning { .. } => Some(PointerButton::Middle),
            Self::AboutTo { .. } | Self::Dragging { .. } => Some(PointerButton::Left),
        }
    }
}

/// World-space pivot for rotating the selection: a single node's position,
/// or the center of the selection's bounding box.
pub fn selection_pivot(doc: &Document) -> Option<Vec2> {
    let live = doc.live_selection();
    if let [(_, id)] = live.as_slice() {
        return Some(math::translation(&doc.scene.world_transform(*id)));
    }
    live.iter()
        .map(|(_, id)| {
            doc.scene.bounds_world(*id).unwrap_or_else(|| {
                let p = math::translation(&doc.scene.world_transform(*id));
                (p, p)
            })
        })
        .reduce(|(lo_a, hi_a), (lo_b, hi_b)| (lo_a.inf(&lo_b), hi_a.sup(&hi_b)))
        .map(|(lo, hi)| (lo + hi) * 0.5)
}

/// Stores the state-on-down of every live selected container.
pub fn begin_drag(doc: &Document) {
    for (container, id) in doc.live_selection() {
        container.set_state_on_down(SpriteValues::capture(&doc.scene, id));
    }
}

/// Applies the drag from `world_down` to `world_now` to every node that has
/// a state-on-down. Always computed from the state-on-down, never
/// accumulated.
pub fn drag_selection(
    doc: &mut Document,
    kind: GestureKind,
    pivot: Vec2,
    world_down: Vec2,
    world_now: Vec2,
) {
    for (container, id) in doc.live_selection() {
        let Some(on_down) = container.state_on_down() else {
            continue;
        };
        let Some(node) = doc.scene.node_mut(id) else {
            continue;
        };
        let to_parent = math::invert_affine(&on_down.parent_world_transform);
        match kind {
            GestureKind::Move => {
                let delta = math::transform_vector(&to_parent, world_now - world_down);
                node.position = on_down.position + delta;
            }
            GestureKind::Scale { x, y } => {
                // Pointer in the node's own frame at press time.
                let to_local = math::invert_affine(&on_down.world_transform);
                let from = math::transform_point(&to_local, world_down);
                let to = math::transform_point(&to_local, world_now);
                let ratio = |axis: i8, from: f32, to: f32| {
                    if axis == 0 || from.abs() < f32::EPSILON {
                        1.0
                    } else {
                        to / from
                    }
                };
                node.scale = Vec2::new(
                    on_down.scale.x * ratio(x, from.x, to.x),
                    on_down.scale.y * ratio(y, from.y, to.y),
                );
            }
            GestureKind::Rotate => {
                let delta = math::angle_of(world_now - pivot) - math::angle_of(world_down - pivot);
                let world_pos = math::translation(&on_down.world_transform);
                let rotated = pivot + math::rotate_vector(world_pos - pivot, delta);
                node.angle = on_down.angle + delta;
                node.position = math::transform_point(&to_parent, rotated);
            }
        }
    }
    doc.refresh();
}

/// Commits the drag as one group, consuming every state-on-down.
pub fn finish_drag(
    doc: &mut Document,
    history: &mut History,
    kind: GestureKind,
) -> EditActionResult<bool> {
    let mut changes = Vec::new();
    for container in doc.selection().to_vec() {
        let Some(values) = container.take_state_on_down() else {
            continue;
        };
        let Some(after) = SpriteState::capture(&container, &doc.scene) else {
            continue;
        };
        let before = SpriteState { container, values };
        changes.push((before, after));
    }
    commands::commit_snapshots(doc, history, kind.description(), changes)
}

/// Puts every node back to its state-on-down without committing anything.
pub fn cancel_drag(doc: &mut Document) {
    for container in doc.selection().to_vec() {
        if let (Some(values), Some(id)) = (container.take_state_on_down(), container.node()) {
            values.apply_to(&mut doc.scene, id);
        }
    }
    doc.refresh();
}
