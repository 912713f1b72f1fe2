//! Editor commands.
//!
//! Each command builds an [`EditAction`] (usually an [`ActionGroup`]) with
//! its before/after state captured up front and commits it through
//! [`ActionManager::do_action`]. Nothing here mutates the document outside
//! of an action, except property and drag edits, which touch the live nodes
//! for immediate feedback before their snapshots are committed.

use std::collections::HashSet;
use std::fmt;

use seed_core::abstract_editor::{
    Action, ActionGroup, ActionManager, EditAction, EditActionError, EditActionResult,
};
use seed_core::math::{Color, Vec2};

use crate::container::{NodeContainer, NodeHandle};
use crate::document::{Document, RemovedNode};
use crate::scene::{Node, NodeId};
use crate::snapshot::SpriteState;

/// History type used by the editor.
pub type History = ActionManager<Document>;

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Builds a selection-only action switching between two selections.
pub fn selection_action(
    name: &str,
    before: Vec<NodeHandle>,
    after: Vec<NodeHandle>,
) -> Action<Document> {
    Action::new(
        name,
        move |doc: &mut Document| doc.set_selection(after.clone()),
        move |doc: &mut Document| doc.set_selection(before.clone()),
    )
    .selection_only()
}

fn same_selection(a: &[NodeHandle], b: &[NodeHandle]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| NodeContainer::same(x, y))
}

fn commit_selection(
    doc: &mut Document,
    history: &mut History,
    name: &str,
    after: Vec<NodeHandle>,
) -> EditActionResult<bool> {
    let before = doc.selection().to_vec();
    if same_selection(&before, &after) {
        return Ok(false);
    }
    history.do_action(Box::new(selection_action(name, before, after)), doc)?;
    Ok(true)
}

/// Selects `container` alone. Returns `false` if it already was the only
/// selected container.
pub fn select_only(
    doc: &mut Document,
    history: &mut History,
    container: &NodeHandle,
) -> EditActionResult<bool> {
    commit_selection(doc, history, "Select", vec![NodeHandle::clone(container)])
}

/// Adds `container` to the selection or removes it if already selected.
pub fn toggle_selection(
    doc: &mut Document,
    history: &mut History,
    container: &NodeHandle,
) -> EditActionResult<bool> {
    let mut after = doc.selection().to_vec();
    match after.iter().position(|c| NodeContainer::same(c, container)) {
        Some(index) => {
            after.remove(index);
        }
        None => after.push(NodeHandle::clone(container)),
    }
    commit_selection(doc, history, "Select", after)
}

/// Empties the selection. Returns `false` if nothing was selected.
pub fn clear_selection(doc: &mut Document, history: &mut History) -> EditActionResult<bool> {
    commit_selection(doc, history, "Unselect", Vec::new())
}

// ---------------------------------------------------------------------------
// Create / delete
// ---------------------------------------------------------------------------

/// Adds a node on redo and removes it on undo.
///
/// The first redo creates the node; later redos restore the removed subtree
/// so the node keeps its id and the container keeps its link.
struct CreateNodeAction {
    container: Option<NodeHandle>,
    template: Node,
    parent: Option<NodeId>,
    removed: Option<RemovedNode>,
}

impl fmt::Debug for CreateNodeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateNodeAction")
            .field("name", &self.template.name)
            .field("container", &self.container.as_ref().map(|c| c.id()))
            .finish()
    }
}

impl EditAction<Document> for CreateNodeAction {
    fn apply(&mut self, doc: &mut Document) -> EditActionResult {
        let container = self
            .container
            .as_ref()
            .ok_or_else(|| EditActionError::InvalidState("create action destroyed".into()))?;
        match self.removed.take() {
            Some(removed) => {
                doc.restore_node(removed);
            }
            None => {
                doc.attach_new_node(container, self.template.clone(), self.parent);
            }
        }
        doc.refresh();
        Ok(())
    }

    fn undo(&mut self, doc: &mut Document) -> EditActionResult {
        let container = self
            .container
            .as_ref()
            .ok_or_else(|| EditActionError::InvalidState("create action destroyed".into()))?;
        let removed = doc
            .remove_node(container)
            .ok_or_else(|| EditActionError::TargetNotFound(format!("{}", container.id())))?;
        self.removed = Some(removed);
        doc.refresh();
        Ok(())
    }

    fn description(&self) -> &str {
        "Create Node"
    }

    fn destroy(&mut self) {
        self.container = None;
        self.removed = None;
    }
}

/// Creates a sprite using `texture` at `position` and selects it, as one
/// "Create Sprite" step. Returns the new sprite's container.
pub fn create_sprite(
    doc: &mut Document,
    history: &mut History,
    texture: &str,
    position: Vec2,
) -> EditActionResult<NodeHandle> {
    let container = NodeContainer::new();
    let create = CreateNodeAction {
        container: Some(NodeHandle::clone(&container)),
        template: Node::sprite(texture).at(position),
        parent: None,
        removed: None,
    };
    let select = selection_action(
        "Select",
        doc.selection().to_vec(),
        vec![NodeHandle::clone(&container)],
    );
    let group = ActionGroup::with_actions("Create Sprite", vec![Box::new(create), Box::new(select)]);
    history.do_action(Box::new(group), doc)?;
    log::info!("Created sprite {:?} ({})", container.node(), container.id());
    Ok(container)
}

/// Removes node subtrees on redo and restores them on undo.
///
/// Subtrees are removed in the given order and restored in reverse, so
/// every node returns to its original sibling position.
pub struct DeleteNodesAction {
    containers: Vec<NodeHandle>,
    removed: Vec<RemovedNode>,
}

impl DeleteNodesAction {
    pub fn new(containers: Vec<NodeHandle>) -> Self {
        Self {
            containers,
            removed: Vec::new(),
        }
    }
}

impl fmt::Debug for DeleteNodesAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeleteNodesAction")
            .field("containers", &self.containers.len())
            .field("removed", &self.removed.len())
            .finish()
    }
}

impl EditAction<Document> for DeleteNodesAction {
    fn apply(&mut self, doc: &mut Document) -> EditActionResult {
        for container in &self.containers {
            match doc.remove_node(container) {
                Some(removed) => self.removed.push(removed),
                None => log::warn!("Delete: {} has no live node", container.id()),
            }
        }
        doc.refresh();
        Ok(())
    }

    fn undo(&mut self, doc: &mut Document) -> EditActionResult {
        while let Some(removed) = self.removed.pop() {
            doc.restore_node(removed);
        }
        doc.refresh();
        Ok(())
    }

    fn description(&self) -> &str {
        "Delete Nodes"
    }

    fn destroy(&mut self) {
        self.containers.clear();
        self.removed.clear();
    }
}

/// Deletes every selected node and clears the selection, as one "Delete"
/// step. Nodes whose ancestor is also selected go with the ancestor.
///
/// Returns `false` when nothing live is selected.
pub fn delete_selection(doc: &mut Document, history: &mut History) -> EditActionResult<bool> {
    let live = doc.live_selection();
    if live.is_empty() {
        return Ok(false);
    }
    let selected: HashSet<NodeId> = live.iter().map(|(_, id)| *id).collect();
    let has_selected_ancestor = |mut id: NodeId| {
        while let Some(parent) = doc.scene.node(id).and_then(|n| n.parent()) {
            if selected.contains(&parent) {
                return true;
            }
            id = parent;
        }
        false
    };

    let mut roots: Vec<(NodeHandle, NodeId)> = live
        .into_iter()
        .filter(|(_, id)| !has_selected_ancestor(*id))
        .collect();
    let draw_order = doc.scene.draw_order();
    roots.sort_by_key(|(_, id)| draw_order.iter().position(|d| d == id));

    let delete = DeleteNodesAction::new(roots.into_iter().map(|(c, _)| c).collect());
    let unselect = selection_action("Unselect", doc.selection().to_vec(), Vec::new());
    let group = ActionGroup::with_actions("Delete", vec![Box::new(delete), Box::new(unselect)]);
    history.do_action(Box::new(group), doc)?;
    Ok(true)
}

// ---------------------------------------------------------------------------
// Property edits
// ---------------------------------------------------------------------------

fn snapshot_action(name: &str, before: SpriteState, after: SpriteState) -> Action<Document> {
    Action::new(
        name,
        move |doc: &mut Document| {
            after.apply(&mut doc.scene);
            doc.refresh();
        },
        move |doc: &mut Document| {
            before.apply(&mut doc.scene);
            doc.refresh();
        },
    )
}

/// Commits one group with a snapshot action per `(before, after)` pair.
///
/// The live nodes are expected to already hold the `after` values.
pub fn commit_snapshots(
    doc: &mut Document,
    history: &mut History,
    name: &str,
    changes: Vec<(SpriteState, SpriteState)>,
) -> EditActionResult<bool> {
    if changes.is_empty() {
        return Ok(false);
    }
    let mut group = ActionGroup::new(name);
    for (before, after) in changes {
        group.add_action(Box::new(snapshot_action(name, before, after)));
    }
    history.do_action(Box::new(group), doc)?;
    Ok(true)
}

/// Applies `logic` to every live selected node and records the change.
///
/// With `skip_unchanged`, nothing is committed when no editable field
/// changed. Returns whether a step was committed.
pub fn change_sprite_property(
    doc: &mut Document,
    history: &mut History,
    name: &str,
    skip_unchanged: bool,
    mut logic: impl FnMut(&mut Node),
) -> EditActionResult<bool> {
    let mut changes = Vec::new();
    for (container, id) in doc.live_selection() {
        let Some(before) = SpriteState::capture(&container, &doc.scene) else {
            continue;
        };
        if let Some(node) = doc.scene.node_mut(id) {
            logic(node);
        }
        if let Some(after) = SpriteState::capture(&container, &doc.scene) {
            changes.push((before, after));
        }
    }
    if skip_unchanged && changes.iter().all(|(before, after)| before.same_values(after)) {
        log::debug!("Skipping unchanged edit: {name}");
        return Ok(false);
    }
    commit_snapshots(doc, history, name, changes)
}

/// A single property panel edit.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyEdit {
    PositionX(f32),
    PositionY(f32),
    ScaleX(f32),
    ScaleY(f32),
    AlignX(f32),
    AlignY(f32),
    /// Degrees.
    Angle(f32),
    /// New tint; each node keeps its own alpha.
    Color(Color),
    /// Clamped to `0..=100`.
    AlphaPercent(f32),
    Texture(String),
}

impl PropertyEdit {
    /// History label.
    pub fn description(&self) -> &'static str {
        match self {
            Self::PositionX(_) | Self::PositionY(_) => "Change Position",
            Self::ScaleX(_) | Self::ScaleY(_) => "Change Scale",
            Self::AlignX(_) | Self::AlignY(_) => "Change Align",
            Self::Angle(_) => "Change Angle",
            Self::Color(_) => "Change Color",
            Self::AlphaPercent(_) => "Change Alpha",
            Self::Texture(_) => "Change Texture",
        }
    }

    /// Writes the edit onto a node. Align and texture only affect sprites.
    pub fn apply_to(&self, node: &mut Node) {
        match self {
            Self::PositionX(x) => node.position.x = *x,
            Self::PositionY(y) => node.position.y = *y,
            Self::ScaleX(x) => node.scale.x = *x,
            Self::ScaleY(y) => node.scale.y = *y,
            Self::AlignX(x) => {
                if let Some(sprite) = node.sprite.as_mut() {
                    sprite.align.x = *x;
                }
            }
            Self::AlignY(y) => {
                if let Some(sprite) = node.sprite.as_mut() {
                    sprite.align.y = *y;
                }
            }
            Self::Angle(angle) => node.angle = *angle,
            Self::Color(color) => node.color = color.with_alpha(node.color.a),
            Self::AlphaPercent(percent) => {
                node.color.a = percent.clamp(0.0, 100.0) / 100.0;
            }
            Self::Texture(texture) => {
                if let Some(sprite) = node.sprite.as_mut() {
                    sprite.texture.clone_from(texture);
                }
            }
        }
    }
}

/// Applies a property edit to the selection and records it.
pub fn edit_property(
    doc: &mut Document,
    history: &mut History,
    edit: &PropertyEdit,
    skip_unchanged: bool,
) -> EditActionResult<bool> {
    change_sprite_property(doc, history, edit.description(), skip_unchanged, |node| {
        edit.apply_to(node)
    })
}
