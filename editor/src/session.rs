//! One open document and everything the view needs to edit it.

use seed_core::abstract_editor::ActionManager;
use seed_core::input::{KeyCode, Modifiers, PointerButton, ScrollDelta};
use seed_core::math::Vec2;

use crate::camera::Camera;
use crate::commands::{self, PropertyEdit};
use crate::config::EditorConfig;
use crate::container::NodeHandle;
use crate::document::Document;
use crate::error::EditorResult;
use crate::gesture::{self, GestureKind, GestureState, PointerEvent};
use crate::scene::{NodeId, Scene};

/// Editing session for a single document.
///
/// Owns the document, its undo history, the camera and the gesture state.
/// Dropping the session tears the history down, destroying every action.
pub struct EditorSession {
    document: Document,
    history: ActionManager<Document>,
    camera: Camera,
    gesture: GestureState,
    config: EditorConfig,
}

impl EditorSession {
    /// Opens an empty document.
    pub fn new(config: EditorConfig) -> Self {
        let mut scene = Scene::new();
        config.apply_assets(&mut scene);
        Self::with_scene(config, scene)
    }

    /// Opens a document on an existing scene.
    pub fn with_scene(config: EditorConfig, scene: Scene) -> Self {
        log::info!(
            "Opened session ({} nodes, max undo {:?})",
            scene.len(),
            config.history.max_undo
        );
        Self {
            document: Document::new(scene),
            history: ActionManager::with_max_undo(config.history.max_undo),
            camera: Camera::from_config(&config),
            gesture: GestureState::Idle,
            config,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &ActionManager<Document> {
        &self.history
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Stable container of a scene node.
    pub fn container_for(&mut self, id: NodeId) -> Option<NodeHandle> {
        self.document.container_for(id)
    }

    // -----------------------------------------------------------------------
    // Pointer
    // -----------------------------------------------------------------------

    pub fn pointer_down(&mut self, event: &PointerEvent) -> EditorResult {
        if !self.gesture.is_idle() {
            return Ok(());
        }
        match event.button {
            PointerButton::Middle => {
                self.gesture = GestureState::Panning {
                    camera_on_down: self.camera.position(),
                    pointer_on_down: event.position,
                };
            }
            PointerButton::Left => self.left_down(event)?,
            PointerButton::Right => {}
        }
        Ok(())
    }

    fn left_down(&mut self, event: &PointerEvent) -> EditorResult {
        let doc = &mut self.document;
        let history = &mut self.history;

        if event.handle.is_some() && !doc.live_selection().is_empty() {
            self.gesture = GestureState::AboutTo {
                kind: GestureKind::from_handle(event.handle),
                pointer_on_down: event.position,
                select_on_click: None,
            };
            return Ok(());
        }

        let world = self.camera.screen_to_world(event.position);
        let Some(container) = doc.scene.hit_test(world).and_then(|id| doc.container_for(id))
        else {
            commands::clear_selection(doc, history)?;
            return Ok(());
        };

        let mut select_on_click = None;
        if event.modifiers.ctrl {
            commands::toggle_selection(doc, history, &container)?;
            if !doc.is_selected(&container) {
                return Ok(());
            }
        } else if !doc.is_selected(&container) {
            commands::select_only(doc, history, &container)?;
        } else if doc.selection().len() > 1 {
            select_on_click = Some(container);
        }

        self.gesture = GestureState::AboutTo {
            kind: GestureKind::Move,
            pointer_on_down: event.position,
            select_on_click,
        };
        Ok(())
    }

    /// Moves the gesture along. Events from a button other than the one
    /// holding the gesture are ignored.
    pub fn pointer_move(&mut self, event: &PointerEvent) {
        if self.gesture.button() != Some(event.button) {
            return;
        }
        match &self.gesture {
            GestureState::Idle => {}
            GestureState::Panning {
                camera_on_down,
                pointer_on_down,
            } => {
                self.camera
                    .pan_from(*camera_on_down, event.position - *pointer_on_down);
            }
            GestureState::AboutTo {
                kind,
                pointer_on_down,
                ..
            } => {
                let (kind, pointer_on_down) = (*kind, *pointer_on_down);
                if (event.position - pointer_on_down).norm() >= self.config.gesture.dead_zone {
                    self.start_drag(kind, pointer_on_down);
                    self.drag_to(event.position);
                }
            }
            GestureState::Dragging { .. } => self.drag_to(event.position),
        }
    }

    fn start_drag(&mut self, kind: GestureKind, pointer_on_down: Vec2) {
        gesture::begin_drag(&self.document);
        let pivot = match kind {
            GestureKind::Rotate => gesture::selection_pivot(&self.document),
            _ => None,
        };
        log::debug!("Drag started: {}", kind.description());
        self.gesture = GestureState::Dragging {
            kind,
            pointer_on_down,
            pivot: pivot.unwrap_or_else(|| self.camera.screen_to_world(pointer_on_down)),
        };
    }

    fn drag_to(&mut self, position: Vec2) {
        if let GestureState::Dragging {
            kind,
            pointer_on_down,
            pivot,
        } = self.gesture
        {
            let world_down = self.camera.screen_to_world(pointer_on_down);
            let world_now = self.camera.screen_to_world(position);
            gesture::drag_selection(&mut self.document, kind, pivot, world_down, world_now);
        }
    }

    /// Ends the gesture when the button holding it is released.
    pub fn pointer_up(&mut self, event: &PointerEvent) -> EditorResult {
        if self.gesture.button() != Some(event.button) {
            return Ok(());
        }
        // A release past the dead zone without intermediate moves still drags.
        self.pointer_move(event);
        match std::mem::take(&mut self.gesture) {
            GestureState::Idle | GestureState::Panning { .. } => {}
            GestureState::AboutTo {
                select_on_click, ..
            } => {
                if let Some(container) = select_on_click {
                    commands::select_only(&mut self.document, &mut self.history, &container)?;
                }
            }
            GestureState::Dragging { kind, .. } => {
                gesture::finish_drag(&mut self.document, &mut self.history, kind)?;
            }
        }
        Ok(())
    }

    /// Abandons the current gesture, restoring any dragged nodes.
    pub fn cancel_gesture(&mut self) {
        if let GestureState::Dragging { .. } = std::mem::take(&mut self.gesture) {
            gesture::cancel_drag(&mut self.document);
            log::debug!("Drag cancelled");
        }
    }

    // -----------------------------------------------------------------------
    // Keyboard and wheel
    // -----------------------------------------------------------------------

    pub fn scroll(&mut self, delta: ScrollDelta) -> bool {
        self.camera.scroll(delta)
    }

    /// Handles editor shortcuts. Returns whether the key was used.
    pub fn key_down(&mut self, key: KeyCode, modifiers: Modifiers) -> EditorResult<bool> {
        if !self.gesture.is_idle() {
            if key == KeyCode::Escape {
                self.cancel_gesture();
                return Ok(true);
            }
            return Ok(false);
        }
        match key {
            KeyCode::Z if modifiers.ctrl && modifiers.shift => self.redo(),
            KeyCode::Z if modifiers.ctrl => self.undo(),
            KeyCode::Y if modifiers.ctrl => self.redo(),
            KeyCode::Delete => self.delete_selection(),
            _ => Ok(false),
        }
    }

    // -----------------------------------------------------------------------
    // History
    // -----------------------------------------------------------------------

    /// Steps back. `false` at the start of history or during a gesture.
    pub fn undo(&mut self) -> EditorResult<bool> {
        if !self.gesture.is_idle() {
            return Ok(false);
        }
        let moved = self.history.undo(&mut self.document)?;
        self.document.refresh();
        Ok(moved)
    }

    /// Steps forward. `false` at the end of history or during a gesture.
    pub fn redo(&mut self) -> EditorResult<bool> {
        if !self.gesture.is_idle() {
            return Ok(false);
        }
        let moved = self.history.redo(&mut self.document)?;
        self.document.refresh();
        Ok(moved)
    }

    pub fn mark_saved(&mut self) {
        self.history.mark_saved();
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.history.has_unsaved_changes()
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Creates a sprite with the default texture at the view center.
    pub fn create_sprite(&mut self) -> EditorResult<NodeHandle> {
        let texture = self.config.assets.default_texture.clone();
        let position = self.camera.position();
        Ok(commands::create_sprite(
            &mut self.document,
            &mut self.history,
            &texture,
            position,
        )?)
    }

    pub fn delete_selection(&mut self) -> EditorResult<bool> {
        Ok(commands::delete_selection(
            &mut self.document,
            &mut self.history,
        )?)
    }

    pub fn select_only(&mut self, container: &NodeHandle) -> EditorResult<bool> {
        Ok(commands::select_only(
            &mut self.document,
            &mut self.history,
            container,
        )?)
    }

    pub fn clear_selection(&mut self) -> EditorResult<bool> {
        Ok(commands::clear_selection(
            &mut self.document,
            &mut self.history,
        )?)
    }

    /// Applies a property panel edit to the selection.
    pub fn edit_property(&mut self, edit: &PropertyEdit) -> EditorResult<bool> {
        Ok(commands::edit_property(
            &mut self.document,
            &mut self.history,
            edit,
            self.config.history.skip_unchanged_edits,
        )?)
    }

    /// Whether `container` is part of the current selection.
    pub fn is_selected(&self, container: &NodeHandle) -> bool {
        self.document.is_selected(container)
    }
}

impl Drop for EditorSession {
    fn drop(&mut self) {
        log::info!(
            "Closing session ({} history entries)",
            self.history.len()
        );
    }
}
