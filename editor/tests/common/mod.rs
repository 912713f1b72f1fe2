//! Shared helpers for editor integration tests.

#![allow(dead_code)]

use seed_core::math::Vec2;
use seed_editor::{
    EditorConfig, EditorSession, NodeHandle, NodeId, PointerEvent, SpriteValues,
};

/// Session with default config (1280x720 view, zoom 1, dead zone 3).
pub fn session() -> EditorSession {
    EditorSession::new(EditorConfig::default())
}

/// Every observable field: node values in draw order plus selected node ids.
pub type Observed = (Vec<(NodeId, SpriteValues)>, Vec<Option<NodeId>>);

pub fn observe(session: &EditorSession) -> Observed {
    let doc = session.document();
    let nodes = doc
        .scene
        .draw_order()
        .into_iter()
        .filter_map(|id| Some((id, SpriteValues::capture(&doc.scene, id)?)))
        .collect();
    let selection = doc.selection().iter().map(|c| c.node()).collect();
    (nodes, selection)
}

pub fn position(session: &EditorSession, handle: &NodeHandle) -> Vec2 {
    let id = handle.node().expect("node is live");
    session.document().scene.node(id).expect("node exists").position
}

pub fn angle(session: &EditorSession, handle: &NodeHandle) -> f32 {
    let id = handle.node().expect("node is live");
    session.document().scene.node(id).expect("node exists").angle
}

pub fn approx(a: Vec2, b: Vec2) -> bool {
    (a - b).norm() < 1e-3
}

/// Left-button press, one move, release.
pub fn drag(session: &mut EditorSession, from: Vec2, to: Vec2) {
    drag_event(session, PointerEvent::left(from.x, from.y), to);
}

/// Press with a prepared event (handle, modifiers), one move, release.
pub fn drag_event(session: &mut EditorSession, down: PointerEvent, to: Vec2) {
    session.pointer_down(&down).unwrap();
    let mut up = down;
    up.position = to;
    session.pointer_move(&up);
    session.pointer_up(&up).unwrap();
}

pub fn click(session: &mut EditorSession, at: Vec2) {
    let event = PointerEvent::left(at.x, at.y);
    session.pointer_down(&event).unwrap();
    session.pointer_up(&event).unwrap();
}
