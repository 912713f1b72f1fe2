mod common;

use common::*;
use seed_core::input::Modifiers;
use seed_core::math::Vec2;
use seed_editor::{EditorConfig, EditorSession, Handle, PointerEvent, PropertyEdit};

// ---------------------------------------------------------------------------
// Dead zone
// ---------------------------------------------------------------------------

#[test]
fn press_inside_dead_zone_commits_nothing() {
    let mut s = session();
    let sprite = s.create_sprite().unwrap();
    let len = s.history().len();

    drag(&mut s, Vec2::new(640.0, 360.0), Vec2::new(642.0, 362.0));
    assert_eq!(s.history().len(), len);
    assert_eq!(position(&s, &sprite), Vec2::new(640.0, 360.0));
    assert!(s.gesture().is_idle());
}

#[test]
fn press_at_dead_zone_edge_commits_one_move() {
    let mut s = session();
    let sprite = s.create_sprite().unwrap();
    let len = s.history().len();

    drag(&mut s, Vec2::new(640.0, 360.0), Vec2::new(643.0, 360.0));
    assert_eq!(s.history().len(), len + 1);
    assert_eq!(s.history().undo_description(), Some("Move Sprite"));
    assert!(approx(position(&s, &sprite), Vec2::new(643.0, 360.0)));
}

#[test]
fn release_far_away_without_moves_still_drags() {
    let mut s = session();
    let sprite = s.create_sprite().unwrap();
    s.pointer_down(&PointerEvent::left(640.0, 360.0)).unwrap();
    s.pointer_up(&PointerEvent::left(600.0, 360.0)).unwrap();
    assert!(approx(position(&s, &sprite), Vec2::new(600.0, 360.0)));
    assert_eq!(s.history().undo_description(), Some("Move Sprite"));
}

#[test]
fn dead_zone_comes_from_config() {
    let mut config = EditorConfig::default();
    config.gesture.dead_zone = 10.0;
    let mut s = EditorSession::new(config);
    s.create_sprite().unwrap();
    let len = s.history().len();

    drag(&mut s, Vec2::new(640.0, 360.0), Vec2::new(646.0, 366.0));
    assert_eq!(s.history().len(), len);
    drag(&mut s, Vec2::new(640.0, 360.0), Vec2::new(650.0, 360.0));
    assert_eq!(s.history().len(), len + 1);
}

#[test]
fn live_drag_is_not_recorded_until_release() {
    let mut s = session();
    let sprite = s.create_sprite().unwrap();
    let len = s.history().len();

    s.pointer_down(&PointerEvent::left(640.0, 360.0)).unwrap();
    s.pointer_move(&PointerEvent::left(660.0, 360.0));
    s.pointer_move(&PointerEvent::left(680.0, 370.0));
    assert!(approx(position(&s, &sprite), Vec2::new(680.0, 370.0)));
    assert_eq!(s.document().properties().position, position(&s, &sprite));
    assert_eq!(s.history().len(), len);

    s.pointer_up(&PointerEvent::left(680.0, 370.0)).unwrap();
    assert_eq!(s.history().len(), len + 1);
}

#[test]
fn middle_click_during_drag_does_not_end_it() {
    let mut s = session();
    let sprite = s.create_sprite().unwrap();
    let len = s.history().len();

    s.pointer_down(&PointerEvent::left(640.0, 360.0)).unwrap();
    s.pointer_move(&PointerEvent::left(660.0, 360.0));
    s.pointer_down(&PointerEvent::middle(660.0, 360.0)).unwrap();
    s.pointer_up(&PointerEvent::middle(660.0, 360.0)).unwrap();
    assert!(s.gesture().is_dragging());
    assert_eq!(s.history().len(), len);

    s.pointer_move(&PointerEvent::left(720.0, 360.0));
    s.pointer_up(&PointerEvent::left(720.0, 360.0)).unwrap();
    assert!(approx(position(&s, &sprite), Vec2::new(720.0, 360.0)));
    assert_eq!(s.history().len(), len + 1);
    assert_eq!(s.history().undo_description(), Some("Move Sprite"));
}

// ---------------------------------------------------------------------------
// Click selection
// ---------------------------------------------------------------------------

#[test]
fn click_picks_front_most_sprite() {
    let mut s = session();
    let back = s.create_sprite().unwrap();
    let front = s.create_sprite().unwrap();
    s.clear_selection().unwrap();

    click(&mut s, Vec2::new(640.0, 360.0));
    assert!(s.is_selected(&front));
    assert!(!s.is_selected(&back));
}

#[test]
fn bare_click_in_multi_selection_selects_only_that_node() {
    let mut s = session();
    let a = s.create_sprite().unwrap();
    s.edit_property(&PropertyEdit::PositionX(500.0)).unwrap();
    let b = s.create_sprite().unwrap();

    let event = PointerEvent::left(500.0, 360.0).with_modifiers(Modifiers::CTRL);
    s.pointer_down(&event).unwrap();
    s.pointer_up(&event).unwrap();
    assert_eq!(s.document().selection().len(), 2);

    click(&mut s, Vec2::new(640.0, 360.0));
    assert_eq!(s.document().selection().len(), 1);
    assert!(s.is_selected(&b));
    assert!(!s.is_selected(&a));
    assert_eq!(s.history().undo_description(), Some("Select"));
}

#[test]
fn ctrl_click_on_selected_node_deselects_it() {
    let mut s = session();
    let sprite = s.create_sprite().unwrap();
    let event = PointerEvent::left(640.0, 360.0).with_modifiers(Modifiers::CTRL);
    s.pointer_down(&event).unwrap();
    assert!(s.gesture().is_idle());
    s.pointer_up(&event).unwrap();
    assert!(!s.is_selected(&sprite));
}

#[test]
fn drag_on_unselected_node_selects_then_moves() {
    let mut s = session();
    let sprite = s.create_sprite().unwrap();
    s.clear_selection().unwrap();
    let len = s.history().len();

    drag(&mut s, Vec2::new(640.0, 360.0), Vec2::new(640.0, 300.0));
    assert!(s.is_selected(&sprite));
    assert_eq!(s.history().len(), len + 2);
    let labels: Vec<_> = s.history().undo_descriptions().take(2).collect();
    assert_eq!(labels, ["Move Sprite", "Select"]);
}

// ---------------------------------------------------------------------------
// Handles
// ---------------------------------------------------------------------------

#[test]
fn rotate_handle_uses_fixed_selection_pivot() {
    let mut s = session();
    let a = s.create_sprite().unwrap();
    s.edit_property(&PropertyEdit::PositionX(600.0)).unwrap();
    let b = s.create_sprite().unwrap();
    s.edit_property(&PropertyEdit::PositionX(700.0)).unwrap();
    let event = PointerEvent::left(600.0, 360.0).with_modifiers(Modifiers::CTRL);
    s.pointer_down(&event).unwrap();
    s.pointer_up(&event).unwrap();
    assert_eq!(s.document().selection().len(), 2);

    // Pivot is the center of both sprites' bounds: (650, 360).
    let down = PointerEvent::left(750.0, 360.0).with_handle(Handle::Rotate);
    s.pointer_down(&down).unwrap();
    s.pointer_move(&PointerEvent::left(650.0, 460.0));
    assert!(approx(position(&s, &a), Vec2::new(650.0, 310.0)));
    assert!(approx(position(&s, &b), Vec2::new(650.0, 410.0)));
    assert!((angle(&s, &b) - 90.0).abs() < 1e-3);

    s.pointer_move(&PointerEvent::left(550.0, 360.0));
    s.pointer_up(&PointerEvent::left(550.0, 360.0)).unwrap();
    assert!(approx(position(&s, &a), Vec2::new(700.0, 360.0)));
    assert!(approx(position(&s, &b), Vec2::new(600.0, 360.0)));
    assert_eq!(s.history().undo_description(), Some("Rotate Sprite"));

    s.undo().unwrap();
    assert!(approx(position(&s, &a), Vec2::new(600.0, 360.0)));
    assert_eq!(angle(&s, &a), 0.0);
}

#[test]
fn single_node_rotates_in_place() {
    let mut s = session();
    let sprite = s.create_sprite().unwrap();
    let down = PointerEvent::left(700.0, 360.0).with_handle(Handle::Rotate);
    drag_event(&mut s, down, Vec2::new(640.0, 300.0));
    assert!(approx(position(&s, &sprite), Vec2::new(640.0, 360.0)));
    assert!((angle(&s, &sprite) + 90.0).abs() < 1e-3);
}

#[test]
fn scale_handle_scales_along_its_axis() {
    let mut s = session();
    let sprite = s.create_sprite().unwrap();
    let down = PointerEvent::left(672.0, 360.0).with_handle(Handle::Scale { x: 1, y: 0 });
    drag_event(&mut s, down, Vec2::new(704.0, 380.0));

    let id = sprite.node().unwrap();
    assert!(approx(s.document().scene.node(id).unwrap().scale, Vec2::new(2.0, 1.0)));
    assert_eq!(s.history().undo_description(), Some("Scale Sprite"));
    s.undo().unwrap();
    assert_eq!(s.document().scene.node(id).unwrap().scale, Vec2::new(1.0, 1.0));
}

#[test]
fn handle_without_selection_falls_back_to_picking() {
    let mut s = session();
    s.create_sprite().unwrap();
    s.clear_selection().unwrap();
    let len = s.history().len();

    let down = PointerEvent::left(100.0, 100.0).with_handle(Handle::Rotate);
    drag_event(&mut s, down, Vec2::new(200.0, 200.0));
    assert_eq!(s.history().len(), len);
}

#[test]
fn drag_after_zoom_moves_in_world_units() {
    let mut s = session();
    let sprite = s.create_sprite().unwrap();
    s.scroll(seed_core::input::ScrollDelta::vertical(1.0));
    s.scroll(seed_core::input::ScrollDelta::vertical(1.0));
    assert_eq!(s.camera().zoom(), 2.0);

    drag(&mut s, Vec2::new(640.0, 360.0), Vec2::new(740.0, 360.0));
    assert!(approx(position(&s, &sprite), Vec2::new(690.0, 360.0)));
}
