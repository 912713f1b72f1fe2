//! Scene view camera: pan and stepped zoom.
//!
//! The camera position is the world point shown at the center of the view.
//! Camera changes are view state and never enter the history.

use seed_core::input::ScrollDelta;
use seed_core::math::Vec2;

use crate::config::EditorConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec2,
    viewport: Vec2,
    zoom_levels: Vec<f32>,
    zoom_index: usize,
}

impl Camera {
    /// Creates a camera showing world `(0, 0)` at the top-left of the view.
    ///
    /// `zoom_levels` must be non-empty; the index is clamped into range.
    pub fn new(viewport: Vec2, zoom_levels: Vec<f32>, zoom_index: usize) -> Self {
        let zoom_levels = if zoom_levels.is_empty() {
            vec![1.0]
        } else {
            zoom_levels
        };
        let zoom_index = zoom_index.min(zoom_levels.len() - 1);
        Self {
            position: viewport * 0.5,
            viewport,
            zoom_levels,
            zoom_index,
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(
            config.view.size(),
            config.camera.zoom_levels.clone(),
            config.camera.default_zoom_index,
        )
    }

    /// World point at the center of the view.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    pub fn zoom(&self) -> f32 {
        self.zoom_levels[self.zoom_index]
    }

    pub fn zoom_index(&self) -> usize {
        self.zoom_index
    }

    /// Steps to the next zoom level. Returns `false` at the last one.
    pub fn zoom_in(&mut self) -> bool {
        if self.zoom_index + 1 < self.zoom_levels.len() {
            self.zoom_index += 1;
            true
        } else {
            false
        }
    }

    /// Steps to the previous zoom level. Returns `false` at the first one.
    pub fn zoom_out(&mut self) -> bool {
        if self.zoom_index > 0 {
            self.zoom_index -= 1;
            true
        } else {
            false
        }
    }

    /// One zoom step per scroll event, in the direction of the vertical delta.
    pub fn scroll(&mut self, delta: ScrollDelta) -> bool {
        if delta.lines.y > 0.0 {
            self.zoom_in()
        } else if delta.lines.y < 0.0 {
            self.zoom_out()
        } else {
            false
        }
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        self.position + (screen - self.viewport * 0.5) / self.zoom()
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.position) * self.zoom() + self.viewport * 0.5
    }

    /// Moves the camera so that content follows a pointer drag of
    /// `screen_delta` starting from `position_on_down`.
    pub fn pan_from(&mut self, position_on_down: Vec2, screen_delta: Vec2) {
        self.position = position_on_down - screen_delta / self.zoom();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::from_config(&EditorConfig::default())
    }

    #[test]
    fn default_maps_screen_to_world_one_to_one() {
        let camera = camera();
        assert_eq!(camera.zoom(), 1.0);
        let p = Vec2::new(100.0, 200.0);
        assert_eq!(camera.screen_to_world(p), p);
        assert_eq!(camera.world_to_screen(p), p);
    }

    #[test]
    fn zoom_is_clamped_to_table() {
        let mut camera = camera();
        while camera.zoom_in() {}
        assert_eq!(camera.zoom(), 4.0);
        assert!(!camera.scroll(ScrollDelta::vertical(1.0)));
        while camera.zoom_out() {}
        assert_eq!(camera.zoom(), 0.2);
        assert!(!camera.scroll(ScrollDelta::vertical(-1.0)));
        assert!(camera.scroll(ScrollDelta::vertical(1.0)));
        assert_eq!(camera.zoom(), 0.5);
    }

    #[test]
    fn zoom_keeps_center_fixed() {
        let mut camera = camera();
        let center = camera.viewport() * 0.5;
        let before = camera.screen_to_world(center);
        camera.zoom_in();
        assert_eq!(camera.screen_to_world(center), before);
        let corner = camera.screen_to_world(Vec2::zeros());
        assert!((corner - Vec2::new(640.0 - 640.0 / 1.5, 360.0 - 360.0 / 1.5)).norm() < 1e-3);
    }

    #[test]
    fn round_trip_when_zoomed() {
        let mut camera = camera();
        camera.zoom_in();
        camera.set_position(Vec2::new(-30.0, 12.0));
        let p = Vec2::new(17.0, 301.0);
        assert!((camera.world_to_screen(camera.screen_to_world(p)) - p).norm() < 1e-3);
    }

    #[test]
    fn pan_follows_pointer() {
        let mut camera = camera();
        camera.zoom_in();
        camera.zoom_in();
        let on_down = camera.position();
        camera.pan_from(on_down, Vec2::new(20.0, -10.0));
        assert_eq!(camera.position(), on_down - Vec2::new(10.0, -5.0));
    }

    #[test]
    fn empty_table_falls_back() {
        let camera = Camera::new(Vec2::new(10.0, 10.0), Vec::new(), 5);
        assert_eq!(camera.zoom(), 1.0);
    }
}
