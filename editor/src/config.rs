//! Editor configuration loaded from `editor.toml`.
//!
//! Every section is optional; missing keys take the defaults below.
//!
//! ```toml
//! [view]
//! width = 1280.0
//! height = 720.0
//!
//! [camera]
//! zoom_levels = [0.2, 0.5, 0.7, 1.0, 1.5, 2.0, 4.0]
//! default_zoom_index = 3
//!
//! [gesture]
//! dead_zone = 3.0
//!
//! [history]
//! max_undo = 200
//! skip_unchanged_edits = false
//!
//! [assets]
//! default_texture = "default.png"
//! fallback_texture_size = [64.0, 64.0]
//!
//! [[assets.texture]]
//! name = "default.png"
//! width = 64.0
//! height = 64.0
//! ```

use std::path::Path;

use seed_core::math::Vec2;
use serde::Deserialize;

use crate::error::{EditorError, EditorResult};
use crate::scene::{DEFAULT_FALLBACK_TEXTURE_SIZE, Scene};

/// Top-level editor configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub view: ViewConfig,
    pub camera: CameraConfig,
    pub gesture: GestureConfig,
    pub history: HistoryConfig,
    pub assets: AssetsConfig,
}

/// Size of the scene view in screen units.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl ViewConfig {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Zoom factors the scroll wheel steps through, ascending.
    pub zoom_levels: Vec<f32>,
    pub default_zoom_index: usize,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            zoom_levels: vec![0.2, 0.5, 0.7, 1.0, 1.5, 2.0, 4.0],
            default_zoom_index: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Pointer travel, in screen units, before a press becomes a drag.
    pub dead_zone: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self { dead_zone: 3.0 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of undo steps kept. Unbounded when absent.
    pub max_undo: Option<usize>,
    /// Skip committing property edits that change nothing.
    pub skip_unchanged_edits: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Texture given to newly created sprites.
    pub default_texture: String,
    /// Size assumed for textures missing from the table.
    pub fallback_texture_size: [f32; 2],
    #[serde(rename = "texture")]
    pub textures: Vec<TextureConfig>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            default_texture: "default.png".into(),
            fallback_texture_size: DEFAULT_FALLBACK_TEXTURE_SIZE,
            textures: Vec::new(),
        }
    }
}

/// A known texture and its pixel size.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextureConfig {
    pub name: String,
    pub width: f32,
    pub height: f32,
}

impl EditorConfig {
    /// Parses a config from TOML text and validates it.
    pub fn from_toml_str(content: &str, path: &Path) -> EditorResult<Self> {
        let config: Self = toml::from_str(content).map_err(|source| EditorError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that deserialization alone cannot.
    pub fn validate(&self) -> EditorResult {
        if self.camera.zoom_levels.is_empty() {
            return Err(EditorError::InvalidConfig("camera.zoom_levels is empty".into()));
        }
        if self.camera.zoom_levels.iter().any(|&z| z <= 0.0) {
            return Err(EditorError::InvalidConfig(
                "camera.zoom_levels must be positive".into(),
            ));
        }
        if self.camera.default_zoom_index >= self.camera.zoom_levels.len() {
            return Err(EditorError::InvalidConfig(format!(
                "camera.default_zoom_index {} is out of range (0..{})",
                self.camera.default_zoom_index,
                self.camera.zoom_levels.len()
            )));
        }
        if self.gesture.dead_zone < 0.0 {
            return Err(EditorError::InvalidConfig("gesture.dead_zone is negative".into()));
        }
        if self.view.width <= 0.0 || self.view.height <= 0.0 {
            return Err(EditorError::InvalidConfig("view size must be positive".into()));
        }
        Ok(())
    }

    /// Registers the configured textures with a scene.
    pub fn apply_assets(&self, scene: &mut Scene) {
        let [w, h] = self.assets.fallback_texture_size;
        scene.set_fallback_texture_size(Vec2::new(w, h));
        for texture in &self.assets.textures {
            scene.register_texture(&texture.name, Vec2::new(texture.width, texture.height));
        }
    }
}

/// Load an editor config from a TOML file.
pub fn load_config(path: &Path) -> EditorResult<EditorConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| EditorError::ConfigIo {
        path: path.to_path_buf(),
        source,
    })?;
    EditorConfig::from_toml_str(&content, path)
}

/// Load the editor config, falling back to defaults if it can't be loaded.
pub fn load_or_default(path: &Path) -> EditorConfig {
    match load_config(path) {
        Ok(config) => {
            log::info!(
                "Loaded editor config from {} ({} textures)",
                path.display(),
                config.assets.textures.len()
            );
            config
        }
        Err(e) => {
            log::warn!("No editor config ({e}), using defaults");
            EditorConfig::default()
        }
    }
}
