//! # Seed Editor
//!
//! Sprite scene editing built on the undo/redo framework of
//! [`seed_core::abstract_editor`].
//!
//! The [`EditorSession`] is the entry point: it owns the [`Document`]
//! (scene, selection, outline, property panel), the action history, the
//! camera and the drag gesture state machine. Every document change goes
//! through a committed action, so any sequence of edits can be undone and
//! redone exactly.

pub mod camera;
pub mod commands;
pub mod config;
pub mod container;
pub mod document;
pub mod error;
pub mod gesture;
pub mod outline;
pub mod scene;
pub mod script;
pub mod session;
pub mod snapshot;

pub use commands::{History, PropertyEdit};
pub use config::{EditorConfig, load_config, load_or_default};
pub use container::{NodeContainer, NodeHandle};
pub use document::Document;
pub use error::{EditorError, EditorResult};
pub use gesture::{GestureKind, GestureState, Handle, PointerEvent};
pub use scene::{Node, NodeId, Scene};
pub use session::EditorSession;
pub use snapshot::{SpriteState, SpriteValues};
