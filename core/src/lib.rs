//! # Seed Core
//!
//! Scene-agnostic building blocks of the Seed sprite editor: the undo/redo
//! action framework, 2D math helpers and platform-agnostic input types.

pub mod abstract_editor;
pub mod input;
pub mod math;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Logs the core version once at startup.
pub fn init() {
    log::info!("Seed Core v{} initialized", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
