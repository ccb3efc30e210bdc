//! # ClassicYou Core
//!
//! Core crate for the ClassicYou level editor: the undo/redo framework,
//! math aliases, 2D geometry predicates and CPU-side mesh data.

pub mod abstract_editor;
pub mod geometry;
pub mod math;
pub mod mesh;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Logs the core version. Called once by binaries after installing a logger.
pub fn init() {
    log::info!("ClassicYou Core v{} initialized", VERSION);
}
