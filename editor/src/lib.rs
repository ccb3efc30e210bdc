//! # ClassicYou Editor
//!
//! Editing core of the ClassicYou level editor: the level object model and
//! its floors, JSON persistence, undoable level actions, the mouse tools
//! and handlers that produce them, and the egui property and history
//! panels.

pub mod actions;
pub mod config;
pub mod handlers;
pub mod history_panel;
pub mod input;
pub mod inspector;
pub mod level;
pub mod level_editor;
pub mod selection;
pub mod theme;
pub mod tools;

pub use actions::EditorContext;
pub use config::EditorConfig;
pub use level::{EditorLevel, LevelObject, ObjectId};
pub use level_editor::LevelEditor;
