//! Mouse-driven tools.
//!
//! Each tool is a small state machine over mouse press / move / release.
//! While dragging, a tool keeps its own preview of the edited object and
//! never mutates the level; on release it hands back exactly one action for
//! the level editor to push. Escape cancels a drag without producing an
//! action.

use std::fmt;

use classicyou_core::abstract_editor::EditAction;
use classicyou_core::geometry::Rectangle;

use crate::actions::EditorContext;
use crate::input::InputFrame;
use crate::level::{LevelObject, ObjectKind};
use crate::selection::ToolType;

mod area_select;
mod create_object;
mod create_wall;
mod update_polygon;
mod update_wall;

pub use area_select::AreaSelectTool;
pub use create_object::CreateObjectTool;
pub use create_wall::CreateWallTool;
pub use update_polygon::UpdatePolygonTool;
pub use update_wall::UpdateWallTool;

/// Result of feeding one event to a tool.
pub enum ToolOutput {
    /// Not handled; later input stages may use the event.
    Ignored,
    /// Handled without producing an edit.
    Consumed,
    /// Handled and produced an edit to push.
    Commit(Box<dyn EditAction<EditorContext>>),
}

impl ToolOutput {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }
}

impl fmt::Debug for ToolOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignored => write!(f, "Ignored"),
            Self::Consumed => write!(f, "Consumed"),
            Self::Commit(action) => write!(f, "Commit({})", action.description().title),
        }
    }
}

/// What the renderer should draw for an in-progress tool interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolPreview {
    None,
    Object(LevelObject),
    Area(Rectangle),
}

/// Which tool is active, for toolbars and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    CreateWall,
    CreateObject,
    AreaSelect,
    UpdateWall,
    UpdatePolygon,
}

pub trait Tool: fmt::Debug {
    fn name(&self) -> ToolName;

    /// Handles one input frame. The context is mutable for tools that edit
    /// transient state (selection); level edits go through the returned
    /// action.
    fn on_event(&mut self, input: &InputFrame, ctx: &mut EditorContext) -> ToolOutput;

    fn is_dragging(&self) -> bool;

    /// Abandons an in-progress drag.
    fn cancel(&mut self);

    fn preview(&self) -> ToolPreview {
        ToolPreview::None
    }
}

/// Creation tool for a user-selected tool type.
pub fn create_tool(tool_type: ToolType) -> Box<dyn Tool> {
    match tool_type {
        ToolType::CreateWall => Box::new(CreateWallTool::new()),
        ToolType::AreaSelect => Box::new(AreaSelectTool::new()),
        ToolType::CreatePlatform => Box::new(CreateObjectTool::new(ObjectKind::Platform)),
        ToolType::CreatePolygonPlatform => {
            Box::new(CreateObjectTool::new(ObjectKind::PolygonPlatform))
        }
        ToolType::CreatePillar => Box::new(CreateObjectTool::new(ObjectKind::Pillar)),
        ToolType::CreateRamp => Box::new(CreateObjectTool::new(ObjectKind::Ramp)),
    }
}
