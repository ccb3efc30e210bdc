use classicyou_core::math::Vec2;

use super::{Tool, ToolName, ToolOutput, ToolPreview};
use crate::actions::{AddObjectAction, EditorContext};
use crate::input::{InputFrame, KeyCode, MouseButton, ToolEvent};
use crate::level::wall::{Wall, WallProps};
use crate::level::{LevelObject, ObjectType};

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    Dragging { start: Vec2, end: Vec2 },
}

/// Draws a wall from the press point to the release point.
#[derive(Debug)]
pub struct CreateWallTool {
    state: State,
    props: WallProps,
}

impl Default for CreateWallTool {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateWallTool {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            props: WallProps::default(),
        }
    }
}

impl Tool for CreateWallTool {
    fn name(&self) -> ToolName {
        ToolName::CreateWall
    }

    fn on_event(&mut self, input: &InputFrame, ctx: &mut EditorContext) -> ToolOutput {
        match (input.event, self.state) {
            (ToolEvent::MouseDown { button: MouseButton::Left, tile }, State::Idle) => {
                self.props = ctx.state.defaults.wall_default;
                self.state = State::Dragging {
                    start: tile,
                    end: tile,
                };
                ToolOutput::Consumed
            }
            (ToolEvent::MouseMove { tile }, State::Dragging { start, .. }) => {
                self.state = State::Dragging { start, end: tile };
                ToolOutput::Consumed
            }
            (ToolEvent::MouseUp { button: MouseButton::Left, tile }, State::Dragging { start, .. }) => {
                self.state = State::Idle;
                if tile == start {
                    return ToolOutput::Consumed;
                }
                let wall = LevelObject::new(ObjectType::Wall(Wall::new(start, tile, self.props)));
                ToolOutput::Commit(Box::new(AddObjectAction::new(
                    wall,
                    ctx.state.current_floor,
                )))
            }
            (ToolEvent::KeyPressed(KeyCode::Escape), State::Dragging { .. }) => {
                self.cancel();
                ToolOutput::Consumed
            }
            _ => ToolOutput::Ignored,
        }
    }

    fn is_dragging(&self) -> bool {
        matches!(self.state, State::Dragging { .. })
    }

    fn cancel(&mut self) {
        self.state = State::Idle;
    }

    fn preview(&self) -> ToolPreview {
        match self.state {
            State::Dragging { start, end } if start != end => ToolPreview::Object(
                LevelObject::new(ObjectType::Wall(Wall::new(start, end, self.props))),
            ),
            _ => ToolPreview::None,
        }
    }
}
