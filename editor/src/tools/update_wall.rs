use classicyou_core::math::Vec2;

use super::{Tool, ToolName, ToolOutput, ToolPreview};
use crate::actions::{EditorContext, UpdateObjectAction};
use crate::input::{InputFrame, KeyCode, MouseButton, ToolEvent};
use crate::level::{LevelObject, ObjectId, ObjectType, TILE_SIZE};

/// Distance from an endpoint within which a press grabs it.
pub const HANDLE_RADIUS: f32 = TILE_SIZE / 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallHandle {
    Start,
    End,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    handle: WallHandle,
    original: LevelObject,
    preview: LevelObject,
}

/// Drags either endpoint of the selected wall.
#[derive(Debug)]
pub struct UpdateWallTool {
    wall_id: ObjectId,
    floor: i32,
    drag: Option<Drag>,
}

impl UpdateWallTool {
    pub fn new(wall_id: ObjectId, floor: i32) -> Self {
        Self {
            wall_id,
            floor,
            drag: None,
        }
    }

    pub fn wall_id(&self) -> ObjectId {
        self.wall_id
    }

    /// Endpoint of the wall under `tile`, if any.
    pub fn handle_at(&self, ctx: &EditorContext, tile: Vec2) -> Option<WallHandle> {
        let wall = ctx.level.get_object(self.wall_id)?.as_wall()?;
        let d_start = (wall.params.start - tile).norm();
        let d_end = (wall.params.end - tile).norm();
        if d_start.min(d_end) > HANDLE_RADIUS {
            return None;
        }
        Some(if d_start <= d_end {
            WallHandle::Start
        } else {
            WallHandle::End
        })
    }

    fn drag_to(drag: &mut Drag, tile: Vec2) {
        if let ObjectType::Wall(wall) = &mut drag.preview.object_type {
            match drag.handle {
                WallHandle::Start => wall.params.start = tile,
                WallHandle::End => wall.params.end = tile,
            }
        }
    }
}

impl Tool for UpdateWallTool {
    fn name(&self) -> ToolName {
        ToolName::UpdateWall
    }

    fn on_event(&mut self, input: &InputFrame, ctx: &mut EditorContext) -> ToolOutput {
        match input.event {
            ToolEvent::MouseDown { button: MouseButton::Left, tile } if self.drag.is_none() => {
                let Some(handle) = self.handle_at(ctx, tile) else {
                    return ToolOutput::Ignored;
                };
                let Some(original) = ctx.level.get_object(self.wall_id).copied() else {
                    return ToolOutput::Ignored;
                };
                self.drag = Some(Drag {
                    handle,
                    original,
                    preview: original,
                });
                ToolOutput::Consumed
            }
            ToolEvent::MouseMove { tile } => match &mut self.drag {
                Some(drag) => {
                    Self::drag_to(drag, tile);
                    ToolOutput::Consumed
                }
                None => ToolOutput::Ignored,
            },
            ToolEvent::MouseUp { button: MouseButton::Left, tile } => {
                let Some(mut drag) = self.drag.take() else {
                    return ToolOutput::Ignored;
                };
                Self::drag_to(&mut drag, tile);
                let degenerate = drag
                    .preview
                    .as_wall()
                    .is_some_and(|w| w.params.start == w.params.end);
                if drag.preview == drag.original || degenerate {
                    return ToolOutput::Consumed;
                }
                ToolOutput::Commit(Box::new(UpdateObjectAction::new(
                    drag.original,
                    drag.preview,
                    self.floor,
                )))
            }
            ToolEvent::KeyPressed(KeyCode::Escape) if self.drag.is_some() => {
                self.cancel();
                ToolOutput::Consumed
            }
            _ => ToolOutput::Ignored,
        }
    }

    fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    fn cancel(&mut self) {
        self.drag = None;
    }

    fn preview(&self) -> ToolPreview {
        self.drag
            .map_or(ToolPreview::None, |d| ToolPreview::Object(d.preview))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::wall::{Wall, WallProps};
    use classicyou_core::abstract_editor::ActionManager;

    fn setup() -> (EditorContext, ObjectId) {
        let mut ctx = EditorContext::default();
        let wall = LevelObject::new(ObjectType::Wall(Wall::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(160.0, 0.0),
            WallProps::default(),
        )));
        let id = ctx.level.add_object(wall, 0).object_id;
        (ctx, id)
    }

    fn event(tool: &mut UpdateWallTool, ctx: &mut EditorContext, event: ToolEvent) -> ToolOutput {
        tool.on_event(&InputFrame::new(event), ctx)
    }

    #[test]
    fn handles_are_found_near_endpoints() {
        let (ctx, id) = setup();
        let tool = UpdateWallTool::new(id, 0);
        assert_eq!(tool.handle_at(&ctx, Vec2::new(2.0, 3.0)), Some(WallHandle::Start));
        assert_eq!(tool.handle_at(&ctx, Vec2::new(158.0, 0.0)), Some(WallHandle::End));
        assert_eq!(tool.handle_at(&ctx, Vec2::new(80.0, 0.0)), None);
    }

    #[test]
    fn dragging_end_commits_single_update() {
        let (mut ctx, id) = setup();
        let mut tool = UpdateWallTool::new(id, 0);
        let down = ToolEvent::MouseDown {
            button: MouseButton::Left,
            tile: Vec2::new(160.0, 0.0),
        };
        assert!(matches!(event(&mut tool, &mut ctx, down), ToolOutput::Consumed));
        for x in [128.0, 96.0] {
            event(&mut tool, &mut ctx, ToolEvent::MouseMove { tile: Vec2::new(x, 64.0) });
        }
        // The level only changes once the action is pushed
        assert_eq!(
            ctx.level.get_object(id).unwrap().as_wall().unwrap().params.end,
            Vec2::new(160.0, 0.0)
        );

        let up = ToolEvent::MouseUp {
            button: MouseButton::Left,
            tile: Vec2::new(96.0, 64.0),
        };
        let ToolOutput::Commit(action) = event(&mut tool, &mut ctx, up) else {
            panic!("expected a commit");
        };
        let mut actions = ActionManager::new();
        actions.push_action(action, &mut ctx, false);
        let wall = *ctx.level.get_object(id).unwrap().as_wall().unwrap();
        assert_eq!(wall.params.end, Vec2::new(96.0, 64.0));
        assert_eq!(wall.params.start, Vec2::new(0.0, 0.0));

        actions.undo_action(&mut ctx);
        let wall = *ctx.level.get_object(id).unwrap().as_wall().unwrap();
        assert_eq!(wall.params.end, Vec2::new(160.0, 0.0));
    }

    #[test]
    fn press_off_handle_is_ignored() {
        let (mut ctx, id) = setup();
        let mut tool = UpdateWallTool::new(id, 0);
        let down = ToolEvent::MouseDown {
            button: MouseButton::Left,
            tile: Vec2::new(64.0, 64.0),
        };
        assert!(event(&mut tool, &mut ctx, down).is_ignored());
        assert!(!tool.is_dragging());
    }

    #[test]
    fn collapsing_wall_is_rejected() {
        let (mut ctx, id) = setup();
        let mut tool = UpdateWallTool::new(id, 0);
        let down = ToolEvent::MouseDown {
            button: MouseButton::Left,
            tile: Vec2::new(0.0, 0.0),
        };
        event(&mut tool, &mut ctx, down);
        let up = ToolEvent::MouseUp {
            button: MouseButton::Left,
            tile: Vec2::new(160.0, 0.0),
        };
        assert!(matches!(event(&mut tool, &mut ctx, up), ToolOutput::Consumed));
    }
}
