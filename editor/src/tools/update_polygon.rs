use classicyou_core::math::Vec2;

use super::update_wall::HANDLE_RADIUS;
use super::{Tool, ToolName, ToolOutput, ToolPreview};
use crate::actions::{EditorContext, UpdateObjectAction};
use crate::input::{InputFrame, KeyCode, MouseButton, ToolEvent};
use crate::level::{LevelObject, ObjectId, ObjectType};

#[derive(Debug, Clone, Copy)]
struct Drag {
    corner: usize,
    original: LevelObject,
    preview: LevelObject,
}

/// Drags individual corners of the selected polygon platform.
#[derive(Debug)]
pub struct UpdatePolygonTool {
    polygon_id: ObjectId,
    floor: i32,
    drag: Option<Drag>,
}

impl UpdatePolygonTool {
    pub fn new(polygon_id: ObjectId, floor: i32) -> Self {
        Self {
            polygon_id,
            floor,
            drag: None,
        }
    }

    pub fn polygon_id(&self) -> ObjectId {
        self.polygon_id
    }

    /// Index of the corner nearest to `tile`, if one is within reach.
    pub fn corner_at(&self, ctx: &EditorContext, tile: Vec2) -> Option<usize> {
        let polygon = ctx.level.get_object(self.polygon_id)?.as_polygon()?;
        polygon
            .params
            .corners
            .iter()
            .map(|c| (c - tile).norm())
            .enumerate()
            .filter(|(_, d)| *d <= HANDLE_RADIUS)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    fn drag_to(drag: &mut Drag, tile: Vec2) {
        if let ObjectType::PolygonPlatform(polygon) = &mut drag.preview.object_type {
            polygon.params.corners[drag.corner] = tile;
        }
    }
}

impl Tool for UpdatePolygonTool {
    fn name(&self) -> ToolName {
        ToolName::UpdatePolygon
    }

    fn on_event(&mut self, input: &InputFrame, ctx: &mut EditorContext) -> ToolOutput {
        match input.event {
            ToolEvent::MouseDown { button: MouseButton::Left, tile } if self.drag.is_none() => {
                let Some(corner) = self.corner_at(ctx, tile) else {
                    return ToolOutput::Ignored;
                };
                let Some(original) = ctx.level.get_object(self.polygon_id).copied() else {
                    return ToolOutput::Ignored;
                };
                self.drag = Some(Drag {
                    corner,
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
                if drag.preview == drag.original {
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
