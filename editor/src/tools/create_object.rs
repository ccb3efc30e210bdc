use classicyou_core::geometry::Rectangle;
use classicyou_core::math::Vec2;

use super::{Tool, ToolName, ToolOutput, ToolPreview};
use crate::actions::{AddObjectAction, EditorContext};
use crate::input::{InputFrame, KeyCode, MouseButton, ToolEvent};
use crate::level::pillar::Pillar;
use crate::level::platform::Platform;
use crate::level::polygon::PolygonPlatform;
use crate::level::ramp::Ramp;
use crate::level::wall::Wall;
use crate::level::{LevelObject, ObjectKind, ObjectType};
use crate::selection::ObjectDefaults;

/// Places platforms, polygons, pillars and ramps.
///
/// A click places the object with its default size at the clicked tile. A
/// drag sizes area objects to the dragged rectangle; pillars always use
/// their default size.
#[derive(Debug)]
pub struct CreateObjectTool {
    kind: ObjectKind,
    drag: Option<(Vec2, Vec2)>,
    defaults: ObjectDefaults,
}

impl CreateObjectTool {
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            drag: None,
            defaults: ObjectDefaults::default(),
        }
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    fn build(&self, start: Vec2, end: Vec2) -> LevelObject {
        let rect = Rectangle::from_corners(start, end);
        let sized = rect.size.x > 0.0 && rect.size.y > 0.0;
        let d = &self.defaults;
        let object_type = match self.kind {
            ObjectKind::Platform => {
                let mut props = d.platform_default;
                if sized {
                    props.width = rect.size.x;
                    props.depth = rect.size.y;
                }
                ObjectType::Platform(Platform::new(rect.position, props))
            }
            ObjectKind::PolygonPlatform => {
                let area = if sized {
                    rect
                } else {
                    let p = d.platform_default;
                    Rectangle::new(rect.position, Vec2::new(p.width, p.depth))
                };
                ObjectType::PolygonPlatform(PolygonPlatform::from_rectangle(
                    area,
                    d.polygon_platform_default,
                ))
            }
            ObjectKind::Pillar => ObjectType::Pillar(Pillar::new(end, d.pillar_default)),
            ObjectKind::Ramp => {
                let mut props = d.ramp_default;
                if sized {
                    props.width = rect.size.x;
                    props.depth = rect.size.y;
                }
                ObjectType::Ramp(Ramp::new(rect.position, props))
            }
            ObjectKind::Wall => ObjectType::Wall(Wall::new(start, end, d.wall_default)),
        };
        LevelObject::new(object_type)
    }
}

impl Tool for CreateObjectTool {
    fn name(&self) -> ToolName {
        ToolName::CreateObject
    }

    fn on_event(&mut self, input: &InputFrame, ctx: &mut EditorContext) -> ToolOutput {
        match (input.event, self.drag) {
            (ToolEvent::MouseDown { button: MouseButton::Left, tile }, None) => {
                self.defaults = ctx.state.defaults;
                self.drag = Some((tile, tile));
                ToolOutput::Consumed
            }
            (ToolEvent::MouseMove { tile }, Some((start, _))) => {
                self.drag = Some((start, tile));
                ToolOutput::Consumed
            }
            (ToolEvent::MouseUp { button: MouseButton::Left, tile }, Some((start, _))) => {
                self.drag = None;
                let object = self.build(start, tile);
                ToolOutput::Commit(Box::new(AddObjectAction::new(
                    object,
                    ctx.state.current_floor,
                )))
            }
            (ToolEvent::KeyPressed(KeyCode::Escape), Some(_)) => {
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
        match self.drag {
            Some((start, end)) => ToolPreview::Object(self.build(start, end)),
            None => ToolPreview::None,
        }
    }
}
