use classicyou_core::geometry::Rectangle;
use classicyou_core::math::Vec2;

use super::{Tool, ToolName, ToolOutput, ToolPreview};
use crate::actions::EditorContext;
use crate::input::{InputFrame, KeyCode, MouseButton, ToolEvent};

/// Rubber-band selection on the current floor.
///
/// Selects every object whose bounds lie entirely inside the dragged
/// rectangle. Holding Ctrl adds to the existing selection. Selection is not
/// part of the undo history, so no action is produced.
#[derive(Debug, Default)]
pub struct AreaSelectTool {
    drag: Option<(Vec2, Vec2)>,
}

impl AreaSelectTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn area(&self) -> Option<Rectangle> {
        self.drag.map(|(a, b)| Rectangle::from_corners(a, b))
    }
}

impl Tool for AreaSelectTool {
    fn name(&self) -> ToolName {
        ToolName::AreaSelect
    }

    fn on_event(&mut self, input: &InputFrame, ctx: &mut EditorContext) -> ToolOutput {
        match (input.event, self.drag) {
            (ToolEvent::MouseDown { button: MouseButton::Left, tile }, None) => {
                self.drag = Some((tile, tile));
                ToolOutput::Consumed
            }
            (ToolEvent::MouseMove { tile }, Some((start, _))) => {
                self.drag = Some((start, tile));
                ToolOutput::Consumed
            }
            (ToolEvent::MouseUp { button: MouseButton::Left, tile }, Some((start, _))) => {
                self.drag = None;
                let rect = Rectangle::from_corners(start, tile);
                let selection = &mut ctx.state.selection;
                if !input.modifiers.ctrl {
                    selection.clear_selection();
                }
                ctx.level
                    .select_within(&rect, selection, ctx.state.current_floor);
                log::debug!("Area select picked {} objects", selection.len());
                ToolOutput::Consumed
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
        self.area().map_or(ToolPreview::None, ToolPreview::Area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;
    use crate::level::pillar::{Pillar, PillarProps};
    use crate::level::{LevelObject, ObjectId, ObjectType};

    fn pillar(x: f32, y: f32) -> LevelObject {
        LevelObject::new(ObjectType::Pillar(Pillar::new(
            Vec2::new(x, y),
            PillarProps {
                size: 16.0,
                ..Default::default()
            },
        )))
    }

    fn drag(tool: &mut AreaSelectTool, ctx: &mut EditorContext, to: Vec2, modifiers: Modifiers) {
        tool.on_event(
            &InputFrame::new(ToolEvent::MouseDown {
                button: MouseButton::Left,
                tile: Vec2::new(0.0, 0.0),
            }),
            ctx,
        );
        tool.on_event(
            &InputFrame::new(ToolEvent::MouseUp {
                button: MouseButton::Left,
                tile: to,
            })
            .with_modifiers(modifiers),
            ctx,
        );
    }

    #[test]
    fn selects_contained_objects() {
        let mut ctx = EditorContext::default();
        let inside = ctx.level.add_object(pillar(32.0, 32.0), 0).object_id;
        let outside = ctx.level.add_object(pillar(120.0, 32.0), 0).object_id;
        let mut tool = AreaSelectTool::new();
        drag(&mut tool, &mut ctx, Vec2::new(128.0, 128.0), Modifiers::NONE);
        assert!(ctx.state.selection.contains(inside));
        assert!(!ctx.state.selection.contains(outside));
    }

    #[test]
    fn ctrl_extends_selection() {
        let mut ctx = EditorContext::default();
        ctx.level.add_object(pillar(32.0, 32.0), 0);
        ctx.state.selection.add_to_selection(ObjectId(50), 0);
        let mut tool = AreaSelectTool::new();
        drag(&mut tool, &mut ctx, Vec2::new(64.0, 64.0), Modifiers::CTRL);
        assert_eq!(ctx.state.selection.len(), 2);

        drag(&mut tool, &mut ctx, Vec2::new(64.0, 64.0), Modifiers::NONE);
        assert_eq!(ctx.state.selection.len(), 1);
    }
}
