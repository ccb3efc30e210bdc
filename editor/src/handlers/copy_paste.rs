use classicyou_core::abstract_editor::EditAction;
use classicyou_core::geometry::Rectangle;
use classicyou_core::math::Vec2;

use crate::actions::{AddBulkObjectsAction, EditorContext};
use crate::level::{LevelObject, ObjectId};

/// Clipboard for selected objects.
///
/// Copies are value snapshots, so later edits to the originals do not
/// change what gets pasted. Floors are stored relative to the floor that
/// was current at copy time.
#[derive(Debug, Default, Clone)]
pub struct CopyPasteHandler {
    objects: Vec<LevelObject>,
    relative_floors: Vec<i32>,
}

impl CopyPasteHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Copies the current selection. Returns the number of objects copied;
    /// with nothing selected the clipboard is left untouched.
    pub fn copy_selection(&mut self, ctx: &EditorContext) -> usize {
        if !ctx.state.selection.has_selection() {
            return 0;
        }
        let (objects, floors) = ctx
            .level
            .copy_objects_and_floors(ctx.state.selection.objects());
        let current = ctx.state.current_floor;
        self.relative_floors = floors.iter().map(|f| f - current).collect();
        self.objects = objects;
        log::info!("Copied {} objects", self.objects.len());
        self.objects.len()
    }

    /// Builds the paste of the clipboard so the top-left corner of its
    /// bounding box lands on `at`, relative to the current floor.
    pub fn paste(&self, ctx: &EditorContext, at: Vec2) -> Option<Box<dyn EditAction<EditorContext>>> {
        let bounds = self.bounds()?;
        let offset = at - bounds.min();
        let objects = self
            .objects
            .iter()
            .map(|o| {
                let mut o = o.with_id(ObjectId::UNASSIGNED);
                o.move_by(offset);
                o
            })
            .collect();
        let current = ctx.state.current_floor;
        let floors = self.relative_floors.iter().map(|f| f + current).collect();
        Some(Box::new(AddBulkObjectsAction::new(objects, floors)))
    }

    /// Bounding box of the clipboard contents.
    pub fn bounds(&self) -> Option<Rectangle> {
        self.objects
            .iter()
            .map(LevelObject::bounds)
            .reduce(|a, b| a.union(&b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::pillar::{Pillar, PillarProps};
    use crate::level::ObjectType;
    use classicyou_core::abstract_editor::ActionManager;

    fn pillar(x: f32, y: f32) -> LevelObject {
        LevelObject::new(ObjectType::Pillar(Pillar::new(
            Vec2::new(x, y),
            PillarProps {
                size: 16.0,
                ..Default::default()
            },
        )))
    }

    #[test]
    fn empty_selection_keeps_clipboard() {
        let mut ctx = EditorContext::default();
        let id = ctx.level.add_object(pillar(0.0, 0.0), 0).object_id;
        let mut clipboard = CopyPasteHandler::new();
        ctx.state.selection.set_selection(id, 0);
        assert_eq!(clipboard.copy_selection(&ctx), 1);

        ctx.state.selection.clear_selection();
        assert_eq!(clipboard.copy_selection(&ctx), 0);
        assert_eq!(clipboard.len(), 1);
    }

    #[test]
    fn paste_offsets_to_hovered_tile_with_new_ids() {
        let mut ctx = EditorContext::default();
        let a = ctx.level.add_object(pillar(32.0, 32.0), 0).object_id;
        let b = ctx.level.add_object(pillar(64.0, 96.0), 0).object_id;
        ctx.state.selection.set_selection(a, 0);
        ctx.state.selection.add_to_selection(b, 0);

        let mut clipboard = CopyPasteHandler::new();
        clipboard.copy_selection(&ctx);
        let action = clipboard.paste(&ctx, Vec2::new(256.0, 256.0)).unwrap();
        let mut actions = ActionManager::new();
        actions.push_action(action, &mut ctx, false);

        assert_eq!(ctx.level.object_count(), 4);
        let pasted: Vec<LevelObject> = ctx
            .state
            .selection
            .objects()
            .iter()
            .map(|id| *ctx.level.get_object(*id).unwrap())
            .collect();
        assert!(pasted.iter().all(|o| o.object_id != a && o.object_id != b));
        assert_eq!(pasted[0].bounds().min(), Vec2::new(256.0, 256.0));
        assert_eq!(pasted[1].bounds().min(), Vec2::new(288.0, 320.0));

        actions.undo_action(&mut ctx);
        assert_eq!(ctx.level.object_count(), 2);
    }

    #[test]
    fn floors_are_relative_to_current_floor() {
        let mut ctx = EditorContext::default();
        ctx.level.ensure_floor_exists(1);
        let id = ctx.level.add_object(pillar(0.0, 0.0), 1).object_id;
        ctx.state.selection.set_selection(id, 1);
        let mut clipboard = CopyPasteHandler::new();
        clipboard.copy_selection(&ctx);

        ctx.state.current_floor = 1;
        let mut action = clipboard.paste(&ctx, Vec2::zeros()).unwrap();
        action.apply(&mut ctx).unwrap();
        let (pasted, floor) = ctx.state.selection.single().unwrap();
        assert_ne!(pasted, id);
        assert_eq!(floor, 2);
        assert_eq!(ctx.level.floors().max_floor(), 2);
    }

    #[test]
    fn paste_with_empty_clipboard_is_none() {
        let ctx = EditorContext::default();
        assert!(CopyPasteHandler::new().paste(&ctx, Vec2::zeros()).is_none());
    }
}
