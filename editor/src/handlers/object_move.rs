use classicyou_core::abstract_editor::EditAction;
use classicyou_core::math::Vec2;

use crate::actions::{BulkUpdateObjectAction, EditorContext};
use crate::level::LevelObject;

#[derive(Debug, Clone)]
struct MoveDrag {
    start: Vec2,
    offset: Vec2,
    originals: Vec<LevelObject>,
    floors: Vec<i32>,
}

/// Drags every selected object by the pointer offset.
///
/// Nothing in the level changes until the drag ends; the whole move is
/// then pushed as one bulk update.
#[derive(Debug, Default)]
pub struct ObjectMoveHandler {
    drag: Option<MoveDrag>,
}

impl ObjectMoveHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Starts a move if `tile` hits a selected object on the current floor.
    pub fn try_start(&mut self, tile: Vec2, ctx: &EditorContext) -> bool {
        let floor = ctx.state.current_floor;
        let selection = &ctx.state.selection;
        let select_distance = ctx.level.select_distance();
        let hit = ctx
            .level
            .objects_on_floor(floor)
            .iter()
            .any(|o| selection.contains(o.object_id) && o.try_select_2d(tile, select_distance));
        if !hit {
            return false;
        }

        let (originals, floors) = ctx.level.copy_objects_and_floors(selection.objects());
        log::debug!("Moving {} objects", originals.len());
        self.drag = Some(MoveDrag {
            start: tile,
            offset: Vec2::zeros(),
            originals,
            floors,
        });
        true
    }

    pub fn update(&mut self, tile: Vec2) {
        if let Some(drag) = &mut self.drag {
            drag.offset = tile - drag.start;
        }
    }

    /// Ends the drag. Returns the move to push, or `None` when the objects
    /// did not move.
    pub fn finish(&mut self, tile: Vec2) -> Option<Box<dyn EditAction<EditorContext>>> {
        self.update(tile);
        let drag = self.drag.take()?;
        if drag.offset == Vec2::zeros() {
            return None;
        }
        let moved = moved_copies(&drag.originals, drag.offset);
        Some(Box::new(BulkUpdateObjectAction::new(
            drag.originals,
            moved,
            drag.floors,
        )))
    }

    pub fn cancel(&mut self) {
        self.drag = None;
    }

    /// Moved copies of the selection for drawing while dragging.
    pub fn preview(&self) -> Vec<(LevelObject, i32)> {
        self.drag.as_ref().map_or_else(Vec::new, |drag| {
            moved_copies(&drag.originals, drag.offset)
                .into_iter()
                .zip(drag.floors.iter().copied())
                .collect()
        })
    }
}

fn moved_copies(objects: &[LevelObject], offset: Vec2) -> Vec<LevelObject> {
    objects
        .iter()
        .map(|o| {
            let mut o = *o;
            o.move_by(offset);
            o
        })
        .collect()
}
