//! Reversible level edits.
//!
//! Every action captures full value snapshots of the objects it touches, so
//! `apply` and `undo` can run any number of times in alternation and always
//! reproduce the same level state, ids included.

use classicyou_core::abstract_editor::{
    ActionDescription, EditAction, EditActionError, EditActionResult, Editable,
};

use crate::level::{EditorLevel, LevelObject, ObjectId};
use crate::selection::EditorState;

/// Editing target for every level action: the session state plus the level.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditorContext {
    pub state: EditorState,
    pub level: EditorLevel,
}

impl EditorContext {
    pub fn new(state: EditorState, level: EditorLevel) -> Self {
        Self { state, level }
    }
}

impl Editable for EditorContext {}

fn object_title(verb: &str, object: &LevelObject) -> String {
    format!("{verb} {} {}", object.kind().label(), object.object_id)
}

fn objects_body(objects: &[LevelObject]) -> String {
    objects
        .iter()
        .map(|o| o.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Adds one object and makes it the selection.
#[derive(Debug)]
pub struct AddObjectAction {
    object: LevelObject,
    floor: i32,
}

impl AddObjectAction {
    pub fn new(object: LevelObject, floor: i32) -> Self {
        Self { object, floor }
    }
}

impl EditAction<EditorContext> for AddObjectAction {
    fn apply(&mut self, ctx: &mut EditorContext) -> EditActionResult {
        ctx.level.ensure_floors_up_to(self.floor);
        // The id assigned on the first apply is kept for every redo
        let id = ctx.level.add_object(self.object, self.floor).object_id;
        self.object.object_id = id;
        ctx.state.selection.set_selection(id, self.floor);
        Ok(())
    }

    fn undo(&mut self, ctx: &mut EditorContext) -> EditActionResult {
        let id = self.object.object_id;
        ctx.state.selection.remove_object(id);
        ctx.level
            .remove_object(id)
            .map(|_| ())
            .ok_or_else(|| EditActionError::TargetNotFound(format!("object {id}")))
    }

    fn description(&self) -> ActionDescription {
        ActionDescription::new(object_title("Add", &self.object), self.object.to_string())
    }
}

/// Replaces one object with a new snapshot of itself.
///
/// Consecutive updates of the same object merge: the merged action keeps
/// the first "before" snapshot and the latest "after" snapshot.
#[derive(Debug)]
pub struct UpdateObjectAction {
    old: LevelObject,
    new: LevelObject,
    floor: i32,
}

impl UpdateObjectAction {
    pub fn new(old: LevelObject, new: LevelObject, floor: i32) -> Self {
        Self { old, new, floor }
    }

    fn replace(ctx: &mut EditorContext, object: &LevelObject, floor: i32) -> EditActionResult {
        if ctx.level.update_object(object, floor) {
            Ok(())
        } else {
            Err(EditActionError::TargetNotFound(format!(
                "object {} on floor {floor}",
                object.object_id
            )))
        }
    }
}

impl EditAction<EditorContext> for UpdateObjectAction {
    fn apply(&mut self, ctx: &mut EditorContext) -> EditActionResult {
        Self::replace(ctx, &self.new, self.floor)
    }

    fn undo(&mut self, ctx: &mut EditorContext) -> EditActionResult {
        Self::replace(ctx, &self.old, self.floor)
    }

    fn description(&self) -> ActionDescription {
        ActionDescription::new(
            object_title("Update", &self.new),
            format!("{}\n{}", self.old, self.new),
        )
    }

    fn merge(
        &mut self,
        other: Box<dyn EditAction<EditorContext>>,
    ) -> Option<Box<dyn EditAction<EditorContext>>> {
        if let Some(other) = (*other).as_any().downcast_ref::<UpdateObjectAction>()
            && other.new.object_id == self.new.object_id
            && other.floor == self.floor
        {
            self.new = other.new;
            return None;
        }
        Some(other)
    }
}

/// Replaces several objects at once (moves, rotations).
#[derive(Debug)]
pub struct BulkUpdateObjectAction {
    old: Vec<LevelObject>,
    new: Vec<LevelObject>,
    floors: Vec<i32>,
}

impl BulkUpdateObjectAction {
    /// `old`, `new` and `floors` are parallel.
    pub fn new(old: Vec<LevelObject>, new: Vec<LevelObject>, floors: Vec<i32>) -> Self {
        debug_assert!(old.len() == new.len() && new.len() == floors.len());
        Self { old, new, floors }
    }

    fn replace_all(
        ctx: &mut EditorContext,
        objects: &[LevelObject],
        floors: &[i32],
    ) -> EditActionResult {
        let mut updated = 0;
        for (object, floor) in objects.iter().zip(floors) {
            if ctx.level.update_object(object, *floor) {
                updated += 1;
            }
        }
        if updated == 0 && !objects.is_empty() {
            return Err(EditActionError::TargetNotFound(format!(
                "none of {} objects",
                objects.len()
            )));
        }
        Ok(())
    }
}

impl EditAction<EditorContext> for BulkUpdateObjectAction {
    fn apply(&mut self, ctx: &mut EditorContext) -> EditActionResult {
        Self::replace_all(ctx, &self.new, &self.floors)
    }

    fn undo(&mut self, ctx: &mut EditorContext) -> EditActionResult {
        Self::replace_all(ctx, &self.old, &self.floors)
    }

    fn description(&self) -> ActionDescription {
        ActionDescription::new(
            format!("Update {} objects", self.new.len()),
            objects_body(&self.new),
        )
    }
}

/// Deletes objects. Undo recreates them with their original ids.
#[derive(Debug)]
pub struct DeleteObjectAction {
    objects: Vec<LevelObject>,
    floors: Vec<i32>,
}

impl DeleteObjectAction {
    /// `objects` and `floors` are parallel snapshots taken before deletion.
    pub fn new(objects: Vec<LevelObject>, floors: Vec<i32>) -> Self {
        debug_assert_eq!(objects.len(), floors.len());
        Self { objects, floors }
    }

    pub fn single(object: LevelObject, floor: i32) -> Self {
        Self::new(vec![object], vec![floor])
    }
}

impl EditAction<EditorContext> for DeleteObjectAction {
    fn apply(&mut self, ctx: &mut EditorContext) -> EditActionResult {
        let removed = self
            .objects
            .iter()
            .filter(|o| ctx.level.remove_object(o.object_id).is_some())
            .count();
        ctx.state.selection.clear_selection();
        if removed == 0 && !self.objects.is_empty() {
            return Err(EditActionError::TargetNotFound(format!(
                "none of {} objects",
                self.objects.len()
            )));
        }
        Ok(())
    }

    fn undo(&mut self, ctx: &mut EditorContext) -> EditActionResult {
        ctx.state.selection.clear_selection();
        for (object, floor) in self.objects.iter().zip(&self.floors) {
            ctx.level.ensure_floors_up_to(*floor);
            // Re-adding hands out a fresh id; force the original one back
            let readded = ctx
                .level
                .add_object(object.with_id(ObjectId::UNASSIGNED), *floor)
                .object_id;
            ctx.level.set_object_id(readded, object.object_id);
            ctx.state
                .selection
                .add_to_selection(object.object_id, *floor);
        }
        Ok(())
    }

    fn description(&self) -> ActionDescription {
        let title = match self.objects.as_slice() {
            [object] => object_title("Delete", object),
            objects => format!("Delete {} objects", objects.len()),
        };
        ActionDescription::new(title, objects_body(&self.objects))
    }
}

/// Adds several objects at once (paste). The added objects become the
/// selection.
#[derive(Debug)]
pub struct AddBulkObjectsAction {
    objects: Vec<LevelObject>,
    floors: Vec<i32>,
}

impl AddBulkObjectsAction {
    /// `objects` and `floors` are parallel.
    pub fn new(objects: Vec<LevelObject>, floors: Vec<i32>) -> Self {
        debug_assert_eq!(objects.len(), floors.len());
        Self { objects, floors }
    }
}

impl EditAction<EditorContext> for AddBulkObjectsAction {
    fn apply(&mut self, ctx: &mut EditorContext) -> EditActionResult {
        ctx.state.selection.clear_selection();
        for (object, floor) in self.objects.iter_mut().zip(&self.floors) {
            ctx.level.ensure_floors_up_to(*floor);
            let id = ctx.level.add_object(*object, *floor).object_id;
            object.object_id = id;
            ctx.state.selection.add_to_selection(id, *floor);
        }
        Ok(())
    }

    fn undo(&mut self, ctx: &mut EditorContext) -> EditActionResult {
        for object in &self.objects {
            ctx.state.selection.remove_object(object.object_id);
            ctx.level.remove_object(object.object_id);
        }
        Ok(())
    }

    fn description(&self) -> ActionDescription {
        ActionDescription::new(
            format!("Add {} objects", self.objects.len()),
            objects_body(&self.objects),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::ObjectType;
    use crate::level::pillar::{Pillar, PillarProps};
    use classicyou_core::abstract_editor::ActionManager;
    use classicyou_core::math::Vec2;

    fn pillar(x: f32) -> LevelObject {
        LevelObject::new(ObjectType::Pillar(Pillar::new(
            Vec2::new(x, 0.0),
            PillarProps::default(),
        )))
    }

    #[test]
    fn add_selects_and_undo_removes() {
        let mut ctx = EditorContext::default();
        let mut actions = ActionManager::new();
        actions.push_action(Box::new(AddObjectAction::new(pillar(0.0), 0)), &mut ctx, false);
        assert_eq!(ctx.level.object_count(), 1);
        assert_eq!(ctx.state.selection.single(), Some((ObjectId(1), 0)));

        actions.undo_action(&mut ctx);
        assert_eq!(ctx.level.object_count(), 0);
        assert!(!ctx.state.selection.has_selection());

        actions.redo_action(&mut ctx);
        assert!(ctx.level.get_object(ObjectId(1)).is_some());
    }

    #[test]
    fn add_to_new_floor_creates_it() {
        let mut ctx = EditorContext::default();
        let mut action = AddObjectAction::new(pillar(0.0), 2);
        action.apply(&mut ctx).unwrap();
        assert_eq!(ctx.level.floors().max_floor(), 2);
        assert_eq!(ctx.level.get_object_floor(ObjectId(1)), Some(2));
    }

    #[test]
    fn update_merges_same_object_only() {
        let mut ctx = EditorContext::default();
        let a = *ctx.level.add_object(pillar(0.0), 0);
        let b = *ctx.level.add_object(pillar(32.0), 0);

        let mut moved_a = a;
        moved_a.move_by(Vec2::new(32.0, 0.0));
        let mut first = UpdateObjectAction::new(a, moved_a, 0);
        let mut moved_again = moved_a;
        moved_again.move_by(Vec2::new(32.0, 0.0));

        let same: Box<dyn EditAction<EditorContext>> =
            Box::new(UpdateObjectAction::new(moved_a, moved_again, 0));
        assert!(first.merge(same).is_none());
        assert_eq!(first.new, moved_again);
        assert_eq!(first.old, a);

        let other: Box<dyn EditAction<EditorContext>> =
            Box::new(UpdateObjectAction::new(b, b, 0));
        assert!(first.merge(other).is_some());
    }

    #[test]
    fn update_of_missing_object_fails() {
        let mut ctx = EditorContext::default();
        let ghost = pillar(0.0).with_id(ObjectId(9));
        let mut action = UpdateObjectAction::new(ghost, ghost, 0);
        assert!(matches!(
            action.apply(&mut ctx),
            Err(EditActionError::TargetNotFound(_))
        ));
    }

    #[test]
    fn delete_undo_restores_original_ids() {
        let mut ctx = EditorContext::default();
        let a = *ctx.level.add_object(pillar(0.0), 0);
        let b = *ctx.level.add_object(pillar(32.0), 0);
        let mut actions = ActionManager::new();
        actions.push_action(
            Box::new(DeleteObjectAction::new(vec![a, b], vec![0, 0])),
            &mut ctx,
            false,
        );
        assert_eq!(ctx.level.object_count(), 0);

        actions.undo_action(&mut ctx);
        assert_eq!(ctx.level.get_object(a.object_id), Some(&a));
        assert_eq!(ctx.level.get_object(b.object_id), Some(&b));
        assert_eq!(ctx.state.selection.len(), 2);

        // Redo deletes the same objects again
        actions.redo_action(&mut ctx);
        assert_eq!(ctx.level.object_count(), 0);
    }

    #[test]
    fn bulk_update_round_trip() {
        let mut ctx = EditorContext::default();
        let a = *ctx.level.add_object(pillar(0.0), 0);
        let b = *ctx.level.add_object(pillar(32.0), 0);
        let moved: Vec<LevelObject> = [a, b]
            .iter()
            .map(|o| {
                let mut o = *o;
                o.move_by(Vec2::new(0.0, 64.0));
                o
            })
            .collect();
        let mut actions = ActionManager::new();
        actions.push_action(
            Box::new(BulkUpdateObjectAction::new(vec![a, b], moved.clone(), vec![0, 0])),
            &mut ctx,
            false,
        );
        assert_eq!(ctx.level.get_object(a.object_id), Some(&moved[0]));
        actions.undo_action(&mut ctx);
        assert_eq!(ctx.level.get_object(a.object_id), Some(&a));
        assert_eq!(ctx.level.get_object(b.object_id), Some(&b));
    }

    #[test]
    fn bulk_add_keeps_ids_across_redo() {
        let mut ctx = EditorContext::default();
        let mut actions = ActionManager::new();
        actions.push_action(
            Box::new(AddBulkObjectsAction::new(
                vec![pillar(0.0), pillar(32.0)],
                vec![0, 1],
            )),
            &mut ctx,
            false,
        );
        let ids: Vec<ObjectId> = ctx.state.selection.objects().to_vec();
        assert_eq!(ids.len(), 2);
        actions.undo_action(&mut ctx);
        assert_eq!(ctx.level.object_count(), 0);
        actions.redo_action(&mut ctx);
        assert_eq!(ctx.state.selection.objects(), ids.as_slice());
        assert_eq!(ctx.level.get_object_floor(ids[1]), Some(1));
    }

    #[test]
    fn descriptions_render_snapshots() {
        let object = pillar(0.0).with_id(ObjectId(3));
        let description = DeleteObjectAction::single(object, 0).description();
        assert_eq!(description.title, "Delete Pillar #3");
        assert_eq!(description.body, object.to_string());
    }
}
