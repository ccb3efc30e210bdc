use classicyou_core::geometry::Rectangle;
use classicyou_core::math::Vec2;

use super::floor::{FloorManager, ObjectMesh};
use super::object::{LevelObject, ObjectId};
use crate::selection::Selection;

/// Aggregate root of the level being edited.
///
/// Owns the floors, hands out object ids and tracks unsaved changes. Id
/// lookups scan every floor, O(floors x objects).
#[derive(Debug, Clone, PartialEq)]
pub struct EditorLevel {
    pub(super) floors: FloorManager,
    /// Next id handed out by [`add_object`](Self::add_object).
    current_id: u32,
    pub(super) changes_made_since_last_save: bool,
    pub(super) select_distance: f32,
}

impl Default for EditorLevel {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorLevel {
    /// Empty level containing only the ground floor.
    pub fn new() -> Self {
        let mut floors = FloorManager::new();
        floors.ensure_floor_exists(0);
        Self {
            floors,
            current_id: 1,
            changes_made_since_last_save: false,
            select_distance: 10.0,
        }
    }

    pub fn with_select_distance(mut self, select_distance: f32) -> Self {
        self.select_distance = select_distance;
        self
    }

    /// Hit tolerance for walls on the drawing pad.
    pub fn select_distance(&self) -> f32 {
        self.select_distance
    }

    pub fn floors(&self) -> &FloorManager {
        &self.floors
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.changes_made_since_last_save
    }

    /// Adds `object` to `floor`, assigning a fresh id unless it already
    /// carries one. Returns the stored object.
    ///
    /// # Panics
    ///
    /// Panics if `floor` is not adjacent to the existing floor range.
    pub fn add_object(&mut self, mut object: LevelObject, floor: i32) -> &LevelObject {
        if object.object_id.is_assigned() {
            self.current_id = self.current_id.max(object.object_id.0 + 1);
        } else {
            object.object_id = ObjectId(self.current_id);
            self.current_id += 1;
        }
        self.changes_made_since_last_save = true;
        self.floors.ensure_floor_exists(floor).push(object)
    }

    /// Replaces the object with `object.object_id` on `floor`.
    ///
    /// A missing floor or id is logged and ignored. Returns whether the
    /// object was updated.
    pub fn update_object(&mut self, object: &LevelObject, floor: i32) -> bool {
        let updated = self
            .floors
            .find_floor_mut(floor)
            .is_some_and(|f| f.replace(*object));
        if updated {
            self.changes_made_since_last_save = true;
        } else {
            log::warn!(
                "Cannot update object {}: not found on floor {floor}",
                object.object_id
            );
        }
        updated
    }

    /// Removes the first object with `id` on any floor, returning it and its
    /// floor. A missing id is logged and ignored.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<(LevelObject, i32)> {
        for floor in self.floors.floors_mut() {
            if let Some(object) = floor.remove(id) {
                self.changes_made_since_last_save = true;
                return Some((object, floor.real_floor));
            }
        }
        log::warn!("Cannot remove object {id}: not found");
        None
    }

    /// Rewrites the id of an existing object. Used to restore identity when
    /// a deletion is undone.
    pub fn set_object_id(&mut self, current_id: ObjectId, new_id: ObjectId) -> bool {
        let found = self
            .floors
            .floors_mut()
            .iter_mut()
            .any(|f| f.set_id(current_id, new_id));
        if found {
            self.current_id = self.current_id.max(new_id.0 + 1);
        } else {
            log::warn!("Cannot change id of object {current_id}: not found");
        }
        found
    }

    pub fn get_object(&self, id: ObjectId) -> Option<&LevelObject> {
        self.floors.floors().iter().find_map(|f| f.find(id))
    }

    pub fn get_object_floor(&self, id: ObjectId) -> Option<i32> {
        self.floors
            .floors()
            .iter()
            .find(|f| f.find(id).is_some())
            .map(|f| f.real_floor)
    }

    /// Objects on `floor` in insertion order (empty if the floor does not
    /// exist).
    pub fn objects_on_floor(&self, floor: i32) -> &[LevelObject] {
        self.floors
            .find_floor(floor)
            .map(|f| f.objects.as_slice())
            .unwrap_or_default()
    }

    pub fn meshes_on_floor(&self, floor: i32) -> &[ObjectMesh] {
        self.floors
            .find_floor(floor)
            .map(|f| f.meshes.as_slice())
            .unwrap_or_default()
    }

    /// Every object with its floor, bottom floor first.
    pub fn iter_objects(&self) -> impl Iterator<Item = (i32, &LevelObject)> + '_ {
        self.floors
            .floors()
            .iter()
            .flat_map(|f| f.objects.iter().map(move |o| (f.real_floor, o)))
    }

    pub fn object_count(&self) -> usize {
        self.floors.floors().iter().map(|f| f.objects.len()).sum()
    }

    /// Object under `tile` on `floor`, most recently added first.
    ///
    /// The currently active object is only returned when no other object
    /// matches, so clicking overlapping objects cycles instead of sticking
    /// to the active one.
    pub fn try_select(
        &self,
        tile: Vec2,
        active_object: Option<ObjectId>,
        floor: i32,
    ) -> Option<&LevelObject> {
        let mut active_match = None;
        for object in self.objects_on_floor(floor).iter().rev() {
            if !object.try_select_2d(tile, self.select_distance) {
                continue;
            }
            if Some(object.object_id) == active_object {
                active_match = Some(object);
            } else {
                return Some(object);
            }
        }
        active_match
    }

    /// Adds every object on `floor` whose bounds lie entirely inside `rect`.
    pub fn select_within(&self, rect: &Rectangle, selection: &mut Selection, floor: i32) {
        for object in self.objects_on_floor(floor) {
            if rect.contains_rect(&object.bounds()) {
                selection.add_to_selection(object.object_id, floor);
            }
        }
    }

    /// Value copies of the objects with `ids` and their floors, in the
    /// order given. Unknown ids are skipped.
    pub fn copy_objects_and_floors(&self, ids: &[ObjectId]) -> (Vec<LevelObject>, Vec<i32>) {
        ids.iter()
            .filter_map(|id| {
                self.floors
                    .floors()
                    .iter()
                    .find_map(|f| f.find(*id).map(|o| (*o, f.real_floor)))
            })
            .unzip()
    }

    /// # Panics
    ///
    /// Panics if `floor` is neither present nor adjacent to the floor range.
    pub fn ensure_floor_exists(&mut self, floor: i32) {
        self.floors.ensure_floor_exists(floor);
    }

    /// Creates every floor between the current range and `floor`, one at a
    /// time.
    pub fn ensure_floors_up_to(&mut self, floor: i32) {
        while floor > self.floors.max_floor() {
            let next = self.floors.max_floor() + 1;
            self.floors.ensure_floor_exists(next);
        }
        while floor < self.floors.min_floor() {
            let next = self.floors.min_floor() - 1;
            self.floors.ensure_floor_exists(next);
        }
    }

    /// Removes every object and floor, leaving an empty ground floor.
    pub fn clear(&mut self) {
        self.floors.clear();
        self.floors.ensure_floor_exists(0);
        self.current_id = 1;
        self.changes_made_since_last_save = false;
    }
}
