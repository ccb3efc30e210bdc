//! Floors and the contiguous floor range that holds them.

use classicyou_core::mesh::Mesh;

use super::object::{LevelObject, ObjectId};

/// Render mesh generated for one object.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectMesh {
    pub id: ObjectId,
    pub mesh: Mesh,
}

/// One vertical level slice and the objects placed on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Floor {
    pub real_floor: i32,
    pub objects: Vec<LevelObject>,
    pub meshes: Vec<ObjectMesh>,
}

impl Floor {
    pub fn new(real_floor: i32) -> Self {
        Self {
            real_floor,
            objects: Vec::new(),
            meshes: Vec::new(),
        }
    }

    pub fn find(&self, id: ObjectId) -> Option<&LevelObject> {
        self.objects.iter().find(|o| o.object_id == id)
    }

    fn position(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|o| o.object_id == id)
    }

    /// Appends `object` and generates its mesh.
    pub fn push(&mut self, object: LevelObject) -> &LevelObject {
        self.meshes.push(ObjectMesh {
            id: object.object_id,
            mesh: object.to_geometry(self.real_floor),
        });
        self.objects.push(object);
        &self.objects[self.objects.len() - 1]
    }

    /// Replaces the object carrying `object.object_id`. Returns `false` if
    /// no such object is on this floor.
    pub fn replace(&mut self, object: LevelObject) -> bool {
        let Some(index) = self.position(object.object_id) else {
            return false;
        };
        self.regenerate_mesh(&object);
        self.objects[index] = object;
        true
    }

    /// Removes the object with `id`, preserving the order of the rest.
    pub fn remove(&mut self, id: ObjectId) -> Option<LevelObject> {
        let index = self.position(id)?;
        self.meshes.retain(|m| m.id != id);
        Some(self.objects.remove(index))
    }

    /// Rewrites an object's id in place. Returns `false` if `current` is
    /// not on this floor.
    pub fn set_id(&mut self, current: ObjectId, new: ObjectId) -> bool {
        let Some(index) = self.position(current) else {
            return false;
        };
        self.objects[index].object_id = new;
        if let Some(mesh) = self.meshes.iter_mut().find(|m| m.id == current) {
            mesh.id = new;
        }
        true
    }

    fn regenerate_mesh(&mut self, object: &LevelObject) {
        let mesh = object.to_geometry(self.real_floor);
        match self.meshes.iter_mut().find(|m| m.id == object.object_id) {
            Some(entry) => entry.mesh = mesh,
            None => self.meshes.push(ObjectMesh {
                id: object.object_id,
                mesh,
            }),
        }
    }
}

/// Floors ordered bottom to top over a contiguous range
/// `[min_floor, max_floor]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FloorManager {
    floors: Vec<Floor>,
    min_floor: i32,
    max_floor: i32,
}

impl FloorManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_floor(&self) -> i32 {
        self.min_floor
    }

    pub fn max_floor(&self) -> i32 {
        self.max_floor
    }

    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.floors.len()
    }

    /// Floors in ascending order.
    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn floors_mut(&mut self) -> &mut [Floor] {
        &mut self.floors
    }

    pub fn find_floor(&self, real_floor: i32) -> Option<&Floor> {
        let index = self.index_of(real_floor)?;
        self.floors.get(index)
    }

    pub fn find_floor_mut(&mut self, real_floor: i32) -> Option<&mut Floor> {
        let index = self.index_of(real_floor)?;
        self.floors.get_mut(index)
    }

    fn index_of(&self, real_floor: i32) -> Option<usize> {
        if self.floors.is_empty() || real_floor < self.min_floor || real_floor > self.max_floor {
            return None;
        }
        Some((real_floor - self.min_floor) as usize)
    }

    /// Returns `real_floor`, creating it if it sits directly above or below
    /// the current range.
    ///
    /// # Panics
    ///
    /// Panics if `real_floor` is neither present nor adjacent to the range.
    /// Use [`EditorLevel::ensure_floors_up_to`](super::EditorLevel::ensure_floors_up_to)
    /// to grow by more than one floor.
    pub fn ensure_floor_exists(&mut self, real_floor: i32) -> &mut Floor {
        if self.floors.is_empty() {
            assert!(
                (-1..=1).contains(&real_floor),
                "floor {real_floor} is not adjacent to the ground floor"
            );
            self.floors.push(Floor::new(real_floor));
            self.min_floor = real_floor;
            self.max_floor = real_floor;
            log::debug!("Created floor {real_floor}");
        } else if real_floor == self.max_floor + 1 {
            self.floors.push(Floor::new(real_floor));
            self.max_floor = real_floor;
            log::debug!("Created floor {real_floor}");
        } else if real_floor == self.min_floor - 1 {
            self.floors.insert(0, Floor::new(real_floor));
            self.min_floor = real_floor;
            log::debug!("Created floor {real_floor}");
        } else {
            assert!(
                real_floor >= self.min_floor && real_floor <= self.max_floor,
                "floor {real_floor} is not adjacent to the floor range [{}, {}]",
                self.min_floor,
                self.max_floor
            );
        }
        let index = (real_floor - self.min_floor) as usize;
        &mut self.floors[index]
    }

    pub fn clear(&mut self) {
        self.floors.clear();
        self.min_floor = 0;
        self.max_floor = 0;
    }
}
