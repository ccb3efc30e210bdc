//! Level data model: objects, floors and the [`EditorLevel`] aggregate.
//!
//! Planar values (positions, corners, widths) are held in drawing-pad
//! units, `TILE_SIZE` per tile. Heights are world units relative to the
//! floor the object sits on.

use classicyou_core::math::Vec2;

mod editor_level;
mod fields;
pub mod floor;
pub mod object;
pub mod pillar;
pub mod platform;
pub mod polygon;
pub mod ramp;
pub mod serialize;
pub mod texture;
pub mod wall;

pub use editor_level::EditorLevel;
pub use floor::{Floor, FloorManager, ObjectMesh};
pub use object::{LevelObject, ObjectId, ObjectKind, ObjectParseError, ObjectType};
pub use serialize::LevelFileError;

/// Drawing-pad units per tile.
pub const TILE_SIZE: f32 = 32.0;

/// World height of one floor.
pub const FLOOR_HEIGHT: f32 = 2.0;

/// Current level file format version.
pub const LEVEL_FORMAT_VERSION: u32 = 1;

/// World-space y of the bottom of `floor`.
pub(crate) fn floor_elevation(floor: i32) -> f32 {
    floor as f32 * FLOOR_HEIGHT
}

/// Drawing-pad point at height `y` to world space.
pub(crate) fn to_world(point: Vec2, y: f32) -> [f32; 3] {
    [point.x / TILE_SIZE, y, point.y / TILE_SIZE]
}

/// Snaps a drawing-pad point to the nearest tile corner.
pub fn snap_to_tile(point: Vec2) -> Vec2 {
    (point / TILE_SIZE).map(f32::round) * TILE_SIZE
}
