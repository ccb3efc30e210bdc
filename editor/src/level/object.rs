//! The closed set of level object kinds and their capability dispatch.
//!
//! [`LevelObject`] pairs an [`ObjectId`] with an [`ObjectType`], a plain
//! enum over the five kinds. Every capability (geometry, hit testing,
//! movement, rotation, persistence) is an exhaustive `match`, so a
//! `LevelObject` is an ordinary value that can be cloned wholesale into
//! undo snapshots.

use std::fmt;

use classicyou_core::geometry::Rectangle;
use classicyou_core::math::Vec2;
use classicyou_core::mesh::Mesh;
use serde_json::Value;
use thiserror::Error;

use super::pillar::Pillar;
use super::platform::Platform;
use super::polygon::PolygonPlatform;
use super::ramp::Ramp;
use super::texture::ColourTable;
use super::wall::Wall;

/// Identity of an object within a level.
///
/// `ObjectId::UNASSIGNED` marks an object that has not been added to a
/// level yet; [`EditorLevel::add_object`](super::EditorLevel::add_object)
/// assigns a fresh id to such objects and keeps any other id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ObjectId(pub u32);

impl ObjectId {
    pub const UNASSIGNED: ObjectId = ObjectId(0);

    pub fn is_assigned(self) -> bool {
        self != Self::UNASSIGNED
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Error produced when a persisted object cannot be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObjectParseError {
    #[error("{kind}: expected {expected} {group} values, found {found}")]
    WrongArity {
        kind: &'static str,
        group: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("{kind}: invalid value for '{field}'")]
    InvalidValue {
        kind: &'static str,
        field: &'static str,
    },
    #[error("unknown object kind '{0}'")]
    UnknownKind(String),
}

/// Kind discriminant, used for grouping in the file format and for tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Wall,
    Platform,
    PolygonPlatform,
    Pillar,
    Ramp,
}

impl ObjectKind {
    /// Persisted order of the kind groups.
    pub const ALL: [ObjectKind; 5] = [
        Self::Wall,
        Self::Platform,
        Self::PolygonPlatform,
        Self::Pillar,
        Self::Ramp,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Self::Wall => Wall::TAG,
            Self::Platform => Platform::TAG,
            Self::PolygonPlatform => PolygonPlatform::TAG,
            Self::Pillar => Pillar::TAG,
            Self::Ramp => Ramp::TAG,
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.tag() == tag)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Wall => "Wall",
            Self::Platform => "Platform",
            Self::PolygonPlatform => "Polygon platform",
            Self::Pillar => "Pillar",
            Self::Ramp => "Ramp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObjectType {
    Wall(Wall),
    Platform(Platform),
    PolygonPlatform(PolygonPlatform),
    Pillar(Pillar),
    Ramp(Ramp),
}

impl ObjectType {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Wall(_) => ObjectKind::Wall,
            Self::Platform(_) => ObjectKind::Platform,
            Self::PolygonPlatform(_) => ObjectKind::PolygonPlatform,
            Self::Pillar(_) => ObjectKind::Pillar,
            Self::Ramp(_) => ObjectKind::Ramp,
        }
    }
}

/// A placeable level entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelObject {
    pub object_id: ObjectId,
    pub object_type: ObjectType,
}

impl LevelObject {
    /// A new object without an id.
    pub fn new(object_type: ObjectType) -> Self {
        Self {
            object_id: ObjectId::UNASSIGNED,
            object_type,
        }
    }

    pub fn with_id(mut self, id: ObjectId) -> Self {
        self.object_id = id;
        self
    }

    pub fn kind(&self) -> ObjectKind {
        self.object_type.kind()
    }

    pub fn as_wall(&self) -> Option<&Wall> {
        match &self.object_type {
            ObjectType::Wall(wall) => Some(wall),
            _ => None,
        }
    }

    pub fn as_polygon(&self) -> Option<&PolygonPlatform> {
        match &self.object_type {
            ObjectType::PolygonPlatform(polygon) => Some(polygon),
            _ => None,
        }
    }

    /// Render mesh for this object on `floor`. Pure; never mutates.
    pub fn to_geometry(&self, floor: i32) -> Mesh {
        match &self.object_type {
            ObjectType::Wall(o) => o.to_geometry(floor),
            ObjectType::Platform(o) => o.to_geometry(floor),
            ObjectType::PolygonPlatform(o) => o.to_geometry(floor),
            ObjectType::Pillar(o) => o.to_geometry(floor),
            ObjectType::Ramp(o) => o.to_geometry(floor),
        }
    }

    /// Hit test on the drawing pad. `select_distance` is the wall
    /// tolerance; area kinds test their footprint.
    pub fn try_select_2d(&self, point: Vec2, select_distance: f32) -> bool {
        match &self.object_type {
            ObjectType::Wall(o) => o.try_select_2d(point, select_distance),
            ObjectType::Platform(o) => o.try_select_2d(point),
            ObjectType::PolygonPlatform(o) => o.try_select_2d(point),
            ObjectType::Pillar(o) => o.try_select_2d(point),
            ObjectType::Ramp(o) => o.try_select_2d(point),
        }
    }

    /// Axis-aligned footprint on the drawing pad.
    pub fn bounds(&self) -> Rectangle {
        match &self.object_type {
            ObjectType::Wall(o) => o.bounds(),
            ObjectType::Platform(o) => o.bounds(),
            ObjectType::PolygonPlatform(o) => o.bounds(),
            ObjectType::Pillar(o) => o.bounds(),
            ObjectType::Ramp(o) => o.bounds(),
        }
    }

    /// Translates placement only.
    pub fn move_by(&mut self, offset: Vec2) {
        match &mut self.object_type {
            ObjectType::Wall(o) => o.move_by(offset),
            ObjectType::Platform(o) => o.move_by(offset),
            ObjectType::PolygonPlatform(o) => o.move_by(offset),
            ObjectType::Pillar(o) => o.move_by(offset),
            ObjectType::Ramp(o) => o.move_by(offset),
        }
    }

    /// Rotates 90 degrees clockwise about `centre`.
    pub fn rotate_around(&mut self, centre: Vec2) {
        match &mut self.object_type {
            ObjectType::Wall(o) => o.rotate_around(centre),
            ObjectType::Platform(o) => o.rotate_around(centre),
            ObjectType::PolygonPlatform(o) => o.rotate_around(centre),
            ObjectType::Pillar(o) => o.rotate_around(centre),
            ObjectType::Ramp(o) => o.rotate_around(centre),
        }
    }

    /// Persisted `[[params...], [props...]]` pair and the kind tag.
    pub fn serialize(&self, colours: &mut ColourTable) -> (Value, Value, &'static str) {
        let (params, props) = match &self.object_type {
            ObjectType::Wall(o) => o.write(colours),
            ObjectType::Platform(o) => o.write(colours),
            ObjectType::PolygonPlatform(o) => o.write(colours),
            ObjectType::Pillar(o) => o.write(colours),
            ObjectType::Ramp(o) => o.write(colours),
        };
        (params, props, self.kind().tag())
    }

    /// Decodes one `[[params...], [props...]]` entry of kind `tag`. The
    /// returned object has no id.
    pub fn deserialize(
        tag: &str,
        json: &Value,
        colours: &ColourTable,
    ) -> Result<LevelObject, ObjectParseError> {
        let kind =
            ObjectKind::from_tag(tag).ok_or_else(|| ObjectParseError::UnknownKind(tag.into()))?;
        let pair = match json.as_array() {
            Some(pair) if pair.len() == 2 => pair,
            other => {
                return Err(ObjectParseError::WrongArity {
                    kind: kind.tag(),
                    group: "object",
                    expected: 2,
                    found: other.map_or(0, Vec::len),
                });
            }
        };
        let (params, props) = (&pair[0], &pair[1]);
        let object_type = match kind {
            ObjectKind::Wall => ObjectType::Wall(Wall::read(params, props, colours)?),
            ObjectKind::Platform => ObjectType::Platform(Platform::read(params, props, colours)?),
            ObjectKind::PolygonPlatform => {
                ObjectType::PolygonPlatform(PolygonPlatform::read(params, props, colours)?)
            }
            ObjectKind::Pillar => ObjectType::Pillar(Pillar::read(params, props, colours)?),
            ObjectKind::Ramp => ObjectType::Ramp(Ramp::read(params, props, colours)?),
        };
        Ok(LevelObject::new(object_type))
    }
}

impl fmt::Display for LevelObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.object_id)?;
        match &self.object_type {
            ObjectType::Wall(o) => fmt::Display::fmt(o, f),
            ObjectType::Platform(o) => fmt::Display::fmt(o, f),
            ObjectType::PolygonPlatform(o) => fmt::Display::fmt(o, f),
            ObjectType::Pillar(o) => fmt::Display::fmt(o, f),
            ObjectType::Ramp(o) => fmt::Display::fmt(o, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::platform::PlatformProps;
    use crate::level::wall::WallProps;
    use serde_json::json;

    fn wall() -> LevelObject {
        LevelObject::new(ObjectType::Wall(Wall::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(64.0, 0.0),
            WallProps::default(),
        )))
    }

    #[test]
    fn copies_are_independent() {
        let original = wall();
        let mut copy = original;
        copy.move_by(Vec2::new(32.0, 32.0));
        assert_ne!(original, copy);
        assert_eq!(original.bounds().min(), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn kind_tags_round_trip() {
        for kind in ObjectKind::ALL {
            assert_eq!(ObjectKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(ObjectKind::from_tag("doors"), None);
    }

    #[test]
    fn display_prefixes_id() {
        let text = wall().with_id(ObjectId(7)).to_string();
        assert!(text.starts_with("#7 Wall start:"));
    }

    #[test]
    fn deserialize_rejects_unknown_kind() {
        let colours = ColourTable::new();
        let err = LevelObject::deserialize("doors", &json!([[], []]), &colours).unwrap_err();
        assert_eq!(err, ObjectParseError::UnknownKind("doors".into()));
    }

    #[test]
    fn deserialize_reports_kind_and_arity() {
        let colours = ColourTable::new();
        let err = LevelObject::deserialize("walls", &json!([[0.0, 0.0], []]), &colours)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "walls: expected 4 params values, found 2"
        );
    }

    #[test]
    fn serialize_uses_kind_tag() {
        let mut colours = ColourTable::new();
        let platform = LevelObject::new(ObjectType::Platform(Platform::new(
            Vec2::new(32.0, 64.0),
            PlatformProps::default(),
        )));
        let (params, _, tag) = platform.serialize(&mut colours);
        assert_eq!(tag, "platforms");
        assert_eq!(params, json!([1.0, 2.0]));
    }
}
