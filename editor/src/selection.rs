//! Transient editing state: the selection set, current floor, hovered tile
//! and the per-session object defaults.

use classicyou_core::math::Vec2;
use serde::Deserialize;

use crate::config::EditorConfig;
use crate::level::object::ObjectId;
use crate::level::pillar::PillarProps;
use crate::level::platform::PlatformProps;
use crate::level::polygon::PolygonPlatformProps;
use crate::level::ramp::RampProps;
use crate::level::wall::WallProps;

/// Selected objects with their floors, in insertion order.
///
/// `active_object` names the object whose property editor is shown. It is
/// resolved through the level on every use and is always a member of the
/// selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    objects: Vec<ObjectId>,
    object_floors: Vec<i32>,
    active_object: Option<ObjectId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the selection with a single object, which becomes active.
    pub fn set_selection(&mut self, id: ObjectId, floor: i32) {
        self.clear_selection();
        self.add_to_selection(id, floor);
    }

    /// Adds `id` (ignored if already selected) and makes it active.
    pub fn add_to_selection(&mut self, id: ObjectId, floor: i32) {
        if !self.contains(id) {
            self.objects.push(id);
            self.object_floors.push(floor);
        }
        self.active_object = Some(id);
    }

    /// Removes `id` from the selection. The active object falls back to the
    /// most recently selected remaining object.
    pub fn remove_object(&mut self, id: ObjectId) {
        if let Some(index) = self.objects.iter().position(|o| *o == id) {
            self.objects.remove(index);
            self.object_floors.remove(index);
        }
        if self.active_object == Some(id) {
            self.active_object = self.objects.last().copied();
        }
    }

    pub fn clear_selection(&mut self) {
        self.objects.clear();
        self.object_floors.clear();
        self.active_object = None;
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains(&id)
    }

    pub fn has_selection(&self) -> bool {
        !self.objects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The only selected object, if exactly one is selected.
    pub fn single(&self) -> Option<(ObjectId, i32)> {
        match (self.objects.as_slice(), self.object_floors.as_slice()) {
            ([id], [floor]) => Some((*id, *floor)),
            _ => None,
        }
    }

    pub fn active_object(&self) -> Option<ObjectId> {
        self.active_object
    }

    pub fn objects(&self) -> &[ObjectId] {
        &self.objects
    }

    pub fn object_floors(&self) -> &[i32] {
        &self.object_floors
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, i32)> + '_ {
        self.objects
            .iter()
            .copied()
            .zip(self.object_floors.iter().copied())
    }
}

/// Object kind placed by the creation tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToolType {
    #[default]
    CreateWall,
    CreatePlatform,
    CreatePolygonPlatform,
    CreatePillar,
    CreateRamp,
    AreaSelect,
}

impl ToolType {
    pub const ALL: [ToolType; 6] = [
        Self::CreateWall,
        Self::CreatePlatform,
        Self::CreatePolygonPlatform,
        Self::CreatePillar,
        Self::CreateRamp,
        Self::AreaSelect,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::CreateWall => "Wall",
            Self::CreatePlatform => "Platform",
            Self::CreatePolygonPlatform => "Polygon",
            Self::CreatePillar => "Pillar",
            Self::CreateRamp => "Ramp",
            Self::AreaSelect => "Select",
        }
    }
}

/// Properties given to newly created objects.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ObjectDefaults {
    #[serde(rename = "wall")]
    pub wall_default: WallProps,
    #[serde(rename = "platform")]
    pub platform_default: PlatformProps,
    #[serde(rename = "polygon_platform")]
    pub polygon_platform_default: PolygonPlatformProps,
    #[serde(rename = "pillar")]
    pub pillar_default: PillarProps,
    #[serde(rename = "ramp")]
    pub ramp_default: RampProps,
}

/// Per-session editor state mutated by tools and actions.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    pub current_floor: i32,
    /// Tile-snapped pointer position on the drawing pad.
    pub node_hovered: Vec2,
    pub tool: ToolType,
    pub selection: Selection,
    pub defaults: ObjectDefaults,
}

impl EditorState {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            current_floor: 0,
            node_hovered: Vec2::zeros(),
            tool: ToolType::default(),
            selection: Selection::new(),
            defaults: config.defaults,
        }
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}
