use std::fmt;

use classicyou_core::geometry::{self, Rectangle};
use classicyou_core::math::Vec2;
use classicyou_core::mesh::Mesh;
use classicyou_core::mesh::generators::{Surface, generate_prism};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{FieldReader, FieldWriter};
use super::object::ObjectParseError;
use super::texture::{ColourTable, TextureProp};
use super::{FLOOR_HEIGHT, TILE_SIZE, floor_elevation};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PillarProps {
    pub texture: TextureProp,
    /// Side length of the square footprint, drawing units.
    pub size: f32,
    pub base_height: f32,
    pub height: f32,
    /// Rotates the footprint 45 degrees.
    pub angled: bool,
}

impl Default for PillarProps {
    fn default() -> Self {
        Self {
            texture: TextureProp::default(),
            size: TILE_SIZE / 4.0,
            base_height: 0.0,
            height: FLOOR_HEIGHT,
            angled: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PillarParams {
    /// Top-left corner of the footprint box.
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pillar {
    pub props: PillarProps,
    pub params: PillarParams,
}

impl Pillar {
    pub const TAG: &'static str = "pillars";

    pub fn new(position: Vec2, props: PillarProps) -> Self {
        Self {
            props,
            params: PillarParams { position },
        }
    }

    pub fn outline(&self) -> [Vec2; 4] {
        let p = self.params.position;
        let s = self.props.size;
        if self.props.angled {
            [
                p + Vec2::new(s / 2.0, 0.0),
                p + Vec2::new(s, s / 2.0),
                p + Vec2::new(s / 2.0, s),
                p + Vec2::new(0.0, s / 2.0),
            ]
        } else {
            [
                p,
                p + Vec2::new(s, 0.0),
                p + Vec2::new(s, s),
                p + Vec2::new(0.0, s),
            ]
        }
    }

    pub fn to_geometry(&self, floor: i32) -> Mesh {
        let elevation = floor_elevation(floor);
        let bottom = elevation + self.props.base_height.min(FLOOR_HEIGHT);
        let top = elevation + (self.props.base_height + self.props.height).min(FLOOR_HEIGHT);
        let outline = self.outline().map(|p| [p.x / TILE_SIZE, p.y / TILE_SIZE]);
        let surface = Surface::new(self.props.texture.id, self.props.texture.colour.to_f32());
        generate_prism(&outline, &[bottom; 4], &[top; 4], surface, surface)
    }

    pub fn try_select_2d(&self, point: Vec2) -> bool {
        self.bounds().contains(point)
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(
            self.params.position,
            Vec2::new(self.props.size, self.props.size),
        )
    }

    pub fn move_by(&mut self, offset: Vec2) {
        self.params.position += offset;
    }

    pub fn rotate_around(&mut self, centre: Vec2) {
        let half = Vec2::new(self.props.size, self.props.size) / 2.0;
        let rotated = geometry::rotate_around(self.params.position + half, centre);
        self.params.position = rotated - half;
    }

    pub fn write(&self, colours: &mut ColourTable) -> (Value, Value) {
        let params = FieldWriter::new(colours).point(self.params.position).finish();
        let props = FieldWriter::new(colours)
            .texture(self.props.texture)
            .length(self.props.size)
            .number(self.props.base_height)
            .number(self.props.height)
            .flag(self.props.angled)
            .finish();
        (params, props)
    }

    pub fn read(
        params: &Value,
        props: &Value,
        colours: &ColourTable,
    ) -> Result<Self, ObjectParseError> {
        let mut params = FieldReader::new(Self::TAG, "params", params, 2, colours)?;
        let mut props = FieldReader::new(Self::TAG, "props", props, 5, colours)?;
        Ok(Self {
            params: PillarParams {
                position: params.point("position")?,
            },
            props: PillarProps {
                texture: props.texture("texture")?,
                size: props.length("size")?,
                base_height: props.number("base_height")?,
                height: props.number("height")?,
                angled: props.flag("angled")?,
            },
        })
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (p, q) = (&self.params, &self.props);
        write!(
            f,
            "Pillar position: ({:.1}, {:.1}) size: {:.1} texture: {} base: {:.2} height: {:.2} angled: {}",
            p.position.x,
            p.position.y,
            q.size,
            q.texture,
            q.base_height,
            q.height,
            q.angled
        )
    }
}
