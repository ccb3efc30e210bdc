use std::fmt;

use classicyou_core::geometry::{self, Rectangle};
use classicyou_core::math::Vec2;
use classicyou_core::mesh::Mesh;
use classicyou_core::mesh::generators::{Surface, generate_fan};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{FieldReader, FieldWriter};
use super::object::ObjectParseError;
use super::texture::{ColourTable, TextureProp};
use super::{floor_elevation, to_world};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolygonPlatformProps {
    pub texture_top: TextureProp,
    pub texture_bottom: TextureProp,
    pub base: f32,
    /// Invisible polygons produce no mesh but stay selectable.
    pub visible: bool,
}

impl Default for PolygonPlatformProps {
    fn default() -> Self {
        Self {
            texture_top: TextureProp::default(),
            texture_bottom: TextureProp::default(),
            base: 0.0,
            visible: true,
        }
    }
}

/// Corner order: top-left, top-right, bottom-right, bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonPlatformParams {
    pub corners: [Vec2; 4],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonPlatform {
    pub props: PolygonPlatformProps,
    pub params: PolygonPlatformParams,
}

impl PolygonPlatform {
    pub const TAG: &'static str = "polygon_platforms";

    pub fn new(corners: [Vec2; 4], props: PolygonPlatformProps) -> Self {
        Self {
            props,
            params: PolygonPlatformParams { corners },
        }
    }

    /// Axis-aligned polygon covering `rect`.
    pub fn from_rectangle(rect: Rectangle, props: PolygonPlatformProps) -> Self {
        let (min, max) = (rect.min(), rect.max());
        Self::new(
            [
                min,
                Vec2::new(max.x, min.y),
                max,
                Vec2::new(min.x, max.y),
            ],
            props,
        )
    }

    pub fn to_geometry(&self, floor: i32) -> Mesh {
        if !self.props.visible {
            return Mesh::new();
        }
        let y = floor_elevation(floor) + self.props.base;
        let top: Vec<[f32; 3]> = self
            .params
            .corners
            .iter()
            .map(|c| to_world(*c, y))
            .collect();
        let mut bottom = top.clone();
        bottom.reverse();

        let (t, b) = (&self.props.texture_top, &self.props.texture_bottom);
        let mut mesh = generate_fan(&top, Surface::new(t.id, t.colour.to_f32()));
        mesh.append(generate_fan(&bottom, Surface::new(b.id, b.colour.to_f32())));
        mesh
    }

    /// Hit test against the bounding box of the corners.
    pub fn try_select_2d(&self, point: Vec2) -> bool {
        self.bounds().contains(point)
    }

    pub fn bounds(&self) -> Rectangle {
        let c = &self.params.corners;
        Rectangle::bounding(c).unwrap_or_else(|| Rectangle::new(c[0], Vec2::zeros()))
    }

    pub fn move_by(&mut self, offset: Vec2) {
        for corner in &mut self.params.corners {
            *corner += offset;
        }
    }

    /// Rotates every corner and re-labels them so that index 0 stays the
    /// top-left corner.
    pub fn rotate_around(&mut self, centre: Vec2) {
        let [tl, tr, br, bl] = self.params.corners.map(|c| geometry::rotate_around(c, centre));
        self.params.corners = [bl, tl, tr, br];
    }

    pub fn write(&self, colours: &mut ColourTable) -> (Value, Value) {
        let mut params = FieldWriter::new(colours);
        for corner in self.params.corners {
            params.point(corner);
        }
        let params = params.finish();
        let props = FieldWriter::new(colours)
            .texture(self.props.texture_top)
            .texture(self.props.texture_bottom)
            .number(self.props.base)
            .flag(self.props.visible)
            .finish();
        (params, props)
    }

    pub fn read(
        params: &Value,
        props: &Value,
        colours: &ColourTable,
    ) -> Result<Self, ObjectParseError> {
        let mut params = FieldReader::new(Self::TAG, "params", params, 8, colours)?;
        let mut props = FieldReader::new(Self::TAG, "props", props, 4, colours)?;
        Ok(Self {
            params: PolygonPlatformParams {
                corners: [
                    params.point("top_left")?,
                    params.point("top_right")?,
                    params.point("bottom_right")?,
                    params.point("bottom_left")?,
                ],
            },
            props: PolygonPlatformProps {
                texture_top: props.texture("texture_top")?,
                texture_bottom: props.texture("texture_bottom")?,
                base: props.number("base")?,
                visible: props.flag("visible")?,
            },
        })
    }
}

impl fmt::Display for PolygonPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon corners:")?;
        for c in &self.params.corners {
            write!(f, " ({:.1}, {:.1})", c.x, c.y)?;
        }
        let q = &self.props;
        write!(
            f,
            " top: {} bottom: {} base: {:.2} visible: {}",
            q.texture_top, q.texture_bottom, q.base, q.visible
        )
    }
}
