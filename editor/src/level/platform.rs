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
use super::{TILE_SIZE, floor_elevation, to_world};

/// Footprint shape of a platform within its width x depth box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformStyle {
    #[default]
    Quad,
    Diamond,
    Triangle,
}

impl PlatformStyle {
    pub const ALL: [PlatformStyle; 3] = [Self::Quad, Self::Diamond, Self::Triangle];

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Quad => "Quad",
            Self::Diamond => "Diamond",
            Self::Triangle => "Triangle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformProps {
    pub texture_top: TextureProp,
    pub texture_bottom: TextureProp,
    pub width: f32,
    pub depth: f32,
    pub base: f32,
    pub style: PlatformStyle,
}

impl Default for PlatformProps {
    fn default() -> Self {
        Self {
            texture_top: TextureProp::default(),
            texture_bottom: TextureProp::default(),
            width: TILE_SIZE,
            depth: TILE_SIZE,
            base: 0.0,
            style: PlatformStyle::Quad,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformParams {
    /// Top-left corner of the footprint box.
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub props: PlatformProps,
    pub params: PlatformParams,
}

impl Platform {
    pub const TAG: &'static str = "platforms";

    pub fn new(position: Vec2, props: PlatformProps) -> Self {
        Self {
            props,
            params: PlatformParams { position },
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.props.width, self.props.depth)
    }

    /// Footprint outline in drawing units, clockwise on screen.
    pub fn outline(&self) -> Vec<Vec2> {
        let p = self.params.position;
        let (w, d) = (self.props.width, self.props.depth);
        match self.props.style {
            PlatformStyle::Quad => vec![
                p,
                p + Vec2::new(w, 0.0),
                p + Vec2::new(w, d),
                p + Vec2::new(0.0, d),
            ],
            PlatformStyle::Diamond => vec![
                p + Vec2::new(w / 2.0, 0.0),
                p + Vec2::new(w, d / 2.0),
                p + Vec2::new(w / 2.0, d),
                p + Vec2::new(0.0, d / 2.0),
            ],
            PlatformStyle::Triangle => vec![
                p + Vec2::new(w / 2.0, 0.0),
                p + Vec2::new(w, d),
                p + Vec2::new(0.0, d),
            ],
        }
    }

    pub fn to_geometry(&self, floor: i32) -> Mesh {
        let y = floor_elevation(floor) + self.props.base;
        let top: Vec<[f32; 3]> = self.outline().into_iter().map(|p| to_world(p, y)).collect();
        let mut bottom = top.clone();
        bottom.reverse();

        let (t, b) = (&self.props.texture_top, &self.props.texture_bottom);
        let mut mesh = generate_fan(&top, Surface::new(t.id, t.colour.to_f32()));
        mesh.append(generate_fan(&bottom, Surface::new(b.id, b.colour.to_f32())));
        mesh
    }

    pub fn try_select_2d(&self, point: Vec2) -> bool {
        if !self.bounds().contains(point) {
            return false;
        }
        match self.props.style {
            PlatformStyle::Quad => true,
            PlatformStyle::Diamond => geometry::point_in_polygon(point, &self.outline()),
            PlatformStyle::Triangle => {
                let o = self.outline();
                geometry::point_in_triangle(point, o[0], o[1], o[2])
            }
        }
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(self.params.position, self.size())
    }

    pub fn move_by(&mut self, offset: Vec2) {
        self.params.position += offset;
    }

    pub fn rotate_around(&mut self, centre: Vec2) {
        let rotated = geometry::rotate_around(self.bounds().centre(), centre);
        std::mem::swap(&mut self.props.width, &mut self.props.depth);
        self.params.position = rotated - self.size() / 2.0;
    }

    pub fn write(&self, colours: &mut ColourTable) -> (Value, Value) {
        let params = FieldWriter::new(colours).point(self.params.position).finish();
        let props = FieldWriter::new(colours)
            .texture(self.props.texture_top)
            .texture(self.props.texture_bottom)
            .length(self.props.width)
            .length(self.props.depth)
            .number(self.props.base)
            .integer(self.props.style as u32)
            .finish();
        (params, props)
    }

    pub fn read(
        params: &Value,
        props: &Value,
        colours: &ColourTable,
    ) -> Result<Self, ObjectParseError> {
        let mut params = FieldReader::new(Self::TAG, "params", params, 2, colours)?;
        let mut props = FieldReader::new(Self::TAG, "props", props, 6, colours)?;
        Ok(Self {
            params: PlatformParams {
                position: params.point("position")?,
            },
            props: PlatformProps {
                texture_top: props.texture("texture_top")?,
                texture_bottom: props.texture("texture_bottom")?,
                width: props.length("width")?,
                depth: props.length("depth")?,
                base: props.number("base")?,
                style: PlatformStyle::from_index(props.integer("style")?).ok_or(
                    ObjectParseError::InvalidValue {
                        kind: Self::TAG,
                        field: "style",
                    },
                )?,
            },
        })
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (p, q) = (&self.params, &self.props);
        write!(
            f,
            "Platform position: ({:.1}, {:.1}) size: {:.1}x{:.1} top: {} bottom: {} base: {:.2} style: {}",
            p.position.x,
            p.position.y,
            q.width,
            q.depth,
            q.texture_top,
            q.texture_bottom,
            q.base,
            q.style.label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform(style: PlatformStyle) -> Platform {
        Platform::new(
            Vec2::new(32.0, 32.0),
            PlatformProps {
                width: 64.0,
                depth: 64.0,
                style,
                ..Default::default()
            },
        )
    }

    #[test]
    fn quad_selects_whole_box() {
        let p = platform(PlatformStyle::Quad);
        assert!(p.try_select_2d(Vec2::new(34.0, 34.0)));
        assert!(!p.try_select_2d(Vec2::new(100.0, 34.0)));
    }

    #[test]
    fn diamond_excludes_corners() {
        let p = platform(PlatformStyle::Diamond);
        assert!(p.try_select_2d(Vec2::new(64.0, 64.0)));
        assert!(!p.try_select_2d(Vec2::new(34.0, 34.0)));
    }

    #[test]
    fn triangle_excludes_top_corners() {
        let p = platform(PlatformStyle::Triangle);
        assert!(p.try_select_2d(Vec2::new(64.0, 90.0)));
        assert!(!p.try_select_2d(Vec2::new(36.0, 36.0)));
    }

    #[test]
    fn geometry_has_top_and_bottom() {
        let mesh = platform(PlatformStyle::Quad).to_geometry(0);
        assert_eq!(mesh.triangle_count(), 4);
        let tri = platform(PlatformStyle::Triangle).to_geometry(0);
        assert_eq!(tri.triangle_count(), 2);
    }

    #[test]
    fn rotate_swaps_width_and_depth() {
        let mut p = Platform::new(
            Vec2::new(0.0, 0.0),
            PlatformProps {
                width: 96.0,
                depth: 32.0,
                ..Default::default()
            },
        );
        p.rotate_around(Vec2::new(48.0, 16.0));
        assert_eq!((p.props.width, p.props.depth), (32.0, 96.0));
        // Rotating about its own centre keeps the centre fixed
        assert!((p.bounds().centre() - Vec2::new(48.0, 16.0)).norm() < 1e-4);
    }

    #[test]
    fn style_index_round_trip() {
        for style in PlatformStyle::ALL {
            assert_eq!(PlatformStyle::from_index(style as u32), Some(style));
        }
        assert_eq!(PlatformStyle::from_index(7), None);
    }
}
