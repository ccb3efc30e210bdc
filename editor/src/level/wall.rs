use std::fmt;

use classicyou_core::geometry::{self, Rectangle};
use classicyou_core::math::Vec2;
use classicyou_core::mesh::generators::{Surface, generate_quad};
use classicyou_core::mesh::Mesh;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{FieldReader, FieldWriter};
use super::object::ObjectParseError;
use super::texture::{ColourTable, TextureProp};
use super::{FLOOR_HEIGHT, floor_elevation, to_world};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallProps {
    pub texture_front: TextureProp,
    pub texture_back: TextureProp,
    pub base_height: f32,
    pub wall_height: f32,
}

impl Default for WallProps {
    fn default() -> Self {
        Self {
            texture_front: TextureProp::default(),
            texture_back: TextureProp::default(),
            base_height: 0.0,
            wall_height: FLOOR_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallParams {
    pub start: Vec2,
    pub end: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub props: WallProps,
    pub params: WallParams,
}

impl Wall {
    pub const TAG: &'static str = "walls";

    pub fn new(start: Vec2, end: Vec2, props: WallProps) -> Self {
        Self {
            props,
            params: WallParams { start, end },
        }
    }

    /// Bottom and top of the wall relative to its floor. The top never
    /// exceeds the floor ceiling.
    pub fn vertical_extent(&self) -> (f32, f32) {
        let bottom = self.props.base_height.min(FLOOR_HEIGHT);
        let top = (self.props.base_height + self.props.wall_height).min(FLOOR_HEIGHT);
        (bottom, top)
    }

    pub fn to_geometry(&self, floor: i32) -> Mesh {
        let elevation = floor_elevation(floor);
        let (bottom, top) = self.vertical_extent();
        let (start, end) = (self.params.start, self.params.end);

        let bl = to_world(start, elevation + bottom);
        let br = to_world(end, elevation + bottom);
        let tr = to_world(end, elevation + top);
        let tl = to_world(start, elevation + top);

        let front = &self.props.texture_front;
        let back = &self.props.texture_back;
        let mut mesh = generate_quad(
            [bl, br, tr, tl],
            Surface::new(front.id, front.colour.to_f32()),
        );
        mesh.append(generate_quad(
            [br, bl, tl, tr],
            Surface::new(back.id, back.colour.to_f32()),
        ));
        mesh
    }

    pub fn try_select_2d(&self, point: Vec2, select_distance: f32) -> bool {
        geometry::distance_to_line(point, self.params.start, self.params.end) <= select_distance
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle::from_corners(self.params.start, self.params.end)
    }

    pub fn move_by(&mut self, offset: Vec2) {
        self.params.start += offset;
        self.params.end += offset;
    }

    pub fn rotate_around(&mut self, centre: Vec2) {
        self.params.start = geometry::rotate_around(self.params.start, centre);
        self.params.end = geometry::rotate_around(self.params.end, centre);
    }

    pub fn write(&self, colours: &mut ColourTable) -> (Value, Value) {
        let params = FieldWriter::new(colours)
            .point(self.params.start)
            .point(self.params.end)
            .finish();
        let props = FieldWriter::new(colours)
            .texture(self.props.texture_front)
            .texture(self.props.texture_back)
            .number(self.props.base_height)
            .number(self.props.wall_height)
            .finish();
        (params, props)
    }

    pub fn read(
        params: &Value,
        props: &Value,
        colours: &ColourTable,
    ) -> Result<Self, ObjectParseError> {
        let mut params = FieldReader::new(Self::TAG, "params", params, 4, colours)?;
        let mut props = FieldReader::new(Self::TAG, "props", props, 4, colours)?;
        Ok(Self {
            params: WallParams {
                start: params.point("start")?,
                end: params.point("end")?,
            },
            props: WallProps {
                texture_front: props.texture("texture_front")?,
                texture_back: props.texture("texture_back")?,
                base_height: props.number("base_height")?,
                wall_height: props.number("wall_height")?,
            },
        })
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (p, q) = (&self.params, &self.props);
        write!(
            f,
            "Wall start: ({:.1}, {:.1}) end: ({:.1}, {:.1}) front: {} back: {} base: {:.2} height: {:.2}",
            p.start.x,
            p.start.y,
            p.end.x,
            p.end.y,
            q.texture_front,
            q.texture_back,
            q.base_height,
            q.wall_height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall() -> Wall {
        Wall::new(Vec2::new(0.0, 0.0), Vec2::new(160.0, 0.0), WallProps::default())
    }

    #[test]
    fn height_is_clamped_to_floor_ceiling() {
        let mut w = wall();
        w.props.base_height = 1.5;
        w.props.wall_height = 2.0;
        assert_eq!(w.vertical_extent(), (1.5, FLOOR_HEIGHT));

        let mesh = w.to_geometry(1);
        let max_y = mesh
            .vertices
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        assert_eq!(max_y, 2.0 * FLOOR_HEIGHT);
    }

    #[test]
    fn geometry_is_double_sided() {
        let mesh = wall().to_geometry(0);
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 4);
        // Drawing units map to tiles in world space
        assert!(mesh.vertices.iter().any(|v| v.position[0] == 5.0));
    }

    #[test]
    fn selection_uses_segment_distance() {
        let w = wall();
        assert!(w.try_select_2d(Vec2::new(80.0, 5.0), 10.0));
        assert!(!w.try_select_2d(Vec2::new(80.0, 15.0), 10.0));
        assert!(!w.try_select_2d(Vec2::new(175.0, 0.0), 10.0));
    }

    #[test]
    fn move_keeps_length() {
        let mut w = wall();
        w.move_by(Vec2::new(32.0, 64.0));
        assert_eq!(w.params.start, Vec2::new(32.0, 64.0));
        assert_eq!(w.params.end, Vec2::new(192.0, 64.0));
    }

    #[test]
    fn rotate_turns_horizontal_wall_vertical() {
        let mut w = wall();
        w.rotate_around(Vec2::new(80.0, 0.0));
        assert!((w.params.start - Vec2::new(80.0, -80.0)).norm() < 1e-4);
        assert!((w.params.end - Vec2::new(80.0, 80.0)).norm() < 1e-4);
    }

    #[test]
    fn display_lists_fields() {
        let text = wall().to_string();
        assert!(text.starts_with("Wall start: (0.0, 0.0) end: (160.0, 0.0)"));
        assert!(text.ends_with("base: 0.00 height: 2.00"));
    }
}
