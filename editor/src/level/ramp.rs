//! Ramps: sloped solids whose corner heights come from a
//! `(RampStyle, Direction)` lookup table.

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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RampStyle {
    #[default]
    Full,
    TriRamp,
    FlippedTriRamp,
    Corner,
    InvertedCorner,
}

impl RampStyle {
    pub const ALL: [RampStyle; 5] = [
        Self::Full,
        Self::TriRamp,
        Self::FlippedTriRamp,
        Self::Corner,
        Self::InvertedCorner,
    ];

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Full => "Full",
            Self::TriRamp => "Tri ramp",
            Self::FlippedTriRamp => "Flipped tri ramp",
            Self::Corner => "Corner",
            Self::InvertedCorner => "Inverted corner",
        }
    }
}

/// Direction the ramp rises towards, in clockwise order on the drawing pad
/// (Forward is up the screen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Forward,
    Right,
    Backward,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Forward, Self::Right, Self::Backward, Self::Left];

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn next_clockwise(self) -> Self {
        Self::ALL[(self as usize + 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Forward => "Forward",
            Self::Right => "Right",
            Self::Backward => "Backward",
            Self::Left => "Left",
        }
    }
}

// Corner indices, matching the outline order.
const TL: usize = 0;
const TR: usize = 1;
const BR: usize = 2;
const BL: usize = 3;

/// Which corners sit at `end_height` (the rest sit at `start_height`) and
/// which corner, if any, is cut away for the triangular styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RampCorners {
    pub raised: [bool; 4],
    pub dropped: Option<usize>,
}

pub fn ramp_corners(style: RampStyle, direction: Direction) -> RampCorners {
    use Direction::*;
    use RampStyle::*;

    const FORWARD: [bool; 4] = [true, true, false, false];
    const RIGHT: [bool; 4] = [false, true, true, false];
    const BACKWARD: [bool; 4] = [false, false, true, true];
    const LEFT: [bool; 4] = [true, false, false, true];
    const TL_BR: [bool; 4] = [true, false, true, false];
    const TR_BL: [bool; 4] = [false, true, false, true];

    let full = match direction {
        Forward => FORWARD,
        Right => RIGHT,
        Backward => BACKWARD,
        Left => LEFT,
    };

    let (raised, dropped) = match (style, direction) {
        (Full, _) => (full, None),
        // Drops the low corner on the left when facing up the slope
        (TriRamp, Forward) => (full, Some(BL)),
        (TriRamp, Right) => (full, Some(TL)),
        (TriRamp, Backward) => (full, Some(TR)),
        (TriRamp, Left) => (full, Some(BR)),
        (FlippedTriRamp, Forward) => (full, Some(BR)),
        (FlippedTriRamp, Right) => (full, Some(BL)),
        (FlippedTriRamp, Backward) => (full, Some(TL)),
        (FlippedTriRamp, Left) => (full, Some(TR)),
        (Corner, Forward | Backward) => (TL_BR, None),
        (Corner, Right | Left) => (TR_BL, None),
        (InvertedCorner, Forward | Backward) => (TR_BL, None),
        (InvertedCorner, Right | Left) => (TL_BR, None),
    };
    RampCorners { raised, dropped }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RampProps {
    pub texture_top: TextureProp,
    pub texture_bottom: TextureProp,
    pub width: f32,
    pub depth: f32,
    pub start_height: f32,
    pub end_height: f32,
    pub style: RampStyle,
    pub direction: Direction,
}

impl Default for RampProps {
    fn default() -> Self {
        Self {
            texture_top: TextureProp::default(),
            texture_bottom: TextureProp::default(),
            width: TILE_SIZE * 2.0,
            depth: TILE_SIZE * 2.0,
            start_height: 0.0,
            end_height: FLOOR_HEIGHT / 2.0,
            style: RampStyle::Full,
            direction: Direction::Forward,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampParams {
    /// Top-left corner of the footprint box.
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    pub props: RampProps,
    pub params: RampParams,
}

impl Ramp {
    pub const TAG: &'static str = "ramps";

    pub fn new(position: Vec2, props: RampProps) -> Self {
        Self {
            props,
            params: RampParams { position },
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.props.width, self.props.depth)
    }

    pub fn corners(&self) -> RampCorners {
        ramp_corners(self.props.style, self.props.direction)
    }

    /// Box corners TL, TR, BR, BL.
    fn box_corners(&self) -> [Vec2; 4] {
        let p = self.params.position;
        let (w, d) = (self.props.width, self.props.depth);
        [
            p,
            p + Vec2::new(w, 0.0),
            p + Vec2::new(w, d),
            p + Vec2::new(0.0, d),
        ]
    }

    /// Remaining footprint corners with their heights relative to the floor.
    pub fn outline(&self) -> Vec<(Vec2, f32)> {
        let table = self.corners();
        self.box_corners()
            .into_iter()
            .enumerate()
            .filter(|(i, _)| table.dropped != Some(*i))
            .map(|(i, p)| {
                let h = if table.raised[i] {
                    self.props.end_height
                } else {
                    self.props.start_height
                };
                (p, h.min(FLOOR_HEIGHT))
            })
            .collect()
    }

    pub fn to_geometry(&self, floor: i32) -> Mesh {
        let elevation = floor_elevation(floor);
        let outline = self.outline();
        let floor_level = outline
            .iter()
            .map(|(_, h)| *h)
            .fold(f32::INFINITY, f32::min);

        let footprint: Vec<[f32; 2]> = outline
            .iter()
            .map(|(p, _)| [p.x / TILE_SIZE, p.y / TILE_SIZE])
            .collect();
        let bottom = vec![elevation + floor_level; outline.len()];
        let top: Vec<f32> = outline.iter().map(|(_, h)| elevation + h).collect();

        let (t, b) = (&self.props.texture_top, &self.props.texture_bottom);
        generate_prism(
            &footprint,
            &bottom,
            &top,
            Surface::new(t.id, t.colour.to_f32()),
            Surface::new(b.id, b.colour.to_f32()),
        )
    }

    pub fn try_select_2d(&self, point: Vec2) -> bool {
        if !self.bounds().contains(point) {
            return false;
        }
        if self.corners().dropped.is_none() {
            return true;
        }
        let o = self.outline();
        geometry::point_in_triangle(point, o[0].0, o[1].0, o[2].0)
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
        self.props.direction = self.props.direction.next_clockwise();
    }

    pub fn write(&self, colours: &mut ColourTable) -> (Value, Value) {
        let params = FieldWriter::new(colours).point(self.params.position).finish();
        let props = FieldWriter::new(colours)
            .texture(self.props.texture_top)
            .texture(self.props.texture_bottom)
            .length(self.props.width)
            .length(self.props.depth)
            .number(self.props.start_height)
            .number(self.props.end_height)
            .integer(self.props.style as u32)
            .integer(self.props.direction as u32)
            .finish();
        (params, props)
    }

    pub fn read(
        params: &Value,
        props: &Value,
        colours: &ColourTable,
    ) -> Result<Self, ObjectParseError> {
        let invalid = |field| ObjectParseError::InvalidValue {
            kind: Self::TAG,
            field,
        };
        let mut params = FieldReader::new(Self::TAG, "params", params, 2, colours)?;
        let mut props = FieldReader::new(Self::TAG, "props", props, 8, colours)?;
        Ok(Self {
            params: RampParams {
                position: params.point("position")?,
            },
            props: RampProps {
                texture_top: props.texture("texture_top")?,
                texture_bottom: props.texture("texture_bottom")?,
                width: props.length("width")?,
                depth: props.length("depth")?,
                start_height: props.number("start_height")?,
                end_height: props.number("end_height")?,
                style: RampStyle::from_index(props.integer("style")?)
                    .ok_or_else(|| invalid("style"))?,
                direction: Direction::from_index(props.integer("direction")?)
                    .ok_or_else(|| invalid("direction"))?,
            },
        })
    }
}

impl fmt::Display for Ramp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (p, q) = (&self.params, &self.props);
        write!(
            f,
            "Ramp position: ({:.1}, {:.1}) size: {:.1}x{:.1} top: {} bottom: {} heights: {:.2} -> {:.2} style: {} direction: {}",
            p.position.x,
            p.position.y,
            q.width,
            q.depth,
            q.texture_top,
            q.texture_bottom,
            q.start_height,
            q.end_height,
            q.style.label(),
            q.direction.label()
        )
    }
}
