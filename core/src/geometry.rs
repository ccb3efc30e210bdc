//! 2D geometric predicates used for selection, resizing and placement.
//!
//! All functions work in drawing-pad space (x right, y down).

use crate::math::{Vec2, vec2_max, vec2_min};

/// Axis-aligned rectangle described by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rectangle {
    pub position: Vec2,
    pub size: Vec2,
}

impl Rectangle {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    /// Rectangle spanning two arbitrary corners (in any order).
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let min = vec2_min(a, b);
        let max = vec2_max(a, b);
        Self {
            position: min,
            size: max - min,
        }
    }

    /// Smallest rectangle containing every point. `None` for an empty slice.
    pub fn bounding(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), p| {
                (vec2_min(min, *p), vec2_max(max, *p))
            });
        Some(Self::from_corners(min, max))
    }

    pub fn min(&self) -> Vec2 {
        self.position
    }

    pub fn max(&self) -> Vec2 {
        self.position + self.size
    }

    pub fn centre(&self) -> Vec2 {
        self.position + self.size / 2.0
    }

    /// Inclusive point containment.
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.position.x
            && point.x <= max.x
            && point.y >= self.position.y
            && point.y <= max.y
    }

    /// True when `other` lies entirely inside `self` (edges may touch).
    pub fn contains_rect(&self, other: &Rectangle) -> bool {
        self.contains(other.min()) && self.contains(other.max())
    }

    /// Union of two rectangles.
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        Self::from_corners(vec2_min(self.min(), other.min()), vec2_max(self.max(), other.max()))
    }
}

/// Shortest distance from `point` to the segment `start..end`.
pub fn distance_to_line(point: Vec2, start: Vec2, end: Vec2) -> f32 {
    let line = end - start;
    let length_sq = line.norm_squared();
    if length_sq <= f32::EPSILON {
        return (point - start).norm();
    }
    let t = ((point - start).dot(&line) / length_sq).clamp(0.0, 1.0);
    let projection = start + line * t;
    (point - projection).norm()
}

/// Even-odd point in polygon test. Polygons with fewer than three points
/// contain nothing.
pub fn point_in_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > point.y) != (b.y > point.y)
            && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Point in triangle test using barycentric sign checks (edges inclusive).
pub fn point_in_triangle(point: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    fn sign(p1: Vec2, p2: Vec2, p3: Vec2) -> f32 {
        (p1.x - p3.x) * (p2.y - p3.y) - (p2.x - p3.x) * (p1.y - p3.y)
    }
    let d1 = sign(point, a, b);
    let d2 = sign(point, b, c);
    let d3 = sign(point, c, a);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Rotates `point` 90 degrees clockwise (on screen, y down) about `centre`.
pub fn rotate_around(point: Vec2, centre: Vec2) -> Vec2 {
    let rel = point - centre;
    centre + Vec2::new(-rel.y, rel.x)
}
