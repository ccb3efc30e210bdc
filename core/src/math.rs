//! Math type aliases and helper functions.

pub use nalgebra;

/// 2D vector (f32). Used for drawing-pad coordinates.
pub type Vec2 = nalgebra::Vector2<f32>;

/// Component-wise minimum of two 2D vectors.
pub fn vec2_min(a: Vec2, b: Vec2) -> Vec2 {
    Vec2::new(a.x.min(b.x), a.y.min(b.y))
}

/// Component-wise maximum of two 2D vectors.
pub fn vec2_max(a: Vec2, b: Vec2) -> Vec2 {
    Vec2::new(a.x.max(b.x), a.y.max(b.y))
}
