//! CPU-side mesh types and generators.
//!
//! - [`Vertex`] - Interleaved vertex (position, texture coordinate, colour)
//! - [`Mesh`] - Indexed triangle list
//! - Generators for the shapes level geometry is assembled from (quads,
//!   triangles, fans, prisms, boxes)

mod data;
pub mod generators;

pub use data::{Mesh, Vertex};
pub use generators::Surface;
