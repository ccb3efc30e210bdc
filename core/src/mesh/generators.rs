//! Mesh generators for the primitive shapes level objects are built from.
//!
//! Every generator takes world-space corner positions and returns a
//! [`Mesh`] with u32 indices. Texture coordinates are scaled so that one
//! texture repeat covers one world unit.

use super::data::{Mesh, Vertex};

/// Texture and tint applied to a generated surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub layer: f32,
    pub colour: [f32; 4],
}

impl Surface {
    pub fn new(layer: u32, colour: [f32; 4]) -> Self {
        Self {
            layer: layer as f32,
            colour,
        }
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            layer: 0.0,
            colour: [1.0; 4],
        }
    }
}

fn length(a: [f32; 3], b: [f32; 3]) -> f32 {
    let d = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt()
}

/// Generate a quad from four corners given in winding order.
///
/// Produces two triangles (0,1,2) and (2,3,0). UVs span the edge lengths
/// so textures tile instead of stretching.
pub fn generate_quad(corners: [[f32; 3]; 4], surface: Surface) -> Mesh {
    let u = length(corners[0], corners[1]);
    let v = length(corners[1], corners[2]);
    let uvs = [[0.0, v], [u, v], [u, 0.0], [0.0, 0.0]];

    let vertices = corners
        .iter()
        .zip(uvs)
        .map(|(p, uv)| Vertex::new(*p, [uv[0], uv[1], surface.layer], surface.colour))
        .collect();

    Mesh {
        vertices,
        indices: vec![0, 1, 2, 2, 3, 0],
    }
}

/// Generate a single triangle.
pub fn generate_triangle(corners: [[f32; 3]; 3], surface: Surface) -> Mesh {
    let vertices = corners
        .iter()
        .map(|p| Vertex::new(*p, [p[0], p[2], surface.layer], surface.colour))
        .collect();

    Mesh {
        vertices,
        indices: vec![0, 1, 2],
    }
}

/// Generate a triangle fan around the first point.
///
/// Fewer than three points produce an empty mesh. UVs are planar (x, z).
pub fn generate_fan(points: &[[f32; 3]], surface: Surface) -> Mesh {
    if points.len() < 3 {
        return Mesh::new();
    }
    let vertices = points
        .iter()
        .map(|p| Vertex::new(*p, [p[0], p[2], surface.layer], surface.colour))
        .collect();

    let mut indices = Vec::with_capacity((points.len() - 2) * 3);
    for i in 1..points.len() as u32 - 1 {
        indices.extend_from_slice(&[0, i, i + 1]);
    }

    Mesh { vertices, indices }
}

/// Generate a closed prism from a bottom outline and per-corner heights.
///
/// `outline` holds the footprint in the XZ plane, `bottom` and `top` the
/// y value of each outline corner. Produces the bottom cap, the top cap
/// and one side quad per edge.
pub fn generate_prism(
    outline: &[[f32; 2]],
    bottom: &[f32],
    top: &[f32],
    top_surface: Surface,
    bottom_surface: Surface,
) -> Mesh {
    let n = outline.len();
    if n < 3 || bottom.len() != n || top.len() != n {
        return Mesh::new();
    }
    let lower: Vec<[f32; 3]> = outline
        .iter()
        .zip(bottom)
        .map(|(p, y)| [p[0], *y, p[1]])
        .collect();
    let upper: Vec<[f32; 3]> = outline
        .iter()
        .zip(top)
        .map(|(p, y)| [p[0], *y, p[1]])
        .collect();

    let mut mesh = generate_fan(&upper, top_surface);
    let mut reversed = lower.clone();
    reversed.reverse();
    mesh.append(generate_fan(&reversed, bottom_surface));

    for i in 0..n {
        let j = (i + 1) % n;
        mesh.append(generate_quad(
            [lower[i], lower[j], upper[j], upper[i]],
            bottom_surface,
        ));
    }
    mesh
}

/// Generate an axis-aligned box between `min` and `max`.
pub fn generate_box(min: [f32; 3], max: [f32; 3], surface: Surface) -> Mesh {
    let outline = [
        [min[0], min[2]],
        [max[0], min[2]],
        [max[0], max[2]],
        [min[0], max[2]],
    ];
    generate_prism(&outline, &[min[1]; 4], &[max[1]; 4], surface, surface)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_quad() {
        let mesh = generate_quad(
            [
                [0.0, 0.0, 0.0],
                [2.0, 0.0, 0.0],
                [2.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
            ],
            Surface::default(),
        );
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.index_count(), 6);
        // UVs tile by world length
        assert_eq!(mesh.vertices[1].tex_coords[0], 2.0);
    }

    #[test]
    fn test_generate_fan() {
        let points = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 1.0],
            [0.0, 0.0, 1.0],
            [-0.5, 0.0, 0.5],
        ];
        let mesh = generate_fan(&points, Surface::default());
        assert_eq!(mesh.vertex_count(), 5);
        assert_eq!(mesh.triangle_count(), 3);
        assert!(generate_fan(&points[..2], Surface::default()).is_empty());
    }

    #[test]
    fn test_generate_box() {
        let mesh = generate_box([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], Surface::new(3, [1.0; 4]));
        // 2 caps of 4 vertices plus 4 sides of 4 vertices
        assert_eq!(mesh.vertex_count(), 24);
        // 2 caps of 2 triangles plus 4 sides of 2 triangles
        assert_eq!(mesh.triangle_count(), 12);
        assert!(mesh.vertices.iter().all(|v| v.tex_coords[2] == 3.0));
    }

    #[test]
    fn test_prism_rejects_mismatched_heights() {
        let outline = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        let mesh = generate_prism(&outline, &[0.0; 2], &[1.0; 3], Surface::default(), Surface::default());
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_generate_triangle() {
        let mesh = generate_triangle(
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
            Surface::default(),
        );
        assert_eq!(mesh.triangle_count(), 1);
    }
}
