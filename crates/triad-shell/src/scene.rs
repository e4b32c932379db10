//! Fixed scene content: one triangle.

use triad_engine::render::Vertex;

/// The triangle uploaded at initialization, in normalized device coordinates.
pub const TRIANGLE: [Vertex; 3] = [
    Vertex::new(0.0, 0.5, 0.0),
    Vertex::new(0.5, -0.5, 0.0),
    Vertex::new(-0.5, -0.5, 0.0),
];

#[cfg(test)]
mod tests {
    use super::*;
    use triad_engine::render::vertex_bytes;

    #[test]
    fn triangle_upload_is_three_positions() {
        assert_eq!(vertex_bytes(&TRIANGLE).len(), 3 * std::mem::size_of::<Vertex>());
        assert_eq!(vertex_bytes(&TRIANGLE).len(), 36);
    }

    #[test]
    fn triangle_is_flat_and_clockwise() {
        assert!(TRIANGLE.iter().all(|v| v.position[2] == 0.0));

        let [a, b, c] = TRIANGLE.map(|v| v.position);
        let cross = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
        // Vertices are listed clockwise; culling is disabled so either winding draws.
        assert!(cross < 0.0);
    }
}
