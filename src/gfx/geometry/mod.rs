//! Procedural geometry generation.
//!
//! Small primitive generators used for the scene props that do not come from
//! OBJ files (the moon sphere and the bird bodies).

pub mod primitives;

pub use primitives::*;

/// Generated geometry, ready to be turned into a [`crate::gfx::scene::Mesh`].
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Applies a uniform scale and translation to every vertex.
    ///
    /// Lets a prop bake its placement into the geometry instead of carrying a
    /// per-part transform.
    pub fn transformed(mut self, scale: f32, offset: [f32; 3]) -> Self {
        for v in self.vertices.iter_mut() {
            v[0] = v[0] * scale + offset[0];
            v[1] = v[1] * scale + offset[1];
            v[2] = v[2] * scale + offset[2];
        }
        self
    }

    /// Applies a per-axis scale and translation to every vertex.
    ///
    /// Normals are left untouched, so this only suits axis-aligned box props
    /// whose normals stay axis-aligned under the scale.
    pub fn stretched(mut self, scale: [f32; 3], offset: [f32; 3]) -> Self {
        for v in self.vertices.iter_mut() {
            v[0] = v[0] * scale[0] + offset[0];
            v[1] = v[1] * scale[1] + offset[1];
            v[2] = v[2] * scale[2] + offset[2];
        }
        self
    }

    /// Merges another piece of geometry into this one.
    pub fn merge(&mut self, other: &GeometryData) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Flattens into the buffer layout the mesh constructor expects.
    pub fn to_buffers(&self) -> (Vec<f32>, Vec<f32>, Vec<u32>) {
        let positions = self.vertices.iter().flatten().copied().collect();
        let normals = self.normals.iter().flatten().copied().collect();
        (positions, normals, self.indices.clone())
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_offsets_indices() {
        let mut a = generate_cube();
        let b = generate_cube();
        let base = a.vertex_count() as u32;
        a.merge(&b);
        assert_eq!(a.vertex_count(), 48);
        assert_eq!(a.indices[36], base);
    }

    #[test]
    fn transformed_moves_vertices() {
        let cube = generate_cube().transformed(2.0, [0.0, 10.0, 0.0]);
        for v in &cube.vertices {
            assert!((9.0..=11.0).contains(&v[1]));
        }
    }

    #[test]
    fn stretched_scales_each_axis() {
        let slab = generate_cube().stretched([2.0, 0.1, 1.0], [0.0, 0.0, 0.0]);
        for v in &slab.vertices {
            assert!(v[0].abs() <= 1.0 + 1e-6);
            assert!(v[1].abs() <= 0.05 + 1e-6);
            assert!(v[2].abs() <= 0.5 + 1e-6);
        }
    }

    #[test]
    fn to_buffers_flattens() {
        let cube = generate_cube();
        let (positions, normals, indices) = cube.to_buffers();
        assert_eq!(positions.len(), cube.vertex_count() * 3);
        assert_eq!(normals.len(), positions.len());
        assert_eq!(indices.len(), 36);
    }
}
