//! CPU-side mesh representation produced by the OBJ loader.

/// Flat OBJ geometry, ready to hand to `bufferData`-style uploads.
///
/// The four arrays are independent: `normals` and `texture_coords` are in
/// declaration order and are *not* re-indexed per face vertex.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjMesh {
    /// (x, y, z) triples.
    pub vertices: Vec<f32>,
    /// Zero-based triangle list; length is always a multiple of 3.
    pub indices: Vec<u32>,
    /// (nx, ny, nz) triples.
    pub normals: Vec<f32>,
    /// (u, v) pairs.
    pub texture_coords: Vec<f32>,
}

impl ObjMesh {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    #[inline]
    pub fn normal_count(&self) -> usize {
        self.normals.len() / 3
    }

    #[inline]
    pub fn texture_coord_count(&self) -> usize {
        self.texture_coords.len() / 2
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns `true` if both vertex and index arrays are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty() && !self.indices.is_empty()
    }

    /// Every index refers to a declared vertex.
    pub fn indices_in_bounds(&self) -> bool {
        let count = self.vertex_count();
        self.indices.iter().all(|&i| (i as usize) < count)
    }

    /// Consume into `(vertices, indices, normals, texture_coords)`.
    pub fn into_parts(self) -> (Vec<f32>, Vec<u32>, Vec<f32>, Vec<f32>) {
        (self.vertices, self.indices, self.normals, self.texture_coords)
    }
}
