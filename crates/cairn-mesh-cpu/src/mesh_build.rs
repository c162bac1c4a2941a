use cairn_geom::Vec3;

use crate::face::{Face, QUAD_UVS};

/// Parallel vertex/index arrays handed to the rendering side. Positions are
/// chunk-local; the renderer places the mesh at the chunk origin.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct ChunkMesh {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<[f32; 2]>,
    pub colors: Vec<[u8; 4]>,
}

impl ChunkMesh {
    /// Clears all arrays but retains capacity for reuse across rebuilds.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.positions.clear();
        self.indices.clear();
        self.normals.clear();
        self.uvs.clear();
        self.colors.clear();
    }

    /// Pre-reserve capacity for approximately `n_quads` quads worth of data.
    #[inline]
    pub fn reserve_quads(&mut self, n_quads: usize) {
        self.positions.reserve(n_quads * 4);
        self.normals.reserve(n_quads * 4);
        self.uvs.reserve(n_quads * 4);
        self.colors.reserve(n_quads * 4);
        self.indices.reserve(n_quads * 6);
    }

    /// Appends one cube face of a cell centered at `center` with half-extent
    /// `half`: four vertices and the triangles (0,1,2), (0,2,3).
    pub fn add_face(&mut self, face: Face, center: Vec3, half: f32, rgba: [u8; 4]) {
        let base = self.positions.len() as u32;
        let n = face.normal();
        for (corner, uv) in face.corners(half).into_iter().zip(QUAD_UVS) {
            self.positions.push(center + corner);
            self.normals.push(n);
            self.uvs.push(uv);
            self.colors.push(rgba);
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.positions.len() / 4
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
