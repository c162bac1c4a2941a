//! CPU meshing crate: per-face culled chunk meshes.
#![forbid(unsafe_code)]

mod face;
mod mesh_build;

use std::time::Instant;

use cairn_chunk::Chunk;
use cairn_geom::Vec3;
use cairn_voxel::VoxelRecord;

pub use face::{Face, QUAD_UVS};
pub use mesh_build::ChunkMesh;

/// Whether the face of `here` facing `neighbor` is visible.
///
/// `neighbor` is `None` outside the chunk; chunk borders always emit. Solid
/// neighbors hide the face, and so does water meeting water of the same level.
#[inline]
pub fn face_visible(here: &VoxelRecord, neighbor: Option<&VoxelRecord>) -> bool {
    match neighbor {
        None => true,
        Some(n) if n.is_solid() => false,
        Some(n) => !(here.is_water() && n.is_water() && here.water_level == n.water_level),
    }
}

/// Rebuilds chunk meshes, remembering how large the last one was so the next
/// rebuild reserves once.
#[derive(Debug, Clone)]
pub struct MeshBuilder {
    reserve_quads: usize,
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self { reserve_quads: 64 }
    }
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh mesh for `chunk`.
    pub fn build(&mut self, chunk: &Chunk) -> ChunkMesh {
        let mut mesh = ChunkMesh::default();
        self.rebuild(chunk, &mut mesh);
        mesh
    }

    /// Replaces the contents of `mesh` with the visible faces of `chunk`.
    /// Existing buffer capacity is reused.
    pub fn rebuild(&mut self, chunk: &Chunk, mesh: &mut ChunkMesh) {
        let t0 = Instant::now();
        mesh.clear_keep_capacity();
        mesh.reserve_quads(self.reserve_quads);

        let n = chunk.size() as i32;
        let vs = chunk.voxel_size();
        let half = vs * 0.5;
        for z in 0..n {
            for y in 0..n {
                for x in 0..n {
                    let Some(here) = chunk.get_voxel_record(x, y, z) else {
                        continue;
                    };
                    if here.is_air() {
                        continue;
                    }
                    let center = Vec3::new(
                        (x as f32 + 0.5) * vs,
                        (y as f32 + 0.5) * vs,
                        (z as f32 + 0.5) * vs,
                    );
                    let rgba = here.ty.color();
                    for face in Face::ALL {
                        let (dx, dy, dz) = face.delta();
                        let neighbor = chunk.get_voxel_record(x + dx, y + dy, z + dz);
                        if face_visible(here, neighbor) {
                            mesh.add_face(face, center, half, rgba);
                        }
                    }
                }
            }
        }

        let quads = mesh.face_count();
        self.reserve_quads = quads + quads / 4 + 64;
        log::debug!(
            target: "mesh",
            "ms={} chunk_mesh faces={} verts={} coord={}",
            t0.elapsed().as_millis(),
            quads,
            mesh.vertex_count(),
            chunk.coord
        );
    }
}

/// One-shot convenience over [`MeshBuilder::build`].
pub fn build_chunk_mesh(chunk: &Chunk) -> ChunkMesh {
    MeshBuilder::new().build(chunk)
}
