use cairn_chunk::Chunk;
use cairn_mesh_cpu::{ChunkMesh, MeshBuilder};
use cairn_water::{WaterClock, WaterSimulator, WaterStep};

/// A chunk resident in the world together with its derived render data and
/// its water schedule.
#[derive(Debug, Clone)]
pub struct LoadedChunk {
    pub chunk: Chunk,
    pub mesh: ChunkMesh,
    pub water_clock: WaterClock,
    /// Completed mesh builds since the chunk was loaded.
    pub mesh_builds: u32,
    /// Whether the contents came from a save rather than the generator.
    pub restored: bool,
}

impl LoadedChunk {
    pub fn new(chunk: Chunk, water_clock: WaterClock, mesher: &mut MeshBuilder) -> Self {
        let mesh = mesher.build(&chunk);
        Self {
            chunk,
            mesh,
            water_clock,
            mesh_builds: 1,
            restored: false,
        }
    }

    /// A chunk known to hold nothing but air; no mesh build is needed.
    pub fn empty(chunk: Chunk, water_clock: WaterClock) -> Self {
        Self {
            chunk,
            mesh: ChunkMesh::default(),
            water_clock,
            mesh_builds: 0,
            restored: false,
        }
    }

    pub fn remesh(&mut self, mesher: &mut MeshBuilder) {
        mesher.rebuild(&self.chunk, &mut self.mesh);
        self.mesh_builds = self.mesh_builds.wrapping_add(1);
    }

    /// One water tick followed by at most one mesh rebuild.
    pub fn step_water(&mut self, sim: &mut WaterSimulator, mesher: &mut MeshBuilder) -> WaterStep {
        let step = sim.step(&mut self.chunk);
        if step.needs_remesh() {
            self.remesh(mesher);
        }
        step
    }
}
