use cairn_world::ChunkCoord;

/// A chunk dropped by streaming, with its serialized contents so the caller
/// can keep it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvictedChunk {
    pub coord: ChunkCoord,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamReport {
    pub center: ChunkCoord,
    pub created: Vec<ChunkCoord>,
    pub evicted: Vec<EvictedChunk>,
    /// Coordinates that could not be allocated this pass.
    pub failed: Vec<ChunkCoord>,
}

impl StreamReport {
    pub fn evicted_coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.evicted.iter().map(|e| e.coord)
    }

    pub fn evicted_bytes(&self) -> usize {
        self.evicted.iter().map(|e| e.data.len()).sum()
    }

    pub fn is_noop(&self) -> bool {
        self.created.is_empty() && self.evicted.is_empty() && self.failed.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Present when this tick restreamed around the reference point.
    pub streamed: Option<StreamReport>,
    pub water_steps: usize,
    pub water_changed: usize,
    pub remeshed: usize,
}

/// Snapshot of what the world holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorldStats {
    pub chunks: usize,
    pub faces: usize,
    pub triangles: usize,
    pub water_chunks: usize,
}
