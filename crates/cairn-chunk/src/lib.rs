//! Chunk voxel storage, addressing, save format, and terrain fill.
#![forbid(unsafe_code)]

mod codec;

use cairn_geom::Vec3;
use cairn_voxel::{VoxelRecord, VoxelType};
use cairn_world::{ChunkCoord, TerrainGenerator};

pub use codec::{BYTES_PER_VOXEL, ChunkDataError};

pub const DEFAULT_CHUNK_SIZE: usize = 16;
pub const DEFAULT_VOXEL_SIZE: f32 = 100.0;

/// Cubic grid of `size³` voxels stored flat as `x + y·size + z·size²`.
///
/// Every accessor treats coordinates outside `[0, size)³` as empty space:
/// reads see Air or `None`, writes are dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct Chunk {
    pub coord: ChunkCoord,
    size: usize,
    voxel_size: f32,
    voxels: Vec<VoxelRecord>,
}

impl Chunk {
    /// Allocates an all-air chunk.
    ///
    /// # Panics
    /// On allocation failure; see [`Chunk::try_new`] for the soft variant.
    pub fn new(coord: ChunkCoord, size: usize, voxel_size: f32) -> Self {
        Self {
            coord,
            size,
            voxel_size,
            voxels: vec![VoxelRecord::AIR; size * size * size],
        }
    }

    /// Allocates an all-air chunk, returning `None` if the backing storage
    /// cannot be reserved.
    pub fn try_new(coord: ChunkCoord, size: usize, voxel_size: f32) -> Option<Self> {
        let volume = size.checked_mul(size)?.checked_mul(size)?;
        let mut voxels = Vec::new();
        voxels.try_reserve_exact(volume).ok()?;
        voxels.resize(volume, VoxelRecord::AIR);
        Some(Self {
            coord,
            size,
            voxel_size,
            voxels,
        })
    }

    /// Re-targets this chunk at `coord` and clears every cell to Air.
    pub fn initialize(&mut self, coord: ChunkCoord) {
        self.coord = coord;
        self.voxels.clear();
        self.voxels
            .resize(self.size * self.size * self.size, VoxelRecord::AIR);
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn voxel_size(&self) -> f32 {
        self.voxel_size
    }

    #[inline]
    pub fn volume(&self) -> usize {
        self.voxels.len()
    }

    /// World units spanned by one edge of this chunk.
    #[inline]
    pub fn world_size(&self) -> f32 {
        self.size as f32 * self.voxel_size
    }

    /// World-space corner: `coord · size · voxel_size`.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.coord.origin(self.world_size())
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32, z: i32) -> bool {
        let n = self.size as i64;
        let inside = |v: i32| (0..n).contains(&i64::from(v));
        inside(x) && inside(y) && inside(z)
    }

    /// Flat index of an in-range cell. Callers must check bounds first.
    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        x + y * self.size + z * self.size * self.size
    }

    #[inline]
    pub fn local_index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        if self.in_bounds(x, y, z) {
            Some(self.idx(x as usize, y as usize, z as usize))
        } else {
            None
        }
    }

    /// Inverse of [`Chunk::idx`].
    #[inline]
    pub fn coords_of(&self, index: usize) -> Option<(usize, usize, usize)> {
        if index >= self.voxels.len() {
            return None;
        }
        let n = self.size;
        Some((index % n, (index / n) % n, index / (n * n)))
    }

    #[inline]
    pub fn get_voxel(&self, x: i32, y: i32, z: i32) -> VoxelType {
        self.get_voxel_record(x, y, z)
            .map(|r| r.ty)
            .unwrap_or(VoxelType::Air)
    }

    #[inline]
    pub fn get_voxel_record(&self, x: i32, y: i32, z: i32) -> Option<&VoxelRecord> {
        self.local_index(x, y, z).map(|i| &self.voxels[i])
    }

    #[inline]
    pub fn get_voxel_record_mut(&mut self, x: i32, y: i32, z: i32) -> Option<&mut VoxelRecord> {
        self.local_index(x, y, z).map(move |i| &mut self.voxels[i])
    }

    /// Overwrites only the type of a cell. Health and custom data stay as
    /// they were; the water level follows [`VoxelRecord::retype`].
    pub fn set_voxel(&mut self, x: i32, y: i32, z: i32, ty: VoxelType) {
        if let Some(r) = self.get_voxel_record_mut(x, y, z) {
            r.retype(ty);
        }
    }

    /// Replaces a whole cell.
    pub fn set_voxel_record(&mut self, x: i32, y: i32, z: i32, record: VoxelRecord) {
        if let Some(r) = self.get_voxel_record_mut(x, y, z) {
            *r = record;
        }
    }

    #[inline]
    pub fn records(&self) -> &[VoxelRecord] {
        &self.voxels
    }

    #[inline]
    pub fn records_mut(&mut self) -> &mut [VoxelRecord] {
        &mut self.voxels
    }

    #[inline]
    pub fn has_non_air(&self) -> bool {
        self.voxels.iter().any(|r| !r.is_air())
    }

    #[inline]
    pub fn is_all_air(&self) -> bool {
        !self.has_non_air()
    }

    #[inline]
    pub fn has_water(&self) -> bool {
        self.voxels.iter().any(|r| r.is_water())
    }

    pub fn count_of(&self, ty: VoxelType) -> usize {
        self.voxels.iter().filter(|r| r.ty == ty).count()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChunkOccupancy {
    Empty,
    Populated,
}

impl ChunkOccupancy {
    #[inline]
    pub fn is_empty(self) -> bool {
        matches!(self, ChunkOccupancy::Empty)
    }

    #[inline]
    pub fn has_blocks(self) -> bool {
        matches!(self, ChunkOccupancy::Populated)
    }
}

/// Overwrites every cell of `chunk` with the height-field terrain for its
/// position. The caller is responsible for rebuilding the mesh afterwards.
pub fn fill_terrain(chunk: &mut Chunk, generator: &TerrainGenerator) -> ChunkOccupancy {
    let n = chunk.size as i32;
    let vs = chunk.voxel_size;
    // i64: far chunk coordinates times the edge length leave the i32 range
    let base = |c: i32| i64::from(c) * i64::from(n);
    let (base_x, base_y, base_z) = (base(chunk.coord.cx), base(chunk.coord.cy), base(chunk.coord.cz));
    let mut heights = Vec::with_capacity(chunk.size * chunk.size);
    for y in 0..n {
        for x in 0..n {
            let wx = (base_x + i64::from(x)) as f32 * vs;
            let wy = (base_y + i64::from(y)) as f32 * vs;
            heights.push(generator.column_height(wx, wy));
        }
    }
    let mut has_blocks = false;
    for z in 0..n {
        let voxel_z = (base_z + i64::from(z)) as f32;
        for y in 0..n {
            for x in 0..n {
                let height = heights[(x + y * n) as usize];
                let ty = TerrainGenerator::classify(voxel_z, height);
                if ty != VoxelType::Air {
                    has_blocks = true;
                }
                chunk.set_voxel(x, y, z, ty);
            }
        }
    }
    if has_blocks {
        ChunkOccupancy::Populated
    } else {
        ChunkOccupancy::Empty
    }
}
