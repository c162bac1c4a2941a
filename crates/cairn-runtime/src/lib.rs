//! World manager: owns loaded chunks, streams them around a reference point,
//! and drives water ticks and remeshing.
#![forbid(unsafe_code)]

mod loaded;
mod report;
mod streaming;

use std::path::PathBuf;
use std::time::Instant;

use cairn_chunk::{Chunk, ChunkDataError, fill_terrain};
use cairn_geom::Vec3;
use cairn_io::{SaveDir, SaveError, WorldMeta};
use cairn_mesh_cpu::{ChunkMesh, MeshBuilder};
use cairn_voxel::VoxelType;
use cairn_water::{WaterClock, WaterSimulator, WaterStep};
use cairn_world::config::InvalidConfig;
use cairn_world::{ChunkCoord, TerrainGenerator, WorldConfig};
use hashbrown::HashMap;
use rayon::prelude::*;

pub use loaded::LoadedChunk;
pub use report::{EvictedChunk, StreamReport, TickReport, WorldStats};
pub use streaming::window_chunk_coords;

pub struct VoxelWorld {
    cfg: WorldConfig,
    generator: TerrainGenerator,
    chunks: HashMap<ChunkCoord, LoadedChunk>,
    mesher: MeshBuilder,
    water: WaterSimulator,
    save: Option<SaveDir>,
    last_stream_pos: Option<Vec3>,
}

impl VoxelWorld {
    pub fn new(cfg: WorldConfig) -> Result<Self, InvalidConfig> {
        cfg.validate()?;
        let generator = TerrainGenerator::from_config(&cfg.terrain);
        Ok(Self {
            cfg,
            generator,
            chunks: HashMap::new(),
            mesher: MeshBuilder::new(),
            water: WaterSimulator::new(),
            save: None,
            last_stream_pos: None,
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.cfg
    }

    pub fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }

    pub fn save_dir(&self) -> Option<&SaveDir> {
        self.save.as_ref()
    }

    #[inline]
    pub fn world_to_chunk_coord(&self, pos: Vec3) -> ChunkCoord {
        ChunkCoord::from_world(pos, self.cfg.chunk_world_size())
    }

    /// Returns the chunk at `coord`, creating, filling and meshing it first
    /// if it is not loaded. `None` only when the chunk cannot be allocated.
    pub fn get_or_create_chunk(&mut self, coord: ChunkCoord) -> Option<&mut LoadedChunk> {
        if !self.chunks.contains_key(&coord) {
            let lc = self.create_chunk(coord)?;
            self.chunks.insert(coord, lc);
        }
        self.chunks.get_mut(&coord)
    }

    fn create_chunk(&mut self, coord: ChunkCoord) -> Option<LoadedChunk> {
        let Some(mut chunk) = Chunk::try_new(coord, self.cfg.chunk.size, self.cfg.chunk.voxel_size)
        else {
            log::warn!(target: "stream", "chunk {} allocation failed", coord);
            return None;
        };
        let restored = match self.save.as_ref().map(|s| s.load_chunk(&mut chunk)) {
            Some(Ok(found)) => found,
            Some(Err(e)) => {
                log::warn!(target: "io", "chunk {} not restored, regenerating: {}", coord, e);
                false
            }
            None => false,
        };
        let clock = WaterClock::new(self.cfg.water.tick_interval);
        let mut lc = if restored || fill_terrain(&mut chunk, &self.generator).has_blocks() {
            LoadedChunk::new(chunk, clock, &mut self.mesher)
        } else {
            LoadedChunk::empty(chunk, clock)
        };
        lc.restored = restored;
        log::debug!(
            target: "stream",
            "chunk created {} restored={} faces={}",
            coord,
            restored,
            lc.mesh.face_count()
        );
        Some(lc)
    }

    /// Loads every chunk within `render_distance` on X/Y and
    /// `vertical_radius` on Z of the chunk holding `reference`, and evicts
    /// loaded chunks farther than `render_distance + evict_margin`.
    ///
    /// Evicted chunks are serialized into the report and, when a save
    /// directory is attached, written to it.
    pub fn update_visible_chunks(&mut self, reference: Vec3) -> StreamReport {
        let t0 = Instant::now();
        let center = self.world_to_chunk_coord(reference);
        let radius = self.cfg.streaming.render_distance;
        let vertical = self.cfg.streaming.vertical_radius;
        let keep = self.cfg.streaming.evict_distance();
        let mut report = StreamReport {
            center,
            ..StreamReport::default()
        };

        for coord in window_chunk_coords(center, radius, vertical, keep) {
            if self.chunks.contains_key(&coord) {
                continue;
            }
            if self.get_or_create_chunk(coord).is_some() {
                report.created.push(coord);
            } else {
                report.failed.push(coord);
            }
        }

        let evict_limit_sq = i64::from(keep) * i64::from(keep);
        let mut doomed: Vec<ChunkCoord> = self
            .chunks
            .keys()
            .copied()
            .filter(|&c| center.distance_sq(c) > evict_limit_sq)
            .collect();
        doomed.sort();
        for coord in doomed {
            let Some(lc) = self.chunks.remove(&coord) else {
                continue;
            };
            let data = lc.chunk.serialize();
            if let Some(save) = &self.save {
                if let Err(e) = save.write_chunk_bytes(coord, &data) {
                    log::warn!(target: "io", "chunk {} not saved on eviction: {}", coord, e);
                }
            }
            log::debug!(target: "stream", "chunk evicted {}", coord);
            report.evicted.push(EvictedChunk { coord, data });
        }

        self.last_stream_pos = Some(reference);
        log::info!(
            target: "stream",
            "ms={} stream center={} created={} evicted={} failed={} loaded={}",
            t0.elapsed().as_millis(),
            center,
            report.created.len(),
            report.evicted.len(),
            report.failed.len(),
            self.chunks.len()
        );
        report
    }

    /// Whether `reference` has moved far enough since the last streaming
    /// pass to warrant another. Always true before the first pass.
    pub fn needs_restream(&self, reference: Vec3) -> bool {
        match self.last_stream_pos {
            None => true,
            Some(last) => last.distance(reference) > self.cfg.streaming.restream_threshold,
        }
    }

    /// Per-frame driver: restream if needed, then run due water ticks.
    pub fn tick(&mut self, dt: f32, reference: Vec3) -> TickReport {
        let mut report = TickReport::default();
        if self.needs_restream(reference) {
            report.streamed = Some(self.update_visible_chunks(reference));
        }

        let due: Vec<&mut LoadedChunk> = self
            .chunks
            .values_mut()
            .filter_map(|lc| lc.water_clock.advance(dt).then_some(lc))
            .collect();
        let steps: Vec<WaterStep> = if self.cfg.water.parallel {
            due.into_par_iter()
                .map_init(
                    || (WaterSimulator::new(), MeshBuilder::new()),
                    |(sim, mesher), lc| lc.step_water(sim, mesher),
                )
                .collect()
        } else {
            let water = &mut self.water;
            let mesher = &mut self.mesher;
            due.into_iter()
                .map(|lc| lc.step_water(water, mesher))
                .collect()
        };

        report.water_steps = steps.len();
        for s in &steps {
            report.water_changed += s.changed;
            if s.needs_remesh() {
                report.remeshed += 1;
            }
        }
        if report.water_changed > 0 {
            log::debug!(
                target: "water",
                "water tick steps={} changed={} remeshed={}",
                report.water_steps,
                report.water_changed,
                report.remeshed
            );
        }
        report
    }

    /// Chunk coordinate and local cell of a world position.
    fn locate(&self, pos: Vec3) -> (ChunkCoord, i32, i32, i32) {
        let coord = self.world_to_chunk_coord(pos);
        let origin = coord.origin(self.cfg.chunk_world_size());
        let (x, y, z) = ((pos - origin) / self.cfg.chunk.voxel_size).floor_i32();
        let max = self.cfg.chunk.size as i32 - 1;
        (coord, x.clamp(0, max), y.clamp(0, max), z.clamp(0, max))
    }

    /// Type of the voxel containing `pos`, loading its chunk if needed.
    /// Air when the chunk cannot be created.
    pub fn voxel_at_world_position(&mut self, pos: Vec3) -> VoxelType {
        let (coord, x, y, z) = self.locate(pos);
        self.get_or_create_chunk(coord)
            .map(|lc| lc.chunk.get_voxel(x, y, z))
            .unwrap_or(VoxelType::Air)
    }

    /// Sets the voxel containing `pos` and remeshes its chunk. Returns
    /// whether a chunk was available to receive the edit.
    pub fn set_voxel_at_world_position(&mut self, pos: Vec3, ty: VoxelType) -> bool {
        let (coord, x, y, z) = self.locate(pos);
        if self.get_or_create_chunk(coord).is_none() {
            return false;
        }
        let Some(lc) = self.chunks.get_mut(&coord) else {
            return false;
        };
        lc.chunk.set_voxel(x, y, z, ty);
        lc.remesh(&mut self.mesher);
        true
    }

    /// Replaces the contents of the chunk at `coord` from a serialized
    /// buffer and remeshes it. Returns `Ok(false)` when the chunk cannot be
    /// created; a malformed buffer leaves the chunk as it was.
    pub fn load_chunk_bytes(&mut self, coord: ChunkCoord, bytes: &[u8]) -> Result<bool, ChunkDataError> {
        if self.get_or_create_chunk(coord).is_none() {
            return Ok(false);
        }
        let Some(lc) = self.chunks.get_mut(&coord) else {
            return Ok(false);
        };
        lc.chunk.deserialize(bytes)?;
        lc.restored = true;
        lc.remesh(&mut self.mesher);
        Ok(true)
    }

    /// Uses `root` as the backing save: chunks created from now on are
    /// restored from it when stored, and evicted chunks are written to it.
    pub fn attach_save_dir(&mut self, root: impl Into<PathBuf>) -> Result<(), SaveError> {
        let save = SaveDir::open_or_create(root, WorldMeta::from_config(&self.cfg))?;
        self.save = Some(save);
        Ok(())
    }

    /// Writes every loaded chunk to `root`. Returns how many were written.
    pub fn save_all(&self, root: impl Into<PathBuf>) -> Result<usize, SaveError> {
        let save = SaveDir::open_or_create(root, WorldMeta::from_config(&self.cfg))?;
        self.write_all(&save)
    }

    /// Writes every loaded chunk to the attached save, if any.
    pub fn flush(&self) -> Result<usize, SaveError> {
        match &self.save {
            Some(save) => self.write_all(save),
            None => Ok(0),
        }
    }

    fn write_all(&self, save: &SaveDir) -> Result<usize, SaveError> {
        for lc in self.chunks.values() {
            save.write_chunk(&lc.chunk)?;
        }
        log::info!(target: "io", "saved {} chunks to {}", self.chunks.len(), save.root().display());
        Ok(self.chunks.len())
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord).map(|lc| &lc.chunk)
    }

    pub fn loaded(&self, coord: ChunkCoord) -> Option<&LoadedChunk> {
        self.chunks.get(&coord)
    }

    pub fn mesh(&self, coord: ChunkCoord) -> Option<&ChunkMesh> {
        self.chunks.get(&coord).map(|lc| &lc.mesh)
    }

    pub fn is_loaded(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn loaded_coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    pub fn stats(&self) -> WorldStats {
        let mut stats = WorldStats {
            chunks: self.chunks.len(),
            ..WorldStats::default()
        };
        for lc in self.chunks.values() {
            stats.faces += lc.mesh.face_count();
            stats.triangles += lc.mesh.triangle_count();
            if lc.chunk.has_water() {
                stats.water_chunks += 1;
            }
        }
        stats
    }
}
