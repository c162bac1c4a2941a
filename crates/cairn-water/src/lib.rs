//! Cellular water flow inside a single chunk.
#![forbid(unsafe_code)]

mod clock;

use cairn_chunk::Chunk;
use cairn_voxel::{MAX_WATER_LEVEL, VoxelRecord, VoxelType};

pub use clock::{DEFAULT_TICK_INTERVAL, WaterClock};

/// Outcome of one simulation tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WaterStep {
    /// Cells whose record differs after the tick.
    pub changed: usize,
}

impl WaterStep {
    #[inline]
    pub fn needs_remesh(&self) -> bool {
        self.changed > 0
    }
}

/// Reusable scratch for [`WaterSimulator::step`]. Holds the pending level
/// per cell (`0` meaning Air) and which cells were touched.
#[derive(Debug, Default, Clone)]
pub struct WaterSimulator {
    pending: Vec<Option<u8>>,
    touched: Vec<usize>,
}

impl WaterSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances `chunk` by one tick.
    ///
    /// All rules read the chunk as it was at the start of the tick. Writes
    /// aimed at the same cell merge to the highest level, so the result does
    /// not depend on scan order. Water never leaves the chunk.
    pub fn step(&mut self, chunk: &mut Chunk) -> WaterStep {
        let volume = chunk.volume();
        self.pending.clear();
        self.pending.resize(volume, None);
        self.touched.clear();

        let pending = &mut self.pending;
        let touched = &mut self.touched;
        let mut schedule = |idx: usize, level: u8| match pending[idx] {
            Some(prev) if prev >= level => {}
            Some(_) => pending[idx] = Some(level),
            None => {
                pending[idx] = Some(level);
                touched.push(idx);
            }
        };

        for (i, here) in chunk.records().iter().enumerate() {
            if !here.is_water() {
                continue;
            }
            let Some((x, y, z)) = chunk.coords_of(i) else {
                continue;
            };
            let (x, y, z) = (x as i32, y as i32, z as i32);
            let flowing = here.ty == VoxelType::Water;

            let open_below = chunk
                .local_index(x, y, z - 1)
                .filter(|&below| chunk.records()[below].is_air());
            if let Some(below) = open_below {
                schedule(below, MAX_WATER_LEVEL);
                if flowing {
                    schedule(i, here.water_level.saturating_sub(1));
                }
                continue;
            }

            if here.water_level <= 1 {
                continue;
            }
            let spread = here.water_level - 1;
            for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                let Some(n) = chunk.local_index(x + dx, y + dy, z) else {
                    continue;
                };
                let there = &chunk.records()[n];
                if there.is_solid() {
                    continue;
                }
                if !there.is_water() || there.water_level < spread {
                    schedule(n, spread);
                }
            }
        }

        let mut changed = 0;
        for &idx in &self.touched {
            let Some(level) = self.pending[idx] else {
                continue;
            };
            let cell = &mut chunk.records_mut()[idx];
            if cell.ty == VoxelType::WaterSource {
                continue;
            }
            let next = if level == 0 {
                VoxelRecord {
                    ty: VoxelType::Air,
                    water_level: 0,
                    ..*cell
                }
            } else {
                VoxelRecord {
                    ty: VoxelType::Water,
                    water_level: level,
                    ..*cell
                }
            };
            if next != *cell {
                *cell = next;
                changed += 1;
            }
        }
        if changed > 0 {
            log::trace!(target: "water", "water_step changed={} coord={}", changed, chunk.coord);
        }
        WaterStep { changed }
    }
}

/// One tick with throwaway scratch space.
pub fn step(chunk: &mut Chunk) -> WaterStep {
    WaterSimulator::new().step(chunk)
}
