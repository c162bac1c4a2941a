use cairn_voxel::VoxelType;
use fastnoise_lite::{FastNoiseLite, NoiseType};
use serde::{Deserialize, Serialize};

use crate::config::TerrainSection;

/// Noise source behind the height field.
///
/// `Trig` is the product-of-sines hash the game shipped with. It is periodic
/// and cheap, not gradient noise, so it gives no smoothness guarantees beyond
/// those of `sin`/`cos`. `OpenSimplex` swaps in real coherent noise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseKind {
    #[default]
    Trig,
    OpenSimplex,
}

/// Deterministic single-surface height-field generator.
pub struct TerrainGenerator {
    pub seed: i32,
    pub frequency: f32,
    pub height_scale: f32,
    pub kind: NoiseKind,
    simplex: FastNoiseLite,
}

impl TerrainGenerator {
    pub fn new(seed: i32, frequency: f32, height_scale: f32, kind: NoiseKind) -> Self {
        let mut simplex = FastNoiseLite::with_seed(seed);
        simplex.set_noise_type(Some(NoiseType::OpenSimplex2));
        simplex.set_frequency(Some(frequency));
        Self {
            seed,
            frequency,
            height_scale,
            kind,
            simplex,
        }
    }

    pub fn from_config(cfg: &TerrainSection) -> Self {
        Self::new(cfg.seed, cfg.frequency, cfg.height_scale, cfg.noise)
    }

    /// Noise in `[0, 1]` at world-unit coordinates.
    pub fn noise(&self, x: f32, y: f32, z: f32) -> f32 {
        match self.kind {
            NoiseKind::Trig => {
                let f = self.frequency;
                let s = self.seed as f32;
                let n = (x * f + s).sin() * (y * f + s).cos() * (z * f + s).sin();
                ((n + 1.0) * 0.5).clamp(0.0, 1.0)
            }
            NoiseKind::OpenSimplex => {
                let n = self.simplex.get_noise_3d(x, y, z);
                ((n + 1.0) * 0.5).clamp(0.0, 1.0)
            }
        }
    }

    /// Surface height, in voxels, of the column at world-unit `(x, y)`.
    #[inline]
    pub fn column_height(&self, world_x: f32, world_y: f32) -> f32 {
        self.noise(world_x, world_y, 0.0) * self.height_scale
    }

    /// Layering below a surface at `height`: stone, two dirt, one grass.
    #[inline]
    pub fn classify(voxel_z: f32, height: f32) -> VoxelType {
        if voxel_z >= height {
            VoxelType::Air
        } else if voxel_z < height - 3.0 {
            VoxelType::Stone
        } else if voxel_z < height - 1.0 {
            VoxelType::Dirt
        } else {
            VoxelType::Grass
        }
    }

    /// Voxel type for the cell whose corner sits at world-unit position
    /// `(world_x, world_y, world_z)`.
    pub fn voxel_at(&self, world_x: f32, world_y: f32, world_z: f32, voxel_size: f32) -> VoxelType {
        let height = self.column_height(world_x, world_y);
        Self::classify(world_z / voxel_size, height)
    }
}
