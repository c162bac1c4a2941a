use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::terrain::NoiseKind;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    #[serde(default)]
    pub chunk: ChunkSection,
    #[serde(default)]
    pub terrain: TerrainSection,
    #[serde(default)]
    pub streaming: StreamingSection,
    #[serde(default)]
    pub water: WaterSection,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChunkSection {
    /// Edge length in voxels; chunks are cubes.
    #[serde(default = "default_chunk_size")]
    pub size: usize,
    /// World units per voxel edge.
    #[serde(default = "default_voxel_size")]
    pub voxel_size: f32,
}
fn default_chunk_size() -> usize {
    16
}
fn default_voxel_size() -> f32 {
    100.0
}
impl Default for ChunkSection {
    fn default() -> Self {
        Self {
            size: default_chunk_size(),
            voxel_size: default_voxel_size(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainSection {
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default = "default_height_scale")]
    pub height_scale: f32,
    #[serde(default = "default_frequency")]
    pub frequency: f32,
    #[serde(default)]
    pub noise: NoiseKind,
}
fn default_seed() -> i32 {
    12345
}
fn default_height_scale() -> f32 {
    10.0
}
fn default_frequency() -> f32 {
    0.01
}
impl Default for TerrainSection {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            height_scale: default_height_scale(),
            frequency: default_frequency(),
            noise: NoiseKind::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StreamingSection {
    /// Horizontal load radius in chunks.
    #[serde(default = "default_render_distance")]
    pub render_distance: i32,
    /// Vertical load radius in chunks.
    #[serde(default = "default_vertical_radius")]
    pub vertical_radius: i32,
    /// World units the reference point must move before restreaming.
    #[serde(default = "default_restream_threshold")]
    pub restream_threshold: f32,
    /// Extra chunks past the render distance before a chunk is evicted.
    #[serde(default = "default_evict_margin")]
    pub evict_margin: i32,
}
fn default_render_distance() -> i32 {
    8
}
fn default_vertical_radius() -> i32 {
    1
}
fn default_restream_threshold() -> f32 {
    1000.0
}
fn default_evict_margin() -> i32 {
    2
}
impl Default for StreamingSection {
    fn default() -> Self {
        Self {
            render_distance: default_render_distance(),
            vertical_radius: default_vertical_radius(),
            restream_threshold: default_restream_threshold(),
            evict_margin: default_evict_margin(),
        }
    }
}

impl StreamingSection {
    /// Chunks farther than this (Euclidean, chunk space) are evicted.
    #[inline]
    pub fn evict_distance(&self) -> i32 {
        self.render_distance.saturating_add(self.evict_margin)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaterSection {
    /// Seconds between water steps of one chunk.
    #[serde(default = "default_tick_interval")]
    pub tick_interval: f32,
    /// Step due chunks on the rayon pool instead of the calling thread.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}
fn default_tick_interval() -> f32 {
    0.1
}
fn default_parallel() -> bool {
    true
}
impl Default for WaterSection {
    fn default() -> Self {
        Self {
            tick_interval: default_tick_interval(),
            parallel: default_parallel(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvalidConfig(pub String);

impl fmt::Display for InvalidConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid world config: {}", self.0)
    }
}

impl Error for InvalidConfig {}

impl WorldConfig {
    /// World units spanned by one chunk edge.
    #[inline]
    pub fn chunk_world_size(&self) -> f32 {
        self.chunk.size as f32 * self.chunk.voxel_size
    }

    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if self.chunk.size == 0 || self.chunk.size > 256 {
            return Err(InvalidConfig(format!(
                "chunk.size must be in 1..=256, got {}",
                self.chunk.size
            )));
        }
        if !(self.chunk.voxel_size > 0.0) {
            return Err(InvalidConfig(format!(
                "chunk.voxel_size must be positive, got {}",
                self.chunk.voxel_size
            )));
        }
        if self.streaming.render_distance < 0
            || self.streaming.vertical_radius < 0
            || self.streaming.evict_margin < 0
        {
            return Err(InvalidConfig(
                "streaming radii and margin must not be negative".into(),
            ));
        }
        if !(self.water.tick_interval > 0.0) {
            return Err(InvalidConfig(format!(
                "water.tick_interval must be positive, got {}",
                self.water.tick_interval
            )));
        }
        Ok(())
    }

    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: WorldConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_toml_string(&self) -> Result<String, Box<dyn Error>> {
        Ok(toml::to_string_pretty(self)?)
    }
}

pub fn load_config_from_path(path: &Path) -> Result<WorldConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    WorldConfig::from_toml_str(&s)
}
