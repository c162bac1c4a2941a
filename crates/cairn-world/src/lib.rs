//! Chunk grid addressing, world configuration, and terrain generation.
#![forbid(unsafe_code)]

pub mod config;
pub mod terrain;

mod chunk_coord;

pub use chunk_coord::ChunkCoord;
pub use config::{
    ChunkSection, StreamingSection, TerrainSection, WaterSection, WorldConfig,
    load_config_from_path,
};
pub use terrain::{NoiseKind, TerrainGenerator};
