//! Voxel type, per-cell record, and color palette.
#![forbid(unsafe_code)]

pub mod palette;
pub mod types;

pub use palette::{OPAQUE_ALPHA, voxel_color};
pub use types::{
    DEFAULT_FLOWING_LEVEL, DEFAULT_HEALTH, MAX_WATER_LEVEL, UnknownVoxelName, VoxelRecord, VoxelType,
};
