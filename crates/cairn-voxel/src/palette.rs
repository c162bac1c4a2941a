//! Fixed type -> RGBA lookup used for per-vertex colors.

use crate::types::VoxelType;

pub const OPAQUE_ALPHA: u8 = 255;

const WATER_ALPHA: u8 = 160;
const WATER_SOURCE_ALPHA: u8 = 200;

/// Vertex color for a voxel type. Water types are translucent blues told
/// apart by shade and alpha; Air never reaches the mesher but maps to white.
#[inline]
pub const fn voxel_color(ty: VoxelType) -> [u8; 4] {
    match ty {
        VoxelType::Stone => [128, 128, 128, OPAQUE_ALPHA],
        VoxelType::Dirt => [139, 69, 19, OPAQUE_ALPHA],
        VoxelType::Grass => [34, 139, 34, OPAQUE_ALPHA],
        VoxelType::Wood => [160, 82, 45, OPAQUE_ALPHA],
        VoxelType::Iron => [192, 192, 192, OPAQUE_ALPHA],
        VoxelType::Gold => [255, 215, 0, OPAQUE_ALPHA],
        VoxelType::Water => [64, 128, 255, WATER_ALPHA],
        VoxelType::WaterSource => [32, 96, 224, WATER_SOURCE_ALPHA],
        VoxelType::Air | VoxelType::Custom => [255, 255, 255, OPAQUE_ALPHA],
    }
}

impl VoxelType {
    #[inline]
    pub const fn color(self) -> [u8; 4] {
        voxel_color(self)
    }
}
