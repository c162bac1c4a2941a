use std::fmt;
use std::str::FromStr;

/// Fullness of a water source; also the level a falling column lands with.
pub const MAX_WATER_LEVEL: u8 = 8;

/// Level assigned to ordinary water when it is not stored explicitly.
pub const DEFAULT_FLOWING_LEVEL: u8 = 7;

/// Health a freshly allocated voxel starts with.
pub const DEFAULT_HEALTH: u8 = 100;

/// Closed set of voxel kinds. Discriminants are the on-disk type ids.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum VoxelType {
    #[default]
    Air = 0,
    Stone = 1,
    Dirt = 2,
    Grass = 3,
    Wood = 4,
    Iron = 5,
    Gold = 6,
    Water = 7,
    WaterSource = 8,
    Custom = 9,
}

impl VoxelType {
    pub const ALL: [VoxelType; 10] = [
        VoxelType::Air,
        VoxelType::Stone,
        VoxelType::Dirt,
        VoxelType::Grass,
        VoxelType::Wood,
        VoxelType::Iron,
        VoxelType::Gold,
        VoxelType::Water,
        VoxelType::WaterSource,
        VoxelType::Custom,
    ];

    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn from_id(id: u8) -> Option<VoxelType> {
        Self::ALL.get(id as usize).copied()
    }

    #[inline]
    pub const fn is_water(self) -> bool {
        matches!(self, VoxelType::Water | VoxelType::WaterSource)
    }

    #[inline]
    pub const fn is_solid(self) -> bool {
        !matches!(
            self,
            VoxelType::Air | VoxelType::Water | VoxelType::WaterSource
        )
    }

    #[inline]
    pub const fn is_transparent(self) -> bool {
        !self.is_solid()
    }

    /// Water level implied by the type alone, used when the level is not stored.
    #[inline]
    pub const fn default_water_level(self) -> u8 {
        match self {
            VoxelType::WaterSource => MAX_WATER_LEVEL,
            VoxelType::Water => DEFAULT_FLOWING_LEVEL,
            _ => 0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            VoxelType::Air => "air",
            VoxelType::Stone => "stone",
            VoxelType::Dirt => "dirt",
            VoxelType::Grass => "grass",
            VoxelType::Wood => "wood",
            VoxelType::Iron => "iron",
            VoxelType::Gold => "gold",
            VoxelType::Water => "water",
            VoxelType::WaterSource => "water_source",
            VoxelType::Custom => "custom",
        }
    }

    pub fn from_name(name: &str) -> Option<VoxelType> {
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }
}

impl fmt::Display for VoxelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVoxelName(pub String);

impl fmt::Display for UnknownVoxelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown voxel type '{}'", self.0)
    }
}

impl std::error::Error for UnknownVoxelName {}

impl FromStr for VoxelType {
    type Err = UnknownVoxelName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace('-', "_");
        VoxelType::from_name(&norm).ok_or_else(|| UnknownVoxelName(s.to_string()))
    }
}

/// One cell of a chunk.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct VoxelRecord {
    pub ty: VoxelType,
    pub health: u8,
    pub custom_data: u8,
    /// 0..=8, nonzero only for water types.
    pub water_level: u8,
}

impl Default for VoxelRecord {
    fn default() -> Self {
        Self::AIR
    }
}

impl VoxelRecord {
    pub const AIR: VoxelRecord = VoxelRecord {
        ty: VoxelType::Air,
        health: DEFAULT_HEALTH,
        custom_data: 0,
        water_level: 0,
    };

    /// Fresh record of `ty` with its type-derived water level.
    #[inline]
    pub const fn new(ty: VoxelType) -> Self {
        Self {
            ty,
            health: DEFAULT_HEALTH,
            custom_data: 0,
            water_level: ty.default_water_level(),
        }
    }

    /// Flowing water at `level`, clamped to `1..=8`.
    #[inline]
    pub fn water(level: u8) -> Self {
        Self {
            water_level: level.clamp(1, MAX_WATER_LEVEL),
            ..Self::new(VoxelType::Water)
        }
    }

    #[inline]
    pub const fn is_solid(&self) -> bool {
        self.ty.is_solid()
    }

    #[inline]
    pub const fn is_transparent(&self) -> bool {
        self.ty.is_transparent()
    }

    #[inline]
    pub const fn is_water(&self) -> bool {
        self.ty.is_water()
    }

    #[inline]
    pub const fn is_air(&self) -> bool {
        matches!(self.ty, VoxelType::Air)
    }

    /// Changes the type in place. Health and custom data are kept; the water
    /// level is re-derived when the cell enters or leaves the water family so
    /// the level invariants hold.
    pub fn retype(&mut self, ty: VoxelType) {
        let was_water = self.ty.is_water();
        self.ty = ty;
        self.water_level = match ty {
            VoxelType::WaterSource => MAX_WATER_LEVEL,
            VoxelType::Water if was_water && self.water_level > 0 => {
                self.water_level.min(MAX_WATER_LEVEL)
            }
            VoxelType::Water => DEFAULT_FLOWING_LEVEL,
            _ => 0,
        };
    }
}
