use std::fmt;
use std::fs;
use std::path::Path;

use cairn_world::WorldConfig;
use serde::{Deserialize, Serialize};

use crate::SaveError;

pub const FORMAT_VERSION: u32 = 1;

/// Contents of `world.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldMeta {
    pub format_version: u32,
    pub seed: i32,
    pub chunk_size: usize,
    pub voxel_size: f32,
}

impl WorldMeta {
    pub fn from_config(cfg: &WorldConfig) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            seed: cfg.terrain.seed,
            chunk_size: cfg.chunk.size,
            voxel_size: cfg.chunk.voxel_size,
        }
    }

    pub(crate) fn read(path: &Path) -> Result<Self, SaveError> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub(crate) fn write(&self, path: &Path) -> Result<(), SaveError> {
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// A save can be reused when its layout version, chunk size and seed
    /// agree with the running world.
    pub fn check_compatible(&self, expected: &WorldMeta) -> Result<(), SaveError> {
        fn mismatch(field: &'static str, expected: impl ToString, found: impl ToString) -> SaveError {
            SaveError::Mismatch {
                field,
                expected: expected.to_string(),
                found: found.to_string(),
            }
        }
        if self.format_version != expected.format_version {
            return Err(mismatch("format_version", expected.format_version, self.format_version));
        }
        if self.chunk_size != expected.chunk_size {
            return Err(mismatch("chunk_size", expected.chunk_size, self.chunk_size));
        }
        if self.seed != expected.seed {
            return Err(mismatch("seed", expected.seed, self.seed));
        }
        Ok(())
    }
}

impl fmt::Display for WorldMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "v{} seed={} chunk_size={} voxel_size={}",
            self.format_version, self.seed, self.chunk_size, self.voxel_size
        )
    }
}
