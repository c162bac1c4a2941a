//! On-disk world saves: a `world.toml` header plus one raw buffer per chunk.
#![forbid(unsafe_code)]

mod meta;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cairn_chunk::{Chunk, ChunkDataError};
use cairn_world::ChunkCoord;
use thiserror::Error;

pub use meta::{FORMAT_VERSION, WorldMeta};

const META_FILE: &str = "world.toml";
const CHUNK_DIR: &str = "chunks";

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed world.toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("could not encode world.toml: {0}")]
    TomlWrite(#[from] toml::ser::Error),
    #[error("chunk {coord}: {source}")]
    Chunk {
        coord: ChunkCoord,
        #[source]
        source: ChunkDataError,
    },
    #[error("save was written with {field} = {found}, world uses {expected}")]
    Mismatch {
        field: &'static str,
        expected: String,
        found: String,
    },
}

/// Handle to a save directory laid out as
///
/// ```text
/// <root>/world.toml
/// <root>/chunks/{cx}_{cy}_{cz}.bin
/// ```
#[derive(Debug, Clone)]
pub struct SaveDir {
    root: PathBuf,
    meta: WorldMeta,
}

impl SaveDir {
    /// Opens `root` for a world described by `meta`, creating the layout if
    /// it does not exist yet. An existing save must be compatible.
    pub fn open_or_create(root: impl Into<PathBuf>, meta: WorldMeta) -> Result<Self, SaveError> {
        let root = root.into();
        let meta_path = root.join(META_FILE);
        if meta_path.exists() {
            let found = WorldMeta::read(&meta_path)?;
            found.check_compatible(&meta)?;
            log::info!(target: "io", "opened save {} ({})", root.display(), found);
            fs::create_dir_all(root.join(CHUNK_DIR))?;
            return Ok(Self { root, meta: found });
        }
        fs::create_dir_all(root.join(CHUNK_DIR))?;
        meta.write(&meta_path)?;
        log::info!(target: "io", "created save {} ({})", root.display(), meta);
        Ok(Self { root, meta })
    }

    /// Opens an existing save without an expected header.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, SaveError> {
        let root = root.into();
        let meta = WorldMeta::read(&root.join(META_FILE))?;
        if meta.format_version != FORMAT_VERSION {
            return Err(SaveError::Mismatch {
                field: "format_version",
                expected: FORMAT_VERSION.to_string(),
                found: meta.format_version.to_string(),
            });
        }
        Ok(Self { root, meta })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn meta(&self) -> &WorldMeta {
        &self.meta
    }

    pub fn chunk_path(&self, coord: ChunkCoord) -> PathBuf {
        self.root
            .join(CHUNK_DIR)
            .join(format!("{}_{}_{}.bin", coord.cx, coord.cy, coord.cz))
    }

    pub fn has_chunk(&self, coord: ChunkCoord) -> bool {
        self.chunk_path(coord).is_file()
    }

    /// Writes a serialized chunk buffer. The file is replaced atomically.
    pub fn write_chunk_bytes(&self, coord: ChunkCoord, bytes: &[u8]) -> Result<(), SaveError> {
        let path = self.chunk_path(coord);
        let tmp = path.with_extension("bin.tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &path)?;
        log::trace!(target: "io", "wrote chunk {} bytes={}", coord, bytes.len());
        Ok(())
    }

    pub fn write_chunk(&self, chunk: &Chunk) -> Result<(), SaveError> {
        self.write_chunk_bytes(chunk.coord, &chunk.serialize())
    }

    /// Raw buffer for `coord`, or `None` if the save has no such chunk.
    pub fn read_chunk_bytes(&self, coord: ChunkCoord) -> Result<Option<Vec<u8>>, SaveError> {
        match fs::read(self.chunk_path(coord)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Restores `chunk` from the save if its coordinate was stored.
    /// Returns `false` and leaves the chunk alone when there is no file.
    pub fn load_chunk(&self, chunk: &mut Chunk) -> Result<bool, SaveError> {
        let coord = chunk.coord;
        let Some(bytes) = self.read_chunk_bytes(coord)? else {
            return Ok(false);
        };
        chunk
            .deserialize(&bytes)
            .map_err(|source| SaveError::Chunk { coord, source })?;
        Ok(true)
    }

    /// Coordinates of every stored chunk, sorted. Unrecognized files are skipped.
    pub fn stored_chunks(&self) -> Result<Vec<ChunkCoord>, SaveError> {
        let mut out = Vec::new();
        for entry in fs::read_dir(self.root.join(CHUNK_DIR))? {
            let entry = entry?;
            let name = entry.file_name();
            match name.to_str().and_then(parse_chunk_file_name) {
                Some(coord) => out.push(coord),
                None => log::debug!(target: "io", "skipping {:?}", name),
            }
        }
        out.sort();
        Ok(out)
    }
}

fn parse_chunk_file_name(name: &str) -> Option<ChunkCoord> {
    let stem = name.strip_suffix(".bin")?;
    let mut parts = stem.split('_');
    let cx = parts.next()?.parse().ok()?;
    let cy = parts.next()?.parse().ok()?;
    let cz = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(ChunkCoord::new(cx, cy, cz))
}
