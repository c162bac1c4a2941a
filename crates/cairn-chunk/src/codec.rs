//! Chunk save format: `size³` consecutive `(type_id, health, custom_data)`
//! triples in flat index order. Water level is not stored and is re-derived
//! from the type on load.

use cairn_voxel::{VoxelRecord, VoxelType};
use thiserror::Error;

use crate::Chunk;

pub const BYTES_PER_VOXEL: usize = 3;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChunkDataError {
    #[error("voxel buffer length {len} is not a multiple of 3")]
    NotTriples { len: usize },
    #[error("voxel buffer holds {got} voxels, chunk expects {expected}")]
    WrongVoxelCount { got: usize, expected: usize },
    #[error("unknown voxel type id {id} at voxel {index}")]
    UnknownVoxelType { id: u8, index: usize },
}

impl Chunk {
    /// Encodes every cell as a `(type_id, health, custom_data)` triple.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.volume() * BYTES_PER_VOXEL);
        for r in self.records() {
            out.extend_from_slice(&[r.ty.id(), r.health, r.custom_data]);
        }
        out
    }

    /// Replaces every cell from a buffer produced by [`Chunk::serialize`].
    ///
    /// The buffer is validated in full before anything is written, so on
    /// error the chunk is left untouched. Water levels come back as 8 for
    /// sources, 7 for flowing water and 0 otherwise; partially drained water
    /// does not survive a round trip.
    pub fn deserialize(&mut self, data: &[u8]) -> Result<(), ChunkDataError> {
        let decoded = decode_records(data, self.volume())?;
        self.records_mut().copy_from_slice(&decoded);
        Ok(())
    }
}

fn decode_records(data: &[u8], expected: usize) -> Result<Vec<VoxelRecord>, ChunkDataError> {
    if data.len() % BYTES_PER_VOXEL != 0 {
        return Err(ChunkDataError::NotTriples { len: data.len() });
    }
    let got = data.len() / BYTES_PER_VOXEL;
    if got != expected {
        return Err(ChunkDataError::WrongVoxelCount { got, expected });
    }
    data.chunks_exact(BYTES_PER_VOXEL)
        .enumerate()
        .map(|(index, triple)| {
            let id = triple[0];
            let ty = VoxelType::from_id(id).ok_or(ChunkDataError::UnknownVoxelType { id, index })?;
            Ok(VoxelRecord {
                ty,
                health: triple[1],
                custom_data: triple[2],
                water_level: ty.default_water_level(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairn_world::ChunkCoord;

    fn chunk(size: usize) -> Chunk {
        Chunk::new(ChunkCoord::new(0, 0, 0), size, 100.0)
    }

    #[test]
    fn layout_is_flat_index_order() {
        let mut c = chunk(2);
        c.set_voxel_record(1, 0, 0, VoxelRecord { health: 9, custom_data: 4, ..VoxelRecord::new(VoxelType::Gold) });
        c.set_voxel(0, 1, 0, VoxelType::Stone);
        c.set_voxel(0, 0, 1, VoxelType::WaterSource);
        let bytes = c.serialize();
        assert_eq!(bytes.len(), 8 * 3);
        assert_eq!(&bytes[3..6], &[6, 9, 4]);
        assert_eq!(bytes[2 * 3], VoxelType::Stone.id());
        assert_eq!(bytes[4 * 3], VoxelType::WaterSource.id());
    }

    #[test]
    fn rejects_partial_triples() {
        let mut c = chunk(2);
        let err = c.deserialize(&[0u8; 23]).unwrap_err();
        assert_eq!(err, ChunkDataError::NotTriples { len: 23 });
    }

    #[test]
    fn rejects_wrong_count_and_unknown_ids_without_mutating() {
        let mut c = chunk(2);
        c.set_voxel(1, 1, 1, VoxelType::Iron);
        let before = c.clone();

        let err = c.deserialize(&[0u8; 21]).unwrap_err();
        assert_eq!(err, ChunkDataError::WrongVoxelCount { got: 7, expected: 8 });
        assert_eq!(c, before);

        let mut bytes = vec![0u8; 24];
        bytes[5 * 3] = 42;
        let err = c.deserialize(&bytes).unwrap_err();
        assert_eq!(err, ChunkDataError::UnknownVoxelType { id: 42, index: 5 });
        assert_eq!(c, before);
    }

    #[test]
    fn drained_water_comes_back_at_default_level() {
        let mut c = chunk(2);
        c.set_voxel_record(0, 0, 0, VoxelRecord::water(2));
        c.set_voxel(1, 0, 0, VoxelType::WaterSource);
        let bytes = c.serialize();
        let mut d = chunk(2);
        d.deserialize(&bytes).unwrap();
        assert_eq!(d.get_voxel_record(0, 0, 0).unwrap().water_level, 7);
        assert_eq!(d.get_voxel_record(1, 0, 0).unwrap().water_level, 8);
        assert_eq!(d.get_voxel_record(1, 1, 0).unwrap().water_level, 0);
    }
}
