use cairn_geom::Vec3;
use serde::{Deserialize, Serialize};

/// Position of a chunk in grid space (chunk units, not world units).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32, cz: i32) -> Self {
        Self { cx, cy, cz }
    }

    /// Neighbor coordinate; saturates at the edge of the `i32` grid.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            cx: self.cx.saturating_add(dx),
            cy: self.cy.saturating_add(dy),
            cz: self.cz.saturating_add(dz),
        }
    }

    #[inline]
    pub fn distance_sq(self, other: ChunkCoord) -> i64 {
        let dx = i64::from(self.cx) - i64::from(other.cx);
        let dy = i64::from(self.cy) - i64::from(other.cy);
        let dz = i64::from(self.cz) - i64::from(other.cz);
        dx.saturating_mul(dx)
            .saturating_add(dy.saturating_mul(dy))
            .saturating_add(dz.saturating_mul(dz))
    }

    /// Euclidean distance in chunk space.
    #[inline]
    pub fn distance(self, other: ChunkCoord) -> f64 {
        (self.distance_sq(other) as f64).sqrt()
    }

    /// Chunk containing `pos`, for chunks spanning `chunk_world_size` world units.
    #[inline]
    pub fn from_world(pos: Vec3, chunk_world_size: f32) -> Self {
        let (cx, cy, cz) = (pos / chunk_world_size).floor_i32();
        Self { cx, cy, cz }
    }

    /// World-space corner of this chunk.
    #[inline]
    pub fn origin(self, chunk_world_size: f32) -> Vec3 {
        Vec3::new(
            self.cx as f32 * chunk_world_size,
            self.cy as f32 * chunk_world_size,
            self.cz as f32 * chunk_world_size,
        )
    }
}

impl From<(i32, i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<ChunkCoord> for (i32, i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cy, value.cz)
    }
}

impl std::fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.cx, self.cy, self.cz)
    }
}
