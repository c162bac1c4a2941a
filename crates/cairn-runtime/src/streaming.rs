use cairn_world::ChunkCoord;

/// Every coordinate of the streaming window, bottom layer first. Corners of
/// the `±radius` square that lie past `keep_radius` are left out so a pass
/// never loads a chunk it would evict.
pub fn window_chunk_coords(
    center: ChunkCoord,
    radius: i32,
    vertical: i32,
    keep_radius: i32,
) -> Vec<ChunkCoord> {
    if radius < 0 || vertical < 0 || keep_radius < 0 {
        return Vec::new();
    }
    let keep_sq = i64::from(keep_radius) * i64::from(keep_radius);
    let mut coords = Vec::new();
    for dz in -vertical..=vertical {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let dist_sq = {
                    let (dx, dy, dz) = (i64::from(dx), i64::from(dy), i64::from(dz));
                    dx * dx + dy * dy + dz * dz
                };
                if dist_sq <= keep_sq {
                    coords.push(center.offset(dx, dy, dz));
                }
            }
        }
    }
    coords
}
