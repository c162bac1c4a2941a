use cairn_chunk::{Chunk, fill_terrain};
use cairn_geom::Vec3;
use cairn_mesh_cpu::{ChunkMesh, Face, MeshBuilder, build_chunk_mesh, face_visible};
use cairn_voxel::{VoxelRecord, VoxelType};
use cairn_world::{ChunkCoord, NoiseKind, TerrainGenerator};
use proptest::prelude::*;

fn chunk(n: usize) -> Chunk {
    Chunk::new(ChunkCoord::new(0, 0, 0), n, 100.0)
}

fn assert_consistent(mesh: &ChunkMesh) {
    let v = mesh.positions.len();
    assert_eq!(mesh.normals.len(), v);
    assert_eq!(mesh.uvs.len(), v);
    assert_eq!(mesh.colors.len(), v);
    assert_eq!(v % 4, 0);
    assert_eq!(mesh.indices.len(), v / 4 * 6);
    assert!(mesh.indices.iter().all(|&i| (i as usize) < v));
}

#[test]
fn empty_chunk_has_empty_mesh() {
    let mesh = build_chunk_mesh(&chunk(4));
    assert!(mesh.is_empty());
    assert_eq!(mesh.vertex_count(), 0);
}

#[test]
fn isolated_voxel_emits_all_six_faces() {
    let mut c = chunk(4);
    c.set_voxel(1, 1, 1, VoxelType::Stone);
    let mesh = build_chunk_mesh(&c);
    assert_consistent(&mesh);
    assert_eq!(mesh.face_count(), 6);
    assert_eq!(mesh.vertex_count(), 24);
    assert_eq!(mesh.triangle_count(), 12);
    assert!(mesh.colors.iter().all(|&c| c == VoxelType::Stone.color()));

    // Faces come out in +Z, -Z, +Y, -Y, +X, -X order
    for (i, face) in Face::ALL.into_iter().enumerate() {
        assert_eq!(mesh.normals[i * 4], face.normal());
    }
    // Geometry spans exactly the cell [100, 200)³
    for p in &mesh.positions {
        for c in [p.x, p.y, p.z] {
            assert!(c == 100.0 || c == 200.0, "corner {p:?} off the cell");
        }
    }
    assert_eq!(&mesh.indices[..6], &[0, 1, 2, 0, 2, 3]);
    assert_eq!(mesh.uvs[..4], [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
}

#[test]
fn solid_neighbor_hides_the_shared_face() {
    let mut c = chunk(4);
    c.set_voxel(1, 1, 1, VoxelType::Stone);
    c.set_voxel(2, 1, 1, VoxelType::Dirt);
    let mesh = build_chunk_mesh(&c);
    assert_eq!(mesh.face_count(), 10);
    // The only +X face left belongs to the dirt voxel at x=2
    let plus_x: Vec<_> = mesh
        .positions
        .chunks(4)
        .zip(mesh.normals.chunks(4))
        .filter(|(_, n)| n[0] == Vec3::RIGHT)
        .map(|(p, _)| p)
        .collect();
    assert_eq!(plus_x.len(), 1);
    assert!(plus_x[0].iter().all(|v| v.x == 300.0));
}

#[test]
fn chunk_border_faces_are_always_emitted() {
    let mut c = chunk(1);
    c.set_voxel(0, 0, 0, VoxelType::Gold);
    assert_eq!(build_chunk_mesh(&c).face_count(), 6);
}

#[test]
fn full_chunk_only_shows_its_shell() {
    let n = 4;
    let mut c = chunk(n);
    for r in c.records_mut() {
        r.retype(VoxelType::Stone);
    }
    let mesh = build_chunk_mesh(&c);
    assert_eq!(mesh.face_count(), 6 * n * n);
}

#[test]
fn equal_level_water_hides_the_shared_face() {
    let mut c = chunk(4);
    c.set_voxel_record(1, 1, 1, VoxelRecord::water(5));
    c.set_voxel_record(2, 1, 1, VoxelRecord::water(5));
    assert_eq!(build_chunk_mesh(&c).face_count(), 10);

    c.set_voxel_record(2, 1, 1, VoxelRecord::water(4));
    assert_eq!(build_chunk_mesh(&c).face_count(), 12);
}

#[test]
fn solid_face_beside_water_is_visible() {
    let mut c = chunk(4);
    c.set_voxel(1, 1, 1, VoxelType::Stone);
    c.set_voxel(2, 1, 1, VoxelType::WaterSource);
    let mesh = build_chunk_mesh(&c);
    // stone keeps all 6; water loses its -X face to the stone
    assert_eq!(mesh.face_count(), 11);
}

#[test]
fn face_visibility_rule() {
    let stone = VoxelRecord::new(VoxelType::Stone);
    let air = VoxelRecord::AIR;
    let w7 = VoxelRecord::water(7);
    let w3 = VoxelRecord::water(3);
    assert!(face_visible(&stone, None));
    assert!(face_visible(&stone, Some(&air)));
    assert!(!face_visible(&stone, Some(&stone)));
    assert!(face_visible(&stone, Some(&w7)));
    assert!(!face_visible(&w7, Some(&w7)));
    assert!(face_visible(&w7, Some(&w3)));
    assert!(!face_visible(&w7, Some(&stone)));
}

#[test]
fn rebuild_replaces_previous_contents() {
    let mut builder = MeshBuilder::new();
    let mut c = chunk(4);
    c.set_voxel(0, 0, 0, VoxelType::Wood);
    c.set_voxel(3, 3, 3, VoxelType::Wood);
    let mut mesh = builder.build(&c);
    assert_eq!(mesh.face_count(), 12);
    c.set_voxel(3, 3, 3, VoxelType::Air);
    builder.rebuild(&c, &mut mesh);
    assert_eq!(mesh, build_chunk_mesh(&c));
    assert_eq!(mesh.face_count(), 6);
}

#[test]
fn terrain_chunk_mesh_is_well_formed() {
    let generator = TerrainGenerator::new(12345, 0.01, 10.0, NoiseKind::Trig);
    let mut c = Chunk::new(ChunkCoord::new(0, 0, 0), 16, 100.0);
    fill_terrain(&mut c, &generator);
    let mesh = build_chunk_mesh(&c);
    assert_consistent(&mesh);
    if c.has_non_air() {
        assert!(!mesh.is_empty());
    }
}

fn arb_type() -> impl Strategy<Value = VoxelType> {
    (0u8..10).prop_map(|id| VoxelType::from_id(id).unwrap())
}

proptest! {
    // Every voxel contributes at most six faces and buffers stay parallel
    #[test]
    fn random_chunks_produce_consistent_buffers(types in prop::collection::vec(arb_type(), 27)) {
        let mut c = chunk(3);
        for (r, ty) in c.records_mut().iter_mut().zip(&types) {
            r.retype(*ty);
        }
        let mesh = build_chunk_mesh(&c);
        assert_consistent(&mesh);
        let non_air = types.iter().filter(|t| **t != VoxelType::Air).count();
        prop_assert!(mesh.face_count() <= non_air * 6);
        prop_assert_eq!(mesh.is_empty(), non_air == 0);
    }
}
