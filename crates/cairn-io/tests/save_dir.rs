use cairn_chunk::Chunk;
use cairn_io::{FORMAT_VERSION, SaveDir, SaveError, WorldMeta};
use cairn_voxel::{VoxelRecord, VoxelType};
use cairn_world::{ChunkCoord, WorldConfig};
use tempfile::tempdir;

fn meta() -> WorldMeta {
    WorldMeta::from_config(&WorldConfig::default())
}

#[test]
fn creates_layout_and_header() {
    let dir = tempdir().unwrap();
    let save = SaveDir::open_or_create(dir.path().join("w"), meta()).unwrap();
    assert!(save.root().join("world.toml").is_file());
    assert!(save.root().join("chunks").is_dir());

    let reopened = SaveDir::open(save.root()).unwrap();
    assert_eq!(*reopened.meta(), meta());
    assert_eq!(reopened.meta().format_version, FORMAT_VERSION);
    assert_eq!(reopened.meta().chunk_size, 16);
    assert_eq!(reopened.meta().seed, 12345);
}

#[test]
fn chunk_round_trips_through_disk() {
    let dir = tempdir().unwrap();
    let save = SaveDir::open_or_create(dir.path(), meta()).unwrap();
    let coord = ChunkCoord::new(-3, 4, 0);
    let mut c = Chunk::new(coord, 16, 100.0);
    c.set_voxel(0, 0, 0, VoxelType::Gold);
    c.set_voxel(15, 15, 15, VoxelType::WaterSource);
    c.set_voxel_record(3, 2, 1, VoxelRecord { health: 7, custom_data: 200, ..VoxelRecord::new(VoxelType::Wood) });
    save.write_chunk(&c).unwrap();
    assert!(save.has_chunk(coord));
    assert!(save.chunk_path(coord).ends_with("chunks/-3_4_0.bin"));

    let mut restored = Chunk::new(coord, 16, 100.0);
    assert!(save.load_chunk(&mut restored).unwrap());
    assert_eq!(restored, c);
    assert_eq!(save.stored_chunks().unwrap(), vec![coord]);
}

#[test]
fn missing_chunk_is_not_an_error() {
    let dir = tempdir().unwrap();
    let save = SaveDir::open_or_create(dir.path(), meta()).unwrap();
    let mut c = Chunk::new(ChunkCoord::new(1, 1, 1), 16, 100.0);
    c.set_voxel(1, 1, 1, VoxelType::Stone);
    let before = c.clone();
    assert!(!save.load_chunk(&mut c).unwrap());
    assert_eq!(c, before);
    assert!(save.read_chunk_bytes(ChunkCoord::new(9, 9, 9)).unwrap().is_none());
}

#[test]
fn corrupt_chunk_reports_coordinate() {
    let dir = tempdir().unwrap();
    let save = SaveDir::open_or_create(dir.path(), meta()).unwrap();
    let coord = ChunkCoord::new(0, 0, 0);
    save.write_chunk_bytes(coord, &[1, 2, 3, 4]).unwrap();
    let mut c = Chunk::new(coord, 16, 100.0);
    match save.load_chunk(&mut c) {
        Err(SaveError::Chunk { coord: at, .. }) => assert_eq!(at, coord),
        other => panic!("expected chunk error, got {other:?}"),
    }
    assert!(c.is_all_air());
}

#[test]
fn incompatible_save_is_rejected() {
    let dir = tempdir().unwrap();
    SaveDir::open_or_create(dir.path(), meta()).unwrap();

    let other_seed = WorldMeta { seed: 7, ..meta() };
    match SaveDir::open_or_create(dir.path(), other_seed) {
        Err(SaveError::Mismatch { field, expected, found }) => {
            assert_eq!(field, "seed");
            assert_eq!(expected, "7");
            assert_eq!(found, "12345");
        }
        other => panic!("expected mismatch, got {other:?}"),
    }

    let other_size = WorldMeta { chunk_size: 32, ..meta() };
    assert!(matches!(
        SaveDir::open_or_create(dir.path(), other_size),
        Err(SaveError::Mismatch { field: "chunk_size", .. })
    ));
}

#[test]
fn stray_files_are_ignored_when_listing() {
    let dir = tempdir().unwrap();
    let save = SaveDir::open_or_create(dir.path(), meta()).unwrap();
    std::fs::write(save.root().join("chunks/notes.txt"), b"hi").unwrap();
    save.write_chunk_bytes(ChunkCoord::new(2, 0, 0), &[]).unwrap();
    save.write_chunk_bytes(ChunkCoord::new(-1, 0, 0), &[]).unwrap();
    assert_eq!(
        save.stored_chunks().unwrap(),
        vec![ChunkCoord::new(-1, 0, 0), ChunkCoord::new(2, 0, 0)]
    );
}

#[test]
fn malformed_header_is_a_toml_error() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("world.toml"), "seed = \"nope\"").unwrap();
    assert!(matches!(SaveDir::open(dir.path()), Err(SaveError::Toml(_))));
}
