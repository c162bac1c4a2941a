use std::path::PathBuf;

use cairn_world::{NoiseKind, WorldConfig, load_config_from_path};

fn assets() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets")
}

#[test]
fn shipped_config_matches_defaults() {
    let cfg = load_config_from_path(&assets().join("world.toml")).unwrap();
    assert_eq!(cfg, WorldConfig::default());
}

#[test]
fn partial_sections_fill_in_defaults() {
    let cfg = WorldConfig::from_toml_str(
        r#"
        [terrain]
        seed = -4
        noise = "open_simplex"

        [streaming]
        render_distance = 3
        "#,
    )
    .unwrap();
    assert_eq!(cfg.terrain.seed, -4);
    assert_eq!(cfg.terrain.noise, NoiseKind::OpenSimplex);
    assert_eq!(cfg.terrain.frequency, 0.01);
    assert_eq!(cfg.streaming.render_distance, 3);
    assert_eq!(cfg.streaming.evict_distance(), 5);
    assert_eq!(cfg.chunk.size, 16);
}

#[test]
fn invalid_values_are_rejected() {
    assert!(WorldConfig::from_toml_str("[chunk]\nsize = 0").is_err());
    assert!(WorldConfig::from_toml_str("[chunk]\nvoxel_size = -1.0").is_err());
    assert!(WorldConfig::from_toml_str("[water]\ntick_interval = 0.0").is_err());
    assert!(WorldConfig::from_toml_str("[streaming]\nrender_distance = -2").is_err());
    assert!(WorldConfig::from_toml_str("[terrain]\nnoise = \"perlin\"").is_err());
}

#[test]
fn missing_file_is_an_error() {
    assert!(load_config_from_path(&assets().join("no-such-file.toml")).is_err());
}
