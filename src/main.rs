mod cli;

use anyhow::{Context, anyhow};
use cairn_geom::Vec3;
use cairn_runtime::VoxelWorld;
use cairn_voxel::VoxelType;
use cairn_world::{WorldConfig, load_config_from_path};
use clap::Parser;

use crate::cli::Args;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();

    let args = Args::parse();
    let mut cfg = match &args.config {
        Some(path) => load_config_from_path(path)
            .map_err(|e| anyhow!("{e}"))
            .with_context(|| format!("loading {}", path.display()))?,
        None => WorldConfig::default(),
    };
    args.apply(&mut cfg);

    if args.print_config {
        let text = cfg.to_toml_string().map_err(|e| anyhow!("{e}"))?;
        print!("{text}");
        return Ok(());
    }

    let mut world = VoxelWorld::new(cfg)?;
    if let Some(dir) = &args.save {
        world
            .attach_save_dir(dir)
            .with_context(|| format!("opening save {}", dir.display()))?;
    }

    let spawn = spawn_point(&world, 0.0, 0.0);
    log::info!("spawn at ({:.0}, {:.0}, {:.0})", spawn.x, spawn.y, spawn.z);
    if args.spring {
        let vs = world.config().chunk.voxel_size;
        let spring = spawn_point(&world, 3.0 * vs, 0.0);
        world.set_voxel_at_world_position(spring, VoxelType::WaterSource);
        log::info!("spring placed at ({:.0}, {:.0}, {:.0})", spring.x, spring.y, spring.z);
    }

    let mut pos = spawn;
    let mut water_changed = 0usize;
    let mut streams = 0usize;
    for frame in 0..args.frames {
        pos.x += args.speed * args.dt;
        let report = world.tick(args.dt, pos);
        water_changed += report.water_changed;
        if report.streamed.is_some() {
            streams += 1;
        }
        if frame % 120 == 0 {
            let s = world.stats();
            log::info!(
                "frame={} pos=({:.0}, {:.0}, {:.0}) chunks={} faces={} water_chunks={}",
                frame,
                pos.x,
                pos.y,
                pos.z,
                s.chunks,
                s.faces,
                s.water_chunks
            );
        }
    }

    let s = world.stats();
    log::info!(
        "done frames={} streams={} chunks={} triangles={} water_changed={}",
        args.frames,
        streams,
        s.chunks,
        s.triangles,
        water_changed
    );
    if world.save_dir().is_some() {
        let n = world.flush().context("writing save")?;
        log::info!("saved {} chunks", n);
    }
    Ok(())
}

/// World position just above the generated surface at `(x, y)`.
fn spawn_point(world: &VoxelWorld, x: f32, y: f32) -> Vec3 {
    let vs = world.config().chunk.voxel_size;
    let height = world.generator().column_height(x, y);
    Vec3::new(x + 0.5 * vs, y + 0.5 * vs, (height.ceil() + 0.5) * vs)
}
