use std::path::PathBuf;

use cairn_world::{NoiseKind, WorldConfig};
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "cairn", version, about = "Headless voxel world driver")]
pub struct Args {
    /// World config TOML; defaults apply when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Save directory; chunks are restored from and written back to it
    #[arg(long)]
    pub save: Option<PathBuf>,

    #[arg(long)]
    pub seed: Option<i32>,

    /// Render distance in chunks
    #[arg(long)]
    pub render_distance: Option<i32>,

    #[arg(long, value_enum)]
    pub noise: Option<NoiseArg>,

    /// Step water chunks on one thread
    #[arg(long)]
    pub serial_water: bool,

    /// Frames to simulate
    #[arg(long, default_value_t = 600)]
    pub frames: u32,

    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub dt: f32,

    /// Walking speed in world units per second along +X
    #[arg(long, default_value_t = 1200.0)]
    pub speed: f32,

    /// Place a water source next to the spawn point
    #[arg(long)]
    pub spring: bool,

    /// Print the effective config as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum NoiseArg {
    Trig,
    OpenSimplex,
}

impl From<NoiseArg> for NoiseKind {
    fn from(n: NoiseArg) -> Self {
        match n {
            NoiseArg::Trig => NoiseKind::Trig,
            NoiseArg::OpenSimplex => NoiseKind::OpenSimplex,
        }
    }
}

impl Args {
    /// Applies command-line overrides on top of `cfg`.
    pub fn apply(&self, cfg: &mut WorldConfig) {
        if let Some(seed) = self.seed {
            cfg.terrain.seed = seed;
        }
        if let Some(r) = self.render_distance {
            cfg.streaming.render_distance = r;
        }
        if let Some(noise) = self.noise {
            cfg.terrain.noise = noise.into();
        }
        if self.serial_water {
            cfg.water.parallel = false;
        }
    }
}
