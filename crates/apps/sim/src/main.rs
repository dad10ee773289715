use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use grove_avatar::AvatarConfig;
use grove_sim::{Script, Simulation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "grove-sim")]
#[command(about = "Headless Grove avatar session driven by a scripted timeline", long_about = None)]
struct Args {
    /// Avatar config file (TOML); built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Event script (TOML); the built-in walk-through when omitted
    #[arg(long)]
    script: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long, default_value = "300")]
    frames: u64,

    /// Frame time in seconds
    #[arg(long, default_value = "0.016666668")]
    dt: f32,

    /// Obstacle placement seed, overriding the config
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let log_level = args.log_level.parse().unwrap_or(tracing::Level::INFO);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "grove_sim={log_level},grove_avatar={log_level},grove_physics={log_level},animation={log_level},devices={log_level}"
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Grove Sim v{}", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => AvatarConfig::from_file(path)?,
        None => AvatarConfig::default(),
    };
    let script = match &args.script {
        Some(path) => Script::from_file(path)?,
        None => Script::builtin(),
    };

    let mut sim = Simulation::new(config, script, args.seed);
    tracing::info!(
        frames = args.frames,
        dt = args.dt,
        seed = sim.seed(),
        "starting simulation"
    );

    let report = sim.run(args.frames, args.dt)?;

    tracing::info!(
        position = ?report.transform.position,
        yaw = report.transform.yaw,
        clip = ?report.active,
        "final state"
    );
    tracing::info!(
        frames = report.stats.frames,
        simulated_secs = report.stats.simulated_secs,
        moves = report.stats.moves,
        blocked = report.stats.blocked,
        suppressed = report.stats.suppressed,
        transitions = report.stats.transitions,
        "simulation finished"
    );
    Ok(())
}
