//! Headless runner
//!
//! Usage: `polymarch [settings.json]`
//!
//! Builds a scene, runs the configured number of frames and prints the
//! final frame snapshot as JSON. Set `RUST_LOG=debug` for placement and
//! timing output.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use polymarch::sim::{FrameInput, Scene, tick};
use polymarch::{Settings, SimError};

fn main() {
    env_logger::init();
    log::info!("Polymarch (headless) starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), SimError> {
    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path)?,
        None => {
            log::info!("Using default settings");
            Settings::default()
        }
    };

    let seed = settings.seed.unwrap_or_else(clock_seed);
    let mut scene = Scene::new(&settings, seed)?;
    scene.seed_obstacles(settings.seed_obstacles)?;
    log::info!(
        "Scene initialized with seed {} and {} obstacles, rays query {}",
        seed,
        scene.polygons().len(),
        if scene.rays_use_grid() { "the grid" } else { "every polygon" }
    );

    let input = FrameInput::default();
    let mut ray_hits = 0;
    for _ in 0..settings.frames {
        let started = scene.debug_timing().then(Instant::now);
        let stats = tick(&mut scene, &input);
        ray_hits += stats.ray_hits;
        if let Some(started) = started {
            log::debug!("Frame {}: tick took {:?}", scene.frame(), started.elapsed());
        }
    }
    log::info!(
        "Ran {} frames, {} ray hits",
        scene.frame(),
        ray_hits
    );

    let json = serde_json::to_string_pretty(&scene.snapshot())?;
    println!("{json}");
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
