//! Headless runner: drives the scenes through the fixed-step clock and logs what happened

use std::convert::Infallible;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use wave_ballistics::assets::{TextureId, TextureTable};
use wave_ballistics::camera::FlyCamera;
use wave_ballistics::config::{ObstacleLayout, SceneConfig};
use wave_ballistics::error::ConfigError;
use wave_ballistics::mesh::{SeaMesh, box_mesh, hull_mesh, trail_line};
use wave_ballistics::sim::{
    LaunchEvent, LaunchInput, LaunchState, SeaInput, SeaState, SimulationClock, tick_launch,
    tick_sea,
};

/// Scatter size used when only `--seed` is given
const DEFAULT_SCATTER_COUNT: usize = 8;
/// Chase camera offset behind/above the boat
const FOLLOW_DISTANCE: f32 = 10.0;
const FOLLOW_HEIGHT: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Scene {
    Sea,
    Launch,
    Both,
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "wave-ballistics")]
#[command(about = "Boat-on-waves and projectile-launch simulations", long_about = None)]
struct Args {
    /// Which scene to run
    #[arg(long, value_enum, default_value = "both")]
    scene: Scene,

    /// Simulated duration per scene
    #[arg(long, value_name = "SECONDS", default_value = "10")]
    seconds: f32,

    /// Host frame rate fed to the fixed-step clock
    #[arg(long, default_value = "60")]
    fps: f32,

    /// Scene config JSON (defaults are used when the file is missing)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the effective config to this path and exit
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,

    /// Scatter obstacles with this seed instead of the configured layout
    #[arg(long)]
    seed: Option<u64>,

    /// Log filter (overrides RUST_LOG)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_level.as_deref());

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: Option<&str>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.parse_filters(level);
    }
    builder.init();
}

fn run(args: &Args) -> Result<(), ConfigError> {
    let mut config = match &args.config {
        Some(path) => SceneConfig::load_or_default(path)?,
        None => SceneConfig::default(),
    };

    if let Some(seed) = args.seed {
        let count = match config.obstacles {
            ObstacleLayout::Scatter { count, .. } => count,
            _ => DEFAULT_SCATTER_COUNT,
        };
        config.obstacles = ObstacleLayout::Scatter { seed, count };
    }

    if let Some(path) = &args.write_config {
        config.validate()?;
        return config.save(path);
    }

    let frame_dt = SimulationClock::frame_dt(args.fps);
    log::info!(
        "Wave Ballistics starting: {}s per scene at {} fps",
        args.seconds,
        args.fps
    );

    let Ok(textures) =
        TextureTable::resolve(|id, path| Ok::<_, Infallible>(TexturePath { id, path }));

    if matches!(args.scene, Scene::Sea | Scene::Both) {
        run_sea(&config, args.seconds, frame_dt)?;
    }
    if matches!(args.scene, Scene::Launch | Scene::Both) {
        run_launch(&config, &textures, args.seconds, frame_dt)?;
    }
    Ok(())
}

/// Stand-in texture handle for a host without a GPU
#[derive(Debug, Clone, Copy)]
struct TexturePath {
    id: TextureId,
    path: &'static str,
}

fn run_sea(config: &SceneConfig, seconds: f32, frame_dt: f32) -> Result<(), ConfigError> {
    config.sea.validate()?;
    let mut state = SeaState::new(&config.sea);
    let mut mesh = SeaMesh::new(config.sea.grid_size, config.sea.grid_width);
    let (hull_vertices, _) = hull_mesh(&state.boat);
    let mut camera = FlyCamera::default();
    let mut clock = SimulationClock::with_duration(seconds);

    // Full throttle, turning slowly
    let input = SeaInput {
        forward: true,
        turn: -0.25,
        place: None,
    };

    let mut max_tilt = 0.0f32;
    while !clock.is_finished() {
        clock.advance(frame_dt, |dt| tick_sea(&mut state, &input, dt));
        mesh.update(&state.sea);
        camera.follow(&state.boat, FOLLOW_DISTANCE, FOLLOW_HEIGHT);
        max_tilt = max_tilt.max(state.boat.pitch().abs().max(state.boat.roll().abs()));
    }

    log::info!(
        "Sea: {} ticks ({:.2}s), {} sea vertices, {} hull vertices",
        clock.ticks(),
        clock.seconds(),
        mesh.vertices.len(),
        hull_vertices.len()
    );
    log::info!(
        "Boat at {:?}, yaw {:.1}, pitch {:.1}, roll {:.1}, max tilt {:.1}",
        state.boat.position,
        state.boat.yaw(),
        state.boat.pitch(),
        state.boat.roll(),
        max_tilt
    );
    log::debug!("Camera at {:?} looking {:?}", camera.position, camera.front());
    Ok(())
}

fn run_launch(
    config: &SceneConfig,
    textures: &TextureTable<TexturePath>,
    seconds: f32,
    frame_dt: f32,
) -> Result<(), ConfigError> {
    let mut state = LaunchState::from_config(config)?;
    let mut clock = SimulationClock::with_duration(seconds);

    for obstacle in &state.obstacles {
        let (vertices, _) = box_mesh(obstacle);
        let texture = textures.get(obstacle.texture);
        log::debug!(
            "Obstacle {} at {:?}: {} vertices, texture {:?} ({})",
            obstacle.id,
            obstacle.center,
            vertices.len(),
            texture.id,
            texture.path
        );
    }

    let mut input = LaunchInput {
        start: true,
        ..Default::default()
    };
    let (mut ground_bounces, mut obstacle_hits) = (0u32, 0u32);
    let mut stopped = None;

    while !clock.is_finished() {
        clock.advance(frame_dt, |dt| {
            if stopped.is_some() {
                return;
            }
            tick_launch(&mut state, &input, dt);
            input = LaunchInput::default();
            for event in &state.events {
                match event {
                    LaunchEvent::GroundBounce { speed } => {
                        ground_bounces += 1;
                        log::debug!("Ground bounce at {speed:.2} m/s");
                    }
                    LaunchEvent::ObstacleHit { id, speed } => {
                        obstacle_hits += 1;
                        log::debug!("Hit obstacle {id} at {speed:.2} m/s");
                    }
                    LaunchEvent::Stopped { position } => stopped = Some(*position),
                }
            }
        });
        if stopped.is_some() {
            break;
        }
    }

    let trail = trail_line(&state.projectile.trail);
    log::info!(
        "Launch: {} ticks, {} ground bounces, {} obstacle hits, {} trail points",
        state.time_ticks,
        ground_bounces,
        obstacle_hits,
        trail.len()
    );
    match stopped {
        Some(position) => log::info!("Projectile came to rest at {position:?}"),
        None => log::info!(
            "Projectile still moving at {:?} ({:.2} m/s)",
            state.projectile.position,
            state.projectile.speed()
        ),
    }
    Ok(())
}
