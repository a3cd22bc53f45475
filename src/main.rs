//! gravdisc - gravitating discs
//!
//! Runs the simulation headless: bodies attract each other, their discs are
//! re-tessellated every frame and the mesh is uploaded to a wgpu device (or
//! a host-memory mirror when no adapter exists).

use std::process::ExitCode;
use std::time::{Duration, Instant};

use gravdisc::config::AppConfig;
use gravdisc::setup;
use gravdisc::systems::{CpuMirror, DiagnosticsSystem, FrameClock, UploadTarget};
use gravdisc_core::{MeshSync, World};
use gravdisc_render::{MeshBuffers, RenderContext};

fn create_upload_target(config: &AppConfig, world: &World) -> UploadTarget {
    if config.gpu.enabled {
        match pollster::block_on(RenderContext::new_headless()) {
            Ok(context) => return UploadTarget::Gpu(MeshBuffers::new(context, world.capacity())),
            Err(e) => log::warn!("GPU unavailable ({}). Mirroring meshes in host memory.", e),
        }
    }
    UploadTarget::Cpu(CpuMirror::with_capacity(world.capacity()))
}

fn main() -> ExitCode {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // RUST_LOG takes precedence over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();

    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    let mut world = match setup::build_world(&config) {
        Ok(world) => world,
        Err(e) => {
            log::error!("Failed to build world: {}", e);
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "World ready: {} bodies, {} vertices, {} indices, G = {}",
        world.body_count(),
        world.vertices().len(),
        world.indices().len(),
        world.gravitational_constant()
    );

    let mut target = create_upload_target(&config, &world);
    let mut sync = MeshSync::new();
    let mut clock = FrameClock::new(config.simulation.max_dt);
    let mut diagnostics = DiagnosticsSystem::new(config.debug.report_interval);

    let frame_interval = match config.simulation.target_fps {
        0 => None,
        fps => Some(Duration::from_secs_f64(1.0 / fps as f64)),
    };
    let frames = config.simulation.frames;
    let started = Instant::now();
    let mut uploads = 0u64;

    log::info!("Running {} frames, uploading to {}", frames, target.name());

    let mut frame = 0u64;
    while frames == 0 || frame < frames {
        let frame_start = Instant::now();

        let dt = clock.tick();
        world.update(dt);

        match sync.flush(&mut world, target.uploader()) {
            Ok(uploaded) if !uploaded.is_empty() => uploads += 1,
            Ok(_) => {}
            Err(e) => {
                log::error!("Mesh upload failed: {}", e);
                return ExitCode::FAILURE;
            }
        }

        diagnostics.on_frame(&world);
        frame += 1;

        if let Some(interval) = frame_interval {
            let elapsed = frame_start.elapsed();
            if elapsed < interval {
                std::thread::sleep(interval - elapsed);
            }
        }
    }

    log::info!(
        "Finished {} frames in {:.2}s ({} flushes with uploads, {} indices drawn)",
        frame,
        started.elapsed().as_secs_f32(),
        uploads,
        sync.index_count()
    );

    ExitCode::SUCCESS
}
