// ============================================
// Rover - Headless прогон стриминга террейна
// ============================================
// Использование: rover [config.json]
// Логи: RUST_LOG=debug rover

use mars_terrain::app::AppContext;
use mars_terrain::terrain::TileMesh;
use mars_terrain::{TerrainConfig, TerrainError};

/// 60 кадров в секунду
const FRAME_MS: u64 = 16;
/// Длительность прогона, с
const DRIVE_SECONDS: u64 = 120;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), TerrainError> {
    let config = match std::env::args().nth(1) {
        Some(path) => TerrainConfig::load_from_file(&path)?,
        None => TerrainConfig::default(),
    };

    let mut ctx = AppContext::new(&config)?;
    ctx.rover.speed = 25.0;
    ctx.rover.turn_rate = 0.05;

    println!("=== Mars Rover ===");
    println!(
        "Tile size: {} m, radius: {}, grid: {}",
        config.tile_size, config.visible_radius, config.grid_resolution
    );
    println!("Detail: {:?}, seed: {:#x}", config.detail_level, config.seed);
    println!("Vertex stride: {} bytes", TileMesh::vertex_layout().array_stride);
    println!("==================");

    let frames = DRIVE_SECONDS * 1000 / FRAME_MS;
    for frame in 0..frames {
        if let Some(update) = ctx.tick(FRAME_MS) {
            if !update.is_empty() {
                log::info!(
                    "t={:.1}s rover=({:.0}, {:.1}, {:.0}) tile {:?}: +{} -{}",
                    ctx.clock_ms() as f32 / 1000.0,
                    ctx.rover.position[0],
                    ctx.rover.position[1],
                    ctx.rover.position[2],
                    update.center,
                    update.created.len(),
                    update.evicted.len()
                );
            }
        }

        if frame % 600 == 0 {
            let visible = ctx.markers.iter().filter(|m| m.animation.is_visible()).count();
            log::debug!("Frame {}: {} of {} markers visible", frame, visible, ctx.markers.len());
        }
    }

    let stats = ctx.streamer.stats();
    let vertices: usize = ctx.streamer.loaded_tiles().map(|t| t.mesh().vertex_count()).sum();
    println!(
        "Done: {} updates ({} throttled), {} tiles built, {} evicted, {} loaded ({} vertices)",
        stats.updates,
        stats.throttled,
        stats.total_built,
        stats.total_evicted,
        stats.loaded,
        vertices
    );
    Ok(())
}
