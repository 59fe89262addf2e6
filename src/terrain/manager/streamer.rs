// ============================================
// Tile Streamer - Подгрузка тайлов вокруг фокуса
// ============================================
//
// Каждый тик вызывающий передаёт позицию фокуса (ровер).
// При смене тайла: required = квадрат Чебышёва radius вокруг центра,
// недостающие строятся (параллельно, rayon), лишние выгружаются.
// К выходу из update() ключи кэша == required.

use std::collections::HashSet;
use std::sync::Arc;

use rayon::prelude::*;

use crate::config::TerrainConfig;
use crate::error::TerrainError;
use crate::terrain::cache::{Tile, TileCache, TileCoord};
use crate::terrain::generation::TerrainGenerator;
use crate::terrain::mesh::{SurfaceMeshBuilder, TileMesh};

use super::types::{StreamStats, TileUpdate};

pub struct TileStreamer {
    tile_size: f32,
    visible_radius: i32,
    throttle_ms: u64,
    generator: Arc<TerrainGenerator>,
    builder: SurfaceMeshBuilder,
    cache: TileCache,
    current: Option<TileCoord>,
    last_update_ms: Option<u64>,
    next_build_id: u64,
    stats: StreamStats,
}

impl TileStreamer {
    /// Неверный конфиг - ошибка здесь, а не на каждом тике
    pub fn new(
        config: &TerrainConfig,
        generator: Arc<TerrainGenerator>,
    ) -> Result<Self, TerrainError> {
        config.validate()?;
        let builder = SurfaceMeshBuilder::new(config.grid_resolution)?;
        log::info!(
            "Tile streamer: tile {} m, radius {}, grid {}x{}, throttle {} ms",
            config.tile_size,
            config.visible_radius,
            config.grid_resolution,
            config.grid_resolution,
            config.update_throttle_ms
        );
        Ok(Self {
            tile_size: config.tile_size,
            visible_radius: config.visible_radius,
            throttle_ms: config.update_throttle_ms,
            generator,
            builder,
            cache: TileCache::new(),
            current: None,
            last_update_ms: None,
            next_build_id: 0,
            stats: StreamStats::default(),
        })
    }

    pub fn generator(&self) -> &Arc<TerrainGenerator> {
        &self.generator
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn current_center(&self) -> Option<TileCoord> {
        self.current
    }

    pub fn stats(&self) -> StreamStats {
        StreamStats { loaded: self.cache.len(), ..self.stats }
    }

    /// Обновить набор тайлов для фокуса.
    /// `None` - вызов пропущен: тайл тот же и интервал троттлинга не прошёл,
    /// либо фокус не конечен (NaN, бесконечность).
    pub fn update(&mut self, focus_x: f32, focus_z: f32, now_ms: u64) -> Option<TileUpdate> {
        let Some(center) = TileCoord::from_world(focus_x, focus_z, self.tile_size) else {
            log::warn!("Ignoring non-finite terrain focus ({}, {})", focus_x, focus_z);
            return None;
        };

        if self.current == Some(center) {
            if let Some(last) = self.last_update_ms {
                if now_ms.saturating_sub(last) < self.throttle_ms {
                    self.stats.throttled += 1;
                    log::trace!("Terrain update throttled at {:?}", center);
                    return None;
                }
            }
        }

        let required: HashSet<TileCoord> = center.square_around(self.visible_radius).collect();
        let evicted = self.evict_stale(&required);
        let created = self.build_missing(&required);

        self.current = Some(center);
        self.last_update_ms = Some(now_ms);
        self.stats.updates += 1;

        debug_assert_eq!(self.cache.coord_set(), required);

        if !created.is_empty() || !evicted.is_empty() {
            log::debug!(
                "Terrain center {:?}: +{} tiles, -{} tiles, {} loaded",
                center,
                created.len(),
                evicted.len(),
                self.cache.len()
            );
        }

        Some(TileUpdate { center, created, evicted })
    }

    fn evict_stale(&mut self, required: &HashSet<TileCoord>) -> Vec<TileCoord> {
        let stale: Vec<TileCoord> = self.cache.coords().filter(|c| !required.contains(c)).collect();
        for coord in &stale {
            if let Some(tile) = self.cache.remove(coord) {
                log::trace!("Evicted tile {:?} (build #{})", coord, tile.build_id());
            }
        }
        self.stats.total_evicted += stale.len() as u64;
        stale
    }

    fn build_missing(&mut self, required: &HashSet<TileCoord>) -> Vec<TileCoord> {
        let mut missing: Vec<TileCoord> =
            required.iter().filter(|c| !self.cache.contains(c)).copied().collect();
        // Порядок не важен для результата, но build_id удобнее стабильные
        missing.sort_unstable();

        // Меши - параллельно: генератор только читается
        let generator = self.generator.as_ref();
        let builder = self.builder;
        let tile_size = self.tile_size;
        let meshes: Vec<(TileCoord, TileMesh)> = missing
            .par_iter()
            .map(|coord| {
                let origin = coord.origin(tile_size);
                (*coord, builder.build(generator, origin[0], origin[1], tile_size))
            })
            .collect();

        for (coord, mesh) in meshes {
            let tile = Tile::new(coord, tile_size, mesh, self.next_build_id);
            self.next_build_id += 1;
            self.cache.insert(tile);
        }
        self.stats.total_built += missing.len() as u64;
        missing
    }

    /// Тайл, содержащий мировую точку, если он загружен
    pub fn tile_at(&self, x: f32, z: f32) -> Option<&Tile> {
        self.cache.get(&TileCoord::from_world(x, z, self.tile_size)?)
    }

    /// Все загруженные тайлы (для рендера)
    pub fn loaded_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cache.iter()
    }

    pub fn loaded_coords(&self) -> HashSet<TileCoord> {
        self.cache.coord_set()
    }

    /// Высота земли по загруженным тайлам.
    /// `None` вне загруженной области - запасной вариант выбирает вызывающий.
    /// Тайл выбирается тем же floor-делением, что и в update(), поэтому
    /// точка на округлённой границе тайла сэмплируется с зажатием
    pub fn ground_height(&self, x: f32, z: f32) -> Option<f32> {
        self.tile_at(x, z).map(|tile| tile.clamped_height(x, z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn streamer(tile_size: f32, radius: i32, throttle_ms: u64) -> TileStreamer {
        let config = TerrainConfig {
            tile_size,
            visible_radius: radius,
            grid_resolution: 5,
            update_throttle_ms: throttle_ms,
            ..Default::default()
        };
        let generator = Arc::new(TerrainGenerator::new(&config));
        TileStreamer::new(&config, generator).unwrap()
    }

    fn block(
        xs: std::ops::RangeInclusive<i32>,
        zs: std::ops::RangeInclusive<i32>,
    ) -> HashSet<TileCoord> {
        xs.flat_map(|x| zs.clone().map(move |z| TileCoord::new(x, z))).collect()
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let generator = Arc::new(TerrainGenerator::new(&TerrainConfig::default()));
        for config in [
            TerrainConfig { tile_size: 0.0, ..Default::default() },
            TerrainConfig { tile_size: -5.0, ..Default::default() },
            TerrainConfig { visible_radius: -1, ..Default::default() },
            TerrainConfig { grid_resolution: 1, ..Default::default() },
        ] {
            assert!(TileStreamer::new(&config, generator.clone()).is_err());
        }
    }

    #[test]
    fn test_scenario_move_across_tile() {
        let mut s = streamer(200.0, 1, 250);

        let first = s.update(0.0, 0.0, 0).unwrap();
        assert_eq!(first.center, TileCoord::new(0, 0));
        assert_eq!(s.loaded_coords(), block(-1..=1, -1..=1));
        assert_eq!(first.created.len(), 9);

        let inside = |c: TileCoord| (c.x as f32 * 200.0 + 1.0, c.z as f32 * 200.0 + 1.0);
        let kept_ids: Vec<(TileCoord, u64)> = block(0..=1, -1..=1)
            .into_iter()
            .map(|c| {
                let (x, z) = inside(c);
                (c, s.tile_at(x, z).unwrap().build_id())
            })
            .collect();

        // Смена тайла применяется даже внутри интервала троттлинга
        let moved = s.update(250.0, 0.0, 10).unwrap();
        assert_eq!(moved.center, TileCoord::new(1, 0));
        assert_eq!(s.loaded_coords(), block(0..=2, -1..=1));

        let evicted: HashSet<_> = moved.evicted.into_iter().collect();
        let created: HashSet<_> = moved.created.into_iter().collect();
        assert_eq!(evicted, block(-1..=-1, -1..=1));
        assert_eq!(created, block(2..=2, -1..=1));

        // Оставшиеся тайлы - те же экземпляры, не перестроены
        for (coord, id) in kept_ids {
            let (x, z) = inside(coord);
            let tile = s.tile_at(x, z).unwrap();
            assert_eq!(tile.build_id(), id);
        }
    }

    #[test]
    fn test_update_idempotent_within_throttle() {
        let mut s = streamer(200.0, 1, 250);
        assert!(s.update(10.0, 10.0, 1000).is_some());
        let built = s.stats().total_built;

        assert!(s.update(10.0, 10.0, 1100).is_none());
        assert!(s.update(50.0, 120.0, 1200).is_none());
        assert_eq!(s.stats().total_built, built);
        assert_eq!(s.stats().throttled, 2);

        // Интервал прошёл: обновление применяется, но менять нечего
        let after = s.update(10.0, 10.0, 1300).unwrap();
        assert!(after.is_empty());
        assert_eq!(s.stats().total_built, built);
    }

    #[test]
    fn test_cache_matches_required_after_every_update() {
        let mut s = streamer(50.0, 2, 0);
        let path = [
            (0.0, 0.0),
            (75.0, -10.0),
            (-120.0, 300.0),
            (5000.0, -5000.0),
            (5010.0, -4990.0),
        ];
        for (i, (x, z)) in path.iter().enumerate() {
            s.update(*x, *z, i as u64 * 16);
            let center = TileCoord::from_world(*x, *z, 50.0).unwrap();
            let expected: HashSet<_> = center.square_around(2).collect();
            assert_eq!(s.loaded_coords(), expected);
            assert_eq!(s.loaded_tiles().count(), 25);
        }
    }

    #[test]
    fn test_teleport_rebuilds_everything() {
        let mut s = streamer(100.0, 1, 0);
        s.update(0.0, 0.0, 0);
        let far = s.update(10_000.0, 10_000.0, 1).unwrap();
        assert_eq!(far.created.len(), 9);
        assert_eq!(far.evicted.len(), 9);
        assert_eq!(s.stats().total_evicted, 9);
        assert_eq!(s.stats().loaded, 9);
    }

    #[test]
    fn test_radius_zero_single_tile() {
        let mut s = streamer(200.0, 0, 0);
        s.update(-10.0, 390.0, 0);
        assert_eq!(s.loaded_coords(), block(-1..=-1, 1..=1));
    }

    #[test]
    fn test_tile_at_and_ground_height() {
        let mut s = streamer(200.0, 1, 0);
        s.update(0.0, 0.0, 0);

        let tile = s.tile_at(-150.0, 350.0).unwrap();
        assert_eq!(tile.coord(), TileCoord::new(-1, 1));
        assert!(s.tile_at(700.0, 0.0).is_none());

        let h = s.ground_height(0.0, 0.0).unwrap();
        let expected = s.generator().elevation(0.0, 0.0);
        assert!((h - expected).abs() < 1e-3);
        assert!(s.ground_height(1000.0, 1000.0).is_none());
    }

    #[test]
    fn test_distant_focus_goes_through_diff() {
        let mut s = streamer(200.0, 1, 0);
        s.update(0.0, 0.0, 0);

        let far = s.update(1.0e12, -1.0e12, 1).unwrap();
        let limit = crate::terrain::cache::TILE_LIMIT;
        assert_eq!(far.center, TileCoord::new(limit, -limit));
        assert_eq!(far.created.len(), 9);
        assert_eq!(far.evicted.len(), 9);
        assert_eq!(s.loaded_coords(), block(limit - 1..=limit + 1, -limit - 1..=-limit + 1));

        // Дальше предела - тот же центр, перестраивать нечего
        let further = s.update(3.0e12, -3.0e12, 2).unwrap();
        assert!(further.is_empty());

        let back = s.update(0.0, 0.0, 3).unwrap();
        assert_eq!(back.created.len(), 9);
        assert_eq!(s.loaded_coords(), block(-1..=1, -1..=1));
    }

    #[test]
    fn test_non_finite_focus_ignored() {
        let mut s = streamer(200.0, 1, 0);
        s.update(0.0, 0.0, 0);
        let before = s.loaded_coords();

        assert!(s.update(f32::NAN, 0.0, 1).is_none());
        assert!(s.update(0.0, f32::INFINITY, 2).is_none());
        assert_eq!(s.loaded_coords(), before);
        assert_eq!(s.current_center(), Some(TileCoord::new(0, 0)));
        assert!(s.tile_at(f32::NAN, 0.0).is_none());
        assert!(s.ground_height(f32::NAN, f32::NAN).is_none());
    }

    #[test]
    fn test_ground_height_on_inexact_tile_size() {
        // 0.1 не представимо в f32: floor-деление и границы тайла расходятся на краях
        let mut s = streamer(0.1, 1, 0);
        s.update(0.05, 0.05, 0);

        let steps = 300;
        for i in 0..steps {
            for j in 0..steps {
                let x = -0.1 + 0.3 * i as f32 / steps as f32;
                let z = -0.1 + 0.3 * j as f32 / steps as f32;
                if s.tile_at(x, z).is_some() {
                    let h = s.ground_height(x, z);
                    assert!(h.is_some_and(f32::is_finite), "no ground at ({}, {})", x, z);
                }
            }
        }
    }
}
