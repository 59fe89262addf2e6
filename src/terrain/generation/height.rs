// ============================================
// Height Map - Карта высот поверхности Марса
// ============================================
//
// elevation(x, z) = (база + все слои объектов + мелкая рябь) * 0.8
// Функция чистая: генератор неизменяем после создания и безопасно
// читается из потоков rayon одновременно.

use crate::config::TerrainConfig;

use super::features::sum_layer;
use super::noise::ripple2d;
use super::placement::FeatureSet;

/// Итоговое сглаживание суммарной высоты
pub const DAMPENING: f32 = 0.8;

/// Вклады всех слоёв в одной точке (для отладки и тестов)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayerBreakdown {
    pub base: f32,
    pub craters: f32,
    pub rivers: f32,
    pub dunes: f32,
    pub lakes: f32,
    pub canyons: f32,
    pub mesas: f32,
    pub mountains: f32,
    pub peaks: f32,
    pub detail: f32,
}

impl LayerBreakdown {
    /// Сумма в фиксированном порядке, умноженная на DAMPENING
    pub fn total(&self) -> f32 {
        (self.base
            + self.craters
            + self.rivers
            + self.dunes
            + self.lakes
            + self.canyons
            + self.mesas
            + self.mountains
            + self.peaks
            + self.detail)
            * DAMPENING
    }
}

/// Генератор высот
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    seed: u64,
    features: FeatureSet,
}

impl TerrainGenerator {
    /// Разместить объекты по конфигу (сид, детализация, размер мира)
    pub fn new(config: &TerrainConfig) -> Self {
        let features = FeatureSet::generate(config.seed, config.detail_level, config.world_extent);
        log::info!(
            "Terrain generator: seed {:#x}, detail {:?}, {} features",
            config.seed,
            config.detail_level,
            features.len()
        );
        Self { seed: config.seed, features }
    }

    /// Генератор с заранее заданным набором объектов
    pub fn with_features(seed: u64, features: FeatureSet) -> Self {
        Self { seed, features }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    /// Высота поверхности в точке
    #[inline]
    pub fn elevation(&self, x: f32, z: f32) -> f32 {
        self.layers(x, z).total()
    }

    /// Все слои по отдельности
    pub fn layers(&self, x: f32, z: f32) -> LayerBreakdown {
        let f = &self.features;
        LayerBreakdown {
            base: base_elevation(x, z),
            craters: sum_layer(&f.craters, x, z) + sum_layer(&f.dense_craters, x, z),
            rivers: sum_layer(&f.rivers, x, z),
            dunes: sum_layer(&f.dunes, x, z),
            lakes: sum_layer(&f.lakes, x, z),
            canyons: sum_layer(&f.canyons, x, z),
            mesas: sum_layer(&f.mesas, x, z),
            mountains: sum_layer(&f.mountain_ranges, x, z),
            peaks: sum_layer(&f.high_peaks, x, z),
            detail: rocky_detail(x, z),
        }
    }
}

/// Холмистая база: 4 масштаба, амплитуда падает с частотой
#[inline]
pub fn base_elevation(x: f32, z: f32) -> f32 {
    let large = ripple2d(x, z, 0.002, 0.0023, 0.0) * 12.0;
    let medium = ripple2d(x, z, 0.009, 0.007, 1.3) * 5.0;
    let small = ripple2d(x, z, 0.031, 0.027, 2.1) * 1.6;
    let micro = ripple2d(x, z, 0.11, 0.13, 0.6) * 0.4;
    large + medium + small + micro
}

/// Мелкая каменистая рябь поверх всего
#[inline]
pub fn rocky_detail(x: f32, z: f32) -> f32 {
    ripple2d(x, z, 0.37, 0.41, 0.0) * 0.12 + ripple2d(x, z, 0.83, 0.79, 0.5) * 0.05
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DetailLevel;
    use crate::terrain::generation::features::Crater;
    use ultraviolet::Vec2;

    fn single_crater(center: Vec2, radius: f32, depth: f32) -> TerrainGenerator {
        let features = FeatureSet {
            craters: vec![Crater { center, radius, depth, rim_height: depth * 0.3 }],
            ..Default::default()
        };
        TerrainGenerator::with_features(1, features)
    }

    #[test]
    fn test_elevation_deterministic() {
        let config = TerrainConfig::default();
        let a = TerrainGenerator::new(&config);
        let b = TerrainGenerator::new(&config);
        for i in -20..20 {
            let x = i as f32 * 37.3;
            let z = i as f32 * -11.9 + 5.0;
            assert_eq!(a.elevation(x, z).to_bits(), a.elevation(x, z).to_bits());
            assert_eq!(a.elevation(x, z).to_bits(), b.elevation(x, z).to_bits());
        }
    }

    #[test]
    fn test_crater_containment() {
        let center = Vec2::new(300.0, -150.0);
        let cratered = single_crater(center, 40.0, 6.0);
        let flat = TerrainGenerator::with_features(1, FeatureSet::default());

        let diff = cratered.elevation(center.x, center.y) - flat.elevation(center.x, center.y);
        assert!(diff < 0.0);
        assert!(diff >= -6.0 * DAMPENING - 1e-3);

        // Дальше 1.5R - вклад ровно ноль
        for (x, z) in [(361.0, -150.0), (300.0, -90.0), (200.0, -300.0)] {
            assert_eq!(cratered.elevation(x, z).to_bits(), flat.elevation(x, z).to_bits());
        }
    }

    #[test]
    fn test_empty_features_is_base_plus_detail() {
        let gen = TerrainGenerator::with_features(0, FeatureSet::default());
        let l = gen.layers(12.0, 34.0);
        assert_eq!(l.craters, 0.0);
        assert_eq!(l.mountains, 0.0);
        let expected = (base_elevation(12.0, 34.0) + rocky_detail(12.0, 34.0)) * DAMPENING;
        assert!((gen.elevation(12.0, 34.0) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_detail_level_changes_world() {
        let with_detail = |detail_level| {
            TerrainGenerator::new(&TerrainConfig { detail_level, ..Default::default() })
        };
        let low = with_detail(DetailLevel::Low);
        let high = with_detail(DetailLevel::High);
        assert!(low.features().len() < high.features().len());
    }

    #[test]
    fn test_elevation_finite_everywhere() {
        let gen = TerrainGenerator::new(&TerrainConfig::default());
        for i in -40..40 {
            for j in -40..40 {
                let h = gen.elevation(i as f32 * 97.0, j as f32 * 101.0);
                assert!(h.is_finite());
            }
        }
    }
}
