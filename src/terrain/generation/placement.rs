// ============================================
// Feature Placement - Расстановка объектов рельефа
// ============================================
//
// Позиции: индекс кандидата -> sin/cos -> точка в области мира.
// Размеры и интенсивность: хэш (сид, слой, индекс).
// Один сид = один и тот же мир, вне зависимости от порядка
// построения тайлов.

use std::f32::consts::TAU;

use ultraviolet::Vec2;

use crate::config::DetailLevel;

use super::features::{
    Canyon, Crater, DenseCrater, Dune, HighPeak, Lake, Mesa, MountainRange, River, Segment,
};
use super::noise::{seeded_range, seeded_unit};

/// Идентификаторы слоёв для хэширования
mod layer {
    pub const CRATER: i32 = 1;
    pub const DENSE_CRATER: i32 = 2;
    pub const RIVER: i32 = 3;
    pub const DUNE: i32 = 4;
    pub const LAKE: i32 = 5;
    pub const CANYON: i32 = 6;
    pub const MESA: i32 = 7;
    pub const MOUNTAIN: i32 = 8;
    pub const PEAK: i32 = 9;
    pub const WIND: i32 = 10;
}

/// Базовые количества при DetailLevel::Normal
pub const BASE_CRATERS: usize = 30;
pub const BASE_DENSE_CRATERS: usize = 90;
pub const BASE_RIVERS: usize = 5;
pub const BASE_DUNES: usize = 40;
pub const BASE_LAKES: usize = 6;
pub const BASE_CANYONS: usize = 4;
pub const BASE_MESAS: usize = 12;
pub const BASE_MOUNTAIN_RANGES: usize = 5;
pub const BASE_PEAK_CANDIDATES: usize = 80;

/// Доля кандидатов, которые становятся высокими пиками
pub const PEAK_ACCEPTANCE: f32 = 0.1;

/// Радиус, начиная с которого у кратера появляется центральная горка
const CENTRAL_PEAK_MIN_RADIUS: f32 = 20.0;

/// Все объекты мира
#[derive(Clone, Debug, Default)]
pub struct FeatureSet {
    pub craters: Vec<Crater>,
    pub dense_craters: Vec<DenseCrater>,
    pub rivers: Vec<River>,
    pub dunes: Vec<Dune>,
    pub lakes: Vec<Lake>,
    pub canyons: Vec<Canyon>,
    pub mesas: Vec<Mesa>,
    pub mountain_ranges: Vec<MountainRange>,
    pub high_peaks: Vec<HighPeak>,
}

/// Разброс точек для одного слоя
struct Scatter {
    seed: u64,
    layer: i32,
    extent: f32,
    freq_x: f32,
    freq_z: f32,
    phase: f32,
}

impl Scatter {
    fn new(seed: u64, layer: i32, extent: f32, freq_x: f32, freq_z: f32) -> Self {
        let phase = seeded_unit(seed, layer, -1) * TAU;
        Self { seed, layer, extent, freq_x, freq_z, phase }
    }

    /// Точка кандидата `i` внутри [-extent, extent]^2
    fn point(&self, i: usize) -> Vec2 {
        let fi = i as f32 + 1.0;
        Vec2::new(
            (fi * self.freq_x + self.phase).sin() * self.extent,
            (fi * self.freq_z + self.phase * 1.7).cos() * self.extent,
        )
    }

    /// Случайная величина кандидата `i`; `slot` различает параметры
    fn range(&self, i: usize, slot: i32, min: f32, max: f32) -> f32 {
        seeded_range(self.seed, self.layer, i as i32 * 8 + slot, min, max)
    }

    fn unit(&self, i: usize, slot: i32) -> f32 {
        seeded_unit(self.seed, self.layer, i as i32 * 8 + slot)
    }

    /// Отрезок из точки кандидата в случайном направлении
    fn segment(&self, i: usize, min_len: f32, max_len: f32) -> Segment {
        let start = self.point(i);
        let angle = self.unit(i, 6) * TAU;
        let length = self.range(i, 7, min_len, max_len);
        Segment::new(start, start + Vec2::new(angle.cos(), angle.sin()) * length)
    }
}

impl FeatureSet {
    /// Разместить все объекты для сида и детализации
    pub fn generate(seed: u64, detail: DetailLevel, extent: f32) -> Self {
        let count = |base: usize| detail.scale_count(base);
        Self {
            craters: Self::place_craters(seed, count(BASE_CRATERS), extent),
            dense_craters: Self::place_dense_craters(seed, count(BASE_DENSE_CRATERS), extent),
            rivers: Self::place_rivers(seed, count(BASE_RIVERS), extent),
            dunes: Self::place_dunes(seed, count(BASE_DUNES), extent),
            lakes: Self::place_lakes(seed, count(BASE_LAKES), extent),
            canyons: Self::place_canyons(seed, count(BASE_CANYONS), extent),
            mesas: Self::place_mesas(seed, count(BASE_MESAS), extent),
            mountain_ranges: Self::place_mountain_ranges(seed, count(BASE_MOUNTAIN_RANGES), extent),
            high_peaks: Self::place_high_peaks(seed, count(BASE_PEAK_CANDIDATES), extent),
        }
    }

    /// Общее количество объектов
    pub fn len(&self) -> usize {
        self.craters.len()
            + self.dense_craters.len()
            + self.rivers.len()
            + self.dunes.len()
            + self.lakes.len()
            + self.canyons.len()
            + self.mesas.len()
            + self.mountain_ranges.len()
            + self.high_peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn place_craters(seed: u64, count: usize, extent: f32) -> Vec<Crater> {
        let s = Scatter::new(seed, layer::CRATER, extent, 12.9898, 78.233);
        (0..count)
            .map(|i| {
                let radius = s.range(i, 0, 15.0, 60.0);
                let depth = radius * s.range(i, 1, 0.12, 0.22);
                Crater { center: s.point(i), radius, depth, rim_height: depth * 0.3 }
            })
            .collect()
    }

    fn place_dense_craters(seed: u64, count: usize, extent: f32) -> Vec<DenseCrater> {
        let s = Scatter::new(seed, layer::DENSE_CRATER, extent, 39.3468, 11.1351);
        (0..count)
            .map(|i| {
                let radius = s.range(i, 0, 4.0, 28.0);
                let depth = radius * s.range(i, 1, 0.15, 0.25);
                let central_peak =
                    if radius > CENTRAL_PEAK_MIN_RADIUS { depth * 0.35 } else { 0.0 };
                DenseCrater {
                    center: s.point(i),
                    radius,
                    depth,
                    rim_height: depth * 0.25,
                    central_peak,
                    floor_noise: 0.15,
                }
            })
            .collect()
    }

    fn place_rivers(seed: u64, count: usize, extent: f32) -> Vec<River> {
        let s = Scatter::new(seed, layer::RIVER, extent, 4.898, 7.23);
        (0..count)
            .map(|i| River {
                segment: s.segment(i, 300.0, 900.0),
                half_width: s.range(i, 0, 8.0, 20.0),
                depth: s.range(i, 1, 1.5, 3.5),
                meander_amplitude: 0.4,
                meander_frequency: s.range(i, 2, 0.02, 0.05),
            })
            .collect()
    }

    fn place_dunes(seed: u64, count: usize, extent: f32) -> Vec<Dune> {
        let s = Scatter::new(seed, layer::DUNE, extent, 27.619, 57.583);
        // Один преобладающий ветер на весь мир
        let prevailing = seeded_unit(seed, layer::WIND, 0) * TAU;
        (0..count)
            .map(|i| Dune {
                center: s.point(i),
                radius: s.range(i, 0, 20.0, 60.0),
                height: s.range(i, 1, 1.0, 4.0),
                wind_direction: prevailing + s.range(i, 2, -0.3, 0.3),
            })
            .collect()
    }

    fn place_lakes(seed: u64, count: usize, extent: f32) -> Vec<Lake> {
        let s = Scatter::new(seed, layer::LAKE, extent, 63.7264, 10.873);
        (0..count)
            .map(|i| Lake {
                center: s.point(i),
                radius: s.range(i, 0, 40.0, 120.0),
                depth: s.range(i, 1, 2.0, 5.0),
                shore_height: s.range(i, 2, 0.5, 1.2),
            })
            .collect()
    }

    fn place_canyons(seed: u64, count: usize, extent: f32) -> Vec<Canyon> {
        let s = Scatter::new(seed, layer::CANYON, extent, 2.345, 3.917);
        (0..count)
            .map(|i| Canyon {
                segment: s.segment(i, 500.0, 1500.0),
                width: s.range(i, 0, 30.0, 70.0),
                depth: s.range(i, 1, 10.0, 25.0),
                rim_height: s.range(i, 2, 1.0, 3.0),
                width_phase: s.unit(i, 3) * TAU,
            })
            .collect()
    }

    fn place_mesas(seed: u64, count: usize, extent: f32) -> Vec<Mesa> {
        let s = Scatter::new(seed, layer::MESA, extent, 93.9898, 47.233);
        (0..count)
            .map(|i| {
                let height = s.range(i, 1, 10.0, 30.0);
                Mesa {
                    center: s.point(i),
                    radius: s.range(i, 0, 30.0, 80.0),
                    height,
                    talus_height: height * 0.08,
                }
            })
            .collect()
    }

    fn place_mountain_ranges(seed: u64, count: usize, extent: f32) -> Vec<MountainRange> {
        let s = Scatter::new(seed, layer::MOUNTAIN, extent, 1.618, 2.718);
        (0..count)
            .map(|i| MountainRange {
                spine: s.segment(i, 600.0, 1600.0),
                width: s.range(i, 0, 80.0, 200.0),
                height: s.range(i, 1, 25.0, 60.0),
                peak_variation: s.range(i, 2, 10.0, 30.0),
                width_phase: s.unit(i, 3) * TAU,
                rock_amplitude: 1.5,
            })
            .collect()
    }

    fn place_high_peaks(seed: u64, candidates: usize, extent: f32) -> Vec<HighPeak> {
        let s = Scatter::new(seed, layer::PEAK, extent, 17.371, 31.415);
        (0..candidates)
            .filter(|&i| s.unit(i, 5) < PEAK_ACCEPTANCE)
            .map(|i| HighPeak {
                center: s.point(i),
                radius: s.range(i, 0, 60.0, 140.0),
                height: s.range(i, 1, 60.0, 120.0),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_world() {
        let a = FeatureSet::generate(99, DetailLevel::Normal, 2000.0);
        let b = FeatureSet::generate(99, DetailLevel::Normal, 2000.0);
        assert_eq!(a.craters, b.craters);
        assert_eq!(a.mountain_ranges, b.mountain_ranges);
        assert_eq!(a.high_peaks, b.high_peaks);
    }

    #[test]
    fn test_detail_scales_counts() {
        let low = FeatureSet::generate(1, DetailLevel::Low, 2000.0);
        let normal = FeatureSet::generate(1, DetailLevel::Normal, 2000.0);
        let high = FeatureSet::generate(1, DetailLevel::High, 2000.0);
        assert_eq!(normal.craters.len(), BASE_CRATERS);
        assert_eq!(normal.dense_craters.len(), BASE_DENSE_CRATERS);
        assert!(low.len() < normal.len());
        assert!(normal.len() < high.len());
    }

    #[test]
    fn test_features_inside_extent() {
        let set = FeatureSet::generate(5, DetailLevel::High, 500.0);
        for c in &set.craters {
            assert!(c.center.x.abs() <= 500.0 && c.center.y.abs() <= 500.0);
            assert!(c.radius >= 15.0 && c.radius <= 60.0);
        }
    }

    #[test]
    fn test_high_peaks_are_sparse() {
        let set = FeatureSet::generate(2024, DetailLevel::High, 2000.0);
        let candidates = DetailLevel::High.scale_count(BASE_PEAK_CANDIDATES);
        // ~10% принятия: с большим запасом меньше трети кандидатов
        assert!(set.high_peaks.len() < candidates / 3);
    }

    #[test]
    fn test_central_peak_only_for_large_craters() {
        let set = FeatureSet::generate(3, DetailLevel::Normal, 2000.0);
        for c in &set.dense_craters {
            if c.radius <= CENTRAL_PEAK_MIN_RADIUS {
                assert_eq!(c.central_peak, 0.0);
            } else {
                assert!(c.central_peak > 0.0);
            }
        }
    }
}
