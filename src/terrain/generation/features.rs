// ============================================
// Terrain Features - Слои рельефа Марса
// ============================================
//
// Каждый объект - независимый аддитивный слой высоты:
// - Crater / DenseCrater: ударные кратеры (два поколения)
// - River: высохшие русла (отрезок + меандры)
// - Dune: дюны с асимметрией по ветру
// - Lake: дно высохших озёр с береговым валом
// - Canyon: каньоны с плоским дном и крутыми стенами
// - Mesa: столовые горы с осыпью у подножия
// - MountainRange / HighPeak: хребты и редкие высокие пики
//
// За пределами своего радиуса объект даёт ровно 0.0

use std::f32::consts::PI;

use ultraviolet::Vec2;

use super::noise::ripple2d;

/// Аддитивный слой высоты
pub trait TerrainFeature {
    /// Вклад объекта в высоту точки (x, z)
    fn height_at(&self, x: f32, z: f32) -> f32;
}

/// Сумма вкладов всех объектов слоя
#[inline]
pub fn sum_layer<F: TerrainFeature>(features: &[F], x: f32, z: f32) -> f32 {
    features.iter().map(|f| f.height_at(x, z)).sum()
}

/// Проекция точки на отрезок
#[derive(Clone, Copy, Debug)]
pub struct SegmentProjection {
    /// Параметр 0..1 вдоль отрезка (зажатый)
    pub t: f32,
    /// Расстояние вдоль отрезка в мировых единицах
    pub along: f32,
    /// Перпендикулярное расстояние до ближайшей точки отрезка
    pub distance: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f32 {
        (self.end - self.start).mag()
    }

    pub fn project(&self, x: f32, z: f32) -> SegmentProjection {
        let p = Vec2::new(x, z);
        let dir = self.end - self.start;
        let len_sq = dir.mag_sq();
        let t = if len_sq > 0.0 {
            ((p - self.start).dot(dir) / len_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let closest = self.start + dir * t;
        SegmentProjection {
            t,
            along: t * len_sq.sqrt(),
            distance: (p - closest).mag(),
        }
    }
}

#[inline(always)]
fn radial_distance(center: Vec2, x: f32, z: f32) -> f32 {
    (Vec2::new(x, z) - center).mag()
}

// ============================================
// Кратеры
// ============================================

/// Классический кратер: параболическая чаша до 0.8R и вал 0.8R..R
#[derive(Clone, Debug, PartialEq)]
pub struct Crater {
    pub center: Vec2,
    pub radius: f32,
    pub depth: f32,
    pub rim_height: f32,
}

impl TerrainFeature for Crater {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        let nd = radial_distance(self.center, x, z) / self.radius;
        if nd >= 1.0 {
            return 0.0;
        }
        if nd < 0.8 {
            let t = nd / 0.8;
            return -self.depth * (1.0 - t * t);
        }
        // Треугольный вал: 0 на 0.8R, пик на 0.9R, 0 на краю
        self.rim_height * (1.0 - (nd - 0.9).abs() / 0.1)
    }
}

/// Плотный слой мелких кратеров: сглаженная чаша, центральная горка
/// у крупных, шум на дне и выброс до 1.5R
#[derive(Clone, Debug, PartialEq)]
pub struct DenseCrater {
    pub center: Vec2,
    pub radius: f32,
    pub depth: f32,
    pub rim_height: f32,
    /// 0.0 у мелких кратеров
    pub central_peak: f32,
    pub floor_noise: f32,
}

impl DenseCrater {
    pub const EJECTA_REACH: f32 = 1.5;
}

impl TerrainFeature for DenseCrater {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        let nd = radial_distance(self.center, x, z) / self.radius;
        if nd >= Self::EJECTA_REACH {
            return 0.0;
        }
        if nd >= 1.0 {
            let s = (nd - 1.0) / (Self::EJECTA_REACH - 1.0);
            return self.rim_height * (1.0 - s) * (1.0 - s);
        }

        // Чаша поднимается к валу, на nd = 1 сходится с выбросом
        let mut h = -self.depth * (1.0 - nd.powf(2.2)) + self.rim_height * nd.powi(4);

        if self.central_peak > 0.0 && nd < 0.2 {
            let p = 1.0 - nd / 0.2;
            h += self.central_peak * p * p;
        }

        h + self.floor_noise * ripple2d(x, z, 0.8, 0.8, 0.0) * (1.0 - nd)
    }
}

// ============================================
// Русла и каньоны
// ============================================

/// Высохшее русло: отрезок с параболическим профилем и меандрами
#[derive(Clone, Debug, PartialEq)]
pub struct River {
    pub segment: Segment,
    pub half_width: f32,
    pub depth: f32,
    pub meander_amplitude: f32,
    pub meander_frequency: f32,
}

impl TerrainFeature for River {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        let proj = self.segment.project(x, z);
        if proj.distance >= self.half_width {
            return 0.0;
        }
        let nd = proj.distance / self.half_width;
        let bed = -self.depth * (1.0 - nd * nd);
        let wave = (proj.along * self.meander_frequency).sin();
        let meander = self.meander_amplitude * wave * (1.0 - nd);
        bed + meander
    }
}

/// Каньон: ширина меняется синусом вдоль длины.
/// Профиль: плоское дно (30%), крутые стены (50%), приподнятая бровка (20%)
#[derive(Clone, Debug, PartialEq)]
pub struct Canyon {
    pub segment: Segment,
    pub width: f32,
    pub depth: f32,
    pub rim_height: f32,
    pub width_phase: f32,
}

impl Canyon {
    pub const WIDTH_VARIATION: f32 = 0.3;

    pub fn width_at(&self, along: f32) -> f32 {
        self.width * (1.0 + Self::WIDTH_VARIATION * (along * 0.01 + self.width_phase).sin())
    }
}

impl TerrainFeature for Canyon {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        let proj = self.segment.project(x, z);
        let nd = proj.distance / self.width_at(proj.along);
        if nd >= 1.0 {
            return 0.0;
        }
        if nd < 0.3 {
            return -self.depth;
        }
        if nd < 0.8 {
            let s = (nd - 0.3) / 0.5;
            return -self.depth * (1.0 - s) * (1.0 - s);
        }
        self.rim_height * (PI * (nd - 0.8) / 0.2).sin()
    }
}

// ============================================
// Дюны и озёра
// ============================================

/// Дюна: радиальный спад с асимметрией по направлению ветра
#[derive(Clone, Debug, PartialEq)]
pub struct Dune {
    pub center: Vec2,
    pub radius: f32,
    pub height: f32,
    /// Направление ветра в радианах
    pub wind_direction: f32,
}

impl TerrainFeature for Dune {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        let dx = x - self.center.x;
        let dz = z - self.center.y;
        let nd = (dx * dx + dz * dz).sqrt() / self.radius;
        if nd >= 1.0 {
            return 0.0;
        }
        let falloff = (1.0 - nd) * (1.0 - nd);
        // Наветренный склон пологий, подветренный круче
        let wind = 0.7 + 0.3 * (dz.atan2(dx) - self.wind_direction).cos();
        self.height * falloff * wind
    }
}

/// Дно высохшего озера и кольцо береговых отложений до 1.3R
#[derive(Clone, Debug, PartialEq)]
pub struct Lake {
    pub center: Vec2,
    pub radius: f32,
    pub depth: f32,
    pub shore_height: f32,
}

impl Lake {
    pub const SHORE_REACH: f32 = 1.3;
}

impl TerrainFeature for Lake {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        let nd = radial_distance(self.center, x, z) / self.radius;
        if nd >= Self::SHORE_REACH {
            return 0.0;
        }
        if nd < 1.0 {
            return -self.depth * (1.0 - nd.powf(1.5));
        }
        self.shore_height * (PI * (nd - 1.0) / (Self::SHORE_REACH - 1.0)).sin()
    }
}

// ============================================
// Возвышенности
// ============================================

/// Столовая гора: плоская вершина 70%, кубические склоны, осыпь до 1.2R
#[derive(Clone, Debug, PartialEq)]
pub struct Mesa {
    pub center: Vec2,
    pub radius: f32,
    pub height: f32,
    pub talus_height: f32,
}

impl Mesa {
    pub const TALUS_REACH: f32 = 1.2;
}

impl TerrainFeature for Mesa {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        let nd = radial_distance(self.center, x, z) / self.radius;
        if nd >= Self::TALUS_REACH {
            return 0.0;
        }
        if nd < 0.7 {
            return self.height;
        }
        if nd < 1.0 {
            let s = (nd - 0.7) / 0.3;
            let side = 1.0 - s;
            return self.height * side * side * side + self.talus_height * s;
        }
        self.talus_height * (1.0 - (nd - 1.0) / (Self::TALUS_REACH - 1.0))
    }
}

/// Горный хребет вдоль хребтовой линии
#[derive(Clone, Debug, PartialEq)]
pub struct MountainRange {
    pub spine: Segment,
    pub width: f32,
    pub height: f32,
    pub peak_variation: f32,
    pub width_phase: f32,
    pub rock_amplitude: f32,
}

impl MountainRange {
    pub const WIDTH_VARIATION: f32 = 0.35;

    pub fn width_at(&self, along: f32) -> f32 {
        self.width * (1.0 + Self::WIDTH_VARIATION * (along * 0.008 + self.width_phase).sin())
    }
}

impl TerrainFeature for MountainRange {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        let proj = self.spine.project(x, z);
        let nd = proj.distance / self.width_at(proj.along);
        if nd >= 1.0 {
            return 0.0;
        }
        // Выше к середине хребта, пики разбросаны вдоль него
        let base = self.height * (0.6 + 0.4 * (proj.t * PI).sin());
        let peaks = self.peak_variation * (proj.along * 0.015 + self.width_phase).sin().abs();
        let profile = (1.0 - nd).powf(1.5);
        let rock = self.rock_amplitude * ripple2d(x, z, 0.09, 0.11, self.width_phase) * (1.0 - nd);
        profile * (base + peaks) + rock
    }
}

/// Редкий одиночный пик с крутым квадратичным спадом
#[derive(Clone, Debug, PartialEq)]
pub struct HighPeak {
    pub center: Vec2,
    pub radius: f32,
    pub height: f32,
}

impl TerrainFeature for HighPeak {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        let nd = radial_distance(self.center, x, z) / self.radius;
        if nd >= 1.0 {
            return 0.0;
        }
        self.height * (1.0 - nd) * (1.0 - nd)
    }
}
