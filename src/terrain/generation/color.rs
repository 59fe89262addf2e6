// ============================================
// Terrain Colors - Цвет реголита по высоте
// ============================================

use super::noise::position_hash;

/// Выше этой высоты - светлая пыль
pub const HIGH_ELEVATION: f32 = 10.0;
/// Ниже этой высоты - тёмный базальт
pub const LOW_ELEVATION: f32 = -5.0;
/// Максимальный разброс цвета вершины
pub const MAX_JITTER: f32 = 0.04;

pub const LIGHT_DUST: [f32; 3] = [0.82, 0.52, 0.34];
pub const DARK_BASALT: [f32; 3] = [0.42, 0.20, 0.10];

/// Цвет по высоте: полосы + линейный переход между порогами
#[inline]
pub fn elevation_color(height: f32, jitter: f32) -> [f32; 3] {
    let t = ((height - LOW_ELEVATION) / (HIGH_ELEVATION - LOW_ELEVATION)).clamp(0.0, 1.0);
    let jitter = jitter.clamp(-MAX_JITTER, MAX_JITTER);
    let mut color = [0.0; 3];
    for (i, c) in color.iter_mut().enumerate() {
        let band = DARK_BASALT[i] + (LIGHT_DUST[i] - DARK_BASALT[i]) * t;
        *c = (band + jitter).clamp(0.0, 1.0);
    }
    color
}

/// Детерминированный джиттер вершины в диапазоне -MAX_JITTER..=MAX_JITTER
#[inline]
pub fn vertex_jitter(seed: u64, x: f32, z: f32) -> f32 {
    (position_hash(seed, x, z) * 2.0 - 1.0) * MAX_JITTER
}

/// Цвет вершины в мировой точке
#[inline]
pub fn get_color(seed: u64, x: f32, height: f32, z: f32) -> [f32; 3] {
    elevation_color(height, vertex_jitter(seed, x, z))
}
