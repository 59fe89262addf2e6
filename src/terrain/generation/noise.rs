// ============================================
// Noise Functions - Хэши и рябь для рельефа
// ============================================
// Никакого Math.random(): всё случайное выводится из сида мира
// и индекса объекта, поэтому один и тот же мир всегда одинаков

/// Hash3D возвращает значение в диапазоне 0.0..=1.0
#[inline(always)]
pub fn hash3d(x: i32, y: i32, z: i32) -> f32 {
    let n = x.wrapping_mul(374761393)
        .wrapping_add(y.wrapping_mul(668265263))
        .wrapping_add(z.wrapping_mul(1274126177));
    let n = (n ^ (n >> 13)).wrapping_mul(1911520717);
    ((n as u32) as f32) / (u32::MAX as f32)
}

/// Сворачиваем 64-битный сид в i32 для хэшей
#[inline(always)]
fn fold_seed(seed: u64) -> i32 {
    (seed ^ (seed >> 32)) as u32 as i32
}

/// Случайное число 0..=1 для объекта `index` слоя `layer`
#[inline]
pub fn seeded_unit(seed: u64, layer: i32, index: i32) -> f32 {
    hash3d(fold_seed(seed), layer, index)
}

/// Случайное число в диапазоне min..max
#[inline]
pub fn seeded_range(seed: u64, layer: i32, index: i32, min: f32, max: f32) -> f32 {
    min + (max - min) * seeded_unit(seed, layer, index)
}

/// Коррелированная 2D рябь: произведение синуса и косинуса
#[inline(always)]
pub fn ripple2d(x: f32, z: f32, freq_x: f32, freq_z: f32, phase: f32) -> f32 {
    (x * freq_x + phase).sin() * (z * freq_z + phase * 0.7).cos()
}

/// Хэш мировой позиции вершины (для джиттера цвета).
/// Позиция квантуется, чтобы общие вершины соседних тайлов совпадали.
#[inline]
pub fn position_hash(seed: u64, x: f32, z: f32) -> f32 {
    let qx = (x * 8.0).round() as i32;
    let qz = (z * 8.0).round() as i32;
    hash3d(fold_seed(seed), qx, qz)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_range() {
        for i in -50..50 {
            let h = hash3d(i * 7, i * -13, 5);
            assert!((0.0..=1.0).contains(&h));
            let s = seeded_unit(42, 3, i);
            assert!((0.0..=1.0).contains(&s));
        }
    }

    #[test]
    fn test_seeded_is_stable() {
        assert_eq!(seeded_unit(7, 1, 5).to_bits(), seeded_unit(7, 1, 5).to_bits());
        let r = seeded_range(7, 2, 9, 10.0, 20.0);
        assert!((10.0..=20.0).contains(&r));
    }

    #[test]
    fn test_position_hash_quantized() {
        assert_eq!(position_hash(1, 200.0, -400.0), position_hash(1, 200.00001, -400.00001));
    }
}
