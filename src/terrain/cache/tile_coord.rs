// ============================================
// Tile Coord - Идентификатор тайла
// ============================================

/// Предел индекса тайла по модулю: дальше f32 уже не различает соседние
/// целые, а квадрат радиуса вокруг центра остаётся внутри i32
pub const TILE_LIMIT: i32 = 1 << 24;

/// Координата тайла: floor(мировая позиция / размер тайла)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct TileCoord {
    pub x: i32,
    pub z: i32,
}

impl TileCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Тайл, содержащий мировую точку (x, z).
    /// Далёкие точки прижимаются к ±TILE_LIMIT; `None` для NaN и бесконечностей
    #[inline]
    pub fn from_world(x: f32, z: f32, tile_size: f32) -> Option<Self> {
        if !(x.is_finite() && z.is_finite()) {
            return None;
        }
        Some(Self { x: tile_index(x, tile_size), z: tile_index(z, tile_size) })
    }

    /// Мировые координаты угла тайла (минимальные x, z)
    #[inline]
    pub fn origin(&self, tile_size: f32) -> [f32; 2] {
        [self.x as f32 * tile_size, self.z as f32 * tile_size]
    }

    /// Расстояние Чебышёва в тайлах
    #[inline]
    pub fn chebyshev(&self, other: TileCoord) -> u32 {
        let dx = (i64::from(self.x) - i64::from(other.x)).unsigned_abs();
        let dz = (i64::from(self.z) - i64::from(other.z)).unsigned_abs();
        dx.max(dz).min(u64::from(u32::MAX)) as u32
    }

    /// Все тайлы квадрата с расстоянием Чебышёва <= radius (граница включена).
    /// Тайлы за пределами i32 пропускаются
    pub fn square_around(&self, radius: i32) -> impl Iterator<Item = TileCoord> {
        let center = *self;
        (-radius..=radius).flat_map(move |dz| {
            (-radius..=radius).filter_map(move |dx| {
                Some(TileCoord::new(center.x.checked_add(dx)?, center.z.checked_add(dz)?))
            })
        })
    }
}

#[inline]
fn tile_index(v: f32, tile_size: f32) -> i32 {
    let limit = TILE_LIMIT as f32;
    (v / tile_size).floor().clamp(-limit, limit) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_from_world_floors_negative() {
        assert_eq!(TileCoord::from_world(0.0, 0.0, 200.0), Some(TileCoord::new(0, 0)));
        assert_eq!(TileCoord::from_world(199.9, 250.0, 200.0), Some(TileCoord::new(0, 1)));
        assert_eq!(TileCoord::from_world(-0.1, -200.0, 200.0), Some(TileCoord::new(-1, -1)));
        assert_eq!(TileCoord::from_world(-200.1, 0.0, 200.0), Some(TileCoord::new(-2, 0)));
    }

    #[test]
    fn test_from_world_far_and_non_finite() {
        assert_eq!(
            TileCoord::from_world(1.0e12, -1.0e12, 200.0),
            Some(TileCoord::new(TILE_LIMIT, -TILE_LIMIT))
        );
        assert_eq!(TileCoord::from_world(f32::INFINITY, 0.0, 200.0), None);
        assert_eq!(TileCoord::from_world(0.0, f32::NAN, 200.0), None);
    }

    #[test]
    fn test_extreme_coords_do_not_overflow() {
        let edge = TileCoord::new(i32::MAX, i32::MIN);
        let square: Vec<_> = edge.square_around(1).collect();
        // Только тайлы, представимые в i32
        assert_eq!(square.len(), 4);
        assert!(square.iter().all(|c| c.chebyshev(edge) <= 1));
        assert_eq!(TileCoord::new(i32::MIN, 0).chebyshev(TileCoord::new(i32::MAX, 0)), u32::MAX);
    }

    #[test]
    fn test_square_includes_boundary() {
        let center = TileCoord::new(3, -2);
        let square: HashSet<_> = center.square_around(2).collect();
        assert_eq!(square.len(), 25);
        assert!(square.iter().all(|c| c.chebyshev(center) <= 2));
        assert!(square.contains(&TileCoord::new(5, 0)));
        assert!(!square.contains(&TileCoord::new(6, 0)));
        assert_eq!(center.square_around(0).collect::<Vec<_>>(), vec![center]);
    }

    #[test]
    fn test_origin() {
        assert_eq!(TileCoord::new(-1, 2).origin(200.0), [-200.0, 400.0]);
    }
}
