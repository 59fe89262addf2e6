// ============================================
// Tile - Тайл террейна с готовым мешем
// ============================================

use ultraviolet::Vec3;

use crate::terrain::mesh::TileMesh;

use super::TileCoord;

/// Тайл владеет своим мешем; мировые координаты уже "запечены" в вершины
#[derive(Debug)]
pub struct Tile {
    coord: TileCoord,
    origin: [f32; 2],
    size: f32,
    mesh: TileMesh,
    center: [f32; 3],
    bounding_radius: f32,
    /// Порядковый номер построения (разные тайлы - разные номера)
    build_id: u64,
}

impl Tile {
    pub fn new(coord: TileCoord, tile_size: f32, mesh: TileMesh, build_id: u64) -> Self {
        let origin = coord.origin(tile_size);
        let (lo, hi) = mesh.height_range();
        let center = Vec3::new(
            origin[0] + tile_size * 0.5,
            (lo + hi) * 0.5,
            origin[1] + tile_size * 0.5,
        );
        let bounding_radius = mesh
            .positions()
            .map(|p| (Vec3::from(p) - center).mag())
            .fold(0.0f32, f32::max);

        Self {
            coord,
            origin,
            size: tile_size,
            mesh,
            center: [center.x, center.y, center.z],
            bounding_radius,
            build_id,
        }
    }

    pub fn coord(&self) -> TileCoord {
        self.coord
    }

    pub fn origin(&self) -> [f32; 2] {
        self.origin
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn mesh(&self) -> &TileMesh {
        &self.mesh
    }

    /// Центр ограничивающей сферы (для frustum culling)
    pub fn center(&self) -> [f32; 3] {
        self.center
    }

    pub fn bounding_radius(&self) -> f32 {
        self.bounding_radius
    }

    pub fn build_id(&self) -> u64 {
        self.build_id
    }

    /// Точка внутри тайла (полуинтервал, как у floor-деления)
    #[inline]
    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.origin[0] && x < self.origin[0] + self.size
            && z >= self.origin[1] && z < self.origin[1] + self.size
    }

    /// Высота поверхности по сетке тайла (билинейная интерполяция)
    pub fn sample_height(&self, x: f32, z: f32) -> Option<f32> {
        self.contains(x, z).then(|| self.clamped_height(x, z))
    }

    /// То же без проверки границ: точка прижимается к краю сетки
    pub fn clamped_height(&self, x: f32, z: f32) -> f32 {
        let cells = self.mesh.resolution() - 1;
        let u = (x - self.origin[0]) / self.size * cells as f32;
        let v = (z - self.origin[1]) / self.size * cells as f32;
        let col = (u.floor() as u32).min(cells - 1);
        let row = (v.floor() as u32).min(cells - 1);
        let fu = (u - col as f32).clamp(0.0, 1.0);
        let fv = (v - row as f32).clamp(0.0, 1.0);

        let h00 = self.mesh.height(row, col);
        let h10 = self.mesh.height(row, col + 1);
        let h01 = self.mesh.height(row + 1, col);
        let h11 = self.mesh.height(row + 1, col + 1);

        let top = h00 + (h10 - h00) * fu;
        let bottom = h01 + (h11 - h01) * fu;
        top + (bottom - top) * fv
    }
}
