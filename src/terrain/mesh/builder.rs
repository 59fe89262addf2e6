// ============================================
// Surface Mesh Builder - Сетка высот -> меш тайла
// ============================================
// Чистая функция: не трогает общее состояние, не зависит от порядка
// построения тайлов, поэтому тайлы строятся параллельно (rayon)

use ultraviolet::Vec3;

use crate::error::TerrainError;
use crate::terrain::generation::{get_color, TerrainGenerator};

use super::vertex::TerrainVertex;

/// Меш тайла: N*N вершин построчно (индекс = row * N + col)
#[derive(Clone, Debug)]
pub struct TileMesh {
    pub vertices: Vec<TerrainVertex>,
    pub indices: Vec<u32>,
    resolution: u32,
    origin: [f32; 2],
    size: f32,
}

impl TileMesh {
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn origin(&self) -> [f32; 2] {
        self.origin
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn positions(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.vertices.iter().map(|v| v.position)
    }

    pub fn normals(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.vertices.iter().map(|v| v.normal)
    }

    pub fn colors(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.vertices.iter().map(|v| v.color)
    }

    #[inline]
    pub fn vertex(&self, row: u32, col: u32) -> &TerrainVertex {
        &self.vertices[(row * self.resolution + col) as usize]
    }

    /// Высота вершины сетки
    #[inline]
    pub fn height(&self, row: u32, col: u32) -> f32 {
        self.vertex(row, col).position[1]
    }

    /// (min, max) высоты по всем вершинам
    pub fn height_range(&self) -> (f32, f32) {
        self.vertices.iter().fold((f32::MAX, f32::MIN), |(lo, hi), v| {
            (lo.min(v.position[1]), hi.max(v.position[1]))
        })
    }

    /// Байты вершин для загрузки в GPU буфер
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Раскладка вершинного буфера для пайплайна рендера тайлов
    pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
        TerrainVertex::buffer_layout()
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Строитель мешей с фиксированным разрешением сетки.
/// Разрешение задаёт вызывающий и оно никогда не снижается автоматически.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceMeshBuilder {
    resolution: u32,
}

impl SurfaceMeshBuilder {
    pub fn new(resolution: u32) -> Result<Self, TerrainError> {
        if resolution < 2 {
            return Err(TerrainError::InvalidResolution(resolution));
        }
        Ok(Self { resolution })
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Построить меш квадрата [origin_x, origin_x + size] x [origin_z, origin_z + size]
    pub fn build(
        &self,
        generator: &TerrainGenerator,
        origin_x: f32,
        origin_z: f32,
        size: f32,
    ) -> TileMesh {
        let n = self.resolution;
        let last = (n - 1) as f32;
        let step = size / last;

        // Сначала вся сетка высот - нормали читают соседей
        let mut coords = Vec::with_capacity((n * n) as usize);
        let mut heights = Vec::with_capacity((n * n) as usize);
        for row in 0..n {
            // Деление на last даёт ровно origin + size на последней вершине
            let z = origin_z + size * (row as f32 / last);
            for col in 0..n {
                let x = origin_x + size * (col as f32 / last);
                coords.push((x, z));
                heights.push(generator.elevation(x, z));
            }
        }

        let seed = generator.seed();
        let vertices = coords
            .iter()
            .zip(&heights)
            .enumerate()
            .map(|(i, (&(x, z), &h))| {
                let row = i as u32 / n;
                let col = i as u32 % n;
                let normal = grid_normal(&heights, n, row, col, step);
                TerrainVertex::new([x, h, z], normal, get_color(seed, x, h, z))
            })
            .collect();

        TileMesh {
            vertices,
            indices: grid_indices(n),
            resolution: n,
            origin: [origin_x, origin_z],
            size,
        }
    }
}

/// Построить меш одного тайла без сохранения строителя
pub fn build_tile(
    generator: &TerrainGenerator,
    origin_x: f32,
    origin_z: f32,
    size: f32,
    resolution: u32,
) -> Result<TileMesh, TerrainError> {
    Ok(SurfaceMeshBuilder::new(resolution)?.build(generator, origin_x, origin_z, size))
}

/// Нормаль по центральным разностям, на краях - односторонние
fn grid_normal(heights: &[f32], n: u32, row: u32, col: u32, step: f32) -> [f32; 3] {
    let h = |r: u32, c: u32| heights[(r * n + c) as usize];

    let dhdx = if col == 0 {
        (h(row, 1) - h(row, 0)) / step
    } else if col == n - 1 {
        (h(row, col) - h(row, col - 1)) / step
    } else {
        (h(row, col + 1) - h(row, col - 1)) / (2.0 * step)
    };

    let dhdz = if row == 0 {
        (h(1, col) - h(0, col)) / step
    } else if row == n - 1 {
        (h(row, col) - h(row - 1, col)) / step
    } else {
        (h(row + 1, col) - h(row - 1, col)) / (2.0 * step)
    };

    let normal = Vec3::new(-dhdx, 1.0, -dhdz).normalized();
    [normal.x, normal.y, normal.z]
}

/// Два треугольника на ячейку, обход против часовой стрелки сверху (+Y)
fn grid_indices(n: u32) -> Vec<u32> {
    let cells = (n - 1) as usize;
    let mut indices = Vec::with_capacity(cells * cells * 6);
    for row in 0..n - 1 {
        for col in 0..n - 1 {
            let i0 = row * n + col;
            let i1 = i0 + 1;
            let i2 = i0 + n;
            let i3 = i2 + 1;
            indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
        }
    }
    indices
}
