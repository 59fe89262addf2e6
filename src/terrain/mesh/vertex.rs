// ============================================
// Terrain Vertex - Вершина поверхности для GPU
// ============================================
// Раскладка: позиция (мир) | нормаль | цвет RGB, по 3 x f32.
// Локации шейдера совпадают с порядком полей.

use std::mem;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl TerrainVertex {
    /// Атрибуты для `@location(0..=2)` в шейдере поверхности
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x3];

    /// Шаг вершинного буфера в байтах
    pub const STRIDE: wgpu::BufferAddress = mem::size_of::<TerrainVertex>() as wgpu::BufferAddress;

    pub fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 3]) -> Self {
        Self { position, normal, color }
    }

    /// Раскладка буфера, который отдаёт `TileMesh::vertex_bytes`
    pub fn buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}
