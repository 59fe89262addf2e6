// ============================================
// Terrain Module - Процедурный рельеф Марса
// ============================================
//
// generation -> высоты (чистая функция от x, z)
// mesh       -> сетка высот тайла в меш
// cache      -> тайлы по координате
// manager    -> стриминг тайлов вокруг ровера

pub mod generation;
pub mod mesh;
pub mod cache;
pub mod manager;

// Re-exports
pub use generation::{TerrainGenerator, FeatureSet, LayerBreakdown};
pub use mesh::{TerrainVertex, SurfaceMeshBuilder, TileMesh, build_tile};
pub use cache::{Tile, TileCache, TileCoord};
pub use manager::{TileStreamer, TileUpdate, StreamStats};
