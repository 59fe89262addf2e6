pub mod vertex;
pub mod builder;

pub use vertex::TerrainVertex;
pub use builder::{SurfaceMeshBuilder, TileMesh, build_tile};
