// ============================================
// Mars Terrain - Процедурный рельеф и стриминг тайлов
// ============================================

pub mod config;
pub mod error;
pub mod terrain;
pub mod app;

pub use config::{DetailLevel, TerrainConfig};
pub use error::TerrainError;
