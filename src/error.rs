// ============================================
// Terrain Errors - Ошибки конфигурации и загрузки
// ============================================

use std::fmt;

/// Ошибки движка террейна.
///
/// Все варианты кроме `Io`/`Parse` - ошибки программиста при сборке
/// конфигурации, они возвращаются сразу при создании объектов.
#[derive(Debug)]
pub enum TerrainError {
    /// Размер тайла должен быть > 0 (и конечным)
    InvalidTileSize(f32),
    /// Радиус видимости должен быть >= 0
    InvalidVisibleRadius(i32),
    /// Разрешение сетки должно быть >= 2
    InvalidResolution(u32),
    /// Размер мира для размещения объектов должен быть > 0
    InvalidWorldExtent(f32),
    Io(std::io::Error),
    Parse(String),
}

impl fmt::Display for TerrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerrainError::InvalidTileSize(size) => {
                write!(f, "invalid tile size {}: must be a positive finite number", size)
            }
            TerrainError::InvalidVisibleRadius(radius) => {
                write!(f, "invalid visible radius {}: must be >= 0", radius)
            }
            TerrainError::InvalidResolution(n) => {
                write!(f, "invalid grid resolution {}: must be >= 2", n)
            }
            TerrainError::InvalidWorldExtent(extent) => {
                write!(f, "invalid world extent {}: must be a positive finite number", extent)
            }
            TerrainError::Io(e) => write!(f, "failed to read config: {}", e),
            TerrainError::Parse(e) => write!(f, "failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for TerrainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TerrainError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TerrainError {
    fn from(e: std::io::Error) -> Self {
        TerrainError::Io(e)
    }
}

impl From<serde_json::Error> for TerrainError {
    fn from(e: serde_json::Error) -> Self {
        TerrainError::Parse(e.to_string())
    }
}
