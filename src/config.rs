// ============================================
// Terrain Config - Настройки генерации и стриминга
// ============================================
// Data-Driven: конфиг можно загрузить из JSON, отсутствующие поля
// берутся из Default

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TerrainError;

/// Уровень детализации - масштабирует количество объектов рельефа
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    Low,
    #[default]
    Normal,
    High,
}

impl DetailLevel {
    /// Множитель количества кратеров, дюн, рек и т.д.
    pub fn feature_scale(self) -> f32 {
        match self {
            DetailLevel::Low => 0.5,
            DetailLevel::Normal => 1.0,
            DetailLevel::High => 1.5,
        }
    }

    /// Количество объектов слоя с учётом детализации (минимум 1)
    pub fn scale_count(self, base: usize) -> usize {
        ((base as f32 * self.feature_scale()).round() as usize).max(1)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Размер тайла в мировых единицах
    pub tile_size: f32,
    /// Радиус загрузки в тайлах (метрика Чебышёва)
    pub visible_radius: i32,
    /// Вершин на сторону тайла
    pub grid_resolution: u32,
    pub detail_level: DetailLevel,
    /// Минимальный интервал между обновлениями без смены тайла
    pub update_throttle_ms: u64,
    /// Сид мира: фиксирует размеры и интенсивность объектов
    pub seed: u64,
    /// Полуразмер области, в которой размещаются объекты рельефа
    pub world_extent: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            tile_size: 200.0,
            visible_radius: 1,
            grid_resolution: 64,
            detail_level: DetailLevel::Normal,
            update_throttle_ms: 250,
            seed: 0x4d41_5253,
            world_extent: 2000.0,
        }
    }
}

impl TerrainConfig {
    /// Загрузить конфиг из JSON строки (с валидацией)
    pub fn from_json(json: &str) -> Result<Self, TerrainError> {
        let config: TerrainConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Загрузить конфиг из файла
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, TerrainError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Проверка без исправления значений: неверный конфиг - ошибка сразу
    pub fn validate(&self) -> Result<(), TerrainError> {
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return Err(TerrainError::InvalidTileSize(self.tile_size));
        }
        if self.visible_radius < 0 {
            return Err(TerrainError::InvalidVisibleRadius(self.visible_radius));
        }
        if self.grid_resolution < 2 {
            return Err(TerrainError::InvalidResolution(self.grid_resolution));
        }
        if !(self.world_extent.is_finite() && self.world_extent > 0.0) {
            return Err(TerrainError::InvalidWorldExtent(self.world_extent));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(TerrainConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "tile_size": 100.0, "detail_level": "high" }"#;
        let config = TerrainConfig::from_json(json).unwrap();
        assert_eq!(config.tile_size, 100.0);
        assert_eq!(config.detail_level, DetailLevel::High);
        assert_eq!(config.visible_radius, TerrainConfig::default().visible_radius);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad_size = TerrainConfig { tile_size: 0.0, ..Default::default() };
        assert!(matches!(bad_size.validate(), Err(TerrainError::InvalidTileSize(_))));

        let bad_radius = TerrainConfig { visible_radius: -1, ..Default::default() };
        assert!(matches!(bad_radius.validate(), Err(TerrainError::InvalidVisibleRadius(-1))));

        let bad_res = TerrainConfig { grid_resolution: 1, ..Default::default() };
        assert!(matches!(bad_res.validate(), Err(TerrainError::InvalidResolution(1))));

        assert!(matches!(
            TerrainConfig::from_json(r#"{ "visible_radius": -3 }"#),
            Err(TerrainError::InvalidVisibleRadius(-3))
        ));
    }

    #[test]
    fn test_bundled_config() {
        let config = TerrainConfig::from_json(include_str!("../assets/terrain.json")).unwrap();
        assert_eq!(config.visible_radius, 2);
        assert_eq!(config.grid_resolution, 48);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            TerrainConfig::load_from_file("definitely/not/here.json"),
            Err(TerrainError::Io(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(TerrainConfig::from_json("{ tile_size"), Err(TerrainError::Parse(_))));
    }

    #[test]
    fn test_feature_scale() {
        assert_eq!(DetailLevel::Normal.scale_count(40), 40);
        assert_eq!(DetailLevel::Low.scale_count(40), 20);
        assert_eq!(DetailLevel::High.scale_count(40), 60);
        assert_eq!(DetailLevel::Low.scale_count(1), 1);
    }
}
