use crate::terrain::cache::TileCoord;

/// Результат применённого обновления: что построено, что выгружено.
/// Рендер освобождает GPU буферы для `evicted` и загружает `created`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileUpdate {
    pub center: TileCoord,
    pub created: Vec<TileCoord>,
    pub evicted: Vec<TileCoord>,
}

impl TileUpdate {
    /// Набор тайлов не изменился
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.evicted.is_empty()
    }
}

/// Счётчики стриминга
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub loaded: usize,
    pub total_built: u64,
    pub total_evicted: u64,
    /// Применённые обновления
    pub updates: u64,
    /// Пропущенные из-за троттлинга вызовы
    pub throttled: u64,
}
