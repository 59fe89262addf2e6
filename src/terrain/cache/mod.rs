// ============================================
// Tile Cache - Загруженные тайлы по координате
// ============================================

mod tile_coord;
mod tile;

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

pub use tile_coord::{TileCoord, TILE_LIMIT};
pub use tile::Tile;

/// Не больше одного тайла на координату
#[derive(Debug, Default)]
pub struct TileCache {
    tiles: HashMap<TileCoord, Tile>,
}

impl TileCache {
    pub fn new() -> Self {
        Self { tiles: HashMap::new() }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, coord: &TileCoord) -> bool {
        self.tiles.contains_key(coord)
    }

    pub fn get(&self, coord: &TileCoord) -> Option<&Tile> {
        self.tiles.get(coord)
    }

    /// Вставить тайл. Если координата уже занята, существующий тайл
    /// остаётся, новый отбрасывается и возвращается false.
    pub fn insert(&mut self, tile: Tile) -> bool {
        match self.tiles.entry(tile.coord()) {
            Entry::Vacant(slot) => {
                slot.insert(tile);
                true
            }
            Entry::Occupied(_) => {
                log::warn!("Tile {:?} already cached, dropping duplicate build", tile.coord());
                false
            }
        }
    }

    /// Удалить тайл (меш освобождается вместе с ним)
    pub fn remove(&mut self, coord: &TileCoord) -> Option<Tile> {
        self.tiles.remove(coord)
    }

    pub fn coords(&self) -> impl Iterator<Item = TileCoord> + '_ {
        self.tiles.keys().copied()
    }

    pub fn coord_set(&self) -> HashSet<TileCoord> {
        self.tiles.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }
}
