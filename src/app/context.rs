// ============================================
// App Context - Состояние приложения без глобалов
// ============================================
// Один тик: ровер -> стриминг тайлов -> посадка на землю -> анимации

use std::sync::Arc;

use crate::config::TerrainConfig;
use crate::error::TerrainError;
use crate::terrain::{TerrainGenerator, TileStreamer, TileUpdate};

use super::animation::{Animation, Marker};
use super::rover::Rover;

/// Высота, если под точкой нет загруженного тайла
pub const FLAT_GROUND: f32 = 0.0;

pub struct AppContext {
    pub streamer: TileStreamer,
    pub rover: Rover,
    pub markers: Vec<Marker>,
    clock_ms: u64,
}

impl AppContext {
    pub fn new(config: &TerrainConfig) -> Result<Self, TerrainError> {
        let generator = Arc::new(TerrainGenerator::new(config));
        let streamer = TileStreamer::new(config, generator)?;

        let markers = vec![
            Marker::new("landing-beacon", [15.0, 10.0], Animation::blink(1.2)),
            Marker::new("relay-antenna", [-30.0, 25.0], Animation::rotate(0.8)),
        ];

        let mut ctx = Self {
            streamer,
            rover: Rover::new(0.0, 0.0),
            markers,
            clock_ms: 0,
        };
        // Стартовые тайлы до первого кадра
        ctx.streamer.update(ctx.rover.x(), ctx.rover.z(), 0);
        ctx.settle_entities();
        Ok(ctx)
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Один кадр длительностью dt_ms
    pub fn tick(&mut self, dt_ms: u64) -> Option<TileUpdate> {
        self.clock_ms += dt_ms;
        let dt = dt_ms as f32 / 1000.0;

        self.rover.drive(dt);
        let update = self.streamer.update(self.rover.x(), self.rover.z(), self.clock_ms);
        self.settle_entities();

        for marker in &mut self.markers {
            marker.animation.advance(dt);
        }
        update
    }

    /// Высота земли с запасным вариантом для незагруженной области
    pub fn ground_at(&self, x: f32, z: f32) -> f32 {
        self.streamer.ground_height(x, z).unwrap_or(FLAT_GROUND)
    }

    fn settle_entities(&mut self) {
        let ground = self.ground_at(self.rover.x(), self.rover.z());
        self.rover.settle(ground);
        let streamer = &self.streamer;
        for marker in &mut self.markers {
            let [x, z] = marker.position;
            marker.height = streamer.ground_height(x, z).unwrap_or(FLAT_GROUND);
        }
    }
}
