// ============================================
// Rover - Упрощённая модель марсохода
// ============================================

/// Высота корпуса над точкой касания колёс
pub const RIDE_HEIGHT: f32 = 0.6;

#[derive(Clone, Debug, PartialEq)]
pub struct Rover {
    pub position: [f32; 3],
    /// Курс в радианах (0 = +X)
    pub heading: f32,
    /// Скорость, м/с
    pub speed: f32,
    /// Скорость поворота, рад/с
    pub turn_rate: f32,
}

impl Rover {
    pub fn new(x: f32, z: f32) -> Self {
        Self { position: [x, 0.0, z], heading: 0.0, speed: 0.0, turn_rate: 0.0 }
    }

    /// Проехать dt секунд по текущему курсу
    pub fn drive(&mut self, dt: f32) {
        self.heading += self.turn_rate * dt;
        self.position[0] += self.heading.cos() * self.speed * dt;
        self.position[2] += self.heading.sin() * self.speed * dt;
    }

    /// Поставить на землю
    pub fn settle(&mut self, ground: f32) {
        self.position[1] = ground + RIDE_HEIGHT;
    }

    pub fn x(&self) -> f32 {
        self.position[0]
    }

    pub fn z(&self) -> f32 {
        self.position[2]
    }
}
