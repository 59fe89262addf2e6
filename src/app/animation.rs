// ============================================
// Animation - Анимации маркеров на поверхности
// ============================================

use std::f32::consts::TAU;

/// Состояние анимации сущности: вариант выбирается через match
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Animation {
    /// Мигание: видим первую половину периода
    Blink { phase: f32, period: f32 },
    /// Вращение вокруг вертикальной оси (рад/с)
    Rotate { speed: f32, angle: f32 },
}

impl Animation {
    pub fn blink(period: f32) -> Self {
        Animation::Blink { phase: 0.0, period }
    }

    pub fn rotate(speed: f32) -> Self {
        Animation::Rotate { speed, angle: 0.0 }
    }

    /// Продвинуть анимацию на dt секунд
    pub fn advance(&mut self, dt: f32) {
        match self {
            Animation::Blink { phase, period } => {
                if *period > 0.0 {
                    *phase = (*phase + dt).rem_euclid(*period);
                }
            }
            Animation::Rotate { speed, angle } => {
                *angle = (*angle + *speed * dt).rem_euclid(TAU);
            }
        }
    }

    pub fn is_visible(&self) -> bool {
        match *self {
            Animation::Blink { phase, period } => phase < period * 0.5,
            Animation::Rotate { .. } => true,
        }
    }

    /// Угол поворота вокруг Y
    pub fn yaw(&self) -> f32 {
        match *self {
            Animation::Blink { .. } => 0.0,
            Animation::Rotate { angle, .. } => angle,
        }
    }
}

/// Маркер на поверхности (маяк, антенна)
#[derive(Clone, Debug)]
pub struct Marker {
    pub name: String,
    /// Позиция (x, z); высота берётся из террейна
    pub position: [f32; 2],
    pub height: f32,
    pub animation: Animation,
}

impl Marker {
    pub fn new(name: impl Into<String>, position: [f32; 2], animation: Animation) -> Self {
        Self { name: name.into(), position, height: 0.0, animation }
    }
}
