// ============================================
// App Module - Контекст демо-приложения
// ============================================

mod animation;
mod rover;
mod context;

pub use animation::{Animation, Marker};
pub use rover::{Rover, RIDE_HEIGHT};
pub use context::{AppContext, FLAT_GROUND};
