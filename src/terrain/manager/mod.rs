mod types;
mod streamer;

pub use types::{StreamStats, TileUpdate};
pub use streamer::TileStreamer;
