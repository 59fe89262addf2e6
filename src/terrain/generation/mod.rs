pub mod noise;
pub mod features;
pub mod placement;
pub mod height;
pub mod color;

pub use features::{TerrainFeature, Segment};
pub use placement::FeatureSet;
pub use height::{TerrainGenerator, LayerBreakdown, base_elevation, DAMPENING};
pub use color::{get_color, elevation_color};
