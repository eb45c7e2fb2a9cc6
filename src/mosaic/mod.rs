/// Tile matching and output assembly
pub mod compositor;
/// Target to output grid mapping
pub mod planner;

pub use compositor::{Compositor, TileObserver, build_mosaic, compose};
pub use planner::{MosaicDimensions, plan};
