/// Best-match lookup
pub mod matching;
/// Candidate storage and fingerprinting
pub mod tiles;

pub use matching::Match;
pub use tiles::{TileEntry, TileHandle, TileLibrary};
