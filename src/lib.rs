//! Photomosaic construction from a library of fingerprinted tile images
//!
//! A target image is reproduced by a grid of smaller candidate images, each
//! chosen because its visual fingerprint best matches the patch of the target
//! it replaces. Evaluators are pluggable, candidates live in a tile library,
//! and composition runs tile rows in parallel.

#![forbid(unsafe_code)]

/// Region fingerprinting strategies
pub mod evaluation;
/// Input/output operations, configuration and error handling
pub mod io;
/// Candidate storage and nearest-match lookup
pub mod library;
/// Output grid planning and tile composition
pub mod mosaic;

pub use evaluation::{AveragingEvaluator, Evaluator, HistogramEvaluator, Region};
pub use io::configuration::MosaicConfig;
pub use io::error::{MosaicError, Result};
pub use library::{TileHandle, TileLibrary};
pub use mosaic::{Compositor, MosaicDimensions, build_mosaic, compose, plan};
