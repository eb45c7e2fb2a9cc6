//! Visual evaluators turning image regions into comparable fingerprints
//!
//! This module contains:
//! - The [`Evaluator`] trait and the region sampling contract
//! - The default averaging evaluator
//! - A histogram evaluator as a drop-in alternative

/// Mean-colour fingerprints
pub mod averaging;
/// Evaluator trait, regions and backfilled sampling
pub mod evaluator;
/// Per-channel histogram fingerprints
pub mod histogram;

pub use averaging::{AveragingEvaluator, ChannelMeans};
pub use evaluator::{Evaluator, Region};
pub use histogram::{ChannelHistogram, HistogramEvaluator};
