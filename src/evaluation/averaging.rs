//! Mean-colour fingerprints compared by Euclidean distance

use crate::evaluation::evaluator::{Evaluator, Region, sample_region};
use crate::io::configuration::BACKFILL_COLOR;
use image::{GenericImageView, Rgba};

/// Arithmetic mean of each RGBA channel over a region
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChannelMeans(pub [f64; 4]);

impl ChannelMeans {
    /// Means of a region filled with a single colour
    pub fn from_color(color: Rgba<u8>) -> Self {
        Self(color.0.map(f64::from))
    }

    /// Euclidean distance between two mean vectors
    pub fn distance(&self, other: &Self) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}

/// Default evaluator: average colour per channel
#[derive(Clone, Copy, Debug, Default)]
pub struct AveragingEvaluator;

impl AveragingEvaluator {
    /// Create the averaging evaluator
    pub const fn new() -> Self {
        Self
    }
}

impl Evaluator for AveragingEvaluator {
    type Fingerprint = ChannelMeans;

    fn evaluate<I>(&self, source: &I, region: Region) -> ChannelMeans
    where
        I: GenericImageView<Pixel = Rgba<u8>> + ?Sized,
    {
        let mut sums = [0u64; 4];
        let mut count = 0u64;

        for pixel in sample_region(source, region) {
            for (sum, channel) in sums.iter_mut().zip(pixel.0) {
                *sum += u64::from(channel);
            }
            count += 1;
        }

        if count == 0 {
            return ChannelMeans::from_color(Rgba(BACKFILL_COLOR));
        }

        ChannelMeans(sums.map(|sum| sum as f64 / count as f64))
    }

    fn compare(&self, a: &ChannelMeans, b: &ChannelMeans) -> f64 {
        a.distance(b)
    }
}
