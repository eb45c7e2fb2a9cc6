//! Coarse per-channel colour histograms compared by L1 distance
//!
//! Captures colour spread inside a region rather than just its mean, so a
//! half-black half-white patch no longer matches a flat grey tile.

use crate::evaluation::evaluator::{Evaluator, Region, sample_region};
use crate::io::configuration::{BACKFILL_COLOR, DEFAULT_HISTOGRAM_BINS};
use crate::io::error::{Result, invalid_parameter};
use image::{GenericImageView, Rgba};

// Alpha is ignored; only colour channels are binned
const CHANNELS: usize = 3;

/// Normalised R, G and B histograms laid out channel after channel
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelHistogram {
    bins: usize,
    frequencies: Vec<f64>,
}

impl ChannelHistogram {
    /// Bins per channel
    pub const fn bins(&self) -> usize {
        self.bins
    }

    /// Relative frequencies, `bins` entries per channel, each channel summing to 1
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }
}

/// Evaluator binning each colour channel into equal-width intensity ranges
#[derive(Clone, Copy, Debug)]
pub struct HistogramEvaluator {
    bins: usize,
}

impl Default for HistogramEvaluator {
    fn default() -> Self {
        Self {
            bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

impl HistogramEvaluator {
    /// Create an evaluator with `bins` bins per channel
    ///
    /// # Errors
    ///
    /// Returns an error unless `bins` is between 1 and 256
    pub fn new(bins: usize) -> Result<Self> {
        if bins == 0 || bins > 256 {
            return Err(invalid_parameter(
                "bins",
                &bins,
                &"must be between 1 and 256",
            ));
        }
        Ok(Self { bins })
    }

    /// Bins per channel
    pub const fn bins(&self) -> usize {
        self.bins
    }

    fn bin_of(&self, intensity: u8) -> usize {
        usize::from(intensity) * self.bins / 256
    }

    fn accumulate(&self, counts: &mut [u64], pixel: Rgba<u8>) {
        for (channel, &intensity) in pixel.0.iter().take(CHANNELS).enumerate() {
            let slot = channel * self.bins + self.bin_of(intensity);
            if let Some(count) = counts.get_mut(slot) {
                *count += 1;
            }
        }
    }
}

impl Evaluator for HistogramEvaluator {
    type Fingerprint = ChannelHistogram;

    fn evaluate<I>(&self, source: &I, region: Region) -> ChannelHistogram
    where
        I: GenericImageView<Pixel = Rgba<u8>> + ?Sized,
    {
        let mut counts = vec![0u64; CHANNELS * self.bins];
        let mut samples = 0u64;

        for pixel in sample_region(source, region) {
            self.accumulate(&mut counts, pixel);
            samples += 1;
        }

        if samples == 0 {
            self.accumulate(&mut counts, Rgba(BACKFILL_COLOR));
            samples = 1;
        }

        ChannelHistogram {
            bins: self.bins,
            frequencies: counts
                .into_iter()
                .map(|count| count as f64 / samples as f64)
                .collect(),
        }
    }

    fn compare(&self, a: &ChannelHistogram, b: &ChannelHistogram) -> f64 {
        a.frequencies
            .iter()
            .zip(&b.frequencies)
            .map(|(x, y)| (x - y).abs())
            .sum()
    }
}
