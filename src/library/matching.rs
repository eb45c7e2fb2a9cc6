//! Nearest-candidate lookup over a tile library

use crate::evaluation::Evaluator;
use crate::io::error::{MosaicError, Result};
use crate::library::tiles::{TileEntry, TileHandle, TileLibrary};
use image::RgbaImage;

/// Winning entry of a lookup together with its score
#[derive(Debug)]
pub struct Match<'a, F> {
    /// Handle of the chosen entry
    pub handle: TileHandle,
    /// Dissimilarity between the query and the entry
    pub score: f64,
    /// The chosen entry
    pub entry: &'a TileEntry<F>,
}

// NaN never beats a real score
fn rank(score: f64) -> f64 {
    if score.is_nan() { f64::INFINITY } else { score }
}

impl<E: Evaluator> TileLibrary<E> {
    /// Entry whose fingerprint scores lowest against `fingerprint`
    ///
    /// Linear scan in insertion order; on equal scores the earliest entry wins.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::EmptyLibrary`] if no candidates have been added
    pub fn best_match_entry(
        &self,
        fingerprint: &E::Fingerprint,
    ) -> Result<Match<'_, E::Fingerprint>> {
        let mut best: Option<Match<'_, E::Fingerprint>> = None;

        for (handle, entry) in self.iter() {
            let score = rank(self.evaluator().compare(fingerprint, entry.fingerprint()));
            if best.as_ref().is_none_or(|current| score < current.score) {
                best = Some(Match {
                    handle,
                    score,
                    entry,
                });
            }
        }

        best.ok_or(MosaicError::EmptyLibrary)
    }

    /// Candidate image whose fingerprint scores lowest against `fingerprint`
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::EmptyLibrary`] if no candidates have been added
    pub fn best_match(&self, fingerprint: &E::Fingerprint) -> Result<&RgbaImage> {
        self.best_match_entry(fingerprint)
            .map(|found| found.entry.image())
    }

    /// Score of a single entry against `fingerprint`
    pub fn score(&self, handle: TileHandle, fingerprint: &E::Fingerprint) -> Option<f64> {
        self.get(handle)
            .map(|entry| self.evaluator().compare(fingerprint, entry.fingerprint()))
    }
}
