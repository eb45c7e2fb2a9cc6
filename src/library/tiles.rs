//! Candidate tile storage with fingerprints computed at insertion
//!
//! Entries live in an insertion-ordered arena and are addressed by the index
//! handed back from [`TileLibrary::add_image`]. Identical images added twice
//! are kept as two entries; nothing is deduplicated by content.

use crate::evaluation::{Evaluator, Region};
use crate::io::configuration::{DEFAULT_TILE_SIZE, check_tile_size};
use crate::io::error::Result;
use image::RgbaImage;
use rayon::prelude::*;
use tracing::debug;

/// Stable index of an entry within its library
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileHandle(usize);

impl TileHandle {
    /// Insertion index of the entry
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Candidate image paired with the fingerprint of its top-left tile region
#[derive(Clone, Debug)]
pub struct TileEntry<F> {
    image: RgbaImage,
    fingerprint: F,
}

impl<F> TileEntry<F> {
    /// Candidate pixels as supplied by the caller
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Fingerprint of the candidate's tile region
    pub const fn fingerprint(&self) -> &F {
        &self.fingerprint
    }
}

/// Collection of fingerprinted candidates bound to a single evaluator
///
/// Every fingerprint is taken over the same `tile_size` square at the image
/// origin, so scores are comparable across entries.
pub struct TileLibrary<E: Evaluator> {
    evaluator: E,
    tile_size: u32,
    entries: Vec<TileEntry<E::Fingerprint>>,
}

impl<E: Evaluator> TileLibrary<E> {
    /// Create an empty library using the default tile size
    pub const fn new(evaluator: E) -> Self {
        Self {
            evaluator,
            tile_size: DEFAULT_TILE_SIZE,
            entries: Vec::new(),
        }
    }

    /// Create an empty library for tiles of `tile_size` pixels
    ///
    /// # Errors
    ///
    /// Returns an error if `tile_size` is zero or one tile would exceed the
    /// output pixel cap
    pub fn with_tile_size(evaluator: E, tile_size: u32) -> Result<Self> {
        check_tile_size(tile_size)?;
        Ok(Self {
            evaluator,
            tile_size,
            entries: Vec::new(),
        })
    }

    /// Fingerprint `image` and store it
    pub fn add_image(&mut self, image: RgbaImage) -> TileHandle {
        let fingerprint = self.evaluator.evaluate(&image, self.fingerprint_region());
        let handle = TileHandle(self.entries.len());
        self.entries.push(TileEntry { image, fingerprint });
        handle
    }

    /// Fingerprint many candidates in parallel and store them in input order
    pub fn add_images(&mut self, images: Vec<RgbaImage>) -> Vec<TileHandle> {
        let region = self.fingerprint_region();
        let evaluator = &self.evaluator;
        let fingerprinted: Vec<_> = images
            .into_par_iter()
            .map(|image| {
                let fingerprint = evaluator.evaluate(&image, region);
                TileEntry { image, fingerprint }
            })
            .collect();

        let first = self.entries.len();
        self.entries.extend(fingerprinted);
        debug!(
            added = self.entries.len() - first,
            total = self.entries.len(),
            "fingerprinted candidate batch"
        );

        (first..self.entries.len()).map(TileHandle).collect()
    }

    /// Region of every candidate that contributes to its fingerprint
    pub const fn fingerprint_region(&self) -> Region {
        Region::square(self.tile_size)
    }

    /// Evaluator shared by all entries and queries
    pub const fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Edge length of one tile
    pub const fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Number of stored candidates
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no candidates have been added
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by handle
    pub fn get(&self, handle: TileHandle) -> Option<&TileEntry<E::Fingerprint>> {
        self.entries.get(handle.0)
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (TileHandle, &TileEntry<E::Fingerprint>)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (TileHandle(index), entry))
    }
}
