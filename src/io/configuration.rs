//! Mosaic constants and runtime configuration defaults

use crate::io::error::{Result, invalid_parameter};

/// Edge length in pixels of one output tile
///
/// Candidates should be pre-scaled to a square of this size. Larger candidates
/// only contribute their top-left corner; smaller ones are backfilled.
pub const DEFAULT_TILE_SIZE: u32 = 90;

/// Cap on the longer edge of a finished mosaic
pub const DEFAULT_MAX_DIMENSION: u32 = DEFAULT_TILE_SIZE * 70;

/// Largest mosaic, in pixels, that composition will allocate
///
/// Keeps the RGBA canvas at or under 1 GiB, which also fits a 32-bit `usize`.
pub const MAX_OUTPUT_PIXELS: u64 = 1 << 28;

/// Colour assumed for positions outside an image's bounds during fingerprinting
pub const BACKFILL_COLOR: [u8; 4] = [255, 255, 255, 255];

/// Default number of bins per channel for histogram fingerprints
pub const DEFAULT_HISTOGRAM_BINS: usize = 8;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_mosaic";
/// Extension of generated mosaics
pub const OUTPUT_EXTENSION: &str = "png";

/// File extensions accepted as candidate tiles
pub const CANDIDATE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Size parameters shared by library construction and composition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MosaicConfig {
    /// Pixel edge length of one tile
    pub tile_size: u32,
    /// Cap on the output's longer edge
    pub max_dimension: u32,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }
}

impl MosaicConfig {
    /// Create a configuration, rejecting zero sizes
    ///
    /// # Errors
    ///
    /// Returns an error if either value is zero or the tile size is too large
    pub fn new(tile_size: u32, max_dimension: u32) -> Result<Self> {
        let config = Self {
            tile_size,
            max_dimension,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that both sizes are usable
    ///
    /// # Errors
    ///
    /// Returns an error if either value is zero or a single tile exceeds
    /// [`MAX_OUTPUT_PIXELS`]
    pub fn validate(&self) -> Result<()> {
        check_tile_size(self.tile_size)?;
        if self.max_dimension == 0 {
            return Err(invalid_parameter(
                "max_dimension",
                &self.max_dimension,
                &"must be positive",
            ));
        }
        Ok(())
    }
}

/// Check that `tile_size` is positive and one tile fits the output cap
///
/// # Errors
///
/// Returns an error if `tile_size` is zero or `tile_size` squared exceeds
/// [`MAX_OUTPUT_PIXELS`]
pub fn check_tile_size(tile_size: u32) -> Result<()> {
    if tile_size == 0 {
        return Err(invalid_parameter(
            "tile_size",
            &tile_size,
            &"must be positive",
        ));
    }
    if u64::from(tile_size) * u64::from(tile_size) > MAX_OUTPUT_PIXELS {
        return Err(invalid_parameter(
            "tile_size",
            &tile_size,
            &format!("one tile exceeds the {MAX_OUTPUT_PIXELS} pixel output cap"),
        ));
    }
    Ok(())
}
