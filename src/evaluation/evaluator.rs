//! Region fingerprinting contract shared by every similarity strategy

use crate::io::configuration::BACKFILL_COLOR;
use image::{GenericImageView, Rgba};
use std::fmt;

/// Rectangular area of an image in pixel coordinates
///
/// A region may overrun the image it is applied to; positions outside the
/// image read as [`BACKFILL_COLOR`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Region {
    /// Create a region from its origin and size
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square region anchored at the image origin
    pub const fn square(size: u32) -> Self {
        Self::new(0, 0, size, size)
    }

    /// Number of sampled positions
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Whether the region samples no positions at all
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}+{}+{}",
            self.width, self.height, self.x, self.y
        )
    }
}

/// Strategy that summarises image regions and scores their dissimilarity
///
/// A library binds exactly one evaluator; fingerprints are only comparable when
/// produced by the same evaluator over regions of the same shape.
pub trait Evaluator: Send + Sync {
    /// Comparable summary of one region
    type Fingerprint: Clone + fmt::Debug + Send + Sync;

    /// Summarise `region` of `source`
    ///
    /// Must depend only on the pixels read. Positions outside `source` read as
    /// opaque white, so a region with nothing in bounds still yields a
    /// fingerprint.
    fn evaluate<I>(&self, source: &I, region: Region) -> Self::Fingerprint
    where
        I: GenericImageView<Pixel = Rgba<u8>> + ?Sized;

    /// Non-negative dissimilarity, smaller is closer
    fn compare(&self, a: &Self::Fingerprint, b: &Self::Fingerprint) -> f64;
}

/// Iterate the pixels of `region` row by row, backfilling positions outside `source`
pub fn sample_region<I>(source: &I, region: Region) -> impl Iterator<Item = Rgba<u8>>
where
    I: GenericImageView<Pixel = Rgba<u8>> + ?Sized,
{
    let (width, height) = source.dimensions();
    (0..region.height).flat_map(move |dy| {
        (0..region.width).map(move |dx| {
            match (region.x.checked_add(dx), region.y.checked_add(dy)) {
                (Some(x), Some(y)) if x < width && y < height => source.get_pixel(x, y),
                _ => Rgba(BACKFILL_COLOR),
            }
        })
    })
}
