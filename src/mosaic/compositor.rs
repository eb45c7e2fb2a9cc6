//! Tile selection and composition of the output mosaic
//!
//! Every output tile depends only on the target image and the library, so tile
//! rows are composed in parallel. Each worker owns one horizontal strip of the
//! output buffer; strips never overlap, so no locking is needed for writes.

use crate::evaluation::Evaluator;
use crate::io::configuration::MosaicConfig;
use crate::io::error::{MosaicError, Result, invalid_source};
use crate::library::{TileHandle, TileLibrary};
use crate::mosaic::planner::{MosaicDimensions, plan};
use image::{GenericImageView, ImageBuffer, Pixel, Rgba, RgbaImage};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::debug;

/// Receives a notification after each tile is drawn
///
/// Called from worker threads in no particular tile order.
pub trait TileObserver: Sync {
    /// Tile at (`tile_x`, `tile_y`) was filled with the candidate `handle`
    fn tile_composited(&self, tile_x: u32, tile_y: u32, handle: TileHandle);
}

/// Configurable composition of a target image from a tile library
pub struct Compositor<'a, E: Evaluator> {
    library: &'a TileLibrary<E>,
    max_dimension: u32,
    cancellation: Option<&'a AtomicBool>,
    observer: Option<&'a dyn TileObserver>,
}

impl<'a, E: Evaluator> Compositor<'a, E> {
    /// Compose with `library`, capping the output's longer edge at `max_dimension`
    pub const fn new(library: &'a TileLibrary<E>, max_dimension: u32) -> Self {
        Self {
            library,
            max_dimension,
            cancellation: None,
            observer: None,
        }
    }

    /// Abort between tiles once `flag` is set
    #[must_use]
    pub fn with_cancellation(mut self, flag: &'a AtomicBool) -> Self {
        self.cancellation = Some(flag);
        self
    }

    /// Report every composited tile to `observer`
    #[must_use]
    pub fn with_observer(mut self, observer: &'a dyn TileObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Output grid for a target of the given size
    ///
    /// # Errors
    ///
    /// Returns an error if the target is degenerate, `max_dimension` is zero or
    /// the planned output exceeds the pixel cap
    pub fn plan(&self, target_width: u32, target_height: u32) -> Result<MosaicDimensions> {
        plan(
            target_width,
            target_height,
            self.max_dimension,
            self.library.tile_size(),
        )
    }

    /// Build the mosaic of `target`
    ///
    /// All-or-nothing: no image is returned unless every tile was matched.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The library is empty
    /// - The target has zero width or height
    /// - The planned output exceeds the pixel cap
    /// - The cancellation flag was raised before the last tile
    pub fn compose<I>(&self, target: &I) -> Result<RgbaImage>
    where
        I: GenericImageView<Pixel = Rgba<u8>> + Sync,
    {
        if self.library.is_empty() {
            return Err(MosaicError::EmptyLibrary);
        }

        let (target_width, target_height) = target.dimensions();
        let dimensions = self.plan(target_width, target_height)?;
        debug!(
            width = dimensions.width,
            height = dimensions.height,
            tiles_x = dimensions.tiles_x,
            tiles_y = dimensions.tiles_y,
            candidates = self.library.len(),
            "composing mosaic"
        );

        let mut output = RgbaImage::new(dimensions.width, dimensions.height);
        let strip_len = dimensions.width as usize
            * usize::from(<Rgba<u8> as Pixel>::CHANNEL_COUNT)
            * dimensions.tile_size as usize;
        let completed = AtomicUsize::new(0);

        let buffer: &mut [u8] = &mut output;
        buffer
            .par_chunks_mut(strip_len)
            .enumerate()
            .try_for_each(|(row, strip)| {
                self.compose_row(target, &dimensions, row as u32, strip, &completed)
            })?;

        debug!(tiles = completed.load(Ordering::Relaxed), "mosaic complete");
        Ok(output)
    }

    fn compose_row<I>(
        &self,
        target: &I,
        dimensions: &MosaicDimensions,
        tile_y: u32,
        strip: &mut [u8],
        completed: &AtomicUsize,
    ) -> Result<()>
    where
        I: GenericImageView<Pixel = Rgba<u8>>,
    {
        let mut canvas = ImageBuffer::<Rgba<u8>, &mut [u8]>::from_raw(
            dimensions.width,
            dimensions.tile_size,
            strip,
        )
        .ok_or_else(|| invalid_source(&"output strip smaller than one tile row"))?;

        for tile_x in 0..dimensions.tiles_x {
            self.ensure_not_cancelled(completed)?;

            let fingerprint = self
                .library
                .evaluator()
                .evaluate(target, dimensions.source_region(tile_x, tile_y));
            let best = self.library.best_match_entry(&fingerprint)?;

            let (offset_x, _) = dimensions.tile_origin(tile_x, tile_y);
            draw_tile(&mut canvas, best.entry.image(), offset_x, dimensions.tile_size);

            completed.fetch_add(1, Ordering::Relaxed);
            if let Some(observer) = self.observer {
                observer.tile_composited(tile_x, tile_y, best.handle);
            }
        }

        Ok(())
    }

    fn ensure_not_cancelled(&self, completed: &AtomicUsize) -> Result<()> {
        match self.cancellation {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(MosaicError::Cancelled {
                completed_tiles: completed.load(Ordering::Relaxed),
            }),
            _ => Ok(()),
        }
    }
}

// Alpha-over of the tile's top-left cell; pixels never leave their own cell
fn draw_tile(
    canvas: &mut ImageBuffer<Rgba<u8>, &mut [u8]>,
    tile: &RgbaImage,
    offset_x: u32,
    tile_size: u32,
) {
    let width = tile.width().min(tile_size);
    let height = tile.height().min(tile_size);

    for y in 0..height {
        for x in 0..width {
            let Some(pixel) = tile.get_pixel_checked(x, y) else {
                continue;
            };
            if let Some(cell) = canvas.get_pixel_mut_checked(offset_x + x, y) {
                cell.blend(pixel);
            }
        }
    }
}

/// Build the mosaic of `target` from a populated library
///
/// There is no tile size argument: tiles are `library.tile_size()` pixels
/// square, fixed when the library was built, so candidate fingerprints and the
/// output grid always agree. The output's longer edge is capped at
/// `max_dimension`.
///
/// # Errors
///
/// Returns an error if the library is empty, the target is degenerate,
/// `max_dimension` is zero or the planned output exceeds the pixel cap
pub fn compose<E, I>(target: &I, library: &TileLibrary<E>, max_dimension: u32) -> Result<RgbaImage>
where
    E: Evaluator,
    I: GenericImageView<Pixel = Rgba<u8>> + Sync,
{
    Compositor::new(library, max_dimension).compose(target)
}

/// Fingerprint `candidates` with `evaluator` and build the mosaic of `target`
///
/// # Errors
///
/// Returns an error if the configuration is invalid, `candidates` is empty or
/// the target is degenerate
pub fn build_mosaic<E, I>(
    target: &I,
    candidates: Vec<RgbaImage>,
    evaluator: E,
    config: MosaicConfig,
) -> Result<RgbaImage>
where
    E: Evaluator,
    I: GenericImageView<Pixel = Rgba<u8>> + Sync,
{
    config.validate()?;
    let mut library = TileLibrary::with_tile_size(evaluator, config.tile_size)?;
    library.add_images(candidates);
    compose(target, &library, config.max_dimension)
}
