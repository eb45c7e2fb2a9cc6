//! Maps a target image onto a whole-tile output grid
//!
//! The longer target edge is scaled to the maximum output dimension and the
//! shorter one follows proportionally. Both are then snapped down to a
//! multiple of the tile size, accepting slight aspect distortion so that the
//! grid tiles the output exactly and never indexes past the target.

use crate::evaluation::Region;
use crate::io::configuration::{MAX_OUTPUT_PIXELS, check_tile_size};
use crate::io::error::{MosaicError, Result, invalid_parameter};

/// Planned output grid for one composition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MosaicDimensions {
    /// Output width in pixels, a multiple of `tile_size`
    pub width: u32,
    /// Output height in pixels, a multiple of `tile_size`
    pub height: u32,
    /// Edge length of one output tile
    pub tile_size: u32,
    /// Tile columns
    pub tiles_x: u32,
    /// Tile rows
    pub tiles_y: u32,
    /// Target columns summarised by one output tile
    pub source_pixels_per_tile_x: u32,
    /// Target rows summarised by one output tile
    pub source_pixels_per_tile_y: u32,
    /// Target width the plan was made for
    pub source_width: u32,
    /// Target height the plan was made for
    pub source_height: u32,
}

/// Plan the output grid for a `source_width` x `source_height` target
///
/// Remainder target pixels at the far edges are never sampled.
///
/// # Errors
///
/// Returns an error if:
/// - Either source dimension is zero
/// - `max_dimension` or `tile_size` is zero
/// - The planned output exceeds [`MAX_OUTPUT_PIXELS`]
pub fn plan(
    source_width: u32,
    source_height: u32,
    max_dimension: u32,
    tile_size: u32,
) -> Result<MosaicDimensions> {
    if source_width == 0 || source_height == 0 {
        return Err(MosaicError::DegenerateTarget {
            width: source_width,
            height: source_height,
        });
    }
    check_tile_size(tile_size)?;
    if max_dimension == 0 {
        return Err(invalid_parameter(
            "max_dimension",
            &max_dimension,
            &"must be positive",
        ));
    }

    let (scaled_width, scaled_height) = if source_width >= source_height {
        (
            max_dimension,
            scale_minor_axis(source_height, source_width, max_dimension),
        )
    } else {
        (
            scale_minor_axis(source_width, source_height, max_dimension),
            max_dimension,
        )
    };

    let width = snap_to_tiles(scaled_width, tile_size);
    let height = snap_to_tiles(scaled_height, tile_size);
    if u64::from(width) * u64::from(height) > MAX_OUTPUT_PIXELS {
        return Err(invalid_parameter(
            "max_dimension",
            &max_dimension,
            &format!("{width}x{height} output exceeds the {MAX_OUTPUT_PIXELS} pixel cap"),
        ));
    }
    let tiles_x = width / tile_size;
    let tiles_y = height / tile_size;

    Ok(MosaicDimensions {
        width,
        height,
        tile_size,
        tiles_x,
        tiles_y,
        source_pixels_per_tile_x: source_width / tiles_x,
        source_pixels_per_tile_y: source_height / tiles_y,
        source_width,
        source_height,
    })
}

// Exact floor of minor * max / major; never exceeds max because minor <= major
fn scale_minor_axis(minor: u32, major: u32, max_dimension: u32) -> u32 {
    let scaled = u64::from(minor) * u64::from(max_dimension) / u64::from(major);
    u32::try_from(scaled).unwrap_or(max_dimension)
}

fn snap_to_tiles(dimension: u32, tile_size: u32) -> u32 {
    let dimension = dimension.max(tile_size);
    dimension - dimension % tile_size
}

// When the target is narrower than the grid, each tile samples its nearest pixel
fn axis_span(tile: u32, per_tile: u32, source: u32, tiles: u32) -> (u32, u32) {
    if per_tile > 0 {
        return (tile.saturating_mul(per_tile), per_tile);
    }
    let origin = (u64::from(tile) * u64::from(source))
        .checked_div(u64::from(tiles))
        .unwrap_or(0);
    (u32::try_from(origin).unwrap_or(u32::MAX), 1)
}

impl MosaicDimensions {
    /// Total number of output tiles
    pub const fn tile_count(&self) -> u64 {
        self.tiles_x as u64 * self.tiles_y as u64
    }

    /// Target rectangle summarised by the tile at (`tile_x`, `tile_y`)
    pub fn source_region(&self, tile_x: u32, tile_y: u32) -> Region {
        let (x, width) = axis_span(
            tile_x,
            self.source_pixels_per_tile_x,
            self.source_width,
            self.tiles_x,
        );
        let (y, height) = axis_span(
            tile_y,
            self.source_pixels_per_tile_y,
            self.source_height,
            self.tiles_y,
        );
        Region::new(x, y, width, height)
    }

    /// Output pixel offset of the tile at (`tile_x`, `tile_y`)
    pub const fn tile_origin(&self, tile_x: u32, tile_y: u32) -> (u32, u32) {
        (tile_x * self.tile_size, tile_y * self.tile_size)
    }
}
