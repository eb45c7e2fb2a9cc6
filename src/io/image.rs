//! Decoding targets and candidates from disk and exporting finished mosaics

use crate::io::configuration::CANDIDATE_EXTENSIONS;
use crate::io::error::{MosaicError, Result};
use crate::io::progress::suspend_bar;
use image::imageops::{self, FilterType};
use image::RgbaImage;
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Decode any supported image file into RGBA pixels
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    image::open(path)
        .map(|decoded| decoded.to_rgba8())
        .map_err(|e| MosaicError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Whether `path` has one of the candidate image extensions
pub fn is_candidate_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            CANDIDATE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// List candidate image files directly inside `directory`, sorted by path
///
/// # Errors
///
/// Returns an error if the directory cannot be read
pub fn collect_candidate_paths(directory: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(directory).map_err(|e| MosaicError::FileSystem {
        path: directory.to_path_buf(),
        operation: "read directory",
        source: e,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| MosaicError::FileSystem {
                path: directory.to_path_buf(),
                operation: "read directory entry",
                source: e,
            })?
            .path();
        if path.is_file() && is_candidate_file(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Centre-crop to a square and resize to `tile_size` x `tile_size`
pub fn prescale(image: &RgbaImage, tile_size: u32) -> RgbaImage {
    let side = image.width().min(image.height());
    if side == 0 {
        return RgbaImage::new(tile_size, tile_size);
    }
    let square = imageops::crop_imm(
        image,
        (image.width() - side) / 2,
        (image.height() - side) / 2,
        side,
        side,
    )
    .to_image();

    if side == tile_size {
        square
    } else {
        imageops::resize(&square, tile_size, tile_size, FilterType::Triangle)
    }
}

/// Decode candidates in parallel, keeping input order and skipping failures
///
/// Undecodable files are logged and left out rather than failing the batch.
pub fn load_candidates(
    paths: &[PathBuf],
    prescale_to: Option<u32>,
    progress: Option<&ProgressBar>,
) -> Vec<RgbaImage> {
    let decoded: Vec<_> = paths
        .par_iter()
        .map(|path| {
            let loaded = load_rgba(path).map(|image| match prescale_to {
                Some(tile_size) => prescale(&image, tile_size),
                None => image,
            });
            if let Some(bar) = progress {
                bar.inc(1);
            }
            loaded
        })
        .collect();

    decoded
        .into_iter()
        .filter_map(|loaded| match loaded {
            Ok(image) => Some(image),
            Err(error) => {
                suspend_bar(progress, || warn!(%error, "skipping candidate"));
                None
            }
        })
        .collect()
}

/// Encode `mosaic` to `output_path`, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the image
/// cannot be encoded
pub fn save_mosaic(mosaic: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    mosaic
        .save(output_path)
        .map_err(|e| MosaicError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
