//! Tests for decoding, candidate discovery, prescaling and export

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use indicatif::ProgressBar;
    use photomosaic::MosaicError;
    use photomosaic::io::image::{
        collect_candidate_paths, is_candidate_file, load_candidates, load_rgba, prescale,
        save_mosaic,
    };
    use std::path::Path;
    use tempfile::TempDir;

    fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(color))
    }

    // Tests saved mosaics decode back to the same pixels
    // Verified by saving through a lossy format
    #[test]
    fn test_save_and_load_png() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mosaic.png");
        let image = RgbaImage::from_fn(3, 2, |x, y| Rgba([x as u8 * 40, y as u8 * 90, 7, 255]));

        save_mosaic(&image, &path).unwrap();
        let loaded = load_rgba(&path).unwrap();

        assert_eq!(loaded, image);
    }

    // Tests missing parent directories are created on save
    // Verified by removing directory creation
    #[test]
    fn test_save_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("deeper").join("out.png");

        save_mosaic(&solid(2, 2, [1, 2, 3, 255]), &path).unwrap();
        assert!(path.exists());
    }

    // Tests unknown output formats surface as export errors
    // Verified by mapping encode failures to load errors
    #[test]
    fn test_save_unknown_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mosaic.unknown");

        assert!(matches!(
            save_mosaic(&solid(1, 1, [0, 0, 0, 255]), &path),
            Err(MosaicError::ImageExport { .. })
        ));
    }

    // Tests missing files surface as load errors with their path
    // Verified by dropping the path from the error
    #[test]
    fn test_load_missing_file() {
        let result = load_rgba(Path::new("/nonexistent/target.png"));
        assert!(matches!(
            result,
            Err(MosaicError::ImageLoad { ref path, .. }) if path.ends_with("target.png")
        ));
    }

    // Tests extension matching ignores case and unknown types
    // Verified by comparing extensions case-sensitively
    #[test]
    fn test_is_candidate_file() {
        assert!(is_candidate_file(Path::new("a.png")));
        assert!(is_candidate_file(Path::new("b.JPG")));
        assert!(is_candidate_file(Path::new("c.Jpeg")));
        assert!(is_candidate_file(Path::new("d.gif")));
        assert!(!is_candidate_file(Path::new("e.txt")));
        assert!(!is_candidate_file(Path::new("noextension")));
    }

    // Tests discovery filters non-images and sorts by path
    // Verified by returning directory order
    #[test]
    fn test_collect_candidate_paths() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        for name in ["c.png", "a.png", "b.PNG"] {
            save_mosaic(&solid(1, 1, [0, 0, 0, 255]), &dir.join(name)).unwrap();
        }
        std::fs::write(dir.join("notes.txt"), "not an image").unwrap();
        std::fs::create_dir(dir.join("sub.png")).unwrap();

        let paths = collect_candidate_paths(dir).unwrap();
        let names: Vec<_> = paths
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();

        assert_eq!(names, vec!["a.png", "b.PNG", "c.png"]);
    }

    // Tests unreadable directories surface as file system errors
    // Verified by returning an empty list
    #[test]
    fn test_collect_missing_directory() {
        assert!(matches!(
            collect_candidate_paths(Path::new("/nonexistent/tiles")),
            Err(MosaicError::FileSystem { .. })
        ));
    }

    // Tests prescaling centre-crops before resizing
    // Verified by resizing without cropping
    #[test]
    fn test_prescale_centre_crop() {
        // Red margins left and right, green centre square
        let image = RgbaImage::from_fn(100, 50, |x, _| {
            if (25..75).contains(&x) {
                Rgba([0, 255, 0, 255])
            } else {
                Rgba([255, 0, 0, 255])
            }
        });

        let scaled = prescale(&image, 10);
        assert_eq!(scaled.dimensions(), (10, 10));
        assert!(scaled.pixels().all(|pixel| *pixel == Rgba([0, 255, 0, 255])));
    }

    // Tests already square images at tile size are unchanged
    // Verified by always resampling
    #[test]
    fn test_prescale_identity() {
        let image = RgbaImage::from_fn(8, 8, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        assert_eq!(prescale(&image, 8), image);
    }

    // Tests empty inputs give a blank tile instead of panicking
    // Verified by cropping a zero-sized square
    #[test]
    fn test_prescale_empty_image() {
        let scaled = prescale(&RgbaImage::new(0, 0), 4);
        assert_eq!(scaled.dimensions(), (4, 4));
    }

    // Tests undecodable candidates are skipped in order
    // Verified by aborting on the first failure
    #[test]
    fn test_load_candidates_skips_failures() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        save_mosaic(&solid(2, 2, [10, 0, 0, 255]), &dir.join("a.png")).unwrap();
        std::fs::write(dir.join("b.png"), b"garbage").unwrap();
        save_mosaic(&solid(3, 3, [30, 0, 0, 255]), &dir.join("c.png")).unwrap();

        let paths = collect_candidate_paths(dir).unwrap();
        let bar = ProgressBar::hidden();
        bar.set_length(paths.len() as u64);
        let loaded = load_candidates(&paths, None, Some(&bar));

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].get_pixel(0, 0).0[0], 10);
        assert_eq!(loaded[1].get_pixel(0, 0).0[0], 30);
        assert_eq!(bar.position(), 3);
    }

    // Tests prescaling is applied to every loaded candidate
    // Verified by ignoring the prescale option
    #[test]
    fn test_load_candidates_prescaled() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("wide.png");
        save_mosaic(&solid(40, 20, [0, 0, 255, 255]), &path).unwrap();

        let loaded = load_candidates(&[path], Some(5), None);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].dimensions(), (5, 5));
    }
}
