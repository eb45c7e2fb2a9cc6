//! Tests for progress bar management and tile observation

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use indicatif::ProgressBar;
    use photomosaic::evaluation::AveragingEvaluator;
    use photomosaic::io::progress::{ProgressManager, suspend_bar};
    use photomosaic::mosaic::TileObserver;
    use photomosaic::{Compositor, TileLibrary};

    // Tests bars are tracked with their requested lengths
    // Verified by not recording started bars
    #[test]
    fn test_manager_tracks_bars() {
        let mut manager = ProgressManager::new();
        assert_eq!(manager.bar_count(), 0);

        let loading = manager.start_loading(12);
        let composing = manager.start_composing(70 * 35);

        assert_eq!(manager.bar_count(), 2);
        assert_eq!(loading.length(), Some(12));
        assert_eq!(composing.length(), Some(2450));

        manager.finish();
        assert!(manager.all_finished());
        assert!(loading.is_finished());
        assert!(composing.is_finished());
    }

    // Tests a progress bar advances once per observed tile
    // Verified by advancing by the tile index
    #[test]
    fn test_progress_bar_observes_tiles() {
        let bar = ProgressBar::hidden();
        let mut library = TileLibrary::with_tile_size(AveragingEvaluator::new(), 2).unwrap();
        let handle = library.add_image(RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255])));

        bar.tile_composited(3, 4, handle);
        assert_eq!(bar.position(), 1);

        let target = RgbaImage::from_pixel(8, 4, Rgba([0, 0, 0, 255]));
        Compositor::new(&library, 8)
            .with_observer(&bar)
            .compose(&target)
            .unwrap();
        assert_eq!(bar.position(), 1 + 4 * 2);
    }

    // Tests suspended work runs and its result is returned
    // Verified by dropping the closure result
    #[test]
    fn test_suspend_runs_closure() {
        let mut manager = ProgressManager::new();
        let _bar = manager.start_loading(3);
        assert_eq!(manager.suspend(|| 7), 7);
        assert!(!manager.all_finished());

        let hidden = ProgressBar::hidden();
        assert_eq!(suspend_bar(Some(&hidden), || "shown"), "shown");
        assert_eq!(suspend_bar(None, || 3 + 4), 7);
    }
}
