//! Command-line interface building a mosaic from files on disk

use crate::evaluation::{AveragingEvaluator, Evaluator, HistogramEvaluator};
use crate::io::configuration::{
    DEFAULT_MAX_DIMENSION, DEFAULT_TILE_SIZE, MosaicConfig, OUTPUT_EXTENSION, OUTPUT_SUFFIX,
};
use crate::io::error::{Result, invalid_source};
use crate::io::image::{collect_candidate_paths, load_candidates, load_rgba, save_mosaic};
use crate::io::progress::ProgressManager;
use crate::library::TileLibrary;
use crate::mosaic::Compositor;
use clap::{Parser, ValueEnum};
use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Similarity strategy selectable from the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EvaluatorKind {
    /// Mean colour per channel
    Averaging,
    /// Coarse per-channel histograms
    Histogram,
}

#[derive(Parser)]
#[command(name = "photomosaic")]
#[command(
    author,
    version,
    about = "Rebuild an image out of a directory of smaller images"
)]
/// Command-line arguments for the mosaic builder
pub struct Cli {
    /// Image to reproduce
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Directory of candidate tile images
    #[arg(short = 'T', long, value_name = "DIR")]
    pub tiles: PathBuf,

    /// Output file (defaults to `<target>_mosaic.png` beside the target)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Edge length of one tile in pixels
    #[arg(short = 't', long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: u32,

    /// Cap on the longer edge of the output
    #[arg(short = 'd', long, default_value_t = DEFAULT_MAX_DIMENSION)]
    pub max_dimension: u32,

    /// Similarity strategy used to match tiles
    #[arg(short, long, value_enum, default_value_t = EvaluatorKind::Averaging)]
    pub evaluator: EvaluatorKind,

    /// Crop and resize candidates to the tile size before fingerprinting
    #[arg(short, long)]
    pub prescale: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Build even if the output file exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if an existing output file should be left alone
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Validated size parameters
    ///
    /// # Errors
    ///
    /// Returns an error if the tile size or maximum dimension is zero
    pub fn config(&self) -> Result<MosaicConfig> {
        MosaicConfig::new(self.tile_size, self.max_dimension)
    }

    /// Where the mosaic will be written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.target))
    }
}

/// `<stem>_mosaic.png` next to `target`
pub fn default_output_path(target: &Path) -> PathBuf {
    let stem = target.file_stem().unwrap_or_default();
    let output_name = format!(
        "{}{}.{}",
        stem.to_string_lossy(),
        OUTPUT_SUFFIX,
        OUTPUT_EXTENSION
    );

    if let Some(parent) = target.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}

/// Runs one mosaic build from parsed arguments with progress tracking
pub struct MosaicProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl MosaicProcessor {
    /// Create a processor for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Load inputs, build the mosaic and write it out
    ///
    /// Returns the path written, or `None` when an existing output was skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The size parameters are invalid
    /// - The target cannot be decoded
    /// - The tile directory cannot be read or holds no decodable images
    /// - Composition fails
    /// - The output cannot be written
    pub fn process(&mut self) -> Result<Option<PathBuf>> {
        let output_path = self.cli.output_path();
        if self.cli.skip_existing() && output_path.exists() {
            info!(output = %output_path.display(), "output exists, skipping");
            return Ok(None);
        }

        let config = self.cli.config()?;
        let target = load_rgba(&self.cli.target)?;

        match self.cli.evaluator {
            EvaluatorKind::Averaging => {
                self.build(AveragingEvaluator::new(), config, &target, &output_path)?;
            }
            EvaluatorKind::Histogram => {
                self.build(HistogramEvaluator::default(), config, &target, &output_path)?;
            }
        }

        Ok(Some(output_path))
    }

    /// Progress bars of the current run, if progress is shown
    pub const fn progress_manager(&self) -> Option<&ProgressManager> {
        self.progress_manager.as_ref()
    }

    fn build<E: Evaluator>(
        &mut self,
        evaluator: E,
        config: MosaicConfig,
        target: &RgbaImage,
        output_path: &Path,
    ) -> Result<()> {
        let start_time = Instant::now();
        let built = self.compose_and_save(evaluator, config, target, output_path);

        // Cleared on failure too
        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }
        let (width, height) = built?;

        info!(
            output = %output_path.display(),
            width,
            height,
            elapsed_ms = start_time.elapsed().as_millis(),
            "mosaic written"
        );
        Ok(())
    }

    fn compose_and_save<E: Evaluator>(
        &mut self,
        evaluator: E,
        config: MosaicConfig,
        target: &RgbaImage,
        output_path: &Path,
    ) -> Result<(u32, u32)> {
        let paths = collect_candidate_paths(&self.cli.tiles)?;
        let loading_bar = self
            .progress_manager
            .as_mut()
            .map(|pm| pm.start_loading(paths.len()));
        let prescale_to = self.cli.prescale.then_some(config.tile_size);
        let candidates = load_candidates(&paths, prescale_to, loading_bar.as_ref());
        if candidates.is_empty() {
            return Err(invalid_source(&format!(
                "no decodable candidate images in '{}'",
                self.cli.tiles.display()
            )));
        }

        let mut library = TileLibrary::with_tile_size(evaluator, config.tile_size)?;
        library.add_images(candidates);

        let compositor = Compositor::new(&library, config.max_dimension);
        let dimensions = compositor.plan(target.width(), target.height())?;
        self.log(|| {
            info!(
                candidates = library.len(),
                skipped = paths.len() - library.len(),
                width = dimensions.width,
                height = dimensions.height,
                tiles = dimensions.tile_count(),
                "composing mosaic"
            );
        });

        let tile_bar = self
            .progress_manager
            .as_mut()
            .map(|pm| pm.start_composing(dimensions.tile_count()));
        let mosaic = match tile_bar.as_ref() {
            Some(bar) => compositor.with_observer(bar).compose(target)?,
            None => compositor.compose(target)?,
        };

        save_mosaic(&mosaic, output_path)?;
        Ok(mosaic.dimensions())
    }

    // Log with any live bars hidden
    fn log(&self, event: impl FnOnce()) {
        match self.progress_manager {
            Some(ref pm) => pm.suspend(event),
            None => event(),
        }
    }
}
