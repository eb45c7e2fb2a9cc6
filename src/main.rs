//! CLI entry point for building photomosaics

use clap::Parser;
use photomosaic::io::cli::{Cli, MosaicProcessor};
use photomosaic::io::logging::{default_filter, init_logging};

fn main() -> photomosaic::Result<()> {
    let cli = Cli::parse();
    init_logging(default_filter(cli.quiet));
    let mut processor = MosaicProcessor::new(cli);
    processor.process().map(|_| ())
}
