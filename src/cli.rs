use crate::constants::{DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR};
use crate::error::Result;
use crate::options::BatchOptions;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "img-budget",
    about = "Batch-compress JPEG images until each one fits a target file size",
    long_about = "img-budget re-encodes every .jpg in the input directory at decreasing quality, \
                  starting from 100, until the result is within 95% of the requested size. \
                  Images are capped at 1500px on the long edge. Files already under the target \
                  are skipped.",
    version,
    after_help = "EXAMPLES:\n  \
    img-budget -s 500\n  \
    img-budget -s 200 -v -i ./photos -o ./photos-small\n  \
    img-budget --size 1024 --copy-skipped -j 4"
)]
pub struct Args {
    #[arg(
        short = 's',
        long,
        value_name = "KB",
        help = "Desired size in KB (1-2048)",
        long_help = "Target size per image in kilobytes (1 KB = 1024 bytes). \
                     Must be between 1 and 2048 inclusive."
    )]
    pub size: u64,

    #[arg(
        short = 'v',
        long,
        conflicts_with = "quiet",
        help = "Print every quality attempt"
    )]
    pub verbose: bool,

    #[arg(short = 'q', long, help = "Only print errors")]
    pub quiet: bool,

    #[arg(
        short = 'i',
        long,
        value_name = "DIR",
        default_value = DEFAULT_INPUT_DIR,
        help = "Directory to read .jpg files from"
    )]
    pub input: PathBuf,

    #[arg(
        short = 'o',
        long,
        value_name = "DIR",
        default_value = DEFAULT_OUTPUT_DIR,
        help = "Directory to write compressed files to"
    )]
    pub output: PathBuf,

    #[arg(
        short = 'j',
        long,
        help = "Number of parallel threads (default: auto)",
        long_help = "Number of images compressed at the same time. \
                     If not specified, uses number of CPU cores."
    )]
    pub threads: Option<usize>,

    #[arg(
        long,
        help = "Copy files already under the target size into the output directory"
    )]
    pub copy_skipped: bool,
}

impl Args {
    /// Validates the arguments into batch options without touching the filesystem.
    pub fn to_options(&self) -> Result<BatchOptions> {
        Ok(BatchOptions::new(self.size, &self.input, &self.output)?
            .with_threads(self.threads)
            .with_copy_skipped(self.copy_skipped))
    }
}
