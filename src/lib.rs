pub mod batch;
pub mod cli;
pub mod codec;
pub mod constants;
pub mod error;
pub mod logger;
pub mod options;
pub mod search;
pub mod units;

pub use batch::{
    run_batch, run_batch_with, scan_input_dir, BatchCounters, BatchReport, BatchRun, FileOutcome,
};
pub use codec::{JpegCodec, QualityEncoder};
pub use error::{CompressionError, Result};
pub use options::{BatchOptions, TargetSize};
pub use search::{search, Attempt, SearchOutcome};
