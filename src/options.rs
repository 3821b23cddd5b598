use crate::constants::{MAX_TARGET_KB, MIN_TARGET_KB};
use crate::error::{CompressionError, Result};
use crate::units::to_bytes;
use std::path::PathBuf;

/// User-requested output budget, in KB. Always within `1..=2048`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSize(u64);

impl TargetSize {
    pub fn new(kb: u64) -> Result<Self> {
        if !(MIN_TARGET_KB..=MAX_TARGET_KB).contains(&kb) {
            return Err(CompressionError::InvalidTargetSize(kb));
        }
        Ok(Self(kb))
    }

    pub fn kb(&self) -> u64 {
        self.0
    }

    pub fn bytes(&self) -> u64 {
        to_bytes(self.0)
    }
}

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub target: TargetSize,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub threads: Option<usize>,
    pub copy_skipped: bool,
}

impl BatchOptions {
    pub fn new(
        size_kb: u64,
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Result<Self> {
        Ok(Self {
            target: TargetSize::new(size_kb)?,
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            threads: None,
            copy_skipped: false,
        })
    }

    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_copy_skipped(mut self, copy_skipped: bool) -> Self {
        self.copy_skipped = copy_skipped;
        self
    }
}
