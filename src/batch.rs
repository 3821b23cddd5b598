use crate::codec::{JpegCodec, QualityEncoder};
use crate::constants::{
    JPEG_EXTENSION, MAX_DIMENSION, MIN_QUALITY, PROGRESS_SPINNER_TEMPLATE, SPINNER_TICK_MS,
};
use crate::error::{CompressionError, Result};
use crate::logger;
use crate::options::BatchOptions;
use crate::search::{search, Attempt, SearchOutcome};
use crate::units::{format_human, percentage};
use crate::{error, info, success, verbose, warn};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant};
use walkdir::{DirEntry, WalkDir};

/// Terminal state of a single input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Compressed {
        file: String,
        quality: u8,
        original_size: u64,
        final_size: u64,
    },
    Skipped {
        file: String,
        original_size: u64,
        copied: bool,
    },
    Unreachable {
        file: String,
        original_size: u64,
        smallest_size: u64,
    },
    Failed {
        file: String,
        reason: String,
    },
}

impl FileOutcome {
    pub fn file(&self) -> &str {
        match self {
            FileOutcome::Compressed { file, .. }
            | FileOutcome::Skipped { file, .. }
            | FileOutcome::Unreachable { file, .. }
            | FileOutcome::Failed { file, .. } => file,
        }
    }
}

/// Completion tracking shared by every worker.
///
/// The batch is complete exactly when `processed == total`.
#[derive(Debug)]
pub struct BatchCounters {
    total: usize,
    processed: AtomicUsize,
}

impl BatchCounters {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            processed: AtomicUsize::new(0),
        }
    }

    /// Counts one terminal outcome. Returns `true` only for the call that
    /// completes the batch.
    pub fn record(&self) -> bool {
        self.processed.fetch_add(1, Ordering::AcqRel) + 1 == self.total
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::Acquire)
    }

    pub fn is_complete(&self) -> bool {
        self.processed() == self.total
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputScan {
    /// Visible entries found in the directory, of any kind.
    pub entry_count: usize,
    pub jpegs: Vec<PathBuf>,
}

#[derive(Debug)]
pub enum BatchRun {
    EmptyDirectory,
    NoJpegs,
    Completed(BatchReport),
}

#[derive(Debug, Clone)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn compressed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Compressed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped { .. }))
    }

    pub fn unreachable(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Unreachable { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    /// Original and final byte totals over compressed files.
    pub fn compressed_sizes(&self) -> (u64, u64) {
        self.outcomes
            .iter()
            .fold((0, 0), |(before, after), outcome| match outcome {
                FileOutcome::Compressed {
                    original_size,
                    final_size,
                    ..
                } => (before + original_size, after + final_size),
                _ => (before, after),
            })
    }

    pub fn print_summary(&self) {
        let (before, after) = self.compressed_sizes();

        info!("Batch summary:");
        info!("  Total files: {}", self.total());
        info!("  Compressed: {}", self.compressed());
        info!("  Skipped: {}", self.skipped());
        if self.unreachable() > 0 {
            warn!("  Could not reach target: {}", self.unreachable());
        }
        if self.failed() > 0 {
            warn!("  Failed: {}", self.failed());
        }
        if before > 0 {
            info!(
                "  {} => {} ({}% of original)",
                format_human(before),
                format_human(after),
                percentage(after, before)
            );
        }
        success!("All done! Process took {}.", format_elapsed(self.elapsed));
    }

    fn count(&self, predicate: impl Fn(&FileOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(o)).count()
    }
}

/// Minutes (rounded) from one minute up, whole seconds below that.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs >= 60 {
        format!("about {} minutes", (secs as f64 / 60.0).round() as u64)
    } else {
        format!("{} seconds", secs)
    }
}

pub fn is_jpeg_file(path: &Path) -> bool {
    path.extension() == Some(OsStr::new(JPEG_EXTENSION))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Lists the top level of `dir` and keeps regular files ending in `.jpg`,
/// sorted by path. Dotfiles count as entries but are never processed.
pub fn scan_input_dir(dir: &Path) -> Result<InputScan> {
    let mut entry_count = 0;
    let mut jpegs = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| CompressionError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;
        entry_count += 1;

        if !is_hidden(&entry) && entry.path().is_file() && is_jpeg_file(entry.path()) {
            jpegs.push(entry.into_path());
        }
    }

    jpegs.sort();
    Ok(InputScan { entry_count, jpegs })
}

pub fn create_progress_spinner(message: &str) -> ProgressBar {
    if logger::is_quiet() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template(PROGRESS_SPINNER_TEMPLATE) {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
    pb
}

/// Compresses every eligible JPEG in `options.input_dir` with the JPEG codec.
///
/// `started` is the instant the elapsed time in the report is measured from.
/// `spinner` tracks the whole run, scanning included, and is cleared before
/// this returns.
pub fn run_batch(
    options: &BatchOptions,
    started: Instant,
    spinner: &ProgressBar,
) -> Result<BatchRun> {
    run_batch_with(options, started, spinner, |source| {
        JpegCodec::from_bytes(source, MAX_DIMENSION)
    })
}

/// Same as [`run_batch`], with the encoder built by `make_encoder` from
/// each file's raw bytes.
pub fn run_batch_with<E, F>(
    options: &BatchOptions,
    started: Instant,
    spinner: &ProgressBar,
    make_encoder: F,
) -> Result<BatchRun>
where
    E: QualityEncoder,
    F: Fn(&[u8]) -> Result<E> + Sync,
{
    spinner.set_message(format!("Scanning {}...", options.input_dir.display()));
    let run = process_input_dir(options, started, spinner, make_encoder);
    spinner.finish_and_clear();
    run
}

fn process_input_dir<E, F>(
    options: &BatchOptions,
    started: Instant,
    spinner: &ProgressBar,
    make_encoder: F,
) -> Result<BatchRun>
where
    E: QualityEncoder,
    F: Fn(&[u8]) -> Result<E> + Sync,
{
    let scan = scan_input_dir(&options.input_dir)?;
    if scan.entry_count == 0 {
        return Ok(BatchRun::EmptyDirectory);
    }
    if scan.jpegs.is_empty() {
        return Ok(BatchRun::NoJpegs);
    }

    spinner.set_message(format!("Preparing {}...", options.output_dir.display()));
    fs::create_dir_all(&options.output_dir)
        .map_err(|_| CompressionError::DirectoryCreationFailed(options.output_dir.clone()))?;

    let threads = options.threads.unwrap_or_else(num_cpus::get);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| CompressionError::ThreadPool(e.to_string()))?;

    let total = scan.jpegs.len();
    spinner.suspend(|| info!("Processing {} files...", total));
    spinner.set_message(format!("0/{} images", total));

    let counters = BatchCounters::new(total);
    let completed_after: OnceLock<Duration> = OnceLock::new();

    let outcomes: Vec<FileOutcome> = pool.install(|| {
        scan.jpegs
            .par_iter()
            .map(|path| {
                let outcome = process_file(path, options, &make_encoder, spinner);
                report_outcome(&outcome, spinner);

                if counters.record() {
                    let _ = completed_after.set(started.elapsed());
                }
                spinner.set_message(format!("{}/{} images", counters.processed(), total));
                outcome
            })
            .collect()
    });

    debug_assert!(counters.is_complete());
    let elapsed = completed_after
        .get()
        .copied()
        .unwrap_or_else(|| started.elapsed());

    Ok(BatchRun::Completed(BatchReport { outcomes, elapsed }))
}

fn process_file<E, F>(
    path: &Path,
    options: &BatchOptions,
    make_encoder: &F,
    spinner: &ProgressBar,
) -> FileOutcome
where
    E: QualityEncoder,
    F: Fn(&[u8]) -> Result<E>,
{
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    match compress_file(path, &file, options, make_encoder, spinner) {
        Ok(outcome) => outcome,
        Err(e) => FileOutcome::Failed {
            file,
            reason: e.to_string(),
        },
    }
}

fn compress_file<E, F>(
    path: &Path,
    file: &str,
    options: &BatchOptions,
    make_encoder: &F,
    spinner: &ProgressBar,
) -> Result<FileOutcome>
where
    E: QualityEncoder,
    F: Fn(&[u8]) -> Result<E>,
{
    let original_size = fs::metadata(path)?.len();
    let destination = options.output_dir.join(file);

    if original_size <= options.target.bytes() {
        if options.copy_skipped {
            fs::copy(path, &destination)?;
        }
        return Ok(FileOutcome::Skipped {
            file: file.to_string(),
            original_size,
            copied: options.copy_skipped,
        });
    }

    let source = fs::read(path)?;
    let encoder = make_encoder(&source)?;

    let outcome = search(&encoder, options.target.bytes(), |attempt: &Attempt| {
        if !attempt.is_accepted() && attempt.quality > MIN_QUALITY && logger::is_verbose() {
            spinner.suspend(|| {
                verbose!(
                    "{} still too big, with a size of {}, decreasing quality to: {}",
                    file,
                    format_human(attempt.size),
                    attempt.quality - 1
                )
            });
        }
    })?;

    match outcome {
        SearchOutcome::Accepted { quality, data } => {
            fs::write(&destination, &data)?;
            Ok(FileOutcome::Compressed {
                file: file.to_string(),
                quality,
                original_size,
                final_size: data.len() as u64,
            })
        }
        SearchOutcome::Unreachable { smallest_size } => Ok(FileOutcome::Unreachable {
            file: file.to_string(),
            original_size,
            smallest_size,
        }),
    }
}

fn report_outcome(outcome: &FileOutcome, spinner: &ProgressBar) {
    spinner.suspend(|| match outcome {
        FileOutcome::Compressed {
            file,
            quality,
            original_size,
            final_size,
        } => {
            success!("Done! {}", file);
            info!("  Quality: {}", quality);
            info!(
                "  {} => {}",
                format_human(*original_size),
                format_human(*final_size)
            );
        }
        FileOutcome::Skipped { file, copied, .. } => {
            if *copied {
                warn!("{} is equal or smaller than requested size, copied unchanged", file);
            } else {
                warn!("{} is equal or smaller than requested size, skipping file...", file);
            }
        }
        FileOutcome::Unreachable {
            file,
            smallest_size,
            ..
        } => {
            warn!(
                "{} could not reach the requested size, smallest result was {} at quality {}",
                file,
                format_human(*smallest_size),
                MIN_QUALITY
            );
        }
        FileOutcome::Failed { file, reason } => {
            error!("Unable to process file {}: {}", file, reason);
        }
    });
}
