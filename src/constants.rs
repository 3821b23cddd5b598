pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

/// Smallest accepted `--size`, in KB.
pub const MIN_TARGET_KB: u64 = 1;
/// Largest accepted `--size`, in KB.
pub const MAX_TARGET_KB: u64 = 2048;

/// An encoding is accepted once `floor(100 * target / size)` reaches this.
pub const ACCEPTANCE_THRESHOLD: u64 = 95;

/// Long-edge cap applied before every encode.
pub const MAX_DIMENSION: u32 = 1500;

pub const BYTES_PER_KB: u64 = 1024;

/// Only files with exactly this extension are picked up.
pub const JPEG_EXTENSION: &str = "jpg";

pub const DEFAULT_INPUT_DIR: &str = "input";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
pub const SPINNER_TICK_MS: u64 = 100;

// Common output message prefixes
pub const INFO_PREFIX: &str = "📋";
pub const VERBOSE_PREFIX: &str = "🔍";
pub const SUCCESS_PREFIX: &str = "✅";
pub const WARNING_PREFIX: &str = "⚠️ ";
pub const ERROR_PREFIX: &str = "❌";
