/// Byte-size helpers shared by the search loop and the batch report.
use crate::constants::BYTES_PER_KB;

const UNITS: &[&str] = &["Bytes", "KB", "MB", "GB", "TB", "PB", "EB"];

/// Converts kilobytes to bytes.
pub fn to_bytes(kb: u64) -> u64 {
    kb.saturating_mul(BYTES_PER_KB)
}

/// Format a byte count in the largest unit that keeps the magnitude below 1024.
///
/// # Example
/// ```
/// use img_budget::units::format_human;
///
/// assert_eq!(format_human(0), "0 Bytes");
/// assert_eq!(format_human(1536), "1.50 KB");
/// ```
pub fn format_human(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let threshold = BYTES_PER_KB as f64;
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= threshold && unit_index < UNITS.len() - 1 {
        size /= threshold;
        unit_index += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_index])
}

/// `floor(100 * part / whole)`, computed in integers. A zero `whole` yields 0.
pub fn percentage(part: u64, whole: u64) -> u64 {
    if whole == 0 {
        return 0;
    }
    ((100u128 * part as u128) / whole as u128) as u64
}
