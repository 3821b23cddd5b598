use crate::constants::{ERROR_PREFIX, INFO_PREFIX, SUCCESS_PREFIX, VERBOSE_PREFIX, WARNING_PREFIX};
use owo_colors::OwoColorize;
use std::sync::atomic::{AtomicBool, Ordering};

static QUIET_MODE: AtomicBool = AtomicBool::new(false);
static VERBOSE_MODE: AtomicBool = AtomicBool::new(false);

pub fn set_quiet_mode(quiet: bool) {
    QUIET_MODE.store(quiet, Ordering::Relaxed);
}

pub fn set_verbose_mode(verbose: bool) {
    VERBOSE_MODE.store(verbose, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET_MODE.load(Ordering::Relaxed)
}

pub fn is_verbose() -> bool {
    VERBOSE_MODE.load(Ordering::Relaxed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Verbose,
    Success,
    Warn,
    Error,
}

/// Renders a status line with the prefix and colour of its severity.
pub fn paint(level: Level, message: &str) -> String {
    match level {
        Level::Info => format!("{} {}", INFO_PREFIX, message.cyan()),
        Level::Verbose => format!("{} {}", VERBOSE_PREFIX, message.dimmed()),
        Level::Success => format!("{} {}", SUCCESS_PREFIX, message.green()),
        Level::Warn => format!("{} {}", WARNING_PREFIX, message.yellow()),
        Level::Error => format!("{} {}", ERROR_PREFIX, message.red()),
    }
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        if !$crate::logger::is_quiet() {
            println!("{}", $crate::logger::paint($crate::logger::Level::Info, &format!($($arg)*)));
        }
    };
}

#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::logger::is_verbose() && !$crate::logger::is_quiet() {
            println!("{}", $crate::logger::paint($crate::logger::Level::Verbose, &format!($($arg)*)));
        }
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        if !$crate::logger::is_quiet() {
            println!("{}", $crate::logger::paint($crate::logger::Level::Success, &format!($($arg)*)));
        }
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        eprintln!("{}", $crate::logger::paint($crate::logger::Level::Error, &format!($($arg)*)));
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        if !$crate::logger::is_quiet() {
            eprintln!("{}", $crate::logger::paint($crate::logger::Level::Warn, &format!($($arg)*)));
        }
    };
}
