//! Logging infrastructure for the ibzip library

use log::Level;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the ibzip logging system
///
/// This function should be called once at the start of your application.
/// It sets up the logger with appropriate formatting and filtering.
pub fn init() {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::from_default_env();

        builder
            .format(|buf, record| {
                use std::io::Write;

                let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
                let level = record.level();
                let target = record.target();

                // Color the level based on severity
                let level_str = match level {
                    Level::Error => "\x1b[31mERROR\x1b[0m", // Red
                    Level::Warn => "\x1b[33mWARN\x1b[0m",   // Yellow
                    Level::Info => "\x1b[32mINFO\x1b[0m",   // Green
                    Level::Debug => "\x1b[36mDEBUG\x1b[0m", // Cyan
                    Level::Trace => "\x1b[37mTRACE\x1b[0m", // White
                };

                writeln!(
                    buf,
                    "{} [{}] {}: {}",
                    timestamp,
                    level_str,
                    target,
                    record.args()
                )
            })
            .filter_level(log::LevelFilter::Info) // Default to Info level
            .init();

        log::info!("ibzip logging initialized");
    });
}

/// Initialize logging with a specific level
pub fn init_with_level(level: log::LevelFilter) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder
            .format(|buf, record| {
                use std::io::Write;

                let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
                let level = record.level();
                let target = record.target();

                writeln!(
                    buf,
                    "{} [{}] {}: {}",
                    timestamp,
                    level,
                    target,
                    record.args()
                )
            })
            .filter_level(level)
            .init();

        log::info!("ibzip logging initialized with level: {level:?}");
    });
}

/// Log an error message with ibzip context
#[macro_export]
macro_rules! ibzip_error {
    ($($arg:tt)*) => {
        log::error!(target: "ibzip", $($arg)*)
    };
}

/// Log a warning message with ibzip context
#[macro_export]
macro_rules! ibzip_warn {
    ($($arg:tt)*) => {
        log::warn!(target: "ibzip", $($arg)*)
    };
}

/// Log an info message with ibzip context
#[macro_export]
macro_rules! ibzip_info {
    ($($arg:tt)*) => {
        log::info!(target: "ibzip", $($arg)*)
    };
}

/// Log a debug message with ibzip context
#[macro_export]
macro_rules! ibzip_debug {
    ($($arg:tt)*) => {
        log::debug!(target: "ibzip", $($arg)*)
    };
}

/// Performance timing helper
pub struct Timer {
    start: std::time::Instant,
    operation: String,
}

impl Timer {
    /// Start timing an operation
    pub fn start<S: Into<String>>(operation: S) -> Self {
        let operation = operation.into();
        ibzip_debug!("Starting operation: {}", operation);
        Self {
            start: std::time::Instant::now(),
            operation,
        }
    }

    /// Get elapsed time without stopping the timer
    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }

    /// Stop the timer and log the elapsed time
    pub fn stop(self) -> std::time::Duration {
        let elapsed = self.start.elapsed();
        ibzip_debug!("Operation '{}' completed in {:?}", self.operation, elapsed);
        elapsed
    }
}
