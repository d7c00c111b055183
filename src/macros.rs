//! Logging macros with call-site capture.
//!
//! Each macro checks the level first, then formats the message and records
//! `module_path!()`, `file!()` and `line!()` as the entry's source location.
//! Attributes go in an optional bracketed list before the format string.
//!
//! # Examples
//!
//! ```
//! use lambda_log_handler::prelude::*;
//! use lambda_log_handler::info;
//!
//! let logger = Logger::new(LambdaHandler::new(MemoryAppender::new()));
//!
//! info!(logger, "Cold start");
//!
//! let items = 3;
//! info!(logger, "Processing {} items", items);
//!
//! info!(logger, [Attr::string("queue", "orders"), Attr::int("batch", 10)], "Batch received");
//! ```

/// Log a message at an arbitrary level.
///
/// # Examples
///
/// ```
/// # use lambda_log_handler::prelude::*;
/// # let logger = Logger::new(LambdaHandler::new(MemoryAppender::new()));
/// use lambda_log_handler::log;
/// log!(logger, LogLevel::INFO, "Simple message");
/// log!(logger, LogLevel::WARN.offset(2), "Error code: {}", 500);
/// log!(logger, LogLevel::ERROR, [Attr::int("status", 502)], "Upstream failed");
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, [$($attr:expr),* $(,)?], $($arg:tt)+) => {{
        let logger = &$logger;
        let level: $crate::LogLevel = $level;
        if logger.enabled(level) {
            logger.log_entry(
                None,
                $crate::LogEntry::new(level, format!($($arg)+))
                    .with_location(module_path!(), file!(), line!())
                    .with_attrs(vec![$($attr),*]),
            );
        }
    }};
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $crate::log!($logger, $level, [], $($arg)+)
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::TRACE, $($arg)+)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use lambda_log_handler::prelude::*;
/// # let logger = Logger::new(LambdaHandler::new(MemoryAppender::new()));
/// use lambda_log_handler::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::DEBUG, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::INFO, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::WARN, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use lambda_log_handler::prelude::*;
/// # let logger = Logger::new(LambdaHandler::new(MemoryAppender::new()));
/// use lambda_log_handler::error;
/// error!(logger, [Attr::string("table", "orders")], "Write failed: {}", "throttled");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::ERROR, $($arg)+)
    };
}

/// Log a fatal-level message. Does not abort the process.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::FATAL, $($arg)+)
    };
}
