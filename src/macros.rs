//! Logging macros for ergonomic log message formatting.
//!
//! The macros check enablement before formatting, so a disabled call never
//! pays for `format!`, and they attach the call site's location to the event.
//!
//! # Examples
//!
//! ```
//! use cascade_log::core::repository::LoggerRepository;
//! use cascade_log::info;
//!
//! let repository = LoggerRepository::new();
//! let logger = repository.logger("app.server");
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message with automatic formatting and call-site location.
///
/// # Examples
///
/// ```
/// # use cascade_log::core::repository::LoggerRepository;
/// # use cascade_log::core::level::Level;
/// # let repository = LoggerRepository::new();
/// # let logger = repository.logger("app");
/// use cascade_log::log;
/// log!(logger, Level::Info, "Simple message");
/// log!(logger, Level::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        if $logger.is_enabled_for($level) {
            $logger.log_with_location(
                $level,
                format!($($arg)+),
                $crate::core::event::LocationInfo::new(module_path!(), file!(), line!()),
            );
        }
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::level::Level::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::level::Level::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::level::Level::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::level::Level::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::level::Level::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::level::Level::Fatal, $($arg)+)
    };
}
