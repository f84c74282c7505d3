//! # Cascade Log
//!
//! A hierarchical logging framework: applications obtain named loggers from a
//! repository, emit leveled events, and the framework routes each event to
//! zero or more sinks according to a configurable, inheritable policy.
//!
//! ## Features
//!
//! - **Logger hierarchy**: dotted names form a tree; levels are inherited
//!   from the nearest configured ancestor
//! - **Additive cascading**: events accumulate every ancestor's appenders
//!   until a non-additive logger or the root stops the walk
//! - **Per-appender policy**: threshold levels, tri-state filter chains, and
//!   pluggable layouts on every output destination
//! - **Thread safe**: any thread may log, look up loggers, or reconfigure the
//!   tree at any time
//!
//! ## Example
//!
//! ```
//! use cascade_log::appenders::MemorySink;
//! use cascade_log::core::appender::Appender;
//! use cascade_log::core::level::Level;
//! use cascade_log::core::repository::LoggerRepository;
//! use cascade_log::layouts::SimpleLayout;
//!
//! let repository = LoggerRepository::new();
//!
//! let sink = MemorySink::new();
//! let buffer = sink.buffer();
//! let appender = Appender::builder("memory", Box::new(sink))
//!     .layout(SimpleLayout::new())
//!     .build()
//!     .unwrap();
//! repository.logger("app").add_appender(appender);
//!
//! // "app.db" inherits configuration from "app" through the hierarchy.
//! repository.logger("app.db").info("connection pool ready");
//! assert_eq!(buffer.records(), ["INFO - connection pool ready".to_string()]);
//! ```

pub mod appenders;
pub mod core;
pub mod filters;
pub mod layouts;
pub mod macros;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::appenders::ConsoleSink;
    #[cfg(feature = "file")]
    pub use crate::appenders::FileSink;
    pub use crate::appenders::{MemoryBuffer, MemorySink};
    #[cfg(feature = "console")]
    pub use crate::core::BasicConfigurator;
    pub use crate::core::{
        Appender, AppenderBuilder, BuiltinModules, ComponentRegistry, Configurator,
        DefaultLoggerFactory, Diagnostics, Filter, FilterDecision, Layout, Level, LocationInfo,
        Logger, LoggerError, LoggerFactory, LoggerRepository, LoggingEvent, Mdc, ModuleLoader,
        Ndc, RepositorySelector, Result, Sink,
    };
    pub use crate::filters::{LevelMatchFilter, MatchAction, StringMatchFilter};
    pub use crate::layouts::{JsonLayout, PatternLayout, SimpleLayout};
}

#[cfg(feature = "console")]
pub use appenders::ConsoleSink;
#[cfg(feature = "file")]
pub use appenders::FileSink;
pub use appenders::{MemoryBuffer, MemorySink};
#[cfg(feature = "console")]
pub use self::core::BasicConfigurator;
pub use self::core::{
    Appender, AppenderBuilder, BuiltinModules, ComponentRegistry, Configurator,
    DefaultLoggerFactory, Diagnostics, Filter, FilterDecision, Layout, Level, LocationInfo,
    Logger, LoggerError, LoggerFactory, LoggerRepository, LoggingEvent, Mdc, ModuleLoader, Ndc,
    RepositorySelector, Result, Sink,
};
pub use filters::{LevelMatchFilter, MatchAction, StringMatchFilter};
pub use layouts::{JsonLayout, PatternLayout, SimpleLayout};
