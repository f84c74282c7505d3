//! Core dispatch engine: levels, events, the logger tree, and delivery

pub mod appender;
pub mod configurator;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod event;
pub mod filter;
pub mod layout;
pub mod level;
pub mod logger;
pub mod registry;
pub mod repository;
pub mod selector;

pub use appender::{Appender, AppenderBuilder, Sink};
#[cfg(feature = "console")]
pub use configurator::BasicConfigurator;
pub use configurator::Configurator;
pub use context::{Mdc, MdcGuard, Ndc, NdcGuard};
pub use diagnostics::Diagnostics;
pub use error::{LoggerError, Result};
pub use event::{LocationInfo, LoggingEvent};
pub use filter::{evaluate_chain, Filter, FilterDecision};
pub use layout::Layout;
pub use level::Level;
pub use logger::Logger;
pub use registry::{BuiltinModules, ComponentRegistry, ModuleLoader};
pub use repository::{DefaultLoggerFactory, LoggerFactory, LoggerRepository, RepositoryShared};
pub use selector::RepositorySelector;
