//! Configurator contract
//!
//! Configurators populate a repository's tree from some external description.
//! The core never invokes them itself; startup glue does. Failures are error
//! values handed back to that glue, never fatal to the process.

use super::error::Result;
use super::repository::LoggerRepository;

pub trait Configurator: Send + Sync {
    /// Populate `repository` from the configuration at `uri`.
    fn configure(&self, uri: &str, repository: &LoggerRepository) -> Result<()>;
}

/// Minimal bootstrap configuration: a console appender with the simple
/// layout, attached to the root. Ignores the URI.
#[cfg(feature = "console")]
pub struct BasicConfigurator;

#[cfg(feature = "console")]
impl Configurator for BasicConfigurator {
    fn configure(&self, _uri: &str, repository: &LoggerRepository) -> Result<()> {
        use super::appender::Appender;
        use crate::appenders::ConsoleSink;
        use crate::layouts::SimpleLayout;

        let appender = Appender::builder("console", Box::new(ConsoleSink::new()))
            .layout(SimpleLayout::new())
            .build()?;
        repository.root().add_appender(appender);
        Ok(())
    }
}
