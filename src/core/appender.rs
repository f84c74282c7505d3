//! Appenders: named output destinations
//!
//! An [`Appender`] wraps a concrete [`Sink`] together with the dispatch-side
//! state every destination carries: an optional [`Layout`], an optional
//! threshold level, an ordered filter chain, and a closed flag. Appenders are
//! shared across logger nodes as `Arc<Appender>`; identity (pointer equality)
//! is what the cascade deduplicates on.

use super::error::{LoggerError, Result};
use super::event::LoggingEvent;
use super::filter::{evaluate_chain, Filter, FilterDecision};
use super::layout::Layout;
use super::level::Level;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Sink-specific half of an appender: the part that owns the handle and
/// performs the actual write.
///
/// `write` receives the already-formatted record (without trailing newline)
/// plus the event itself for sinks that key behavior off event data, such as
/// stderr routing by level. Calls arrive serialized under the appender's sink
/// lock, so two events never interleave their bytes.
pub trait Sink: Send {
    fn name(&self) -> &str;

    /// Whether this sink is unusable without a layout.
    fn requires_layout(&self) -> bool {
        true
    }

    /// Called once after configuration, before the first write.
    fn activate_options(&mut self) -> Result<()> {
        Ok(())
    }

    fn write(&mut self, rendered: &str, event: &LoggingEvent) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Release sink resources. Called at most once.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

pub struct Appender {
    name: String,
    layout: RwLock<Option<Arc<dyn Layout>>>,
    threshold: RwLock<Option<Level>>,
    filters: RwLock<Vec<Arc<dyn Filter>>>,
    closed: AtomicBool,
    missing_layout_reported: AtomicBool,
    sink: Mutex<Box<dyn Sink>>,
}

impl Appender {
    /// Create an appender with no layout, threshold, or filters.
    ///
    /// Runs the sink's `activate_options`.
    pub fn new(name: impl Into<String>, sink: Box<dyn Sink>) -> Result<Arc<Self>> {
        AppenderBuilder::new(name, sink).build()
    }

    pub fn builder(name: impl Into<String>, sink: Box<dyn Sink>) -> AppenderBuilder {
        AppenderBuilder::new(name, sink)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub fn layout(&self) -> Option<Arc<dyn Layout>> {
        self.layout.read().clone()
    }

    pub fn set_layout(&self, layout: Option<Arc<dyn Layout>>) {
        *self.layout.write() = layout;
    }

    pub fn threshold(&self) -> Option<Level> {
        *self.threshold.read()
    }

    pub fn set_threshold(&self, threshold: Option<Level>) {
        *self.threshold.write() = threshold;
    }

    pub fn add_filter(&self, filter: Arc<dyn Filter>) {
        self.filters.write().push(filter);
    }

    pub fn clear_filters(&self) {
        self.filters.write().clear();
    }

    /// Deliver one event through the threshold gate, the filter chain, and
    /// the layout to the sink.
    ///
    /// Drops (closed appender, threshold, filter deny) are `Ok`; only real
    /// failures are errors, and the dispatch loop routes those to the
    /// diagnostic channel rather than back to the caller of the log
    /// statement. A missing required layout is reported as an error exactly
    /// once per appender; later events are dropped silently.
    pub fn deliver(&self, event: &LoggingEvent) -> Result<()> {
        if self.is_closed() {
            return Ok(());
        }
        if let Some(threshold) = *self.threshold.read() {
            if event.level < threshold {
                return Ok(());
            }
        }
        match evaluate_chain(&self.filters.read(), event) {
            FilterDecision::Deny => return Ok(()),
            FilterDecision::Accept | FilterDecision::Neutral => {}
        }

        let layout = self.layout.read().clone();
        let mut sink = self.sink.lock();
        if sink.requires_layout() && layout.is_none() {
            if !self.missing_layout_reported.swap(true, Ordering::AcqRel) {
                return Err(LoggerError::missing_layout(&self.name));
            }
            return Ok(());
        }
        match layout {
            Some(layout) => {
                let record = layout.format(event);
                sink.write(&record, event)
            }
            None => sink.write(&event.rendered_message, event),
        }
    }

    pub fn flush(&self) -> Result<()> {
        self.sink.lock().flush()
    }

    /// Close the appender. Idempotent: the first call releases the sink's
    /// resources, later calls are no-ops. A closed appender drops all
    /// further events.
    pub fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        self.sink.lock().close()
    }
}

impl std::fmt::Debug for Appender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Appender")
            .field("name", &self.name)
            .field("threshold", &*self.threshold.read())
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Appender`] with a fluent API.
///
/// # Example
///
/// ```
/// use cascade_log::appenders::MemorySink;
/// use cascade_log::core::appender::Appender;
/// use cascade_log::core::level::Level;
/// use cascade_log::layouts::SimpleLayout;
///
/// let appender = Appender::builder("audit", Box::new(MemorySink::new()))
///     .layout(SimpleLayout::new())
///     .threshold(Level::Info)
///     .build()
///     .unwrap();
/// assert_eq!(appender.name(), "audit");
/// ```
pub struct AppenderBuilder {
    name: String,
    sink: Box<dyn Sink>,
    layout: Option<Arc<dyn Layout>>,
    threshold: Option<Level>,
    filters: Vec<Arc<dyn Filter>>,
}

impl AppenderBuilder {
    pub fn new(name: impl Into<String>, sink: Box<dyn Sink>) -> Self {
        Self {
            name: name.into(),
            sink,
            layout: None,
            threshold: None,
            filters: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn layout<L: Layout + 'static>(mut self, layout: L) -> Self {
        self.layout = Some(Arc::new(layout));
        self
    }

    /// Set a layout produced elsewhere, e.g. by the component registry.
    #[must_use = "builder methods return a new value"]
    pub fn layout_boxed(mut self, layout: Box<dyn Layout>) -> Self {
        self.layout = Some(Arc::from(layout));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn threshold(mut self, threshold: Level) -> Self {
        self.threshold = Some(threshold);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn filter<F: Filter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn filter_boxed(mut self, filter: Box<dyn Filter>) -> Self {
        self.filters.push(Arc::from(filter));
        self
    }

    /// Activate the sink and build the appender.
    pub fn build(mut self) -> Result<Arc<Appender>> {
        self.sink.activate_options()?;
        Ok(Arc::new(Appender {
            name: self.name,
            layout: RwLock::new(self.layout),
            threshold: RwLock::new(self.threshold),
            filters: RwLock::new(self.filters),
            closed: AtomicBool::new(false),
            missing_layout_reported: AtomicBool::new(false),
            sink: Mutex::new(self.sink),
        }))
    }
}
