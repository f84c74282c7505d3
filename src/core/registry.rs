//! Component registry and module loading
//!
//! Concrete layouts, filters, and sinks are registered by name so that
//! configuration glue can refer to them as strings. The registry is an
//! explicit struct owned by whoever wires the process together, never
//! ambient global state; registration may happen at any time before the
//! first dispatch that needs the component.
//!
//! Each factory takes one free-form options string whose meaning belongs to
//! the component: the pattern for the pattern layout, the path for the file
//! sink, the level name for the level-match filter.

use super::appender::Sink;
use super::error::{LoggerError, Result};
use super::filter::Filter;
use super::layout::Layout;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

type LayoutFactory = Arc<dyn Fn(&str) -> Result<Box<dyn Layout>> + Send + Sync>;
type FilterFactory = Arc<dyn Fn(&str) -> Result<Box<dyn Filter>> + Send + Sync>;
type SinkFactory = Arc<dyn Fn(&str) -> Result<Box<dyn Sink>> + Send + Sync>;

#[derive(Default)]
pub struct ComponentRegistry {
    layouts: RwLock<HashMap<String, LayoutFactory>>,
    filters: RwLock<HashMap<String, FilterFactory>>,
    sinks: RwLock<HashMap<String, SinkFactory>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the built-in components.
    pub fn with_builtins() -> Result<Self> {
        let registry = Self::new();
        BuiltinModules.load_modules(&registry)?;
        Ok(registry)
    }

    pub fn register_layout<F>(&self, name: impl Into<String>, factory: F)
    where
        F: Fn(&str) -> Result<Box<dyn Layout>> + Send + Sync + 'static,
    {
        self.layouts.write().insert(name.into(), Arc::new(factory));
    }

    pub fn register_filter<F>(&self, name: impl Into<String>, factory: F)
    where
        F: Fn(&str) -> Result<Box<dyn Filter>> + Send + Sync + 'static,
    {
        self.filters.write().insert(name.into(), Arc::new(factory));
    }

    pub fn register_sink<F>(&self, name: impl Into<String>, factory: F)
    where
        F: Fn(&str) -> Result<Box<dyn Sink>> + Send + Sync + 'static,
    {
        self.sinks.write().insert(name.into(), Arc::new(factory));
    }

    pub fn new_layout(&self, name: &str, options: &str) -> Result<Box<dyn Layout>> {
        let factory = self
            .layouts
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| LoggerError::unknown_component("layout", name))?;
        factory(options)
    }

    pub fn new_filter(&self, name: &str, options: &str) -> Result<Box<dyn Filter>> {
        let factory = self
            .filters
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| LoggerError::unknown_component("filter", name))?;
        factory(options)
    }

    pub fn new_sink(&self, name: &str, options: &str) -> Result<Box<dyn Sink>> {
        let factory = self
            .sinks
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| LoggerError::unknown_component("sink", name))?;
        factory(options)
    }

    pub fn layout_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.layouts.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn filter_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.filters.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn sink_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.sinks.read().keys().cloned().collect();
        names.sort();
        names
    }
}

/// Capability for populating a registry, invoked once per application context
/// before first use.
pub trait ModuleLoader: Send + Sync {
    fn load_modules(&self, registry: &ComponentRegistry) -> Result<()>;
}

/// Registers the crate's built-in layouts, filters, and sinks.
pub struct BuiltinModules;

impl ModuleLoader for BuiltinModules {
    fn load_modules(&self, registry: &ComponentRegistry) -> Result<()> {
        use crate::filters::{MatchAction, LevelMatchFilter, StringMatchFilter};
        use crate::layouts::{JsonLayout, PatternLayout, SimpleLayout};

        registry.register_layout("simple", |_options| {
            Ok(Box::new(SimpleLayout::new()) as Box<dyn Layout>)
        });
        registry.register_layout("pattern", |options| {
            let layout = if options.is_empty() {
                PatternLayout::new()
            } else {
                PatternLayout::with_pattern(options)?
            };
            Ok(Box::new(layout) as Box<dyn Layout>)
        });
        registry.register_layout("json", |_options| {
            Ok(Box::new(JsonLayout::new()) as Box<dyn Layout>)
        });

        registry.register_filter("level_match", |options| {
            let level = options.parse()?;
            Ok(Box::new(LevelMatchFilter::new(level, MatchAction::Accept)) as Box<dyn Filter>)
        });
        registry.register_filter("string_match", |options| {
            if options.is_empty() {
                return Err(LoggerError::config(
                    "StringMatchFilter",
                    "options must name the substring to match",
                ));
            }
            Ok(Box::new(StringMatchFilter::new(options, MatchAction::Accept)) as Box<dyn Filter>)
        });

        #[cfg(feature = "console")]
        registry.register_sink("console", |_options| {
            Ok(Box::new(crate::appenders::ConsoleSink::new()) as Box<dyn Sink>)
        });
        #[cfg(feature = "file")]
        registry.register_sink("file", |options| {
            if options.is_empty() {
                return Err(LoggerError::config(
                    "FileSink",
                    "options must name the log file path",
                ));
            }
            Ok(Box::new(crate::appenders::FileSink::new(options)) as Box<dyn Sink>)
        });

        Ok(())
    }
}
