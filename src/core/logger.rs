//! Logger nodes: the named entries of the hierarchy
//!
//! A [`Logger`] is one node of a repository's tree. It carries an explicit or
//! inherited level, an additivity flag, its attached appenders, and a link to
//! its parent. Nodes are created by their owning
//! [`LoggerRepository`](super::repository::LoggerRepository) and live as long
//! as it does.

use super::appender::Appender;
use super::event::{LocationInfo, LoggingEvent};
use super::level::Level;
use super::repository::RepositoryShared;
use parking_lot::RwLock;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Sentinel for "no cached effective level".
const CACHE_EMPTY: u64 = u64::MAX;

pub struct Logger {
    name: String,
    parent: Option<Arc<Logger>>,
    level: RwLock<Option<Level>>,
    additive: AtomicBool,
    appenders: RwLock<Vec<Arc<Appender>>>,
    /// Cached effective level, packed as `generation << 8 | ordinal`.
    /// Any level change anywhere in the tree bumps the repository generation
    /// and thereby invalidates every node's cache.
    effective_cache: AtomicU64,
    shared: Arc<RepositoryShared>,
}

impl Logger {
    /// Construct a node. Intended for [`LoggerRepository`](super::repository::LoggerRepository)
    /// and [`LoggerFactory`](super::repository::LoggerFactory) implementations;
    /// applications obtain nodes through the repository.
    pub fn new(
        name: impl Into<String>,
        parent: Option<Arc<Logger>>,
        shared: Arc<RepositoryShared>,
    ) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            parent,
            level: RwLock::new(None),
            additive: AtomicBool::new(true),
            appenders: RwLock::new(Vec::new()),
            effective_cache: AtomicU64::new(CACHE_EMPTY),
            shared,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<Arc<Logger>> {
        self.parent.clone()
    }

    /// The node's own level, if one was set explicitly.
    pub fn level(&self) -> Option<Level> {
        *self.level.read()
    }

    /// Set or clear the node's explicit level.
    ///
    /// Clearing the root's level is refused (the root always carries one);
    /// the attempt is reported on the diagnostic channel instead.
    pub fn set_level(&self, level: Option<Level>) {
        if self.parent.is_none() && level.is_none() {
            self.shared
                .diagnostics()
                .warn("ignoring attempt to clear the root logger's level");
            return;
        }
        *self.level.write() = level;
        self.shared.bump_generation();
    }

    pub fn is_additive(&self) -> bool {
        self.additive.load(Ordering::Relaxed)
    }

    /// Control whether events continue cascading to ancestor appenders.
    pub fn set_additive(&self, additive: bool) {
        self.additive.store(additive, Ordering::Relaxed);
    }

    /// Resolve the effective level: the node's own level if set, else the
    /// nearest ancestor's. The root always terminates the walk.
    ///
    /// Allocation-free and O(depth); the result is cached per node against
    /// the repository's generation counter.
    pub fn effective_level(&self) -> Level {
        let generation = self.shared.generation();
        let packed = self.effective_cache.load(Ordering::Acquire);
        if packed != CACHE_EMPTY && packed >> 8 == generation {
            if let Some(level) = Level::from_ordinal((packed & 0xff) as u8) {
                return level;
            }
        }
        let resolved = self.resolve_effective_level();
        self.effective_cache
            .store((generation << 8) | u64::from(resolved.ordinal()), Ordering::Release);
        resolved
    }

    fn resolve_effective_level(&self) -> Level {
        let mut current: &Logger = self;
        loop {
            if let Some(level) = *current.level.read() {
                return level;
            }
            match current.parent.as_ref() {
                Some(parent) => current = parent,
                // The root always has a level; this arm is unreachable for a
                // tree built by a repository.
                None => return Level::default(),
            }
        }
    }

    /// Whether a call at `level` would be dispatched: the repository is live,
    /// `level` clears the repository guard, and `level` clears the node's
    /// effective level.
    pub fn is_enabled_for(&self, level: Level) -> bool {
        if self.shared.is_shut_down() {
            return false;
        }
        if level < self.shared.guard_level() {
            return false;
        }
        level >= self.effective_level()
    }

    /// Attach an appender. Attaching the same appender twice (by identity)
    /// is a no-op.
    pub fn add_appender(&self, appender: Arc<Appender>) {
        let mut appenders = self.appenders.write();
        if !appenders.iter().any(|a| Arc::ptr_eq(a, &appender)) {
            appenders.push(appender);
        }
    }

    /// Detach the named appender, returning it if it was attached.
    pub fn remove_appender(&self, name: &str) -> Option<Arc<Appender>> {
        let mut appenders = self.appenders.write();
        let index = appenders.iter().position(|a| a.name() == name)?;
        Some(appenders.remove(index))
    }

    /// Detach every appender, returning them in attachment order.
    pub fn clear_appenders(&self) -> Vec<Arc<Appender>> {
        std::mem::take(&mut *self.appenders.write())
    }

    /// Snapshot of the attached appenders in attachment order.
    pub fn appenders(&self) -> Vec<Arc<Appender>> {
        self.appenders.read().clone()
    }

    /// Log a message, building the event only if the call is enabled.
    pub fn log(&self, level: Level, message: impl Into<String>) {
        if !self.is_enabled_for(level) {
            return;
        }
        let event = LoggingEvent::new(self.name.clone(), level, message.into());
        self.call_appenders(&event);
    }

    /// Like [`log`](Self::log), with source location attached to the event.
    pub fn log_with_location(
        &self,
        level: Level,
        message: impl Into<String>,
        location: LocationInfo,
    ) {
        if !self.is_enabled_for(level) {
            return;
        }
        let event =
            LoggingEvent::new(self.name.clone(), level, message.into()).with_location(location);
        self.call_appenders(&event);
    }

    /// Dispatch an already-enabled event through the additivity cascade.
    ///
    /// Walks from this node toward the root, collecting appenders in
    /// attachment order and deduplicating by identity, first-seen order
    /// preserved. The walk stops after the first non-additive node (its own
    /// appenders are still collected) or after the root. Each appender is
    /// then delivered to in collected order; a failing or panicking appender
    /// is reported on the diagnostic channel and the rest still receive the
    /// event.
    pub fn call_appenders(&self, event: &LoggingEvent) {
        let mut collected: Vec<Arc<Appender>> = Vec::new();
        let mut current: &Logger = self;
        loop {
            {
                let appenders = current.appenders.read();
                for appender in appenders.iter() {
                    if !collected.iter().any(|seen| Arc::ptr_eq(seen, appender)) {
                        collected.push(Arc::clone(appender));
                    }
                }
            }
            if !current.additive.load(Ordering::Relaxed) {
                break;
            }
            match current.parent.as_ref() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        let diagnostics = self.shared.diagnostics();
        if collected.is_empty() {
            if self.shared.mark_no_appender_warned() {
                diagnostics.warn(&format!(
                    "no appenders could be found for logger '{}'; events are being discarded",
                    self.name
                ));
            }
            return;
        }

        for appender in collected {
            let outcome = catch_unwind(AssertUnwindSafe(|| appender.deliver(event)));
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    diagnostics.error(&format!("appender '{}' failed: {}", appender.name(), e));
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        (*s).to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "unknown panic".to_string()
                    };
                    diagnostics.error(&format!(
                        "appender '{}' panicked: {}; other appenders continue to function",
                        appender.name(),
                        panic_msg
                    ));
                }
            }
        }
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(Level::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(Level::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(Level::Fatal, message);
    }

    /// Reset for a configuration wipe: clear appenders and additivity, and
    /// set the level without a per-node generation bump (the repository bumps
    /// once for the whole sweep). Returns the detached appenders.
    pub(crate) fn reset_for_configuration(&self, level: Option<Level>) -> Vec<Arc<Appender>> {
        *self.level.write() = level;
        self.additive.store(true, Ordering::Relaxed);
        self.clear_appenders()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &*self.level.read())
            .field("additive", &self.is_additive())
            .field("appenders", &self.appenders.read().len())
            .finish()
    }
}
