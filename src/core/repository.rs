//! Logger repository: owner of one logger tree
//!
//! The repository owns the root node, the name-to-node table (the arena every
//! node lives in for the repository's lifetime), the repository-wide guard
//! level, the generation counter backing the effective-level caches, and the
//! diagnostic channel. All tree growth goes through [`LoggerRepository::logger`].

use super::appender::Appender;
use super::diagnostics::Diagnostics;
use super::level::Level;
use super::logger::Logger;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;

/// State shared between a repository and every node it owns.
///
/// Opaque outside the crate; [`LoggerFactory`] implementations only pass it
/// through to [`Logger::new`].
pub struct RepositoryShared {
    generation: AtomicU64,
    guard: AtomicU8,
    shut_down: AtomicBool,
    no_appender_warned: AtomicBool,
    diagnostics: Diagnostics,
}

impl RepositoryShared {
    fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            guard: AtomicU8::new(Level::All.ordinal()),
            shut_down: AtomicBool::new(false),
            no_appender_warned: AtomicBool::new(false),
            diagnostics: Diagnostics::new(),
        }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub(crate) fn bump_generation(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn guard_level(&self) -> Level {
        Level::from_ordinal(self.guard.load(Ordering::Relaxed)).unwrap_or(Level::All)
    }

    pub(crate) fn set_guard_level(&self, level: Level) {
        self.guard.store(level.ordinal(), Ordering::Relaxed);
    }

    pub(crate) fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::Acquire)
    }

    pub(crate) fn set_shut_down(&self) {
        self.shut_down.store(true, Ordering::Release);
    }

    /// First caller wins; used for the once-per-repository
    /// "no appenders" warning.
    pub(crate) fn mark_no_appender_warned(&self) -> bool {
        !self.no_appender_warned.swap(true, Ordering::AcqRel)
    }

    pub(crate) fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

/// Capability for swapping the node type a repository instantiates.
pub trait LoggerFactory: Send + Sync {
    fn make_new_logger_instance(
        &self,
        name: &str,
        parent: Option<Arc<Logger>>,
        shared: Arc<RepositoryShared>,
    ) -> Arc<Logger>;
}

pub struct DefaultLoggerFactory;

impl LoggerFactory for DefaultLoggerFactory {
    fn make_new_logger_instance(
        &self,
        name: &str,
        parent: Option<Arc<Logger>>,
        shared: Arc<RepositoryShared>,
    ) -> Arc<Logger> {
        Logger::new(name, parent, shared)
    }
}

pub struct LoggerRepository {
    root: Arc<Logger>,
    nodes: RwLock<HashMap<String, Arc<Logger>>>,
    shared: Arc<RepositoryShared>,
    factory: RwLock<Arc<dyn LoggerFactory>>,
    root_default_level: Level,
}

impl LoggerRepository {
    /// Repository whose root logs at [`Level::Debug`].
    pub fn new() -> Self {
        Self::with_root_level(Level::Debug)
    }

    pub fn with_root_level(level: Level) -> Self {
        let shared = Arc::new(RepositoryShared::new());
        let root = Logger::new("root", None, Arc::clone(&shared));
        root.set_level(Some(level));
        Self {
            root,
            nodes: RwLock::new(HashMap::new()),
            shared,
            factory: RwLock::new(Arc::new(DefaultLoggerFactory)),
            root_default_level: level,
        }
    }

    pub fn root(&self) -> Arc<Logger> {
        Arc::clone(&self.root)
    }

    /// Look up a node by dotted name, creating it and any missing ancestors.
    ///
    /// Creation is linearizable: concurrent calls with the same or
    /// overlapping names observe a consistent ancestor chain and at most one
    /// node ever exists per distinct name.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or has an empty dotted component
    /// (e.g. `"a..b"` or `".a"`); such a name is a programming error, not a
    /// runtime condition.
    pub fn logger(&self, name: &str) -> Arc<Logger> {
        assert!(!name.is_empty(), "logger name must not be empty");
        assert!(
            name.split('.').all(|part| !part.is_empty()),
            "logger name '{}' has an empty component",
            name
        );

        if let Some(existing) = self.nodes.read().get(name) {
            return Arc::clone(existing);
        }

        let mut nodes = self.nodes.write();
        if let Some(existing) = nodes.get(name) {
            return Arc::clone(existing);
        }

        let factory = Arc::clone(&*self.factory.read());
        let mut parent = Arc::clone(&self.root);
        let mut prefix = String::with_capacity(name.len());
        for part in name.split('.') {
            if !prefix.is_empty() {
                prefix.push('.');
            }
            prefix.push_str(part);
            let node = match nodes.get(&prefix) {
                Some(existing) => Arc::clone(existing),
                None => {
                    let created = factory.make_new_logger_instance(
                        &prefix,
                        Some(Arc::clone(&parent)),
                        Arc::clone(&self.shared),
                    );
                    nodes.insert(prefix.clone(), Arc::clone(&created));
                    created
                }
            };
            parent = node;
        }
        parent
    }

    /// The node for `name` if it has already been created, without creating it.
    pub fn exists(&self, name: &str) -> Option<Arc<Logger>> {
        self.nodes.read().get(name).cloned()
    }

    /// Snapshot of all created non-root nodes, sorted by name so the order is
    /// stable for a given tree snapshot.
    pub fn current_loggers(&self) -> Vec<Arc<Logger>> {
        let nodes = self.nodes.read();
        let mut loggers: Vec<Arc<Logger>> = nodes.values().cloned().collect();
        loggers.sort_by(|a, b| a.name().cmp(b.name()));
        loggers
    }

    /// Every appender currently reachable from the root or any node,
    /// deduplicated by identity.
    fn reachable_appenders(&self) -> Vec<Arc<Appender>> {
        let mut seen: Vec<Arc<Appender>> = Vec::new();
        let nodes = self.nodes.read();
        for node in std::iter::once(&self.root).chain(nodes.values()) {
            for appender in node.appenders() {
                if !seen.iter().any(|s| Arc::ptr_eq(s, &appender)) {
                    seen.push(appender);
                }
            }
        }
        seen
    }

    /// Disable the repository and close every reachable appender exactly
    /// once, shared appenders included. Safe to call concurrently with
    /// in-flight log calls: they complete or drop, and `close` itself is
    /// idempotent.
    pub fn shutdown(&self) {
        let appenders = self.reachable_appenders();
        self.shared.set_shut_down();
        for appender in appenders {
            if let Err(e) = appender.close() {
                self.shared
                    .diagnostics()
                    .error(&format!("failed to close appender '{}': {}", appender.name(), e));
            }
        }
    }

    pub fn is_shut_down(&self) -> bool {
        self.shared.is_shut_down()
    }

    /// Return the tree to its freshly-constructed configuration without
    /// destroying node identities: every appender is detached and closed,
    /// every explicit level except the root's is cleared (the root returns to
    /// the construction default), additivity is restored to true everywhere,
    /// and the guard level and diagnostic flags are reset.
    pub fn reset_configuration(&self) {
        let mut detached: Vec<Arc<Appender>> = Vec::new();
        let mut collect = |appenders: Vec<Arc<Appender>>| {
            for appender in appenders {
                if !detached.iter().any(|s| Arc::ptr_eq(s, &appender)) {
                    detached.push(appender);
                }
            }
        };

        collect(
            self.root
                .reset_for_configuration(Some(self.root_default_level)),
        );
        {
            let nodes = self.nodes.read();
            for node in nodes.values() {
                collect(node.reset_for_configuration(None));
            }
        }

        for appender in detached {
            if let Err(e) = appender.close() {
                self.shared
                    .diagnostics()
                    .error(&format!("failed to close appender '{}': {}", appender.name(), e));
            }
        }

        self.shared.set_guard_level(Level::All);
        self.shared.diagnostics().reset();
        self.shared.bump_generation();
    }

    /// Repository-wide guard: events below this level are disabled for every
    /// node regardless of the tree's levels.
    pub fn guard_level(&self) -> Level {
        self.shared.guard_level()
    }

    pub fn set_guard_level(&self, level: Level) {
        self.shared.set_guard_level(level);
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        self.shared.diagnostics()
    }

    /// Swap the factory used for nodes created from now on.
    pub fn set_logger_factory(&self, factory: Arc<dyn LoggerFactory>) {
        *self.factory.write() = factory;
    }
}

impl Default for LoggerRepository {
    fn default() -> Self {
        Self::new()
    }
}
