//! Integration tests for the logger hierarchy and dispatch engine
//!
//! These tests verify:
//! - Name-based lookup and node identity
//! - Effective-level inheritance
//! - The additivity cascade and appender deduplication
//! - Threshold and filter gating on delivery
//! - Shutdown and reset semantics

use cascade_log::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts close calls so release-exactly-once semantics can be asserted.
struct CountingSink {
    closes: Arc<AtomicUsize>,
}

impl CountingSink {
    fn new() -> (Self, Arc<AtomicUsize>) {
        let closes = Arc::new(AtomicUsize::new(0));
        (
            Self {
                closes: Arc::clone(&closes),
            },
            closes,
        )
    }
}

impl Sink for CountingSink {
    fn name(&self) -> &str {
        "counting"
    }

    fn requires_layout(&self) -> bool {
        false
    }

    fn write(&mut self, _rendered: &str, _event: &LoggingEvent) -> cascade_log::Result<()> {
        Ok(())
    }

    fn close(&mut self) -> cascade_log::Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn memory_appender(name: &str) -> (Arc<Appender>, MemoryBuffer) {
    let sink = MemorySink::new();
    let buffer = sink.buffer();
    let appender = Appender::new(name, Box::new(sink)).expect("failed to build appender");
    (appender, buffer)
}

#[test]
fn test_lookup_creates_distinct_parent_chain() {
    let repository = LoggerRepository::new();
    let leaf = repository.logger("a.b.c");
    let mid = repository.logger("a.b");
    let top = repository.logger("a");

    assert!(!Arc::ptr_eq(&leaf, &mid));
    assert!(!Arc::ptr_eq(&mid, &top));
    assert!(Arc::ptr_eq(&leaf.parent().unwrap(), &mid));
    assert!(Arc::ptr_eq(&mid.parent().unwrap(), &top));

    let again = repository.logger("a.b.c");
    assert!(Arc::ptr_eq(&leaf, &again));
}

#[test]
fn test_root_level_governs_unconfigured_descendants() {
    let repository = LoggerRepository::new();
    repository.root().set_level(Some(Level::Warn));

    for name in ["app", "app.db", "deep.nested.logger.name"] {
        assert_eq!(repository.logger(name).effective_level(), Level::Warn);
    }
}

#[test]
fn test_additivity_accumulates_ancestor_appenders() {
    let repository = LoggerRepository::new();
    let parent = repository.logger("a.b");
    let child = repository.logger("a.b.c");

    let (appender_x, buffer_x) = memory_appender("X");
    let (appender_y, buffer_y) = memory_appender("Y");
    parent.add_appender(appender_x);
    child.add_appender(appender_y);

    child.info("to both");
    assert_eq!(buffer_x.records(), ["to both".to_string()]);
    assert_eq!(buffer_y.records(), ["to both".to_string()]);

    // Cutting additivity stops the cascade above the child, but the child's
    // own appenders still receive events.
    buffer_x.clear();
    buffer_y.clear();
    child.set_additive(false);

    child.info("only child");
    assert!(buffer_x.is_empty());
    assert_eq!(buffer_y.records(), ["only child".to_string()]);
}

#[test]
fn test_non_additive_ancestor_stops_inclusively() {
    let repository = LoggerRepository::new();
    let top = repository.logger("a");
    let mid = repository.logger("a.b");
    let leaf = repository.logger("a.b.c");

    let (appender_top, buffer_top) = memory_appender("top");
    let (appender_mid, buffer_mid) = memory_appender("mid");
    let (appender_root, buffer_root) = memory_appender("root");
    top.add_appender(appender_top);
    mid.add_appender(appender_mid);
    repository.root().add_appender(appender_root);

    // The first non-additive ancestor contributes its own appenders and then
    // stops the walk.
    mid.set_additive(false);
    leaf.info("stops at mid");

    assert_eq!(buffer_mid.records(), ["stops at mid".to_string()]);
    assert!(buffer_top.is_empty());
    assert!(buffer_root.is_empty());
}

#[test]
fn test_inherited_debug_scenario() {
    // Repository with root level INFO; logger "app.db" unset with no
    // appenders; logger "app" at DEBUG, additive, with one appender using
    // the simple layout.
    let repository = LoggerRepository::new();
    repository.root().set_level(Some(Level::Info));

    let app = repository.logger("app");
    app.set_level(Some(Level::Debug));
    let sink = MemorySink::new();
    let buffer = sink.buffer();
    let appender = Appender::builder("A", Box::new(sink))
        .layout(SimpleLayout::new())
        .build()
        .unwrap();
    app.add_appender(appender);

    let db = repository.logger("app.db");
    assert!(db.is_enabled_for(Level::Debug));
    db.debug("query ok");

    assert_eq!(buffer.records(), ["DEBUG - query ok".to_string()]);
}

#[test]
fn test_shared_appender_delivered_once() {
    // Same tree as above; an event from a sibling logger walks both
    // "app.other" and "app" but the appender on "app" sees it exactly once.
    let repository = LoggerRepository::new();
    repository.root().set_level(Some(Level::Info));

    let app = repository.logger("app");
    app.set_level(Some(Level::Debug));
    let (appender, buffer) = memory_appender("A");
    app.add_appender(Arc::clone(&appender));

    let other = repository.logger("app.other");
    // Attach the same appender to the child as well; deduplication by
    // identity still yields a single delivery.
    other.add_appender(appender);

    other.info("x");
    assert_eq!(buffer.records(), ["x".to_string()]);
}

#[test]
fn test_appender_threshold_and_filters_gate_delivery() {
    let repository = LoggerRepository::new();
    let logger = repository.logger("gated");
    logger.set_level(Some(Level::Trace));

    let sink = MemorySink::new();
    let buffer = sink.buffer();
    let appender = Appender::builder("gated", Box::new(sink))
        .threshold(Level::Info)
        .filter(StringMatchFilter::new("secret", MatchAction::Deny))
        .build()
        .unwrap();
    logger.add_appender(appender);

    logger.debug("below threshold");
    logger.info("contains secret token");
    logger.info("visible");

    assert_eq!(buffer.records(), ["visible".to_string()]);
}

#[test]
fn test_accept_filter_short_circuits_threshold_does_not() {
    // An Accept from the chain skips remaining filters, but the threshold
    // check runs before the chain.
    let repository = LoggerRepository::new();
    let logger = repository.logger("accepting");
    logger.set_level(Some(Level::Trace));

    let sink = MemorySink::new();
    let buffer = sink.buffer();
    let appender = Appender::builder("accepting", Box::new(sink))
        .filter(LevelMatchFilter::new(Level::Info, MatchAction::Accept))
        .filter(StringMatchFilter::new("x", MatchAction::Deny))
        .build()
        .unwrap();
    logger.add_appender(appender);

    // INFO matches the first filter and is accepted even though the second
    // filter would deny it.
    logger.info("x marks the spot");
    assert_eq!(buffer.records(), ["x marks the spot".to_string()]);
}

#[test]
fn test_close_releases_exactly_once() {
    let (sink, closes) = CountingSink::new();
    let appender = Appender::new("counting", Box::new(sink)).unwrap();

    appender.close().unwrap();
    appender.close().unwrap();
    assert_eq!(closes.load(Ordering::SeqCst), 1);
}

#[test]
fn test_shutdown_closes_shared_appenders_once() {
    let repository = LoggerRepository::new();
    let (sink, closes) = CountingSink::new();
    let appender = Appender::new("shared", Box::new(sink)).unwrap();

    // Shared across three nodes, including the root.
    repository.root().add_appender(Arc::clone(&appender));
    repository.logger("a").add_appender(Arc::clone(&appender));
    repository.logger("b.c").add_appender(Arc::clone(&appender));

    repository.shutdown();
    assert_eq!(closes.load(Ordering::SeqCst), 1);

    // New log calls after shutdown are silently dropped.
    let logger = repository.logger("a");
    assert!(!logger.is_enabled_for(Level::Fatal));
    logger.fatal("dropped");
}

#[test]
fn test_reset_configuration_keeps_node_identity() {
    let repository = LoggerRepository::new();
    let logger = repository.logger("app.db");
    logger.set_level(Some(Level::Error));
    logger.set_additive(false);
    let (appender, _buffer) = memory_appender("A");
    logger.add_appender(appender);

    repository.reset_configuration();

    let same = repository.logger("app.db");
    assert!(Arc::ptr_eq(&logger, &same));
    assert_eq!(same.level(), None);
    assert!(same.is_additive());
    assert!(same.appenders().is_empty());
}

#[test]
fn test_guard_level_disables_repository_below_it() {
    let repository = LoggerRepository::new();
    let logger = repository.logger("guarded");
    logger.set_level(Some(Level::Trace));

    let (appender, buffer) = memory_appender("A");
    logger.add_appender(appender);

    repository.set_guard_level(Level::Error);
    logger.info("suppressed");
    logger.error("passes");

    assert_eq!(buffer.records(), ["passes".to_string()]);
}

#[test]
fn test_panicking_appender_does_not_break_the_cascade() {
    struct PanickingSink;

    impl Sink for PanickingSink {
        fn name(&self) -> &str {
            "panicking"
        }

        fn requires_layout(&self) -> bool {
            false
        }

        fn write(&mut self, _rendered: &str, _event: &LoggingEvent) -> cascade_log::Result<()> {
            panic!("sink exploded");
        }
    }

    let repository = LoggerRepository::new();
    repository.diagnostics().set_quiet(true);

    let child = repository.logger("app.child");
    let parent = repository.logger("app");

    child.add_appender(Appender::new("bad", Box::new(PanickingSink)).unwrap());
    let (good, buffer) = memory_appender("good");
    parent.add_appender(good);

    // The panic is isolated; the parent's appender still gets the event and
    // the caller's log statement does not unwind.
    child.info("survives");
    assert_eq!(buffer.records(), ["survives".to_string()]);
}

#[test]
fn test_selector_provides_isolated_hierarchies() {
    let selector = RepositorySelector::new();
    let repo_a = selector.repository("app-a");
    let repo_b = selector.repository("app-b");

    // Default repositories log at WARN.
    assert!(!repo_a.logger("svc").is_enabled_for(Level::Info));

    repo_a.logger("svc").set_level(Some(Level::Trace));
    assert!(repo_a.logger("svc").is_enabled_for(Level::Trace));
    assert!(!repo_b.logger("svc").is_enabled_for(Level::Trace));
}

#[test]
fn test_registry_components_compose_into_dispatch() {
    let registry = ComponentRegistry::with_builtins().unwrap();

    let repository = LoggerRepository::new();
    let logger = repository.logger("wired");
    logger.set_level(Some(Level::Debug));

    let sink = MemorySink::new();
    let buffer = sink.buffer();
    let appender = Appender::builder("wired", Box::new(sink))
        .layout_boxed(registry.new_layout("pattern", "%p|%c|%m").unwrap())
        .filter_boxed(registry.new_filter("string_match", "keep").unwrap())
        .build()
        .unwrap();
    logger.add_appender(appender);

    logger.debug("keep this");
    logger.debug("neutral passes too");

    assert_eq!(
        buffer.records(),
        [
            "DEBUG|wired|keep this".to_string(),
            "DEBUG|wired|neutral passes too".to_string(),
        ]
    );
}

#[cfg(feature = "file")]
#[test]
fn test_file_appender_end_to_end() {
    use tempfile::TempDir;

    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let path = temp_dir.path().join("app.log");

    let repository = LoggerRepository::new();
    let logger = repository.logger("filed");
    let appender = Appender::builder("file", Box::new(FileSink::new(&path)))
        .layout(SimpleLayout::new())
        .build()
        .unwrap();
    logger.add_appender(appender);

    logger.info("to disk");
    repository.shutdown();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "INFO - to disk\n");
}
