//! Repository selector
//!
//! A selector maps an opaque application-context key to a
//! [`LoggerRepository`], which lets one process host several isolated logger
//! hierarchies (one per deployed application, test harness, or tenant). The
//! lookup never comes back empty: an unknown context gets a default
//! repository whose root logs at [`Level::Warn`].

use super::level::Level;
use super::repository::LoggerRepository;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

pub struct RepositorySelector {
    repositories: RwLock<HashMap<String, Arc<LoggerRepository>>>,
}

impl RepositorySelector {
    pub fn new() -> Self {
        Self {
            repositories: RwLock::new(HashMap::new()),
        }
    }

    /// The repository for `context`, created on first use.
    pub fn repository(&self, context: &str) -> Arc<LoggerRepository> {
        if let Some(existing) = self.repositories.read().get(context) {
            return Arc::clone(existing);
        }

        let mut repositories = self.repositories.write();
        Arc::clone(
            repositories
                .entry(context.to_string())
                .or_insert_with(|| Arc::new(LoggerRepository::with_root_level(Level::Warn))),
        )
    }

    /// Install a pre-built repository for `context`, replacing any existing one.
    pub fn attach(&self, context: &str, repository: Arc<LoggerRepository>) {
        self.repositories
            .write()
            .insert(context.to_string(), repository);
    }

    /// Detach the repository for `context`, returning it if present.
    pub fn remove(&self, context: &str) -> Option<Arc<LoggerRepository>> {
        self.repositories.write().remove(context)
    }

    /// Known context keys, sorted.
    pub fn contexts(&self) -> Vec<String> {
        let mut contexts: Vec<String> = self.repositories.read().keys().cloned().collect();
        contexts.sort();
        contexts
    }
}

impl Default for RepositorySelector {
    fn default() -> Self {
        Self::new()
    }
}
