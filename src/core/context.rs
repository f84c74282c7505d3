//! Thread-local diagnostic context
//!
//! This module provides:
//! - `Mdc`: mapped diagnostic context, a per-thread key-value map
//! - `Ndc`: nested diagnostic context, a per-thread stack of scope labels
//! - `MdcGuard` / `NdcGuard`: RAII guards for scoped entries
//!
//! Both contexts are snapshotted into every [`LoggingEvent`](crate::core::event::LoggingEvent)
//! at construction, so layouts and filters see the state of the emitting
//! thread at the moment of the log call.

use std::cell::RefCell;
use std::collections::HashMap;

thread_local! {
    static MDC: RefCell<HashMap<String, String>> = RefCell::new(HashMap::new());
    static NDC: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Mapped diagnostic context.
///
/// # Example
///
/// ```
/// use cascade_log::core::context::Mdc;
///
/// Mdc::put("request_id", "abc-123");
/// assert_eq!(Mdc::get("request_id").as_deref(), Some("abc-123"));
/// Mdc::remove("request_id");
/// ```
pub struct Mdc;

impl Mdc {
    /// Set a key on the calling thread's context, returning the previous value.
    pub fn put(key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        MDC.with(|mdc| mdc.borrow_mut().insert(key.into(), value.into()))
    }

    pub fn get(key: &str) -> Option<String> {
        MDC.with(|mdc| mdc.borrow().get(key).cloned())
    }

    pub fn remove(key: &str) -> Option<String> {
        MDC.with(|mdc| mdc.borrow_mut().remove(key))
    }

    pub fn clear() {
        MDC.with(|mdc| mdc.borrow_mut().clear());
    }

    /// Copy of the calling thread's full context.
    pub fn snapshot() -> HashMap<String, String> {
        MDC.with(|mdc| mdc.borrow().clone())
    }

    /// Set a key for the lifetime of the returned guard.
    ///
    /// The previous value (if any) is restored when the guard drops.
    #[must_use = "the entry is removed when the guard is dropped"]
    pub fn scoped(key: impl Into<String>, value: impl Into<String>) -> MdcGuard {
        let key = key.into();
        let previous = Self::put(key.clone(), value);
        MdcGuard { key, previous }
    }
}

/// Nested diagnostic context.
///
/// # Example
///
/// ```
/// use cascade_log::core::context::Ndc;
///
/// Ndc::push("session-9");
/// Ndc::push("checkout");
/// assert_eq!(Ndc::depth(), 2);
/// Ndc::pop();
/// Ndc::pop();
/// ```
pub struct Ndc;

impl Ndc {
    pub fn push(label: impl Into<String>) {
        NDC.with(|ndc| ndc.borrow_mut().push(label.into()));
    }

    pub fn pop() -> Option<String> {
        NDC.with(|ndc| ndc.borrow_mut().pop())
    }

    pub fn peek() -> Option<String> {
        NDC.with(|ndc| ndc.borrow().last().cloned())
    }

    pub fn depth() -> usize {
        NDC.with(|ndc| ndc.borrow().len())
    }

    pub fn clear() {
        NDC.with(|ndc| ndc.borrow_mut().clear());
    }

    /// Copy of the calling thread's stack, outermost first.
    pub fn snapshot() -> Vec<String> {
        NDC.with(|ndc| ndc.borrow().clone())
    }

    /// Push a label for the lifetime of the returned guard.
    #[must_use = "the label is popped when the guard is dropped"]
    pub fn scoped(label: impl Into<String>) -> NdcGuard {
        Self::push(label);
        NdcGuard { _private: () }
    }
}

/// RAII guard created by [`Mdc::scoped`]; restores the previous value on drop.
pub struct MdcGuard {
    key: String,
    previous: Option<String>,
}

impl Drop for MdcGuard {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(previous) => {
                Mdc::put(std::mem::take(&mut self.key), previous);
            }
            None => {
                Mdc::remove(&self.key);
            }
        }
    }
}

/// RAII guard created by [`Ndc::scoped`]; pops the label on drop.
pub struct NdcGuard {
    _private: (),
}

impl Drop for NdcGuard {
    fn drop(&mut self) {
        Ndc::pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mdc_put_get_remove() {
        Mdc::clear();
        assert_eq!(Mdc::put("user", "alice"), None);
        assert_eq!(Mdc::get("user").as_deref(), Some("alice"));
        assert_eq!(Mdc::put("user", "bob").as_deref(), Some("alice"));
        assert_eq!(Mdc::remove("user").as_deref(), Some("bob"));
        assert_eq!(Mdc::get("user"), None);
    }

    #[test]
    fn test_mdc_snapshot_is_copy() {
        Mdc::clear();
        Mdc::put("a", "1");
        let snapshot = Mdc::snapshot();
        Mdc::put("b", "2");
        assert_eq!(snapshot.len(), 1);
        assert_eq!(Mdc::snapshot().len(), 2);
        Mdc::clear();
    }

    #[test]
    fn test_mdc_scoped_restores_previous() {
        Mdc::clear();
        Mdc::put("env", "prod");
        {
            let _guard = Mdc::scoped("env", "test");
            assert_eq!(Mdc::get("env").as_deref(), Some("test"));
        }
        assert_eq!(Mdc::get("env").as_deref(), Some("prod"));
        Mdc::clear();
    }

    #[test]
    fn test_ndc_stack_order() {
        Ndc::clear();
        Ndc::push("outer");
        Ndc::push("inner");
        assert_eq!(Ndc::snapshot(), vec!["outer".to_string(), "inner".to_string()]);
        assert_eq!(Ndc::pop().as_deref(), Some("inner"));
        assert_eq!(Ndc::peek().as_deref(), Some("outer"));
        Ndc::clear();
    }

    #[test]
    fn test_ndc_scoped_pops() {
        Ndc::clear();
        {
            let _guard = Ndc::scoped("request");
            assert_eq!(Ndc::depth(), 1);
        }
        assert_eq!(Ndc::depth(), 0);
    }

    #[test]
    fn test_contexts_are_thread_local() {
        Mdc::clear();
        Mdc::put("main_only", "yes");
        let handle = std::thread::spawn(|| Mdc::get("main_only"));
        assert_eq!(handle.join().unwrap(), None);
        Mdc::clear();
    }
}
