//! Cancellable timer-driven tasks keyed by the id of the entity that owns them
//! (a chat session id or an uploaded file id).

use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Flag a running task checks before touching state
#[derive(Clone, Debug, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn same(&self, other: &CancelHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: HashMap<String, Vec<CancelHandle>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, owner: &str) -> CancelHandle {
        let handle = CancelHandle::new();
        self.tasks
            .entry(owner.to_string())
            .or_default()
            .push(handle.clone());
        handle
    }

    /// Cancel every task of `owner`. Returns how many were cancelled.
    pub fn cancel(&mut self, owner: &str) -> usize {
        match self.tasks.remove(owner) {
            Some(handles) => {
                handles.iter().for_each(CancelHandle::cancel);
                handles.len()
            }
            None => 0,
        }
    }

    pub fn cancel_all(&mut self) -> usize {
        let count = self.tasks.values().map(Vec::len).sum();
        for handle in self.tasks.drain().flat_map(|(_, handles)| handles) {
            handle.cancel();
        }
        count
    }

    /// Forget a finished task
    pub fn release(&mut self, owner: &str, handle: &CancelHandle) {
        if let Some(handles) = self.tasks.get_mut(owner) {
            handles.retain(|h| !h.same(handle));
            if handles.is_empty() {
                self.tasks.remove(owner);
            }
        }
    }

    pub fn pending(&self, owner: &str) -> usize {
        self.tasks.get(owner).map(Vec::len).unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.tasks.values().map(Vec::len).sum()
    }
}

/// Spawn `task` on the browser event loop under `owner`.
///
/// The task gets its handle and must check it after every suspension point.
pub fn spawn_owned<F, Fut>(registry: StoredValue<TaskRegistry>, owner: String, task: F)
where
    F: FnOnce(CancelHandle) -> Fut,
    Fut: Future<Output = ()> + 'static,
{
    let handle = registry
        .try_update_value(|r| r.register(&owner))
        .unwrap_or_default();
    let fut = task(handle.clone());
    spawn_local(async move {
        fut.await;
        registry.try_update_value(|r| r.release(&owner, &handle));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_only_hits_owner() {
        let mut registry = TaskRegistry::new();
        let a1 = registry.register("session-a");
        let a2 = registry.register("session-a");
        let b = registry.register("file-b");

        assert_eq!(registry.cancel("session-a"), 2);
        assert!(a1.is_cancelled());
        assert!(a2.is_cancelled());
        assert!(!b.is_cancelled());
        assert_eq!(registry.pending("session-a"), 0);
        assert_eq!(registry.pending("file-b"), 1);
        assert_eq!(registry.cancel("unknown"), 0);
    }

    #[test]
    fn test_cancel_all() {
        let mut registry = TaskRegistry::new();
        let handles: Vec<_> = ["a", "b", "b"].iter().map(|o| registry.register(o)).collect();

        assert_eq!(registry.cancel_all(), 3);
        assert!(handles.iter().all(CancelHandle::is_cancelled));
        assert_eq!(registry.total(), 0);
    }

    #[test]
    fn test_release_keeps_siblings() {
        let mut registry = TaskRegistry::new();
        let first = registry.register("file-1");
        let second = registry.register("file-1");

        registry.release("file-1", &first);
        assert_eq!(registry.pending("file-1"), 1);
        assert!(!first.is_cancelled());

        registry.cancel("file-1");
        assert!(second.is_cancelled());
        assert!(!first.is_cancelled());
    }
}
