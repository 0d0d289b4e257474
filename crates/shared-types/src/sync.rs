//! # Process-Wide Critical Section
//!
//! Every operation that touches reviews, votes, translations or the ledger
//! runs while holding the one lock inside an [`ExclusiveStore`]. Cloning the
//! handle shares the lock; it never copies the store.
//!
//! The lock is held across the whole cast → tally → transition → promote
//! sequence, so no caller can observe a tally without its status effect.

use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

/// Shared handle to a store guarded by a single mutex.
pub struct ExclusiveStore<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> Clone for ExclusiveStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> ExclusiveStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Enter the critical section. Released when the guard drops.
    pub fn lock(&self) -> MutexGuard<'_, S> {
        self.inner.lock()
    }

    /// Run `f` inside the critical section.
    pub fn with<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    /// True if both handles share the same lock.
    pub fn same_lock(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clones_share_one_store() {
        let store = ExclusiveStore::new(Vec::<u32>::new());
        let other = store.clone();

        other.with(|v| v.push(1));
        assert_eq!(store.lock().len(), 1);
        assert!(store.same_lock(&other));
    }

    #[test]
    fn test_writers_are_serialized() {
        let store = ExclusiveStore::new(0u64);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..1_000 {
                        store.with(|n| *n += 1);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(*store.lock(), 8_000);
    }
}
