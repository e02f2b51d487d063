//! Per-item lock table
//!
//! Every lifecycle transition that touches an item's hold state runs under
//! that item's mutex. Waiters give up after a bounded wait instead of
//! queueing indefinitely behind a slow transition.

use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Per-item mutex table
///
/// Entries are created lazily on first use and shared across clones.
#[derive(Clone)]
pub struct ItemLockTable {
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
    wait: Duration,
}

impl ItemLockTable {
    pub fn new(wait: Duration) -> Self {
        Self {
            locks: Arc::new(DashMap::new()),
            wait,
        }
    }

    /// Maximum time a caller waits for a contended lock
    pub fn wait_bound(&self) -> Duration {
        self.wait
    }

    fn handle(&self, item_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(item_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Run `f` while holding the lock for `item_id`
    ///
    /// Returns `None` when the lock could not be acquired within the wait
    /// bound. The lock is not reentrant; nesting `with_item` on the same
    /// item from one thread times out like any other contender.
    pub fn with_item<T>(&self, item_id: &str, f: impl FnOnce() -> T) -> Option<T> {
        let lock = self.handle(item_id);
        let _guard = lock.try_lock_for(self.wait)?;
        Some(f())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;

    #[test]
    fn test_with_item_runs_closure() {
        let table = ItemLockTable::new(Duration::from_millis(50));
        assert_eq!(table.with_item("key-1", || 7), Some(7));
    }

    #[test]
    fn test_contended_lock_times_out() {
        let table = ItemLockTable::new(Duration::from_millis(10));
        let other = table.clone();
        let (started_tx, started_rx) = mpsc::channel();

        let holder = thread::spawn(move || {
            other.with_item("key-1", || {
                started_tx.send(()).unwrap();
                thread::sleep(Duration::from_millis(100));
            })
        });

        started_rx.recv().unwrap();
        assert!(table.with_item("key-1", || ()).is_none());
        assert!(holder.join().unwrap().is_some());
    }

    #[test]
    fn test_independent_items_do_not_contend() {
        let table = ItemLockTable::new(Duration::from_millis(10));
        let other = table.clone();
        let (started_tx, started_rx) = mpsc::channel();

        let holder = thread::spawn(move || {
            other.with_item("key-1", || {
                started_tx.send(()).unwrap();
                thread::sleep(Duration::from_millis(100));
            })
        });

        started_rx.recv().unwrap();
        assert_eq!(table.with_item("key-2", || 42), Some(42));
        holder.join().unwrap();
    }

    #[test]
    fn test_not_reentrant() {
        let table = ItemLockTable::new(Duration::from_millis(10));
        let inner = table.clone();
        let out = table.with_item("key-1", || inner.with_item("key-1", || ()));
        assert_eq!(out, Some(None));
    }
}
