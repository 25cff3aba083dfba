//! Compute-once cell for lazily loaded source metadata

use once_cell::sync::OnceCell;

/// A value computed at most once, on first access
///
/// Concurrent first accesses block until the single computation finishes and
/// all observe its value.
#[derive(Debug)]
pub struct Memo<T> {
    cell: OnceCell<T>,
}

impl<T> Memo<T> {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// The value, computing it with `f` if this is the first access
    pub fn get_or_compute<F>(&self, f: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.cell.get_or_init(f)
    }

    /// The value if already computed
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    pub fn is_set(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::time::Duration;

    #[test]
    fn test_computes_once() {
        let memo = Memo::new();
        assert!(!memo.is_set());
        assert_eq!(*memo.get_or_compute(|| 1), 1);
        assert_eq!(*memo.get_or_compute(|| 2), 1);
        assert_eq!(memo.get(), Some(&1));
    }

    #[test]
    fn test_concurrent_first_access() {
        let memo: Memo<String> = Memo::new();
        let calls = AtomicUsize::new(0);
        let barrier = Barrier::new(8);

        let values: Vec<String> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        memo.get_or_compute(|| {
                            std::thread::sleep(Duration::from_millis(20));
                            format!("call {}", calls.fetch_add(1, Ordering::SeqCst))
                        })
                        .clone()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(values.iter().all(|v| v == "call 0"));
    }
}
