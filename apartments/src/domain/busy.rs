//! Session-wide gate for mutating operations.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag raised while a repository operation is in flight.
///
/// Clones observe the same flag, so a front end can hold one to disable its
/// mutating controls while the session works.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    /// Create a lowered flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an operation currently holds the flag.
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Raise the flag, or return `None` if it is already raised.
    ///
    /// The flag is lowered when the returned guard drops.
    ///
    /// # Examples
    /// ```
    /// use apartments::domain::BusyFlag;
    ///
    /// let flag = BusyFlag::new();
    /// let guard = flag.try_acquire().expect("flag was lowered");
    /// assert!(flag.try_acquire().is_none());
    /// drop(guard);
    /// assert!(!flag.is_busy());
    /// ```
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard {
                flag: Arc::clone(&self.0),
            })
    }
}

/// Holds a [`BusyFlag`] raised until dropped.
#[derive(Debug)]
#[must_use = "the busy flag is lowered as soon as the guard drops"]
pub struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
