//! Page-level scroll lock
//!
//! While a drag session is active, pointer motion must not be interpreted as
//! page scrolling. The lock is a single exclusive flag shared by everything
//! on one page: the host checks [`ScrollLock::is_locked`] before handling
//! its own scroll input, and the reorder engine acquires the lock when a
//! session begins.
//!
//! Acquisition hands out an RAII guard; the flag is cleared when the guard
//! drops. Tying release to `Drop` means every exit path balances the lock,
//! including teardown in the middle of a drag.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

/// Shared handle to the page's scroll-lock flag.
///
/// Clones refer to the same underlying flag.
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    held: Arc<AtomicBool>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any holder currently owns the lock.
    pub fn is_locked(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }

    /// Acquire the lock, returning a guard that releases it on drop.
    ///
    /// Returns `None` when some other holder already owns the lock. The
    /// engine assumes it is the only consumer; a failed acquisition is
    /// logged and the caller proceeds without the guard.
    pub fn acquire(&self) -> Option<ScrollLockGuard> {
        if self
            .held
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            debug!("scroll lock acquired");
            Some(ScrollLockGuard {
                held: Arc::clone(&self.held),
            })
        } else {
            warn!("scroll lock already held by another party");
            None
        }
    }
}

/// RAII guard for the scroll lock. Releases the flag on drop.
#[derive(Debug)]
pub struct ScrollLockGuard {
    held: Arc<AtomicBool>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.held.store(false, Ordering::Release);
        debug!("scroll lock released");
    }
}
