// ## 📂 File: `src/video/slot.rs`
// ## Single-value overwrite cell (most recent write wins)

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug)]
struct SlotInner<T> {
    value: Option<Arc<T>>,
    /// Whether the current value has been read at least once.
    read: bool,
}

/// Holds only the latest value. `set` never blocks on the reader and `get`
/// never blocks on the writer beyond the swap itself.
#[derive(Debug)]
pub struct LastFrameSlot<T> {
    inner: Mutex<SlotInner<T>>,
    version: AtomicU64,
}

impl<T> LastFrameSlot<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(SlotInner { value: None, read: false }),
            version: AtomicU64::new(0),
        }
    }

    /// Replace the current value. Returns `true` if an unread value was dropped.
    pub fn set(&self, value: T) -> bool {
        let value = Arc::new(value);
        let mut inner = self.lock();
        let overwritten = inner.value.is_some() && !inner.read;
        inner.value = Some(value);
        inner.read = false;
        self.version.fetch_add(1, Ordering::Release);
        overwritten
    }

    /// Current value, `None` if nothing was ever set. Does not clear the slot.
    pub fn get(&self) -> Option<Arc<T>> {
        let mut inner = self.lock();
        inner.read = true;
        inner.value.clone()
    }

    /// Number of `set` calls so far.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Value and its version, only if written after `seen`.
    pub fn get_if_newer(&self, seen: u64) -> Option<(u64, Arc<T>)> {
        let mut inner = self.lock();
        // version only moves under the lock, so this pair is consistent
        let version = self.version.load(Ordering::Acquire);
        if version <= seen {
            return None;
        }
        inner.read = true;
        inner.value.clone().map(|v| (version, v))
    }

    pub fn is_empty(&self) -> bool {
        self.lock().value.is_none()
    }

    fn lock(&self) -> MutexGuard<'_, SlotInner<T>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<T> Default for LastFrameSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
