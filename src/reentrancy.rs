//! Debug-only guard against nested entry into a `PlayerHashMap`.
//!
//! The table calls one piece of caller-supplied code, `KeyHash::hash_key`,
//! while routing a key. A hasher that reaches back into the same table
//! would observe it mid-operation, so debug builds panic on nested entry.
//! Release builds compile the flag away.

#[cfg(debug_assertions)]
use core::cell::Cell;
use core::marker::PhantomData;

#[derive(Debug)]
pub(crate) struct BusyFlag {
    #[cfg(debug_assertions)]
    busy: Cell<bool>,
    // Keeps the owning table !Send + !Sync.
    _single_thread: PhantomData<*mut ()>,
}

impl BusyFlag {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            busy: Cell::new(false),
            _single_thread: PhantomData,
        }
    }

    /// Mark the table busy until the returned guard drops.
    #[inline]
    pub(crate) fn enter(&self) -> BusyGuard<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.busy.replace(true),
                "reentrancy detected: nested entry into PlayerHashMap"
            );
            return BusyGuard { flag: self };
        }

        #[cfg(not(debug_assertions))]
        {
            return BusyGuard { _flag: PhantomData };
        }
    }
}

pub(crate) struct BusyGuard<'a> {
    #[cfg(debug_assertions)]
    flag: &'a BusyFlag,
    #[cfg(not(debug_assertions))]
    _flag: PhantomData<&'a ()>,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.flag.busy.set(false);
    }
}
