//! Version-keyed lazy cache for derived geometry

use std::cell::{Cell, Ref, RefCell};

/// Derived value rebuilt on read when its source version moved on
///
/// The owner bumps a version counter on every mutation of the source data
/// and passes it to [`get`](Self::get). Rebuilding never happens eagerly.
#[derive(Debug, Clone)]
pub struct Memoized<T> {
    slot: RefCell<Option<(u64, T)>>,
    rebuilds: Cell<usize>,
}

impl<T> Memoized<T> {
    pub fn new() -> Self {
        Memoized {
            slot: RefCell::new(None),
            rebuilds: Cell::new(0),
        }
    }

    /// Cached value for `version`, rebuilding it first if stale
    ///
    /// When `build` yields `None` nothing is cached and the next read
    /// tries again.
    pub fn get<F>(&self, version: u64, build: F) -> Option<Ref<'_, T>>
    where
        F: FnOnce() -> Option<T>,
    {
        if !self.is_current(version) {
            let value = build();
            if value.is_some() {
                self.rebuilds.set(self.rebuilds.get() + 1);
            }
            *self.slot.borrow_mut() = value.map(|v| (version, v));
        }
        Ref::filter_map(self.slot.borrow(), |slot| slot.as_ref().map(|(_, v)| v)).ok()
    }

    /// True when a value built from `version` is cached
    pub fn is_current(&self, version: u64) -> bool {
        matches!(&*self.slot.borrow(), Some((v, _)) if *v == version)
    }

    /// Number of successful rebuilds so far
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds.get()
    }

    pub fn invalidate(&self) {
        self.slot.borrow_mut().take();
    }
}

impl<T> Default for Memoized<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rebuilds_only_when_stale() {
        let memo = Memoized::new();
        assert_eq!(*memo.get(1, || Some(10)).unwrap(), 10);
        assert_eq!(*memo.get(1, || Some(20)).unwrap(), 10);
        assert_eq!(memo.rebuild_count(), 1);

        assert_eq!(*memo.get(2, || Some(30)).unwrap(), 30);
        assert_eq!(memo.rebuild_count(), 2);
    }

    #[test]
    fn test_absent_value_is_not_cached() {
        let memo: Memoized<i32> = Memoized::new();
        assert!(memo.get(1, || None).is_none());
        assert!(!memo.is_current(1));
        assert_eq!(memo.rebuild_count(), 0);
    }

    #[test]
    fn test_invalidate() {
        let memo = Memoized::new();
        memo.get(1, || Some("a"));
        memo.invalidate();
        assert!(!memo.is_current(1));
    }
}
