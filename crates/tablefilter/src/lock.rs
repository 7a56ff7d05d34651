//! Named advisory locks around structural settings mutations.
//!
//! These are cooperative, non-reentrant-by-name exclusions for sequences of
//! map mutations on the single dispatch thread, not a transaction mechanism.
//! Acquire and release are symmetric through the RAII guard; re-locking a
//! held name is a programming error and panics.

use std::cell::RefCell;
use std::collections::HashSet;

/// A set of named advisory locks.
#[derive(Debug, Default)]
pub struct LockSet {
    held: RefCell<HashSet<String>>,
}

impl LockSet {
    /// Creates an empty lock set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the named lock, returning a guard that releases on drop.
    ///
    /// # Panics
    ///
    /// Panics if the name is already held.
    pub fn lock(&self, name: &str) -> LockGuard<'_> {
        let inserted = self.held.borrow_mut().insert(name.to_string());
        if !inserted {
            panic!("advisory lock '{name}' is already held");
        }
        LockGuard {
            set: self,
            name: name.to_string(),
        }
    }

    /// Returns true if the named lock is currently held.
    pub fn is_held(&self, name: &str) -> bool {
        self.held.borrow().contains(name)
    }
}

/// RAII guard for a named advisory lock.
#[derive(Debug)]
pub struct LockGuard<'a> {
    set: &'a LockSet,
    name: String,
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        self.set.held.borrow_mut().remove(&self.name);
    }
}
