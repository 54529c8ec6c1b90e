//! Page scroll suppression shared by every mounted dialog
//!
//! Each dialog owns a token in the set while it is mounted. The page scrolls
//! again only when the last owner releases, so two dialogs can never undo
//! each other's lock.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

static OWNER_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Allocate an id for a new lock owner
pub fn next_owner_id() -> u64 {
    OWNER_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModalLock {
    owners: BTreeSet<u64>,
}

impl ModalLock {
    /// Returns `true` if `owner` did not already hold the lock
    pub fn acquire(&mut self, owner: u64) -> bool {
        self.owners.insert(owner)
    }

    /// Returns `true` if `owner` held the lock
    pub fn release(&mut self, owner: u64) -> bool {
        self.owners.remove(&owner)
    }

    pub fn is_locked(&self) -> bool {
        !self.owners.is_empty()
    }

    pub fn owner_count(&self) -> usize {
        self.owners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_holds_until_last_owner_releases() {
        let mut lock = ModalLock::default();
        let a = next_owner_id();
        let b = next_owner_id();

        lock.acquire(a);
        lock.acquire(b);
        lock.release(a);
        assert!(lock.is_locked());

        lock.release(b);
        assert!(!lock.is_locked());
    }

    #[test]
    fn acquire_is_idempotent_per_owner() {
        let mut lock = ModalLock::default();
        let a = next_owner_id();

        assert!(lock.acquire(a));
        assert!(!lock.acquire(a));
        assert_eq!(lock.owner_count(), 1);

        assert!(lock.release(a));
        assert!(!lock.release(a));
    }

    #[test]
    fn owner_ids_are_unique() {
        assert_ne!(next_owner_id(), next_owner_id());
    }
}
