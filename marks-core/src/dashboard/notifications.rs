//! Transient user-visible notifications

use std::collections::HashSet;

/// How long a notification stays up unless dismissed
pub const NOTIFICATION_TTL_MS: u64 = 4000;

pub const MSG_ADDED: &str = "Bookmark added successfully";
pub const MSG_ADD_FAILED: &str = "Failed to add bookmark";
pub const MSG_DELETED: &str = "Bookmark deleted successfully";
pub const MSG_DELETE_FAILED: &str = "Failed to delete bookmark";
pub const MSG_LOAD_FAILED: &str = "Failed to load bookmarks";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

/// Notifications currently on screen, oldest first
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Notifications {
    items: Vec<Notification>,
    next_id: u64,
}

impl Notifications {
    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Notification {
            id,
            kind,
            message: message.into(),
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(NotificationKind::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(NotificationKind::Error, message)
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.last()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Notification ids with a pending expiry timer
#[derive(Debug, Default)]
pub struct ExpiryTracker {
    scheduled: HashSet<u64>,
}

impl ExpiryTracker {
    /// Ids among `items` that have no timer yet; each is marked as scheduled
    pub fn claim(&mut self, items: &[Notification]) -> Vec<u64> {
        items
            .iter()
            .map(|n| n.id)
            .filter(|id| self.scheduled.insert(*id))
            .collect()
    }

    /// Forget `id` once its timer has fired
    pub fn release(&mut self, id: u64) {
        self.scheduled.remove(&id);
    }

    pub fn pending(&self) -> usize {
        self.scheduled.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_not_reused_after_dismiss() {
        let mut notes = Notifications::default();
        let first = notes.success("a");
        notes.dismiss(first);
        let second = notes.error("b");

        assert_ne!(first, second);
        assert_eq!(notes.items().len(), 1);
        assert_eq!(notes.latest().unwrap().kind, NotificationKind::Error);
    }

    #[test]
    fn expiry_is_claimed_once_and_forgotten_after_release() {
        let mut notes = Notifications::default();
        let mut tracker = ExpiryTracker::default();
        let first = notes.success("a");

        assert_eq!(tracker.claim(notes.items()), vec![first]);
        let second = notes.error("b");
        assert_eq!(tracker.claim(notes.items()), vec![second]);
        assert_eq!(tracker.pending(), 2);

        notes.dismiss(first);
        tracker.release(first);
        notes.dismiss(second);
        tracker.release(second);

        assert!(tracker.claim(notes.items()).is_empty());
        assert_eq!(tracker.pending(), 0);
    }
}
