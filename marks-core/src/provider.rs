//! The external backend seam: storage, identity and realtime change feed

use crate::model::{Bookmark, NewBookmark, User};
use async_trait::async_trait;
use futures::channel::mpsc;
use futures::StreamExt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("not signed in")]
    NotAuthenticated,
    #[error("realtime error: {0}")]
    Realtime(String),
    #[error("request rejected: {0}")]
    Rejected(String),
}

/// Kind of row change reported by the realtime channel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeEvent {
    pub table: String,
    pub kind: ChangeKind,
}

/// Handle for a live change feed.
///
/// Dropping the handle releases the feed on the provider side, so a view that
/// holds one for its lifetime never leaks a subscription.
pub struct Subscription {
    events: mpsc::UnboundedReceiver<ChangeEvent>,
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(events: mpsc::UnboundedReceiver<ChangeEvent>, release: impl FnOnce() + 'static) -> Self {
        Self {
            events,
            release: Some(Box::new(release)),
        }
    }

    /// Wait for the next change. Returns `None` once the feed is closed.
    pub async fn next(&mut self) -> Option<ChangeEvent> {
        self.events.next().await
    }

    /// Release the feed explicitly
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.events.close();
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

/// Backend-as-a-service operations the dashboard depends on.
///
/// Futures are `?Send`: in the browser everything runs on one thread.
#[async_trait(?Send)]
pub trait BookmarkProvider {
    /// The signed-in user, or `None` when there is no session
    async fn current_user(&self) -> Result<Option<User>, ProviderError>;

    /// All bookmarks visible to the current user, newest first
    async fn list_bookmarks(&self) -> Result<Vec<Bookmark>, ProviderError>;

    async fn insert_bookmark(&self, bookmark: NewBookmark) -> Result<(), ProviderError>;

    async fn delete_bookmark(&self, id: &str) -> Result<(), ProviderError>;

    /// Open a change feed for every insert, update and delete on `table`
    fn subscribe(&self, table: &str) -> Result<Subscription, ProviderError>;

    async fn sign_out(&self) -> Result<(), ProviderError>;
}
