//! In-process provider
//!
//! Backs the demo mode of the web app (no backend configured) and the test
//! suites. Every operation can be switched to fail, and every request is
//! recorded so callers can assert exactly what was sent.

use crate::model::{Bookmark, NewBookmark, User};
use crate::provider::{BookmarkProvider, ChangeEvent, ChangeKind, ProviderError, Subscription};
use async_trait::async_trait;
use chrono::Utc;
use futures::channel::mpsc;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use tracing::debug;

/// Provider operations that can be made to fail
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    CurrentUser,
    List,
    Insert,
    Delete,
    Subscribe,
    SignOut,
}

/// Requests received, in arrival order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestLog {
    pub current_user: usize,
    pub lists: usize,
    pub inserts: Vec<NewBookmark>,
    pub deletes: Vec<String>,
    pub sign_outs: usize,
}

struct Row {
    bookmark: Bookmark,
    seq: u64,
}

#[derive(Default)]
struct Inner {
    rows: Vec<Row>,
    next_seq: u64,
    user: Option<User>,
    subscribers: HashMap<u64, (String, mpsc::UnboundedSender<ChangeEvent>)>,
    next_subscriber: u64,
    failing: HashSet<Operation>,
    log: RequestLog,
}

impl Inner {
    fn check(&self, op: Operation) -> Result<(), ProviderError> {
        if self.failing.contains(&op) {
            return Err(ProviderError::Rejected(format!("{op:?} failed")));
        }
        Ok(())
    }

    fn notify(&mut self, table: &str, kind: ChangeKind) {
        self.subscribers.retain(|_, (subscribed_table, tx)| {
            if subscribed_table.as_str() != table {
                return true;
            }
            tx.unbounded_send(ChangeEvent {
                table: table.to_string(),
                kind,
            })
            .is_ok()
        });
    }
}

/// The account the demo mode signs in as
pub fn demo_user() -> User {
    User {
        id: "demo-user".to_string(),
        email: Some("demo@example.com".to_string()),
    }
}

/// Cheaply cloneable handle; clones share the same backing store.
#[derive(Clone, Default)]
pub struct InMemoryProvider {
    inner: Rc<RefCell<Inner>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider with a signed-in user
    pub fn with_user(user: User) -> Self {
        let provider = Self::new();
        provider.inner.borrow_mut().user = Some(user);
        provider
    }

    /// Signed-in demo user with a few sample bookmarks
    pub fn demo() -> Self {
        let provider = Self::with_user(demo_user());
        for (title, url) in [
            ("Rust Book", "https://doc.rust-lang.org/book/"),
            ("Dioxus", "https://dioxuslabs.com"),
            ("crates.io", "https://crates.io"),
        ] {
            provider.seed(title, url);
        }
        provider
    }

    /// Insert a row directly, bypassing the request log and change feed
    pub fn seed(&self, title: &str, url: &str) -> Bookmark {
        let mut inner = self.inner.borrow_mut();
        let user_id = inner
            .user
            .as_ref()
            .map(|u| u.id.clone())
            .unwrap_or_default();
        Self::push_row(
            &mut inner,
            NewBookmark {
                title: title.to_string(),
                url: url.to_string(),
                user_id,
            },
        )
    }

    fn push_row(inner: &mut Inner, new: NewBookmark) -> Bookmark {
        let seq = inner.next_seq;
        inner.next_seq += 1;
        let bookmark = Bookmark {
            id: format!("bm-{seq}"),
            title: new.title,
            url: new.url,
            user_id: new.user_id,
            created_at: Utc::now(),
        };
        inner.rows.push(Row {
            bookmark: bookmark.clone(),
            seq,
        });
        bookmark
    }

    pub fn user(&self) -> Option<User> {
        self.inner.borrow().user.clone()
    }

    pub fn set_user(&self, user: Option<User>) {
        self.inner.borrow_mut().user = user;
    }

    /// Make `op` fail (or succeed again) until changed
    pub fn set_failing(&self, op: Operation, failing: bool) {
        let mut inner = self.inner.borrow_mut();
        if failing {
            inner.failing.insert(op);
        } else {
            inner.failing.remove(&op);
        }
    }

    pub fn requests(&self) -> RequestLog {
        self.inner.borrow().log.clone()
    }

    /// Number of change feeds currently open
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Stored rows, newest first
    pub fn rows(&self) -> Vec<Bookmark> {
        let inner = self.inner.borrow();
        let mut rows: Vec<&Row> = inner.rows.iter().collect();
        rows.sort_by(|a, b| {
            b.bookmark
                .created_at
                .cmp(&a.bookmark.created_at)
                .then(b.seq.cmp(&a.seq))
        });
        rows.into_iter().map(|r| r.bookmark.clone()).collect()
    }
}

#[async_trait(?Send)]
impl BookmarkProvider for InMemoryProvider {
    async fn current_user(&self) -> Result<Option<User>, ProviderError> {
        let mut inner = self.inner.borrow_mut();
        inner.log.current_user += 1;
        inner.check(Operation::CurrentUser)?;
        Ok(inner.user.clone())
    }

    async fn list_bookmarks(&self) -> Result<Vec<Bookmark>, ProviderError> {
        {
            let mut inner = self.inner.borrow_mut();
            inner.log.lists += 1;
            inner.check(Operation::List)?;
        }
        Ok(self.rows())
    }

    async fn insert_bookmark(&self, bookmark: NewBookmark) -> Result<(), ProviderError> {
        let mut inner = self.inner.borrow_mut();
        inner.log.inserts.push(bookmark.clone());
        inner.check(Operation::Insert)?;
        let row = Self::push_row(&mut inner, bookmark);
        debug!("Inserted bookmark {}", row.id);
        inner.notify(crate::model::BOOKMARKS_TABLE, ChangeKind::Insert);
        Ok(())
    }

    async fn delete_bookmark(&self, id: &str) -> Result<(), ProviderError> {
        let mut inner = self.inner.borrow_mut();
        inner.log.deletes.push(id.to_string());
        inner.check(Operation::Delete)?;
        inner.rows.retain(|r| r.bookmark.id != id);
        inner.notify(crate::model::BOOKMARKS_TABLE, ChangeKind::Delete);
        Ok(())
    }

    fn subscribe(&self, table: &str) -> Result<Subscription, ProviderError> {
        let mut inner = self.inner.borrow_mut();
        inner.check(Operation::Subscribe)?;
        let id = inner.next_subscriber;
        inner.next_subscriber += 1;
        let (tx, rx) = mpsc::unbounded();
        inner.subscribers.insert(id, (table.to_string(), tx));

        let shared = Rc::downgrade(&self.inner);
        Ok(Subscription::new(rx, move || {
            if let Some(inner) = shared.upgrade() {
                inner.borrow_mut().subscribers.remove(&id);
            }
        }))
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        let mut inner = self.inner.borrow_mut();
        inner.log.sign_outs += 1;
        inner.check(Operation::SignOut)?;
        inner.user = None;
        Ok(())
    }
}
