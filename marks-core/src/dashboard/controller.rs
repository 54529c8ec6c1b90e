//! Dashboard orchestration against a provider
//!
//! The controller does not own the state. It writes through a
//! [`ModelHandle`], which lets the web app keep the model in a reactive
//! signal while tests keep it in a plain `RefCell`. A handle whose view has
//! been torn down refuses updates, and every operation stops there.

use super::state::{DashboardModel, SubmitBlocked};
use crate::model::BOOKMARKS_TABLE;
use crate::provider::{BookmarkProvider, ProviderError, Subscription};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Shared access to a [`DashboardModel`]
pub trait ModelHandle: Clone + 'static {
    /// Mutate the model. Returns `None` if the owning view is gone.
    fn update<R>(&self, f: impl FnOnce(&mut DashboardModel) -> R) -> Option<R>;

    /// Read the model without subscribing to changes
    fn read<R>(&self, f: impl FnOnce(&DashboardModel) -> R) -> Option<R>;
}

impl ModelHandle for Rc<RefCell<DashboardModel>> {
    fn update<R>(&self, f: impl FnOnce(&mut DashboardModel) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }

    fn read<R>(&self, f: impl FnOnce(&DashboardModel) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }
}

/// Result of a form submission
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    Blocked(SubmitBlocked),
    Added,
    Failed,
}

#[derive(Clone)]
pub struct DashboardController<M: ModelHandle> {
    provider: Rc<dyn BookmarkProvider>,
    model: M,
}

impl<M: ModelHandle> DashboardController<M> {
    pub fn new(provider: Rc<dyn BookmarkProvider>, model: M) -> Self {
        Self { provider, model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// First render: user identity and the list, fetched concurrently
    pub async fn load(&self) {
        let (user, bookmarks) = futures::join!(
            self.provider.current_user(),
            self.provider.list_bookmarks()
        );
        let user = user.unwrap_or_else(|e| {
            warn!("Could not read current user: {e}");
            None
        });
        info!(
            "Dashboard loaded (signed in: {})",
            user.as_ref().map(|u| u.id.as_str()).unwrap_or("no")
        );
        self.model.update(|m| {
            m.apply_user(user);
            m.apply_fetch(bookmarks);
        });
    }

    /// Re-read the whole list from the provider
    pub async fn refresh(&self) {
        let result = self.provider.list_bookmarks().await;
        if let Ok(list) = &result {
            debug!("Fetched {} bookmarks", list.len());
        }
        self.model.update(|m| m.apply_fetch(result));
    }

    /// Open the change feed for the bookmarks table
    pub fn subscribe(&self) -> Result<Subscription, ProviderError> {
        self.provider.subscribe(BOOKMARKS_TABLE)
    }

    /// Refresh on every change notification until the feed closes or the
    /// view goes away
    pub async fn watch(&self, mut subscription: Subscription) {
        while let Some(event) = subscription.next().await {
            debug!("Realtime {:?} on {}", event.kind, event.table);
            if self.model.read(|_| ()).is_none() {
                break;
            }
            self.refresh().await;
        }
        debug!("Realtime feed closed");
    }

    pub async fn submit_add(&self) -> AddOutcome {
        let draft = match self.model.update(|m| m.begin_add()) {
            Some(Ok(draft)) => draft,
            Some(Err(blocked)) => return AddOutcome::Blocked(blocked),
            None => return AddOutcome::Failed,
        };

        let result = match self.provider.current_user().await {
            Ok(Some(user)) => {
                self.provider
                    .insert_bookmark(draft.into_new_bookmark(user.id))
                    .await
            }
            Ok(None) => Err(ProviderError::NotAuthenticated),
            Err(e) => Err(e),
        };
        let added = result.is_ok();

        match self.model.update(|m| m.finish_add(result)) {
            Some(true) => self.refresh().await,
            Some(false) => {}
            None => return AddOutcome::Failed,
        }
        if added {
            AddOutcome::Added
        } else {
            AddOutcome::Failed
        }
    }

    pub fn request_delete(&self, id: &str) {
        self.model.update(|m| m.request_delete(id));
    }

    pub fn dismiss_delete(&self) {
        self.model.update(|m| m.dismiss_delete());
    }

    pub async fn confirm_delete(&self) {
        let Some(Some(id)) = self.model.update(|m| m.begin_delete()) else {
            return;
        };
        info!("Deleting bookmark {id}");
        let result = self.provider.delete_bookmark(&id).await;
        if let Some(true) = self.model.update(|m| m.finish_delete(&id, result)) {
            self.refresh().await;
        }
    }

    pub fn request_sign_out(&self) {
        self.model.update(|m| m.request_sign_out());
    }

    pub fn dismiss_sign_out(&self) {
        self.model.update(|m| m.dismiss_sign_out());
    }

    /// Sign out with the provider. Returns `true` when the caller should
    /// navigate to the entry route, which it must do whether or not the
    /// provider call succeeded.
    pub async fn confirm_sign_out(&self) -> bool {
        if self.model.update(|m| m.begin_sign_out()) != Some(true) {
            return false;
        }
        if let Err(e) = self.provider.sign_out().await {
            warn!("Sign out failed: {e}");
        }
        self.model.update(|m| m.finish_sign_out());
        true
    }

    pub fn dismiss_notification(&self, id: u64) {
        self.model.update(|m| m.dismiss_notification(id));
    }
}
