//! Dashboard view state and its transitions
//!
//! Every user intent is split into a synchronous `begin_*` step (guards and
//! validation, decides whether a request goes out) and a `finish_*` step that
//! folds the provider's answer back in. Nothing here talks to the provider.

use super::notifications::{
    Notifications, MSG_ADDED, MSG_ADD_FAILED, MSG_DELETED, MSG_DELETE_FAILED, MSG_LOAD_FAILED,
};
use crate::model::{Bookmark, BookmarkDraft, User, ValidationError};
use crate::provider::ProviderError;
use tracing::{debug, warn};

/// A destructive action waiting behind a confirm dialog
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DialogRequest {
    pub open: bool,
    /// Row the action applies to; `None` for actions without a target
    pub target: Option<String>,
    /// The confirmed request is still running
    pub in_flight: bool,
}

impl DialogRequest {
    fn open_for(&mut self, target: Option<String>) {
        self.open = true;
        self.target = target;
    }

    fn dismiss(&mut self) {
        self.open = false;
        self.target = None;
    }
}

/// Why a form submission never left the client
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// A previous submission is still in flight
    Busy,
    Invalid(ValidationError),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DashboardModel {
    pub user: Option<User>,
    /// Result of the most recently completed fetch, in provider order
    pub bookmarks: Vec<Bookmark>,
    /// At least one fetch has completed
    pub loaded: bool,
    pub title: String,
    pub url: String,
    pub is_adding: bool,
    pub delete_request: DialogRequest,
    pub sign_out_request: DialogRequest,
    pub notifications: Notifications,
}

impl DashboardModel {
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    pub fn apply_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    /// Replace the list with a completed fetch. No client-side reordering.
    pub fn apply_fetch(&mut self, result: Result<Vec<Bookmark>, ProviderError>) {
        self.loaded = true;
        match result {
            Ok(bookmarks) => self.bookmarks = bookmarks,
            Err(e) => {
                warn!("Bookmark fetch failed: {e}");
                self.notifications.error(MSG_LOAD_FAILED);
            }
        }
    }

    pub fn begin_add(&mut self) -> Result<BookmarkDraft, SubmitBlocked> {
        if self.is_adding {
            return Err(SubmitBlocked::Busy);
        }
        let draft = BookmarkDraft::parse(&self.title, &self.url).map_err(|e| {
            debug!("Add rejected: {e}");
            SubmitBlocked::Invalid(e)
        })?;
        self.is_adding = true;
        Ok(draft)
    }

    /// Returns `true` when the list should be refreshed
    pub fn finish_add(&mut self, result: Result<(), ProviderError>) -> bool {
        self.is_adding = false;
        match result {
            Ok(()) => {
                self.title.clear();
                self.url.clear();
                self.notifications.success(MSG_ADDED);
                true
            }
            Err(e) => {
                warn!("Add bookmark failed: {e}");
                self.notifications.error(MSG_ADD_FAILED);
                false
            }
        }
    }

    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.delete_request.open_for(Some(id.into()));
    }

    /// Close the delete dialog and forget the target
    pub fn dismiss_delete(&mut self) {
        self.delete_request.dismiss();
    }

    /// The id to delete, or `None` if there is nothing to confirm or a delete
    /// is already running
    pub fn begin_delete(&mut self) -> Option<String> {
        let request = &mut self.delete_request;
        if !request.open || request.in_flight {
            return None;
        }
        let target = request.target.clone()?;
        request.in_flight = true;
        Some(target)
    }

    /// Returns `true` when the list should be refreshed. On failure the
    /// dialog stays open with its target so the user can retry.
    ///
    /// `id` is the row that was deleted. The dialog is only closed if it
    /// still targets that row; one reopened for another row stays as is.
    pub fn finish_delete(&mut self, id: &str, result: Result<(), ProviderError>) -> bool {
        self.delete_request.in_flight = false;
        let still_targeted = self.delete_request.target.as_deref() == Some(id);
        match result {
            Ok(()) => {
                if still_targeted {
                    self.delete_request.dismiss();
                }
                self.notifications.success(MSG_DELETED);
                true
            }
            Err(e) => {
                warn!("Delete bookmark failed: {e}");
                self.notifications.error(MSG_DELETE_FAILED);
                false
            }
        }
    }

    pub fn request_sign_out(&mut self) {
        self.sign_out_request.open_for(None);
    }

    pub fn dismiss_sign_out(&mut self) {
        self.sign_out_request.dismiss();
    }

    /// Returns `false` if the dialog is closed or a sign-out is running
    pub fn begin_sign_out(&mut self) -> bool {
        let request = &mut self.sign_out_request;
        if !request.open || request.in_flight {
            return false;
        }
        request.in_flight = true;
        true
    }

    pub fn finish_sign_out(&mut self) {
        self.sign_out_request.in_flight = false;
        self.sign_out_request.dismiss();
        self.user = None;
    }

    pub fn dismiss_notification(&mut self, id: u64) {
        self.notifications.dismiss(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::notifications::NotificationKind;
    use chrono::{TimeZone, Utc};

    fn bookmark(id: &str, secs: i64) -> Bookmark {
        Bookmark {
            id: id.into(),
            title: format!("title {id}"),
            url: format!("https://{id}.example"),
            user_id: "u1".into(),
            created_at: Utc.timestamp_opt(secs, 0).unwrap(),
        }
    }

    fn failure() -> ProviderError {
        ProviderError::Rejected("boom".into())
    }

    #[test]
    fn begin_add_refuses_blank_fields() {
        let mut model = DashboardModel::default();
        model.set_title("   ");
        model.set_url("https://example.com");

        assert_eq!(
            model.begin_add(),
            Err(SubmitBlocked::Invalid(ValidationError::EmptyTitle))
        );
        assert!(!model.is_adding);
    }

    #[test]
    fn begin_add_is_guarded_while_in_flight() {
        let mut model = DashboardModel::default();
        model.set_title("Example");
        model.set_url("https://example.com");

        assert!(model.begin_add().is_ok());
        assert_eq!(model.begin_add(), Err(SubmitBlocked::Busy));
    }

    #[test]
    fn successful_add_clears_fields_and_asks_for_refresh() {
        let mut model = DashboardModel::default();
        model.set_title("Example");
        model.set_url("https://example.com");
        model.begin_add().unwrap();

        assert!(model.finish_add(Ok(())));
        assert!(model.title.is_empty());
        assert!(model.url.is_empty());
        assert!(!model.is_adding);
        assert_eq!(
            model.notifications.latest().unwrap().message,
            "Bookmark added successfully"
        );
    }

    #[test]
    fn failed_add_keeps_fields() {
        let mut model = DashboardModel::default();
        model.set_title("Example");
        model.set_url("https://example.com");
        model.begin_add().unwrap();

        assert!(!model.finish_add(Err(failure())));
        assert_eq!(model.title, "Example");
        assert_eq!(model.url, "https://example.com");
        assert_eq!(
            model.notifications.latest().unwrap().kind,
            NotificationKind::Error
        );
    }

    #[test]
    fn dismissing_delete_clears_target() {
        let mut model = DashboardModel::default();
        model.request_delete("bm-1");
        model.dismiss_delete();

        assert_eq!(model.delete_request, DialogRequest::default());
        assert_eq!(model.begin_delete(), None);
    }

    #[test]
    fn failed_delete_keeps_dialog_and_target_for_retry() {
        let mut model = DashboardModel::default();
        model.request_delete("bm-1");
        assert_eq!(model.begin_delete().as_deref(), Some("bm-1"));

        assert!(!model.finish_delete("bm-1", Err(failure())));
        assert!(model.delete_request.open);
        assert_eq!(model.delete_request.target.as_deref(), Some("bm-1"));
        assert_eq!(model.begin_delete().as_deref(), Some("bm-1"));
    }

    #[test]
    fn second_confirm_while_deleting_is_ignored() {
        let mut model = DashboardModel::default();
        model.request_delete("bm-1");
        model.begin_delete();

        assert_eq!(model.begin_delete(), None);
    }

    #[test]
    fn successful_delete_closes_dialog() {
        let mut model = DashboardModel::default();
        model.request_delete("bm-1");
        model.begin_delete();

        assert!(model.finish_delete("bm-1", Ok(())));
        assert!(!model.delete_request.open);
        assert_eq!(model.delete_request.target, None);
    }

    #[test]
    fn late_delete_result_leaves_newer_dialog_open() {
        let mut model = DashboardModel::default();
        model.request_delete("bm-a");
        assert_eq!(model.begin_delete().as_deref(), Some("bm-a"));
        model.dismiss_delete();
        model.request_delete("bm-b");
        assert_eq!(model.begin_delete(), None);

        assert!(model.finish_delete("bm-a", Ok(())));
        assert!(model.delete_request.open);
        assert!(!model.delete_request.in_flight);
        assert_eq!(model.delete_request.target.as_deref(), Some("bm-b"));
        assert_eq!(model.begin_delete().as_deref(), Some("bm-b"));
    }

    #[test]
    fn latest_completed_fetch_wins() {
        let mut model = DashboardModel::default();
        let newer = vec![bookmark("b", 20), bookmark("a", 10)];
        let older = vec![bookmark("a", 10)];

        model.apply_fetch(Ok(newer));
        model.apply_fetch(Ok(older.clone()));

        assert_eq!(model.bookmarks, older);
    }

    #[test]
    fn failed_fetch_keeps_previous_list() {
        let mut model = DashboardModel::default();
        model.apply_fetch(Ok(vec![bookmark("a", 10)]));
        model.apply_fetch(Err(failure()));

        assert_eq!(model.bookmarks.len(), 1);
        assert!(model.loaded);
    }

    #[test]
    fn sign_out_is_guarded_and_requires_open_dialog() {
        let mut model = DashboardModel::default();
        assert!(!model.begin_sign_out());

        model.request_sign_out();
        assert!(model.begin_sign_out());
        assert!(!model.begin_sign_out());
    }
}
