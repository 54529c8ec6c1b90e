//! Dashboard view - pure rendering, no data fetching
//!
//! Renders a [`DashboardModel`] and reports every intent through a
//! callback. The web app owns the model and performs the requests.

use crate::components::icons::BookmarkIcon;
use crate::components::{
    AddBookmarkForm, BookmarkCard, ConfirmDialogView, LoadingSpinner, NavBar, NotificationStack,
    PageContainer,
};
use dioxus::prelude::*;
use marks_core::dashboard::DashboardModel;
use marks_core::dialog::Severity;

pub const EMPTY_STATE_MESSAGE: &str = "No bookmarks yet. Add your first one!";

#[component]
pub fn DashboardView(
    state: ReadSignal<DashboardModel>,
    on_title_input: EventHandler<String>,
    on_url_input: EventHandler<String>,
    on_submit: EventHandler<()>,
    on_request_delete: EventHandler<String>,
    on_dismiss_delete: EventHandler<()>,
    on_confirm_delete: EventHandler<()>,
    on_request_sign_out: EventHandler<()>,
    on_dismiss_sign_out: EventHandler<()>,
    on_confirm_sign_out: EventHandler<()>,
    on_dismiss_notification: EventHandler<u64>,
) -> Element {
    let delete_open = use_memo(move || state.read().delete_request.open);
    let sign_out_open = use_memo(move || state.read().sign_out_request.open);
    let delete_open: ReadSignal<bool> = delete_open.into();
    let sign_out_open: ReadSignal<bool> = sign_out_open.into();

    let model = state.read();
    let email = model.user.as_ref().and_then(|u| u.email.clone());
    let bookmarks = model.bookmarks.clone();
    let notifications = model.notifications.items().to_vec();
    let (title, url) = (model.title.clone(), model.url.clone());
    let (loaded, is_adding) = (model.loaded, model.is_adding);
    drop(model);

    rsx! {
        div { class: "min-h-screen transition-colors duration-200",
            NavBar { email, on_sign_out: on_request_sign_out }
            PageContainer {
                AddBookmarkForm {
                    title,
                    url,
                    is_adding,
                    on_title_input,
                    on_url_input,
                    on_submit,
                }
                div { class: "grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4 gap-6",
                    if !loaded {
                        LoadingSpinner {}
                    } else if bookmarks.is_empty() {
                        EmptyState {}
                    } else {
                        for bookmark in bookmarks {
                            BookmarkCard {
                                key: "{bookmark.id}",
                                bookmark: bookmark.clone(),
                                on_delete: on_request_delete,
                            }
                        }
                    }
                }
            }
            ConfirmDialogView {
                is_open: delete_open,
                title: "Delete Bookmark".to_string(),
                message: "Are you sure you want to delete this bookmark? This action cannot be undone."
                    .to_string(),
                severity: Severity::Danger,
                confirm_label: "Delete".to_string(),
                on_confirm: on_confirm_delete,
                on_cancel: on_dismiss_delete,
            }
            ConfirmDialogView {
                is_open: sign_out_open,
                title: "Sign Out".to_string(),
                message: "Are you sure you want to sign out of your account?".to_string(),
                severity: Severity::Info,
                confirm_label: "Sign Out".to_string(),
                on_confirm: on_confirm_sign_out,
                on_cancel: on_dismiss_sign_out,
            }
            NotificationStack { notifications, on_dismiss: on_dismiss_notification }
        }
    }
}

#[component]
fn EmptyState() -> Element {
    rsx! {
        div { class: "col-span-full text-center py-20 text-white/80",
            div { class: "mb-4 inline-flex items-center justify-center w-16 h-16 rounded-full bg-white/10 backdrop-blur-sm",
                BookmarkIcon { class: "w-8 h-8 opacity-70" }
            }
            p { class: "text-lg font-medium drop-shadow-sm", "{EMPTY_STATE_MESSAGE}" }
        }
    }
}
