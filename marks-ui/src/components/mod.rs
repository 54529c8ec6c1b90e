//! View components

pub mod add_bookmark_form;
pub mod bookmark_card;
pub mod button;
pub mod confirm_dialog;
pub mod dashboard;
pub mod helpers;
pub mod icons;
pub mod nav_bar;
pub mod text_input;
pub mod toast;

pub use add_bookmark_form::AddBookmarkForm;
pub use bookmark_card::BookmarkCard;
pub use button::{Button, ButtonSize, ButtonVariant, ChromelessButton};
pub use confirm_dialog::ConfirmDialogView;
pub use dashboard::{DashboardView, EMPTY_STATE_MESSAGE};
pub use helpers::{LoadingSpinner, PageContainer};
pub use icons::{
    AlertTriangleIcon, BookmarkIcon, CheckIcon, ExternalLinkIcon, InfoIcon, LinkIcon, LoaderIcon,
    LogOutIcon, PlusIcon, TrashIcon, XIcon,
};
pub use nav_bar::NavBar;
pub use text_input::{InputKind, TextInput};
pub use toast::NotificationStack;
