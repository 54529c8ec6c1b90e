//! Core of the bookmarks app: data model, provider seam, dashboard state
//! machine and confirmation dialog lifecycle. No UI code lives here.

pub mod config;
pub mod dashboard;
pub mod dialog;
pub mod memory;
pub mod modal_lock;
pub mod model;
pub mod provider;
pub mod supabase;

pub use config::{ConfigError, ProviderConfig};
pub use model::{Bookmark, BookmarkDraft, NewBookmark, User, ValidationError, BOOKMARKS_TABLE};
pub use provider::{BookmarkProvider, ChangeEvent, ChangeKind, ProviderError, Subscription};
