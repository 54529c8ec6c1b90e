//! Dashboard state, notifications and provider orchestration

pub mod controller;
pub mod notifications;
pub mod state;

pub use controller::{AddOutcome, DashboardController, ModelHandle};
pub use notifications::{ExpiryTracker, Notification, NotificationKind, Notifications, NOTIFICATION_TTL_MS};
pub use state::{DashboardModel, DialogRequest, SubmitBlocked};
