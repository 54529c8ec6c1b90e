//! App-wide UI state shared through context

use dioxus::prelude::*;
use marks_core::modal_lock::ModalLock;

/// Install the shared scroll lock. Call once near the root of the app.
pub fn use_modal_lock_provider() -> Signal<ModalLock> {
    use_context_provider(|| Signal::new(ModalLock::default()))
}

/// The scroll lock installed by [`use_modal_lock_provider`].
///
/// Falls back to a component-local lock when none was provided, which keeps
/// dialogs usable in isolation (the page just won't react to it).
pub fn use_modal_lock() -> Signal<ModalLock> {
    let provided = try_use_context::<Signal<ModalLock>>();
    let local = use_signal(ModalLock::default);
    provided.unwrap_or(local)
}
