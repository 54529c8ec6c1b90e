use crate::Route;
use dioxus::prelude::*;
use marks_ui::stores::use_modal_lock_provider;

/// Scroll container for every page. Scrolling stops while any dialog holds
/// the modal lock.
#[component]
pub fn AppLayout() -> Element {
    let modal_lock = use_modal_lock_provider();
    let overflow = if modal_lock.read().is_locked() {
        "overflow-hidden"
    } else {
        "overflow-y-auto"
    };

    rsx! {
        div { class: "h-screen {overflow}", Outlet::<Route> {} }
    }
}
