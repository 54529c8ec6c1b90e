//! Toast notifications, stacked in the bottom-right corner

use crate::components::icons::{AlertTriangleIcon, CheckIcon, XIcon};
use crate::components::ChromelessButton;
use dioxus::prelude::*;
use marks_core::dashboard::{Notification, NotificationKind};

#[component]
pub fn NotificationStack(notifications: Vec<Notification>, on_dismiss: EventHandler<u64>) -> Element {
    rsx! {
        div {
            class: "fixed bottom-4 right-4 z-[60] flex flex-col gap-2 max-w-md",
            aria_live: "polite",
            for notification in notifications {
                Toast {
                    key: "{notification.id}",
                    notification: notification.clone(),
                    on_dismiss,
                }
            }
        }
    }
}

#[component]
fn Toast(notification: Notification, on_dismiss: EventHandler<u64>) -> Element {
    let id = notification.id;
    let tone = match notification.kind {
        NotificationKind::Success => "bg-green-600",
        NotificationKind::Error => "bg-red-600",
    };

    rsx! {
        div {
            class: "{tone} text-white px-5 py-3 rounded-xl shadow-lg flex items-center gap-3",
            role: if notification.kind == NotificationKind::Error { "alert" } else { "status" },
            match notification.kind {
                NotificationKind::Success => rsx! {
                    CheckIcon { class: "w-4 h-4 shrink-0" }
                },
                NotificationKind::Error => rsx! {
                    AlertTriangleIcon { class: "w-4 h-4 shrink-0" }
                },
            }
            span { class: "flex-1", "{notification.message}" }
            ChromelessButton {
                class: Some("text-white/80 hover:text-white".to_string()),
                aria_label: Some("Dismiss".to_string()),
                onclick: move |_| on_dismiss.call(id),
                XIcon { class: "w-4 h-4" }
            }
        }
    }
}
