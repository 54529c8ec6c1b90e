//! Top navigation bar

use crate::components::icons::{BookmarkIcon, LogOutIcon};
use crate::components::{Button, ButtonSize, ButtonVariant};
use dioxus::prelude::*;

#[component]
pub fn NavBar(email: Option<String>, on_sign_out: EventHandler<()>) -> Element {
    rsx! {
        nav { class: "sticky top-0 z-40 glass-panel border-b border-gray-200/20 dark:border-gray-800/20",
            div { class: "max-w-7xl mx-auto px-4 sm:px-6 lg:px-8",
                div { class: "flex justify-between items-center h-16",
                    div { class: "flex items-center gap-2",
                        div { class: "w-8 h-8 rounded-lg bg-white/20 backdrop-blur-md flex items-center justify-center text-white shadow-inner",
                            BookmarkIcon { class: "w-5 h-5" }
                        }
                        span { class: "text-xl font-bold text-white drop-shadow-md", "Bookmarks" }
                    }
                    div { class: "flex items-center gap-4",
                        if let Some(email) = email {
                            span { class: "text-sm text-white/90 font-medium hidden sm:block drop-shadow-sm",
                                "{email}"
                            }
                        }
                        Button {
                            variant: ButtonVariant::Ghost,
                            size: ButtonSize::Small,
                            onclick: move |_| on_sign_out.call(()),
                            LogOutIcon { class: "w-4 h-4" }
                            "Sign Out"
                        }
                    }
                }
            }
        }
    }
}
