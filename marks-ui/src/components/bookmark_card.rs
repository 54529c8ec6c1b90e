//! One bookmark in the grid

use crate::components::icons::{ExternalLinkIcon, LinkIcon, TrashIcon};
use crate::components::ChromelessButton;
use dioxus::prelude::*;
use marks_core::Bookmark;

#[component]
pub fn BookmarkCard(bookmark: Bookmark, on_delete: EventHandler<String>) -> Element {
    let id = bookmark.id.clone();

    rsx! {
        article { class: "group relative bg-white dark:bg-gray-800 rounded-2xl p-6 shadow-md hover:shadow-xl transition-all duration-300 hover:-translate-y-1 flex flex-col justify-between h-full border border-gray-100 dark:border-gray-700 overflow-hidden",
            div { class: "absolute top-0 left-0 w-full h-1 bg-gradient-to-r from-blue-500 to-purple-500 scale-x-0 group-hover:scale-x-100 transition-transform duration-300 origin-left" }
            div {
                div { class: "flex items-start justify-between mb-4",
                    div { class: "w-10 h-10 rounded-full bg-blue-50 dark:bg-blue-900/20 flex items-center justify-center text-blue-600 dark:text-blue-400 mb-2",
                        LinkIcon { class: "w-6 h-6" }
                    }
                    ChromelessButton {
                        class: Some(
                            "p-2 rounded-full hover:bg-red-50 dark:hover:bg-red-900/20 text-gray-400 hover:text-red-500 transition-colors"
                                .to_string(),
                        ),
                        title: Some("Delete Bookmark".to_string()),
                        aria_label: Some(format!("Delete {}", bookmark.title)),
                        onclick: move |_| on_delete.call(id.clone()),
                        TrashIcon { class: "w-5 h-5" }
                    }
                }
                h3 {
                    class: "text-lg font-bold text-gray-900 dark:text-white mb-2 line-clamp-2 leading-tight",
                    title: "{bookmark.title}",
                    "{bookmark.title}"
                }
                p { class: "text-sm text-gray-500 dark:text-gray-400 truncate mb-6 font-medium",
                    "{bookmark.url}"
                }
            }
            a {
                href: "{bookmark.url}",
                target: "_blank",
                rel: "noopener noreferrer",
                class: "w-full inline-flex items-center justify-center gap-2 px-4 py-2.5 text-sm font-semibold text-white bg-gradient-to-r from-blue-600 to-blue-500 hover:from-blue-700 hover:to-blue-600 rounded-xl shadow-sm transition-all duration-200",
                "Visit Website"
                ExternalLinkIcon { class: "w-4 h-4" }
            }
        }
    }
}
