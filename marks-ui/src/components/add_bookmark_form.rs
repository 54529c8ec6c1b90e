//! Form for adding a bookmark

use crate::components::icons::{LoaderIcon, PlusIcon};
use crate::components::{Button, ButtonSize, ButtonVariant, InputKind, TextInput};
use dioxus::prelude::*;

#[component]
pub fn AddBookmarkForm(
    title: String,
    url: String,
    is_adding: bool,
    on_title_input: EventHandler<String>,
    on_url_input: EventHandler<String>,
    on_submit: EventHandler<()>,
) -> Element {
    rsx! {
        section { class: "mb-10 max-w-2xl mx-auto",
            div { class: "glass-panel p-6 rounded-2xl shadow-lg",
                h2 { class: "text-lg font-semibold mb-4 text-gray-800 dark:text-white",
                    "Add New Bookmark"
                }
                form {
                    class: "flex flex-col sm:flex-row gap-3",
                    onsubmit: move |evt| {
                        evt.prevent_default();
                        on_submit.call(());
                    },
                    TextInput {
                        value: title,
                        on_input: on_title_input,
                        placeholder: "Title (e.g., My Portfolio)",
                        aria_label: "Title",
                        required: true,
                    }
                    TextInput {
                        value: url,
                        on_input: on_url_input,
                        kind: InputKind::Url,
                        placeholder: "URL (https://...)",
                        aria_label: "URL",
                        required: true,
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        size: ButtonSize::Medium,
                        r#type: "submit",
                        disabled: is_adding,
                        class: Some("whitespace-nowrap".to_string()),
                        if is_adding {
                            LoaderIcon { class: "w-4 h-4 animate-spin" }
                            span { class: "sr-only", "Adding" }
                        } else {
                            PlusIcon { class: "w-4 h-4" }
                            "Add"
                        }
                    }
                }
            }
        }
    }
}
