use dioxus::prelude::*;

/// Centered spinner with a caption
#[component]
pub fn LoadingSpinner(#[props(default = "Loading bookmarks...".to_string())] message: String) -> Element {
    rsx! {
        div {
            class: "col-span-full flex justify-center items-center py-20 text-white/80",
            role: "status",
            div { class: "h-10 w-10 border-2 border-white border-t-transparent rounded-full animate-spin" }
            p { class: "ml-4 font-medium drop-shadow-sm", "{message}" }
        }
    }
}
