use dioxus::prelude::*;

/// Centered main column below the nav bar
#[component]
pub fn PageContainer(children: Element) -> Element {
    rsx! {
        main { class: "max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8", {children} }
    }
}
