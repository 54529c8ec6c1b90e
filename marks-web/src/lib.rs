//! marks web app: routes, pages and the browser-side wiring of the core
//! dashboard to Supabase (or to the in-memory demo backend).

pub mod config;
pub mod pages;
pub mod realtime;
pub mod services;
pub mod storage;

use dioxus::prelude::*;
use pages::{AppLayout, Dashboard, Landing};
use services::Backend;

pub const FAVICON: Asset = asset!("/assets/favicon.svg");
pub const MAIN_CSS: Asset = asset!("/assets/main.css");
pub const TAILWIND_CSS: Asset = asset!("/assets/tailwind.css");

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(AppLayout)]
    #[route("/")]
    Landing {},
    #[route("/dashboard")]
    Dashboard {},
}

#[component]
pub fn App() -> Element {
    use_context_provider(|| Signal::new(Backend::from_build_config()));

    rsx! {
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: TAILWIND_CSS }
        Router::<Route> {}
    }
}
