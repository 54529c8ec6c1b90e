//! Entry page: sign-in, and the landing point of the OAuth redirect

use crate::services::Backend;
use crate::{storage, Route};
use chrono::Utc;
use dioxus::prelude::*;
use marks_core::supabase::{authorize_url, parse_redirect_fragment};
use marks_ui::{BookmarkIcon, Button, ButtonSize, ButtonVariant};
use tracing::{info, warn};
use wasm_bindgen::JsValue;

fn current_fragment() -> Option<String> {
    let hash = web_sys::window()?.location().hash().ok()?;
    (!hash.is_empty()).then_some(hash)
}

/// Drop the tokens from the address bar without adding a history entry
fn clear_fragment() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let path = window.location().pathname().unwrap_or_else(|_| "/".into());
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&path));
    }
}

fn origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

#[component]
pub fn Landing() -> Element {
    let mut backend: Signal<Backend> = use_context();
    let nav = navigator();
    let mut error = use_signal(|| None::<String>);

    use_effect(move || {
        let Backend::Supabase { config, .. } = backend.peek().clone() else {
            return;
        };
        if let Some(fragment) = current_fragment() {
            match parse_redirect_fragment(&fragment, Utc::now()) {
                Ok(Some(session)) => {
                    info!("Signed in via redirect");
                    storage::save_session(&session);
                    clear_fragment();
                    backend.set(Backend::supabase(config, Some(session)));
                    nav.replace(Route::Dashboard {});
                    return;
                }
                Ok(None) => {}
                Err(e) => {
                    warn!("Sign-in failed: {e}");
                    clear_fragment();
                    error.set(Some(e.to_string()));
                    return;
                }
            }
        }
        if backend.peek().is_signed_in() {
            nav.replace(Route::Dashboard {});
        }
    });

    let is_demo = backend.read().is_demo();
    let on_start = move |_: MouseEvent| {
        let current = backend.peek().clone();
        match current {
            Backend::Demo(_) => {
                current.enter_demo();
                nav.push(Route::Dashboard {});
            }
            Backend::Supabase { config, .. } => {
                let Some(origin) = origin() else {
                    return;
                };
                let url = authorize_url(&config, &format!("{origin}/"));
                if let Some(window) = web_sys::window() {
                    if window.location().set_href(&url).is_err() {
                        error.set(Some("Could not open the sign-in page".to_string()));
                    }
                }
            }
        }
    };

    rsx! {
        div { class: "min-h-screen flex items-center justify-center p-4",
            div { class: "glass-panel w-full max-w-md p-8 rounded-2xl shadow-2xl text-center",
                div { class: "mx-auto mb-6 w-16 h-16 rounded-2xl bg-white/20 flex items-center justify-center text-white",
                    BookmarkIcon { class: "w-8 h-8" }
                }
                h1 { class: "text-3xl font-bold text-white drop-shadow-md mb-2", "Bookmarks" }
                p { class: "text-white/80 mb-8", "Save your links and see them update live on every device." }
                if let Some(message) = error() {
                    p {
                        class: "mb-6 px-4 py-3 rounded-xl bg-red-600/90 text-white text-sm",
                        role: "alert",
                        "{message}"
                    }
                }
                Button {
                    variant: ButtonVariant::Primary,
                    size: ButtonSize::Medium,
                    class: Some("w-full".to_string()),
                    onclick: on_start,
                    if is_demo {
                        "Try the demo"
                    } else {
                        "Sign in with Google"
                    }
                }
            }
        }
    }
}
