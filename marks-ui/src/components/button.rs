//! Buttons

use dioxus::prelude::*;

/// Unstyled button carrying the accessibility attributes and the disabled
/// guard. [`Button`] builds on it; icon-only controls use it directly.
#[component]
pub fn ChromelessButton(
    #[props(default)] disabled: bool,
    #[props(default)] class: Option<String>,
    #[props(default)] r#type: Option<&'static str>,
    #[props(default)] title: Option<String>,
    #[props(default)] aria_label: Option<String>,
    #[props(default)] onclick: EventHandler<MouseEvent>,
    children: Element,
) -> Element {
    rsx! {
        button {
            class: class.as_deref(),
            r#type: r#type.unwrap_or("button"),
            disabled,
            title: title.as_deref(),
            aria_label: aria_label.as_deref(),
            aria_disabled: if disabled { Some("true") } else { None },
            onclick: move |e| {
                if !disabled {
                    onclick.call(e);
                }
            },
            {children}
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ButtonVariant {
    /// Blue gradient, the main action on a surface
    Primary,
    /// Outlined, for cancel and other secondary actions
    Secondary,
    /// Red gradient, for destructive actions
    Danger,
    /// Text only
    Ghost,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ButtonSize {
    Small,
    Medium,
}

#[component]
pub fn Button(
    variant: ButtonVariant,
    size: ButtonSize,
    #[props(default)] disabled: bool,
    #[props(default)] class: Option<String>,
    #[props(default)] r#type: Option<&'static str>,
    #[props(default)] onclick: EventHandler<MouseEvent>,
    children: Element,
) -> Element {
    let sizing = match size {
        ButtonSize::Small => "px-3 py-1.5 text-sm rounded-lg",
        ButtonSize::Medium => "px-4 py-2.5 rounded-xl",
    };

    let look = match variant {
        ButtonVariant::Primary => {
            "text-white font-semibold shadow-lg bg-gradient-to-r from-blue-600 to-blue-500 hover:from-blue-700 hover:to-blue-600 active:scale-95"
        }
        ButtonVariant::Secondary => {
            "font-medium border border-gray-200 dark:border-gray-700 text-gray-700 dark:text-gray-300 hover:bg-gray-50 dark:hover:bg-gray-700"
        }
        ButtonVariant::Danger => {
            "text-white font-semibold shadow-lg bg-gradient-to-r from-red-600 to-red-500 hover:from-red-700 hover:to-red-600 active:scale-95"
        }
        ButtonVariant::Ghost => "font-medium text-white/80 hover:text-white",
    };

    let base = "inline-flex items-center justify-center gap-2 transition-all disabled:opacity-50 disabled:cursor-not-allowed";
    let class = match &class {
        Some(extra) => format!("{base} {sizing} {look} {extra}"),
        None => format!("{base} {sizing} {look}"),
    };

    rsx! {
        ChromelessButton {
            disabled,
            class: Some(class),
            r#type,
            onclick,
            {children}
        }
    }
}
