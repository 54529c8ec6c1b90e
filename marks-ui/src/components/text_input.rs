//! Text input

use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputKind {
    #[default]
    Text,
    Url,
}

impl InputKind {
    fn as_attr(self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Url => "url",
        }
    }
}

/// Single-line input reporting every keystroke
#[component]
pub fn TextInput(
    value: String,
    on_input: EventHandler<String>,
    #[props(default)] kind: InputKind,
    #[props(default)] placeholder: Option<&'static str>,
    #[props(default)] aria_label: Option<&'static str>,
    #[props(default)] disabled: bool,
    #[props(default)] required: bool,
) -> Element {
    let disabled_class = if disabled {
        "opacity-50 cursor-not-allowed"
    } else {
        ""
    };

    rsx! {
        input {
            r#type: kind.as_attr(),
            class: "input-field flex-1 {disabled_class}",
            value: "{value}",
            placeholder,
            aria_label,
            disabled,
            required,
            oninput: move |e| on_input.call(e.value()),
        }
    }
}
