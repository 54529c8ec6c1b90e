//! Confirmation dialog
//!
//! The lifecycle lives in [`DialogMachine`]; this component feeds it the
//! caller's `is_open` flag and carries out the effects it returns:
//!
//! - the Escape `keydown` listener on `window` is held in a signal and
//!   removed by dropping it
//! - the page scroll lock is a token in the shared [`ModalLock`]
//! - each close schedules its own unmount, tagged with the exit epoch so a
//!   re-open makes the pending unmount a no-op
//!
//! Anything still held when the component goes away is released in
//! `use_drop`.

use crate::components::{AlertTriangleIcon, Button, ButtonSize, ButtonVariant, InfoIcon};
use crate::stores::use_modal_lock;
use crate::utils::sleep_ms;
use crate::wasm_utils::{listen_for_keys, KeyListener};
use dioxus::prelude::*;
use marks_core::dialog::{ClickTarget, DialogEffect, DialogMachine, Severity, EXIT_GRACE_MS};
use marks_core::modal_lock::{next_owner_id, ModalLock};
use tracing::debug;

/// Everything an effect may touch. All fields are `Copy` handles.
#[derive(Clone, Copy)]
struct DialogHandles {
    machine: Signal<DialogMachine>,
    escape: Signal<Option<KeyListener>>,
    modal_lock: Signal<ModalLock>,
    owner: u64,
    on_cancel: EventHandler<()>,
}

fn apply_effects(handles: DialogHandles, effects: Vec<DialogEffect>) {
    let DialogHandles {
        machine,
        mut escape,
        mut modal_lock,
        owner,
        on_cancel,
    } = handles;

    for effect in effects {
        match effect {
            DialogEffect::AttachEscape => {
                let listener = listen_for_keys(move |key| {
                    let dismiss = machine
                        .try_peek()
                        .is_ok_and(|m| m.key_dismisses(&key));
                    if dismiss {
                        on_cancel.call(());
                    }
                });
                if let Ok(mut slot) = escape.try_write() {
                    *slot = listener;
                }
            }
            DialogEffect::DetachEscape => {
                if let Ok(mut slot) = escape.try_write() {
                    *slot = None;
                }
            }
            DialogEffect::LockScroll => {
                if let Ok(mut lock) = modal_lock.try_write() {
                    lock.acquire(owner);
                }
            }
            DialogEffect::UnlockScroll => {
                if let Ok(mut lock) = modal_lock.try_write() {
                    lock.release(owner);
                }
            }
            DialogEffect::ScheduleUnmount { epoch } => {
                spawn(async move {
                    sleep_ms(EXIT_GRACE_MS).await;
                    let mut machine = handles.machine;
                    let Ok(mut state) = machine.try_write() else {
                        return;
                    };
                    let effects = state.grace_elapsed(epoch);
                    drop(state);
                    apply_effects(handles, effects);
                });
            }
        }
    }
}

/// Modal asking the user to confirm an action.
///
/// `on_confirm` fires once per click and does not close the dialog; the
/// caller closes it by clearing `is_open`. Backdrop clicks and Escape call
/// `on_cancel`.
#[component]
pub fn ConfirmDialogView(
    is_open: ReadSignal<bool>,
    title: String,
    message: String,
    #[props(default)] severity: Severity,
    #[props(default = "Confirm".to_string())] confirm_label: String,
    #[props(default = "Cancel".to_string())] cancel_label: String,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let machine = use_signal(DialogMachine::new);
    let escape = use_signal(|| None::<KeyListener>);
    let modal_lock = use_modal_lock();
    let owner = use_hook(next_owner_id);

    let handles = DialogHandles {
        machine,
        escape,
        modal_lock,
        owner,
        on_cancel,
    };

    use_effect(move || {
        let open = is_open();
        let mut machine = handles.machine;
        let effects = machine.write().set_open(open);
        debug!("Dialog {owner} open={open} -> {:?}", machine.peek().phase());
        apply_effects(handles, effects);
    });

    use_drop(move || {
        let mut machine = handles.machine;
        if let Ok(mut state) = machine.try_write() {
            let effects = state.teardown();
            drop(state);
            apply_effects(handles, effects);
        };
    });

    let state = machine();
    if !state.is_mounted() {
        return rsx! {};
    }
    let visible = state.is_visible();

    let fade = if visible { "opacity-100" } else { "opacity-0" };
    let panel_motion = if visible {
        "translate-y-0 opacity-100 scale-100"
    } else {
        "translate-y-4 opacity-0 scale-95"
    };
    let (badge, confirm_variant) = match severity {
        Severity::Danger => (
            "bg-red-100 text-red-600 dark:bg-red-900/30 dark:text-red-400",
            ButtonVariant::Danger,
        ),
        Severity::Info => (
            "bg-blue-100 text-blue-600 dark:bg-blue-900/30 dark:text-blue-400",
            ButtonVariant::Primary,
        ),
    };

    let dismiss_on = move |target: ClickTarget| {
        let dismiss = machine.try_peek().is_ok_and(|m| m.click_dismisses(target));
        if dismiss {
            on_cancel.call(());
        }
    };

    rsx! {
        div { class: "fixed inset-0 z-50 flex items-center justify-center p-4 transition-opacity duration-200 {fade}",
            div {
                class: "absolute inset-0 bg-black/60 backdrop-blur-sm",
                onclick: move |_| dismiss_on(ClickTarget::Backdrop),
            }
            div {
                class: "relative z-10 w-full max-w-md p-6 rounded-2xl shadow-2xl bg-white dark:bg-gray-800 border border-gray-100 dark:border-gray-700 transform transition-all duration-200 {panel_motion}",
                role: "dialog",
                aria_modal: "true",
                aria_label: "{title}",
                onclick: move |evt| {
                    evt.stop_propagation();
                    dismiss_on(ClickTarget::Content);
                },
                div { class: "flex flex-col items-center text-center",
                    div { class: "w-12 h-12 rounded-full flex items-center justify-center mb-4 {badge}",
                        match severity {
                            Severity::Danger => rsx! {
                                AlertTriangleIcon { class: "w-6 h-6" }
                            },
                            Severity::Info => rsx! {
                                InfoIcon { class: "w-6 h-6" }
                            },
                        }
                    }
                    h3 { class: "text-xl font-bold mb-2 text-gray-900 dark:text-white", "{title}" }
                    p { class: "text-gray-600 dark:text-gray-300 mb-8 leading-relaxed", "{message}" }
                    div { class: "flex w-full gap-3",
                        Button {
                            variant: ButtonVariant::Secondary,
                            size: ButtonSize::Medium,
                            class: Some("flex-1".to_string()),
                            onclick: move |_| on_cancel.call(()),
                            "{cancel_label}"
                        }
                        Button {
                            variant: confirm_variant,
                            size: ButtonSize::Medium,
                            class: Some("flex-1".to_string()),
                            onclick: move |_| on_confirm.call(()),
                            "{confirm_label}"
                        }
                    }
                }
            }
        }
    }
}
