//! Browser listeners tied to Rust ownership
//!
//! A `Closure` handed to `addEventListener` must outlive the registration.
//! Instead of leaking it with `forget()`, [`KeyListener`] keeps the closure
//! and removes the registration in `Drop`, so storing one in a
//! `Signal<Option<KeyListener>>` and setting it to `None` detaches it.
//!
//! Outside the browser there is no window to listen on; [`listen_for_keys`]
//! returns `None` and callers carry on without a listener.

#[cfg(target_arch = "wasm32")]
mod imp {
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    /// A `keydown` listener on `window`, removed on drop
    pub struct KeyListener {
        window: web_sys::Window,
        callback: Closure<dyn FnMut(web_sys::KeyboardEvent)>,
    }

    impl Drop for KeyListener {
        fn drop(&mut self) {
            let _ = self.window.remove_event_listener_with_callback(
                "keydown",
                self.callback.as_ref().unchecked_ref(),
            );
        }
    }

    pub fn listen_for_keys(mut on_key: impl FnMut(String) + 'static) -> Option<KeyListener> {
        let window = web_sys::window()?;
        let callback: Closure<dyn FnMut(web_sys::KeyboardEvent)> =
            Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| on_key(event.key())));
        window
            .add_event_listener_with_callback("keydown", callback.as_ref().unchecked_ref())
            .ok()?;
        Some(KeyListener { window, callback })
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    pub struct KeyListener;

    pub fn listen_for_keys(_on_key: impl FnMut(String) + 'static) -> Option<KeyListener> {
        None
    }
}

pub use imp::{listen_for_keys, KeyListener};
