//! Realtime transport over the browser's WebSocket

use gloo_timers::callback::Interval;
use marks_core::supabase::{FrameHandler, RealtimeConnection, RealtimeTransport, TransportEvent};
use marks_core::ProviderError;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

pub struct WebSocketTransport;

/// An open socket plus the JS callbacks bound to it. Dropping it detaches
/// the callbacks, stops the heartbeat and closes the socket.
struct WebSocketConnection {
    socket: WebSocket,
    _on_open: Closure<dyn FnMut(Event)>,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
    heartbeat: Option<Interval>,
}

fn send_all(socket: &WebSocket, frames: Vec<String>) {
    for frame in frames {
        if let Err(e) = socket.send_with_str(&frame) {
            warn!("Realtime send failed: {e:?}");
        }
    }
}

impl RealtimeTransport for WebSocketTransport {
    fn connect(
        &self,
        url: &str,
        heartbeat_ms: u64,
        handler: FrameHandler,
    ) -> Result<Box<dyn RealtimeConnection>, ProviderError> {
        let socket =
            WebSocket::new(url).map_err(|e| ProviderError::Realtime(format!("{e:?}")))?;
        let handler = Rc::new(RefCell::new(handler));

        let dispatch = {
            let socket = socket.clone();
            let handler = handler.clone();
            move |event: TransportEvent| {
                let frames = (*handler.borrow_mut())(event);
                send_all(&socket, frames);
            }
        };

        let on_open = {
            let dispatch = dispatch.clone();
            Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                debug!("Realtime socket open");
                dispatch(TransportEvent::Open);
            })
        };
        let on_message = {
            let dispatch = dispatch.clone();
            Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
                if let Some(text) = event.data().as_string() {
                    dispatch(TransportEvent::Message(text));
                }
            })
        };
        let on_close = {
            let dispatch = dispatch.clone();
            Closure::<dyn FnMut(CloseEvent)>::new(move |event: CloseEvent| {
                debug!("Realtime socket closed ({})", event.code());
                dispatch(TransportEvent::Closed);
            })
        };

        socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));

        let heartbeat = {
            let socket = socket.clone();
            Interval::new(heartbeat_ms as u32, move || {
                if socket.ready_state() == WebSocket::OPEN {
                    dispatch(TransportEvent::Tick);
                }
            })
        };

        Ok(Box::new(WebSocketConnection {
            socket,
            _on_open: on_open,
            _on_message: on_message,
            _on_close: on_close,
            heartbeat: Some(heartbeat),
        }))
    }
}

impl WebSocketConnection {
    fn detach(&mut self) {
        self.heartbeat.take();
        self.socket.set_onopen(None);
        self.socket.set_onmessage(None);
        self.socket.set_onclose(None);
    }
}

impl RealtimeConnection for WebSocketConnection {
    fn close(&mut self, farewell: Vec<String>) {
        self.detach();
        if self.socket.ready_state() == WebSocket::OPEN {
            send_all(&self.socket, farewell);
        }
        let _ = self.socket.close();
    }
}

impl Drop for WebSocketConnection {
    fn drop(&mut self) {
        self.detach();
        let _ = self.socket.close();
    }
}
