//! WebSocket adapter — the single bidirectional channel to the
//! conversation service.
//!
//! Wraps `web_sys::WebSocket` with text frames only. Inbound events are
//! delivered through caller-supplied handlers installed at connect time;
//! the outbound half and lifecycle implement `SocketPort`.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{CloseEvent, ErrorEvent, MessageEvent, WebSocket};

use screening_core::ports::SocketPort;
use screening_types::{Result, WidgetError};

/// Callbacks wired into the browser socket. All run on the main thread.
pub struct SocketHandlers {
    pub on_open: Box<dyn Fn()>,
    pub on_message: Box<dyn Fn(String)>,
    pub on_close: Box<dyn Fn()>,
}

pub struct WebSocketChannel {
    ws: WebSocket,
}

impl WebSocketChannel {
    /// Open a connection and install the event handlers.
    /// The returned channel is shared via Rc so UI callbacks can reach it.
    pub fn connect(url: &str, handlers: SocketHandlers) -> Result<Rc<Self>> {
        let ws = WebSocket::new(url)
            .map_err(|e| WidgetError::Socket(format!("Failed to open {}: {:?}", url, e)))?;

        let SocketHandlers {
            on_open,
            on_message,
            on_close,
        } = handlers;

        let onopen = Closure::wrap(Box::new(move |_: web_sys::Event| {
            log::info!("Socket connection established");
            on_open();
        }) as Box<dyn FnMut(web_sys::Event)>);
        ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));
        onopen.forget();

        let onmessage = Closure::wrap(Box::new(move |event: MessageEvent| {
            match event.data().as_string() {
                Some(text) => on_message(text),
                None => log::warn!("Ignoring non-text socket frame"),
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
        onmessage.forget();

        let onclose = Closure::wrap(Box::new(move |event: CloseEvent| {
            log::info!("Socket connection closed (code {})", event.code());
            on_close();
        }) as Box<dyn FnMut(CloseEvent)>);
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));
        onclose.forget();

        let onerror = Closure::wrap(Box::new(move |event: ErrorEvent| {
            log::warn!("Socket error: {}", event.message());
        }) as Box<dyn FnMut(ErrorEvent)>);
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();

        Ok(Rc::new(Self { ws }))
    }
}

impl SocketPort for WebSocketChannel {
    fn send_text(&self, payload: &str) -> Result<()> {
        self.ws
            .send_with_str(payload)
            .map_err(|e| WidgetError::Socket(format!("{:?}", e)))
    }

    fn close(&self) {
        // Only act while the socket is still connecting or open; closing
        // an already-closed channel is a no-op.
        match self.ws.ready_state() {
            WebSocket::CONNECTING | WebSocket::OPEN => {
                if let Err(e) = self.ws.close() {
                    log::warn!("Socket close failed: {:?}", e);
                }
            }
            _ => {}
        }
    }

    fn is_open(&self) -> bool {
        self.ws.ready_state() == WebSocket::OPEN
    }
}
