//! Session controller — the widget's conversation state machine.
//!
//! Mediates between UI events, the socket channel, and persisted storage:
//! 1. Opening the widget rehydrates the persisted snapshot and reads the
//!    vacancy/resume identifiers from the hosting page, exactly once.
//! 2. A readiness gate fires the handshake when the channel is open, both
//!    identifiers are resolved, and the turn sequence is still empty.
//! 3. User submissions and inbound bot turns append to the snapshot; every
//!    mutation persists the full snapshot (plain overwrite).
//! 4. A server-declared finish flag freezes the input surface and closes
//!    the channel at most once.

use screening_types::{
    config::WidgetConfig,
    event::SessionEvent,
    session::SessionSnapshot,
    turn::{ChatTurn, Sender},
    wire::{InboundMessage, OutboundMessage},
};

use crate::event_bus::EventBus;
use crate::ports::{HostPagePort, SocketPort, StoragePort};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Widget not open; nothing loaded.
    Closed,
    /// Widget open, waiting for both identifiers and the channel.
    AwaitingIdentifiers,
    /// Conversation in progress.
    Active,
    /// Server declared the conversation complete. Terminal until the
    /// widget is explicitly closed and reopened.
    Finished,
}

pub struct SessionController {
    config: WidgetConfig,
    snapshot: SessionSnapshot,
    vacancy_id: Option<String>,
    resume_id: Option<String>,
    phase: SessionPhase,
    socket_open: bool,
    handshake_sent: bool,
    channel_closed: bool,
    event_bus: EventBus,
}

impl SessionController {
    pub fn new(config: WidgetConfig, event_bus: EventBus) -> Self {
        Self {
            config,
            snapshot: SessionSnapshot::default(),
            vacancy_id: None,
            resume_id: None,
            phase: SessionPhase::Closed,
            socket_open: false,
            handshake_sent: false,
            channel_closed: false,
            event_bus,
        }
    }

    // ─── Lifecycle ───────────────────────────────────────────

    /// Open the widget: rehydrate persisted state and read the host-page
    /// identifiers. Identifiers are read once here and immutable afterwards.
    pub fn open(&mut self, storage: &dyn StoragePort, host: &dyn HostPagePort) {
        if self.phase != SessionPhase::Closed {
            return;
        }

        self.snapshot = load_snapshot(&self.config, storage);
        self.vacancy_id = host.read_value(&self.config.host.vacancy_element_id);
        self.resume_id = host.read_value(&self.config.host.resume_element_id);

        if self.vacancy_id.is_none() {
            log::warn!(
                "No element '{}' on the hosting page; handshake will not fire",
                self.config.host.vacancy_element_id
            );
        }
        if self.resume_id.is_none() {
            log::warn!(
                "No element '{}' on the hosting page; handshake will not fire",
                self.config.host.resume_element_id
            );
        }

        self.socket_open = false;
        self.handshake_sent = false;
        self.channel_closed = false;
        self.phase = if self.snapshot.finished {
            SessionPhase::Finished
        } else {
            SessionPhase::AwaitingIdentifiers
        };
    }

    /// The channel reached its open state. Runs the readiness gate.
    pub fn handle_socket_open(&mut self, socket: &dyn SocketPort) {
        self.socket_open = true;
        self.try_activate(socket);
    }

    /// Readiness gate: activates the session and fires the handshake
    /// deterministically instead of waiting out a timer. The handshake is
    /// sent at most once, and only while the turn sequence is empty.
    fn try_activate(&mut self, socket: &dyn SocketPort) {
        if self.phase != SessionPhase::AwaitingIdentifiers || !self.socket_open {
            return;
        }
        let (vacancy_id, resume_id) = match (&self.vacancy_id, &self.resume_id) {
            (Some(v), Some(r)) => (v.clone(), r.clone()),
            // Unresolved identifiers: stay put, silently.
            _ => return,
        };

        if !self.handshake_sent && self.snapshot.is_empty() {
            let frame = OutboundMessage::handshake(vacancy_id, resume_id);
            match frame.encode().and_then(|payload| socket.send_text(&payload)) {
                Ok(()) => {
                    self.handshake_sent = true;
                    self.event_bus.emit(SessionEvent::HandshakeSent);
                    log::info!("Handshake sent; conversation starting");
                }
                Err(e) => {
                    log::warn!("Handshake transmit failed: {}", e);
                    self.event_bus.emit(SessionEvent::Error {
                        message: e.to_string(),
                    });
                    return;
                }
            }
        }
        self.phase = SessionPhase::Active;
    }

    // ─── Conversation ────────────────────────────────────────

    /// User submitted input. Empty or whitespace-only text produces no
    /// turn and no transmission; once finished, submissions are rejected.
    pub fn submit(&mut self, text: &str, socket: &dyn SocketPort, storage: &dyn StoragePort) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if matches!(self.phase, SessionPhase::Finished | SessionPhase::Closed)
            || self.snapshot.finished
        {
            return;
        }

        self.snapshot.turns.push(ChatTurn::user(text));
        self.persist(storage);
        self.event_bus.emit(SessionEvent::TurnAppended {
            sender: Sender::User,
        });

        // Send on a channel that is not open is a silent no-op.
        if socket.is_open() {
            let frame =
                OutboundMessage::new(text, self.vacancy_id.clone(), self.resume_id.clone());
            if let Err(e) = frame.encode().and_then(|payload| socket.send_text(&payload)) {
                log::warn!("Outbound transmit failed: {}", e);
                self.event_bus.emit(SessionEvent::Error {
                    message: e.to_string(),
                });
            }
        }
    }

    /// An inbound wire frame arrived. Malformed payloads are dropped with
    /// a warning (log-and-continue policy); a finish flag freezes the
    /// session and closes the channel at most once.
    pub fn handle_inbound(
        &mut self,
        raw: &str,
        socket: &dyn SocketPort,
        storage: &dyn StoragePort,
    ) {
        let inbound = match InboundMessage::decode(raw) {
            Ok(frame) => frame,
            Err(e) => {
                log::warn!("Dropping malformed inbound frame: {}", e);
                return;
            }
        };

        self.snapshot.turns.push(ChatTurn::bot(inbound.message));
        self.persist(storage);
        self.event_bus.emit(SessionEvent::TurnAppended {
            sender: Sender::Bot,
        });

        if inbound.finish_conversation {
            self.snapshot.finished = true;
            self.phase = SessionPhase::Finished;
            self.persist(storage);
            self.event_bus.emit(SessionEvent::Finished);
            self.close_channel(socket);
        }
    }

    /// The channel closed (remote or local). No reconnection is attempted;
    /// new bot turns simply stop arriving.
    pub fn handle_socket_closed(&mut self) {
        self.socket_open = false;
        self.event_bus.emit(SessionEvent::ConnectionClosed);
    }

    /// Explicit widget close: clear all persisted state, close the channel,
    /// and return to a pristine Closed state so a fresh open shows zero
    /// turns and finished = false.
    pub fn close_widget(&mut self, socket: &dyn SocketPort, storage: &dyn StoragePort) {
        if let Err(e) = storage.remove(&self.config.storage.turns) {
            log::warn!("Failed to clear persisted turns: {}", e);
        }
        if let Err(e) = storage.remove(&self.config.storage.finished) {
            log::warn!("Failed to clear persisted finish flag: {}", e);
        }

        self.close_channel(socket);
        self.snapshot = SessionSnapshot::default();
        self.vacancy_id = None;
        self.resume_id = None;
        self.socket_open = false;
        self.handshake_sent = false;
        self.channel_closed = false;
        self.phase = SessionPhase::Closed;
    }

    fn close_channel(&mut self, socket: &dyn SocketPort) {
        if !self.channel_closed {
            self.channel_closed = true;
            socket.close();
        }
    }

    /// Overwrite the full persisted snapshot. Called after every mutation
    /// of the turn sequence or the finished flag.
    fn persist(&self, storage: &dyn StoragePort) {
        match serde_json::to_string(&self.snapshot.turns) {
            Ok(json) => {
                if let Err(e) = storage.set(&self.config.storage.turns, &json) {
                    log::warn!("Failed to persist turns: {}", e);
                }
            }
            Err(e) => log::warn!("Failed to serialize turns: {}", e),
        }
        let finished = if self.snapshot.finished { "true" } else { "false" };
        if let Err(e) = storage.set(&self.config.storage.finished, finished) {
            log::warn!("Failed to persist finish flag: {}", e);
        }
    }

    // ─── Accessors ───────────────────────────────────────────

    pub fn turns(&self) -> &[ChatTurn] {
        &self.snapshot.turns
    }

    pub fn is_finished(&self) -> bool {
        self.snapshot.finished
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn handshake_sent(&self) -> bool {
        self.handshake_sent
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }
}

/// Rehydrate the snapshot from storage. Corrupt or missing entries fall
/// back to a pristine snapshot with a warning.
fn load_snapshot(config: &WidgetConfig, storage: &dyn StoragePort) -> SessionSnapshot {
    let turns = match storage.get(&config.storage.turns) {
        Ok(Some(raw)) => match serde_json::from_str::<Vec<ChatTurn>>(&raw) {
            Ok(turns) => turns,
            Err(e) => {
                log::warn!("Corrupt persisted turns, starting fresh: {}", e);
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(e) => {
            log::warn!("Storage read failed, starting fresh: {}", e);
            Vec::new()
        }
    };

    let finished = matches!(
        storage.get(&config.storage.finished),
        Ok(Some(ref flag)) if flag == "true"
    );

    SessionSnapshot { turns, finished }
}
