use serde::{Deserialize, Serialize};

use crate::turn::Sender;

/// Events emitted by the session controller.
/// The UI drains these each frame for reactive updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A turn was appended to the conversation; the message view
    /// should scroll to the newest turn.
    TurnAppended { sender: Sender },

    /// The synthetic start message was transmitted.
    HandshakeSent,

    /// The server declared the conversation complete.
    Finished,

    /// The channel closed (remote or local). No reconnection follows.
    ConnectionClosed,

    /// A non-fatal error was absorbed (malformed frame, storage write).
    Error { message: String },
}
