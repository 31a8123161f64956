//! Wire messages exchanged with the conversation service.
//!
//! Field names are fixed by the backend protocol: outbound frames carry
//! `text` / `vacancy_id` / `resume_id`, inbound frames carry
//! `message` / `finish_conversation`.

use serde::{Deserialize, Serialize};

use crate::Result;

/// Text of the synthetic first turn that asks the service to start
/// the scripted conversation.
pub const HANDSHAKE_TEXT: &str = "start";

/// Outbound frame: one user (or handshake) turn plus the session identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub text: String,
    pub vacancy_id: Option<String>,
    pub resume_id: Option<String>,
}

impl OutboundMessage {
    pub fn new(
        text: impl Into<String>,
        vacancy_id: Option<String>,
        resume_id: Option<String>,
    ) -> Self {
        Self {
            text: text.into(),
            vacancy_id,
            resume_id,
        }
    }

    /// The synthetic first outbound message.
    pub fn handshake(vacancy_id: String, resume_id: String) -> Self {
        Self::new(HANDSHAKE_TEXT, Some(vacancy_id), Some(resume_id))
    }

    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Inbound frame: one bot turn plus the server-declared finish flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub message: String,
    /// Absent on older backends; treated as "keep going".
    #[serde(default)]
    pub finish_conversation: bool,
}

impl InboundMessage {
    pub fn decode(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}
