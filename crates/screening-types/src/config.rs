use serde::{Deserialize, Serialize};

/// Top-level widget configuration.
///
/// Everything the session controller needs — socket URL, storage keys,
/// host-page element ids — is passed in here at construction instead of
/// being read ad hoc from ambient globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// WebSocket endpoint of the conversation service.
    pub ws_url: String,
    /// HTTP endpoint returning the analysis list for the dashboard.
    pub analyses_url: String,
    pub storage: StorageKeys,
    pub host: HostBindings,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            ws_url: "ws://localhost:8000/ws".to_string(),
            analyses_url: "/api/analyses".to_string(),
            storage: StorageKeys::default(),
            host: HostBindings::default(),
        }
    }
}

/// Keys under which the session snapshot is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageKeys {
    /// JSON-serialized turn sequence.
    pub turns: String,
    /// Finished flag, stored as the string "true" or "false".
    pub finished: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            turns: "chat_messages".to_string(),
            finished: "chat_finished".to_string(),
        }
    }
}

/// Element ids the hosting page exposes the session identifiers under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostBindings {
    pub vacancy_element_id: String,
    pub resume_element_id: String,
}

impl Default for HostBindings {
    fn default() -> Self {
        Self {
            vacancy_element_id: "vacancy-id".to_string(),
            resume_element_id: "resume-id".to_string(),
        }
    }
}
