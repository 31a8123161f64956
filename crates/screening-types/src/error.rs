use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum WidgetError {
    #[error("Socket error: {0}")]
    Socket(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Wire error: {0}")]
    Wire(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Host page error: {0}")]
    Host(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for WidgetError {
    fn from(e: serde_json::Error) -> Self {
        WidgetError::Wire(e.to_string())
    }
}
