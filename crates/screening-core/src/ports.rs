//! Port traits — the hexagonal architecture boundary.
//!
//! These traits are defined here in `screening-core` (pure Rust).
//! Implementations live in `screening-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use screening_types::{analysis::AnalysisRecord, Result};

// ─── Socket Port ─────────────────────────────────────────────

/// A single bidirectional text-message channel to the conversation service.
///
/// Inbound traffic does not flow through this trait: the platform adapter
/// delivers it by calling back into the session controller. Only the
/// outbound half and lifecycle live here.
pub trait SocketPort {
    /// Transmit one text frame. Callers check `is_open` first; sending on
    /// a channel that is not open is treated as a silent no-op upstream.
    fn send_text(&self, payload: &str) -> Result<()>;

    /// Close the channel. Idempotent: closing an already-closed channel
    /// is a no-op, not an error.
    fn close(&self);

    fn is_open(&self) -> bool;
}

// ─── Storage Port ────────────────────────────────────────────

/// Synchronous string key-value storage with localStorage semantics.
pub trait StoragePort {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}

// ─── Host Page Port ──────────────────────────────────────────

/// Read-once access to the identifiers the hosting page exposes.
pub trait HostPagePort {
    /// Value of the element with the given id, or `None` when the
    /// hosting page does not carry it. Absence is tolerated: the session
    /// proceeds with null identifiers and the handshake never fires.
    fn read_value(&self, element_id: &str) -> Option<String>;
}

// ─── Analyses Port ───────────────────────────────────────────

/// One-shot fetch of the full analysis list for the employer dashboard.
#[async_trait(?Send)]
pub trait AnalysesPort {
    async fn fetch_analyses(&self) -> Result<Vec<AnalysisRecord>>;
}
