pub mod turn;
pub mod wire;
pub mod session;
pub mod analysis;
pub mod config;
pub mod error;
pub mod event;


pub use error::WidgetError;
pub type Result<T> = std::result::Result<T, WidgetError>;
