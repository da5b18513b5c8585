// OpenCalendar Library
// Exposes core functionality for testing and reuse

pub mod app;
pub mod component;
pub mod config;
pub mod error;
pub mod http_config;
pub mod messages;
pub mod models;
pub mod storage;
pub mod ui;
pub mod ui_state;
pub mod utils;

// Re-export commonly used types
pub use component::{EventCalendar, PendingSave};
pub use error::{AppError, AppResult, StorageError, ValidationError};
pub use models::*;
pub use storage::{connect, EventStore, LocalStore, RemoteStore};
