//! Core state management for Greasebook, a vehicle service log manager.
//!
//! The crate owns the two persisted collections (finalized service logs and
//! resumable form drafts), the pure state transitions over them, and the
//! draft lifecycle: creating a draft from the live form, resuming one,
//! autosaving edits after a quiet period, and promoting a draft into a
//! finalized log on submit. Collections are mirrored to local key-value
//! storage as JSON arrays.

use thiserror::Error;

pub mod config;
pub mod form;
pub mod fs;
pub mod model;
pub mod query;
pub mod session;
pub mod state;
pub mod storage;
pub mod time;
pub mod validate;

mod logbook;

pub use logbook::Logbook;
pub use model::{Draft, SaveStatus, ServiceLog, ServiceType};
pub use session::{DraftSession, Edit, SessionOptions};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to write persistent storage: {0}")]
    Storage(#[from] std::io::Error),
    #[error("Failed to encode collection: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Form input failed validation")]
    Validation(Vec<validate::FieldError>),
}
