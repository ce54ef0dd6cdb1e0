// crates/aplatam-core/src/error.rs
use thiserror::Error;

/// Errors surfaced by the catalog and the viewport controller.
///
/// Only configuration and loading problems end up here. A requested city that
/// is missing from the catalog, or a malformed query string, is handled by
/// falling back to the first record and never produces an error.
#[derive(Debug, Error)]
pub enum MapError {
    /// The catalog has no records, so no initial viewport can be chosen.
    #[error("city catalog is empty; cannot pick an initial map location")]
    EmptyCatalog,

    #[error("duplicate city id in catalog: {0}")]
    DuplicateId(String),

    #[error("invalid city record `{id}`: {reason}")]
    InvalidRecord { id: String, reason: String },

    /// A lifecycle call that is not allowed in the controller's current state.
    #[error("invalid controller state: {0}")]
    InvalidState(&'static str),

    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = MapError> = std::result::Result<T, E>;
