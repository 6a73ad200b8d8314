//! Business logic handlers
//!
//! Each note operation is a decodable input type implementing [`Operation`].
//! The HTTP layer only picks the operation and hands it the raw payload;
//! decoding, execution and error mapping live here.

pub mod notes;

pub use notes::*;

use crate::store::{NoteStore, StoreError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by note operations
#[derive(Error, Debug)]
pub enum NoteError {
    /// Create on a filename that is already taken
    #[error("Note with this filename already exists.")]
    Conflict(String),

    /// Update/delete on a filename that does not exist
    #[error("Note not found.")]
    NotFound(String),

    /// Body is not a JSON object, or a field has the wrong JSON type
    #[error("Unprocessable request body: {0}")]
    Unprocessable(String),

    /// Body is a JSON object but lacks a required field
    #[error("Missing required field: '{0}'")]
    MissingField(&'static str),

    /// Any other internal failure
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type NoteResult<T> = std::result::Result<T, NoteError>;

impl NoteError {
    /// Short name of the error kind, used in trace records
    pub fn kind(&self) -> &'static str {
        match self {
            NoteError::Conflict(_) => "Conflict",
            NoteError::NotFound(_) => "NotFound",
            NoteError::Unprocessable(_) => "Unprocessable",
            NoteError::MissingField(_) => "MissingField",
            NoteError::Internal(_) => "InternalError",
        }
    }

    /// Whether this error falls outside the expected client-facing outcomes
    pub fn is_unexpected(&self) -> bool {
        matches!(self, NoteError::MissingField(_) | NoteError::Internal(_))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            NoteError::Conflict(_) => StatusCode::BAD_REQUEST,
            NoteError::NotFound(_) => StatusCode::NOT_FOUND,
            NoteError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            NoteError::MissingField(_) | NoteError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<StoreError> for NoteError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateKey(filename) => NoteError::Conflict(filename),
            StoreError::NotFound(filename) => NoteError::NotFound(filename),
            StoreError::Poisoned => NoteError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for NoteError {
    fn into_response(self) -> Response {
        let detail = if self.is_unexpected() {
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        };
        (self.status(), Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

/// A single note operation: decode input, run one store operation, produce output.
pub trait Operation: DeserializeOwned {
    /// Operation name used in trace records
    const NAME: &'static str;

    /// Keys the JSON body object must carry. Empty for operations without a body.
    const FIELDS: &'static [&'static str];

    type Output: Serialize;

    fn execute(self, store: &NoteStore) -> NoteResult<Self::Output>;

    /// Decode the operation input from a raw JSON body.
    ///
    /// Non-JSON and non-object bodies are rejected as unprocessable. A missing
    /// key in an otherwise valid object is an unexpected error.
    fn decode(body: &[u8]) -> NoteResult<Self> {
        let value = if body.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(body).map_err(|e| NoteError::Unprocessable(e.to_string()))?
        };

        if !Self::FIELDS.is_empty() {
            let object = value.as_object().ok_or_else(|| {
                NoteError::Unprocessable("request body must be a JSON object".to_string())
            })?;
            if let Some(missing) = Self::FIELDS.iter().find(|f| !object.contains_key(**f)) {
                return Err(NoteError::MissingField(*missing));
            }
        }

        serde_json::from_value(value).map_err(|e| NoteError::Unprocessable(e.to_string()))
    }
}
