use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::ValidationError;

/// A note row, owned by exactly one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Note {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "buy milk")]
    pub note: String,
    #[schema(example = false)]
    pub completed: bool,
    /// Owning user's id
    #[schema(example = 7)]
    pub userid: i32,
}

/// Body of POST /notes
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    #[schema(example = "buy milk")]
    pub note: Option<String>,
}

impl CreateNoteRequest {
    /// The note text, which must be present and non-empty
    pub fn into_text(self) -> Result<String, ValidationError> {
        match self.note {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(ValidationError::MissingNote),
        }
    }
}

/// Body of PUT /notes/{id}
///
/// Only presence is checked, so `{"completed": false}` is a valid update.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    #[schema(example = true)]
    pub completed: Option<bool>,
}

impl UpdateNoteRequest {
    pub fn completed(&self) -> Result<bool, ValidationError> {
        self.completed.ok_or(ValidationError::MissingCompleted)
    }
}
