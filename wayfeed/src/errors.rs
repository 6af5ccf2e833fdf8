use std::fmt;

use thiserror::Error;

/// Top-level error type returned by wayfeed operations.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Validation failed for one or more fields of a submitted draft.
    #[error("validation failed")]
    Validation(#[from] ValidationError),

    /// An operation was addressed to an id that is not in the repository.
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: u64 },

    /// The same logical action is already pending; duplicate submissions
    /// are rejected rather than queued.
    #[error("action already in flight: {action}")]
    ActionInFlight { action: String },

    /// Writing a collection to the durable store failed.
    #[error("store error")]
    Store(#[from] StoreError),
}

/// Errors raised by the persistent store adapter.
///
/// Load-side failures never reach callers; the adapter falls back to the
/// seed collection instead. Save-side failures surface through `FeedError`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error(transparent)]
    Revive(#[from] ReviveError),
}

/// A timestamp field in a stored payload could not be parsed.
#[derive(Debug, Error)]
#[error("unparseable timestamp in field `{field}`")]
pub struct ReviveError {
    pub field: String,
}

/// The kind of entity an operation was addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Post,
    Comment,
    Notification,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::User => "user",
            EntityKind::Post => "post",
            EntityKind::Comment => "comment",
            EntityKind::Notification => "notification",
        };
        f.write_str(name)
    }
}

/// Collection of validation issues encountered while preparing a mutation.
#[derive(Debug, Error)]
#[error("validation errors: {issues:?}")]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new<I>(issues: I) -> Self
    where
        I: IntoIterator<Item = ValidationIssue>,
    {
        Self {
            issues: issues.into_iter().collect(),
        }
    }

    /// Convenience helper for constructing a single-field validation error.
    pub fn single(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new([ValidationIssue::new(field, code, message)])
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Detailed validation failure for a single field.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}
