//! Errors reported by a form session.

use thiserror::Error;

use crate::forme::form::FieldError;

/// The session task is gone (unmounted or dropped).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("form session is closed")]
pub struct SessionError;

/// Reasons a submit did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Required answers are missing; one message per field.
    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(Vec<FieldError>),
    /// An override is still playing.
    #[error("an override is still playing")]
    Busy,
    /// A previous submit is waiting on the network.
    #[error("form is already being submitted")]
    AlreadySubmitting,
    /// The session went away before answering.
    #[error(transparent)]
    Closed(#[from] SessionError),
}
