// Service error taxonomy
// Decision: One enum for every client-visible failure; HTTP mapping lives in api::common

use thiserror::Error;

/// Errors returned by the service layer
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Signup with an email that is already registered
    #[error("Email already registered in Spark! Bytes.")]
    DuplicateUser,

    /// Login with an unknown email or a wrong password
    #[error("Incorrect email or password. Please try again.")]
    InvalidCredentials,

    /// Missing, malformed, expired or orphaned bearer token
    #[error("{0}")]
    Unauthorized(String),

    /// Request body failed validation
    #[error("{0}")]
    Validation(String),

    /// Event name already in use
    #[error("Event already exists in Spark! Bytes.")]
    DuplicateEvent,

    /// Referenced entity does not exist
    #[error("{0} not found.")]
    NotFound(&'static str),

    /// Authenticated, but not allowed to perform this action
    #[error("{0}")]
    Forbidden(String),

    /// Storage, hashing or token-encoding failure
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
