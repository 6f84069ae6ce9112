use thiserror::Error;

use crate::errors::internal::{CredentialError, InternalError};
use crate::types::internal::access::DenyReason;
use crate::types::internal::validation::FieldError;

/// Outcome taxonomy of the access-control layer
///
/// Every coordinator operation fails with exactly one of these. The HTTP
/// boundary maps them one-to-one onto status codes.
#[derive(Error, Debug)]
pub enum AccessError {
    /// No usable identity for an action that needs one
    #[error("authentication required")]
    Unauthenticated,

    /// Login with an unknown email or a wrong password
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("forbidden")]
    Forbidden,

    #[error("resource not found")]
    NotFound,

    #[error("validation failed on {} field(s)", .0.len())]
    UnprocessableEntity(Vec<FieldError>),

    #[error("method not supported")]
    MethodNotSupported,

    #[error(transparent)]
    Internal(InternalError),
}

impl AccessError {
    pub fn field(param: &str, message: &str) -> Self {
        AccessError::UnprocessableEntity(vec![FieldError::new(param, message)])
    }
}

impl From<InternalError> for AccessError {
    fn from(err: InternalError) -> Self {
        match err {
            InternalError::Credential(CredentialError::InvalidCredentials) => {
                AccessError::InvalidCredentials
            }
            // Lost a uniqueness race against a concurrent writer; same answer as the pre-check
            InternalError::Credential(CredentialError::DuplicateName(_)) => {
                AccessError::field("name", "name is already taken")
            }
            InternalError::Credential(CredentialError::DuplicateEmail(_)) => {
                AccessError::field("email", "email is already taken")
            }
            InternalError::Credential(CredentialError::UserIdNotFound { .. }) => {
                AccessError::NotFound
            }
            InternalError::Token(_) => AccessError::Unauthenticated,
            other => AccessError::Internal(other),
        }
    }
}

impl From<DenyReason> for AccessError {
    fn from(reason: DenyReason) -> Self {
        match reason {
            DenyReason::MethodNotSupported => AccessError::MethodNotSupported,
            DenyReason::Unauthenticated => AccessError::Unauthenticated,
            DenyReason::Forbidden(_) => AccessError::Forbidden,
        }
    }
}
