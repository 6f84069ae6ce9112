use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CredentialError {
    /// Unknown email or wrong password; deliberately indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User name already exists: {0}")]
    DuplicateName(String),

    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    #[error("User ID not found: {user_id}")]
    UserIdNotFound { user_id: i64 },
}
