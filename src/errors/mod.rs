// Errors layer - Error type definitions
pub mod access;
pub mod api;
pub mod internal;

// Re-exports for convenience
pub use access::AccessError;
pub use api::ApiError;
pub use internal::{CredentialError, InternalError, TokenError};
