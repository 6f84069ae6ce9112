use thiserror::Error;

/// Why a session token was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Not decodable, bad signature, or a claim of the wrong shape
    #[error("token is malformed")]
    Malformed,

    #[error("token has expired")]
    Expired,

    /// Signature and expiry are fine but the user no longer exists
    #[error("token subject no longer exists")]
    UnknownSubject,
}
