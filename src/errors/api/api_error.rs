use crate::errors::access::AccessError;
use crate::errors::internal::InternalError;
use crate::types::internal::validation::FieldError;
use poem_openapi::{ApiResponse, Object, payload::Json};
use std::fmt;

/// Standardized error response body
#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Error responses shared by every resource endpoint
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Missing, invalid, expired or revoked token, or bad login credentials
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Authenticated but not allowed to act on the target
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Target resource does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Capability does not exist for this resource
    #[oai(status = 405)]
    MethodNotAllowed(Json<ErrorResponse>),

    /// One entry per failed field constraint
    #[oai(status = 422)]
    UnprocessableEntity(Json<Vec<FieldError>>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

fn body(error: &str, message: &str, status_code: u16) -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code,
    })
}

impl ApiError {
    pub fn unauthenticated() -> Self {
        ApiError::Unauthorized(body(
            "unauthenticated",
            "A valid bearer token is required",
            401,
        ))
    }

    pub fn invalid_credentials() -> Self {
        ApiError::Unauthorized(body(
            "invalid_credentials",
            "Invalid email or password",
            401,
        ))
    }

    pub fn forbidden() -> Self {
        ApiError::Forbidden(body(
            "forbidden",
            "You are not allowed to perform this action",
            403,
        ))
    }

    pub fn not_found() -> Self {
        ApiError::NotFound(body("not_found", "Resource not found", 404))
    }

    pub fn method_not_allowed() -> Self {
        ApiError::MethodNotAllowed(body(
            "method_not_allowed",
            "This operation is not supported for the resource",
            405,
        ))
    }

    /// Create a generic internal server error
    ///
    /// Always returns a generic message without exposing internal details.
    pub fn internal_server_error() -> Self {
        ApiError::InternalError(body("internal_error", "An internal error occurred", 500))
    }

    /// Convert AccessError to ApiError
    ///
    /// This is the explicit conversion point from the core taxonomy to HTTP.
    /// Internal error details are logged but not exposed to clients.
    pub fn from_access_error(err: AccessError) -> Self {
        match err {
            AccessError::Unauthenticated => Self::unauthenticated(),
            AccessError::InvalidCredentials => Self::invalid_credentials(),
            AccessError::Forbidden => Self::forbidden(),
            AccessError::NotFound => Self::not_found(),
            AccessError::MethodNotSupported => Self::method_not_allowed(),
            AccessError::UnprocessableEntity(errors) => ApiError::UnprocessableEntity(Json(errors)),
            AccessError::Internal(internal) => {
                tracing::error!("Internal error while handling request: {}", internal);
                Self::internal_server_error()
            }
        }
    }

    /// Convert InternalError to ApiError
    pub fn from_internal_error(err: InternalError) -> Self {
        Self::from_access_error(AccessError::from(err))
    }

    /// HTTP status carried by this response
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::MethodNotAllowed(_) => 405,
            ApiError::UnprocessableEntity(_) => 422,
            ApiError::InternalError(_) => 500,
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            ApiError::Unauthorized(json)
            | ApiError::Forbidden(json)
            | ApiError::NotFound(json)
            | ApiError::MethodNotAllowed(json)
            | ApiError::InternalError(json) => json.0.message.clone(),
            ApiError::UnprocessableEntity(json) => json
                .0
                .iter()
                .map(|e| format!("{}: {}", e.param, e.message))
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        ApiError::from_access_error(err)
    }
}

impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        ApiError::from_internal_error(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
