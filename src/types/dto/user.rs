use poem_openapi::{ApiResponse, Object, payload::Json};
use serde::{Deserialize, Serialize};

use crate::errors::InternalError;
use crate::types::db::user;
use crate::types::internal::auth::Role;

/// Request model for registering a user
///
/// Missing fields are treated as empty so they are reported as field errors.
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateUserRequest {
    #[oai(default)]
    pub name: String,

    #[oai(default)]
    pub email: String,

    #[oai(default)]
    pub password: String,

    /// Requested role; only power users may request `power`
    pub role: Option<Role>,
}

/// Request model for a partial user update
#[derive(Object, Debug, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

/// Public view of a user; the password hash is never included
#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: i64,
    pub updated_at: i64,
}

impl TryFrom<user::Model> for UserResponse {
    type Error = InternalError;

    fn try_from(model: user::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            role: model.role.parse()?,
            id: model.id,
            name: model.name,
            email: model.email,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[derive(ApiResponse)]
pub enum CreateUserApiResponse {
    /// User registered
    #[oai(status = 201)]
    Created(Json<UserResponse>),
}

#[derive(ApiResponse)]
pub enum DeleteUserApiResponse {
    /// User and their plays removed; body is the record as it was
    #[oai(status = 200)]
    Deleted(Json<UserResponse>),
}
