use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, param::Path, payload::Json};

use crate::AppData;
use crate::api::Api;
use crate::coordinators::UserCoordinator;
use crate::errors::ApiError;
use crate::providers::TokenProvider;
use crate::types::dto::auth::{LoginRequest, TokenResponse};
use crate::types::dto::user::{
    CreateUserApiResponse, CreateUserRequest, DeleteUserApiResponse, UpdateUserRequest, UserResponse,
};

/// Account endpoints, including login
pub struct UserApi {
    token_provider: Arc<TokenProvider>,
    user_coordinator: UserCoordinator,
}

impl UserApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            token_provider: Arc::clone(&app_data.token_provider),
            user_coordinator: UserCoordinator::new(app_data),
        }
    }
}

impl Api for UserApi {
    fn token_provider(&self) -> &TokenProvider {
        &self.token_provider
    }
}

#[derive(Tags)]
enum UserTags {
    /// Accounts and sessions
    Users,
}

#[OpenApi(tag = "UserTags::Users")]
impl UserApi {
    /// Register an account
    ///
    /// Anyone may register a normal account. Creating a power account needs a
    /// power user's token.
    #[oai(path = "/users", method = "post")]
    async fn create_user(
        &self,
        req: &Request,
        body: Json<CreateUserRequest>,
    ) -> Result<CreateUserApiResponse, ApiError> {
        let ctx = self.request_context(req).await?;
        let user = self.user_coordinator.create_user(&ctx, body.0).await?;
        Ok(CreateUserApiResponse::Created(Json(user)))
    }

    /// List every account by ascending id
    #[oai(path = "/users", method = "get")]
    async fn list_users(&self, req: &Request) -> Result<Json<Vec<UserResponse>>, ApiError> {
        let ctx = self.request_context(req).await?;
        Ok(Json(self.user_coordinator.list_users(&ctx).await?))
    }

    /// Exchange email and password for a bearer token
    #[oai(path = "/users/login", method = "post")]
    async fn login(&self, req: &Request, body: Json<LoginRequest>) -> Result<Json<TokenResponse>, ApiError> {
        let ctx = self.request_context(req).await?;
        Ok(Json(self.user_coordinator.login(&ctx, body.0).await?))
    }

    #[oai(path = "/users/:id", method = "get")]
    async fn get_user(&self, req: &Request, id: Path<i64>) -> Result<Json<UserResponse>, ApiError> {
        let ctx = self.request_context(req).await?;
        Ok(Json(self.user_coordinator.get_user(&ctx, id.0).await?))
    }

    /// Change name, email, password or role; only supplied fields are touched
    #[oai(path = "/users/:id", method = "put")]
    async fn update_user(
        &self,
        req: &Request,
        id: Path<i64>,
        body: Json<UpdateUserRequest>,
    ) -> Result<Json<UserResponse>, ApiError> {
        let ctx = self.request_context(req).await?;
        Ok(Json(self.user_coordinator.update_user(&ctx, id.0, body.0).await?))
    }

    /// Delete an account together with its plays
    #[oai(path = "/users/:id", method = "delete")]
    async fn delete_user(&self, req: &Request, id: Path<i64>) -> Result<DeleteUserApiResponse, ApiError> {
        let ctx = self.request_context(req).await?;
        let user = self.user_coordinator.delete_user(&ctx, id.0).await?;
        Ok(DeleteUserApiResponse::Deleted(Json(user)))
    }
}
