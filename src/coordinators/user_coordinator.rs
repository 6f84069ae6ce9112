use std::sync::Arc;

use crate::AppData;
use crate::coordinators::Coordinator;
use crate::errors::AccessError;
use crate::providers::validation_provider::normalize_email;
use crate::providers::{AuthorizationProvider, TokenProvider, ValidationProvider};
use crate::stores::{CredentialStore, NewUser, UserChanges};
use crate::types::dto::auth::{LoginRequest, TokenResponse};
use crate::types::dto::user::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::types::internal::RequestContext;
use crate::types::internal::access::{Action, Resource, ResourceKind};

/// Handles account lifecycle and login
pub struct UserCoordinator {
    credential_store: Arc<CredentialStore>,
    token_provider: Arc<TokenProvider>,
    validation_provider: Arc<ValidationProvider>,
    authorization_provider: Arc<AuthorizationProvider>,
}

impl Coordinator for UserCoordinator {
    fn authorization(&self) -> &AuthorizationProvider {
        &self.authorization_provider
    }
}

impl UserCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            credential_store: Arc::clone(&app_data.credential_store),
            token_provider: Arc::clone(&app_data.token_provider),
            validation_provider: Arc::clone(&app_data.validation_provider),
            authorization_provider: Arc::clone(&app_data.authorization_provider),
        }
    }

    /// Fetch a user or fail with NotFound
    async fn existing_user(
        &self,
        user_id: i64,
    ) -> Result<crate::types::db::user::Model, AccessError> {
        self.credential_store
            .get_user_by_id(user_id)
            .await?
            .ok_or(AccessError::NotFound)
    }

    /// Register a new account
    ///
    /// Open to anonymous callers unless the payload asks for the power role.
    pub async fn create_user(
        &self,
        ctx: &RequestContext,
        request: CreateUserRequest,
    ) -> Result<UserResponse, AccessError> {
        let action = Action::Create { role: request.role };
        self.precheck(ctx, &action, ResourceKind::User)?;
        self.authorize(ctx, &action, &Resource::User { user_id: None })?;

        let new_user = NewUser {
            name: request.name.trim().to_string(),
            email: normalize_email(&request.email),
            password: request.password,
            role: request.role.unwrap_or_default(),
        };
        let errors = self.validation_provider.validate_new_user(&new_user).await?;
        self.ensure_valid(ctx, errors)?;

        let stored = self.credential_store.add_user(new_user).await?;

        Ok(UserResponse::try_from(stored)?)
    }

    pub async fn get_user(&self, ctx: &RequestContext, user_id: i64) -> Result<UserResponse, AccessError> {
        self.precheck(ctx, &Action::Read, ResourceKind::User)?;
        let user = self.existing_user(user_id).await?;
        self.authorize(ctx, &Action::Read, &Resource::User { user_id: Some(user_id) })?;

        Ok(UserResponse::try_from(user)?)
    }

    pub async fn list_users(&self, ctx: &RequestContext) -> Result<Vec<UserResponse>, AccessError> {
        self.precheck(ctx, &Action::Read, ResourceKind::User)?;
        self.authorize(ctx, &Action::Read, &Resource::User { user_id: None })?;

        let users = self.credential_store.list_users().await?;

        users
            .into_iter()
            .map(|u| UserResponse::try_from(u).map_err(AccessError::from))
            .collect()
    }

    /// Partially update an account
    ///
    /// Owner or power user only; granting the power role needs a power user.
    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        user_id: i64,
        request: UpdateUserRequest,
    ) -> Result<UserResponse, AccessError> {
        let action = Action::Update { role: request.role };
        self.precheck(ctx, &action, ResourceKind::User)?;
        self.existing_user(user_id).await?;
        self.authorize(ctx, &action, &Resource::User { user_id: Some(user_id) })?;

        let changes = UserChanges {
            name: request.name.map(|n| n.trim().to_string()),
            email: request.email.as_deref().map(normalize_email),
            password: request.password,
            role: request.role,
        };
        let errors = self
            .validation_provider
            .validate_user_changes(user_id, &changes)
            .await?;
        self.ensure_valid(ctx, errors)?;

        let updated = self.credential_store.update_user(user_id, changes).await?;

        Ok(UserResponse::try_from(updated)?)
    }

    /// Delete an account, its plays, and by extension every token it holds
    pub async fn delete_user(&self, ctx: &RequestContext, user_id: i64) -> Result<UserResponse, AccessError> {
        self.precheck(ctx, &Action::Delete, ResourceKind::User)?;
        let user = self.existing_user(user_id).await?;
        self.authorize(ctx, &Action::Delete, &Resource::User { user_id: Some(user_id) })?;

        let snapshot = UserResponse::try_from(user)?;
        self.credential_store.delete_user(user_id).await?;

        tracing::info!(request_id = %ctx.request_id, actor = %ctx.actor, user_id, "Account deleted");

        Ok(snapshot)
    }

    /// Exchange email and password for a session token
    pub async fn login(
        &self,
        ctx: &RequestContext,
        request: LoginRequest,
    ) -> Result<TokenResponse, AccessError> {
        self.precheck(ctx, &Action::Login, ResourceKind::User)?;
        self.authorize(ctx, &Action::Login, &Resource::User { user_id: None })?;

        let email = normalize_email(&request.email);
        let user = match self.credential_store.verify_credentials(&email, &request.password).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(request_id = %ctx.request_id, "Login failed");
                return Err(e.into());
            }
        };

        let issued = self.token_provider.issue(user.id)?;

        tracing::info!(request_id = %ctx.request_id, user_id = user.id, "Login succeeded");

        Ok(TokenResponse {
            token: issued.token,
            token_type: "Bearer".to_string(),
            expires_at: issued.expires_at,
        })
    }
}
