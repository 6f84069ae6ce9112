use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr, TransactionTrait,
};

use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::providers::CryptoProvider;
use crate::types::db::play::{self, Entity as Play};
use crate::types::db::user::{self, ActiveModel, Entity as User};
use crate::types::internal::auth::Role;

/// A user about to be created; fields are already validated and normalized
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Partial update of a user; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

/// CredentialStore manages user accounts and their password hashes
pub struct CredentialStore {
    db: DatabaseConnection,
    crypto_provider: Arc<CryptoProvider>,
}

impl CredentialStore {
    /// Create a new CredentialStore
    ///
    /// # Arguments
    /// * `db` - The database connection
    /// * `crypto_provider` - Password hasher keyed with the application pepper
    pub fn new(db: DatabaseConnection, crypto_provider: Arc<CryptoProvider>) -> Self {
        Self { db, crypto_provider }
    }

    /// Map a failed insert/update onto the uniqueness error it represents, if any
    ///
    /// The UNIQUE indexes on `users.name` and `users.email` are the authority
    /// for uniqueness, so concurrent creates cannot both succeed.
    fn map_write_error(operation: &str, err: DbErr, name: &str, email: &str) -> InternalError {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => {
                if message.contains("users.email") {
                    CredentialError::DuplicateEmail(email.to_string()).into()
                } else {
                    CredentialError::DuplicateName(name.to_string()).into()
                }
            }
            _ => InternalError::database(operation, err),
        }
    }

    /// Add a new user to the database
    ///
    /// # Returns
    /// * `Ok(Model)` - The stored user, including its assigned id
    /// * `Err(InternalError::Credential(DuplicateName | DuplicateEmail))` - uniqueness violated
    pub async fn add_user(&self, new_user: NewUser) -> Result<user::Model, InternalError> {
        let password_hash = self.crypto_provider.hash_password(&new_user.password)?;
        let now = Utc::now().timestamp();

        let model = ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            name: Set(new_user.name.clone()),
            email: Set(new_user.email.clone()),
            password_hash: Set(password_hash),
            created_at: Set(now),
            updated_at: Set(now),
            role: Set(new_user.role.as_str().to_string()),
        };

        let stored = model
            .insert(&self.db)
            .await
            .map_err(|e| Self::map_write_error("add_user", e, &new_user.name, &new_user.email))?;

        tracing::info!(user_id = stored.id, role = %new_user.role, "User created");

        Ok(stored)
    }

    /// Get a user by id
    pub async fn get_user_by_id(&self, user_id: i64) -> Result<Option<user::Model>, InternalError> {
        User::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_user_by_id", e))
    }

    /// Find a user by exact name
    pub async fn find_by_name(&self, name: &str) -> Result<Option<user::Model>, InternalError> {
        User::find()
            .filter(user::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_by_name", e))
    }

    /// Find a user by normalized email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, InternalError> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_by_email", e))
    }

    /// All users, in creation order
    pub async fn list_users(&self) -> Result<Vec<user::Model>, InternalError> {
        User::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_users", e))
    }

    /// Apply a partial update to a user
    ///
    /// # Returns
    /// * `Ok(Model)` - The updated user
    /// * `Err(InternalError::Credential(UserIdNotFound))` - No such user
    /// * `Err(InternalError::Credential(DuplicateName | DuplicateEmail))` - uniqueness violated
    pub async fn update_user(
        &self,
        user_id: i64,
        changes: UserChanges,
    ) -> Result<user::Model, InternalError> {
        let existing = self
            .get_user_by_id(user_id)
            .await?
            .ok_or(CredentialError::UserIdNotFound { user_id })?;

        let name = changes.name.clone().unwrap_or_else(|| existing.name.clone());
        let email = changes.email.clone().unwrap_or_else(|| existing.email.clone());

        let mut model: ActiveModel = existing.into();
        if let Some(new_name) = changes.name {
            model.name = Set(new_name);
        }
        if let Some(new_email) = changes.email {
            model.email = Set(new_email);
        }
        if let Some(password) = changes.password {
            model.password_hash = Set(self.crypto_provider.hash_password(&password)?);
        }
        if let Some(role) = changes.role {
            model.role = Set(role.as_str().to_string());
        }
        model.updated_at = Set(Utc::now().timestamp());

        let updated = model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => CredentialError::UserIdNotFound { user_id }.into(),
            other => Self::map_write_error("update_user", other, &name, &email),
        })?;

        tracing::info!(user_id, "User updated");

        Ok(updated)
    }

    /// Set the role of a user
    pub async fn set_role(&self, user_id: i64, role: Role) -> Result<user::Model, InternalError> {
        self.update_user(
            user_id,
            UserChanges {
                role: Some(role),
                ..Default::default()
            },
        )
        .await
    }

    /// Delete a user and all of their plays in one transaction
    ///
    /// Tokens issued to the user stop validating as soon as this commits,
    /// since validation re-reads the subject.
    pub async fn delete_user(&self, user_id: i64) -> Result<(), InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::transaction("delete_user", e))?;

        let plays = Play::delete_many()
            .filter(play::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_user_plays", e))?;

        let deleted = User::delete_by_id(user_id)
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_user", e))?;

        if deleted.rows_affected == 0 {
            // Dropping the transaction rolls it back
            return Err(CredentialError::UserIdNotFound { user_id }.into());
        }

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction("delete_user", e))?;

        tracing::info!(user_id, plays_removed = plays.rows_affected, "User deleted");

        Ok(())
    }

    /// Verify login credentials
    ///
    /// Unknown email and wrong password are reported identically.
    ///
    /// # Returns
    /// * `Ok(Model)` - The user if the credentials are valid
    /// * `Err(InternalError::Credential(InvalidCredentials))` - otherwise
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<user::Model, InternalError> {
        let user = self
            .find_by_email(email)
            .await?
            .ok_or(CredentialError::InvalidCredentials)?;

        if !self.crypto_provider.verify_password(password, &user.password_hash)? {
            return Err(CredentialError::InvalidCredentials.into());
        }

        Ok(user)
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("db", &"<connection>")
            .field("crypto_provider", &"<redacted>")
            .finish()
    }
}
