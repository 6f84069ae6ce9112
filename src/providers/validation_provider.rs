use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::InternalError;
use crate::stores::{CredentialStore, GameStore, NewGame, NewUser, UserChanges};
use crate::types::internal::listing::{
    GameQuery, GameSortField, PlayQuery, PlaySortField, SortDirection,
};
use crate::types::internal::validation::FieldError;

/// Minimum password length, in characters
pub const PASSWORD_MIN_LENGTH: usize = 5;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// Trimmed, lower-cased form in which emails are stored and compared
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Checks request payloads against the field rules of each resource
///
/// Every check returns the complete list of failures rather than stopping at
/// the first one. An empty list means the payload is acceptable.
pub struct ValidationProvider {
    credential_store: Arc<CredentialStore>,
    game_store: Arc<GameStore>,
}

impl ValidationProvider {
    pub fn new(credential_store: Arc<CredentialStore>, game_store: Arc<GameStore>) -> Self {
        Self {
            credential_store,
            game_store,
        }
    }

    fn check_name(name: &str, errors: &mut Vec<FieldError>) {
        if name.trim().is_empty() {
            errors.push(FieldError::new("name", "must not be empty"));
        }
    }

    fn check_email(email: &str, errors: &mut Vec<FieldError>) {
        if !EMAIL_RE.is_match(email) {
            errors.push(FieldError::new("email", "must be a valid email address"));
        }
    }

    fn check_password(password: &str, errors: &mut Vec<FieldError>) {
        if password.chars().count() < PASSWORD_MIN_LENGTH {
            errors.push(FieldError::new(
                "password",
                format!("must be at least {} characters", PASSWORD_MIN_LENGTH),
            ));
        }
    }

    /// Name/email collisions with any user other than `exclude_id`
    ///
    /// Only gives friendlier messages; the UNIQUE indexes still decide races.
    async fn check_collisions(
        &self,
        name: Option<&str>,
        email: Option<&str>,
        exclude_id: Option<i64>,
        errors: &mut Vec<FieldError>,
    ) -> Result<(), InternalError> {
        let is_other = |id: i64| exclude_id != Some(id);

        if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
            if let Some(existing) = self.credential_store.find_by_name(name).await? {
                if is_other(existing.id) {
                    errors.push(FieldError::new("name", "is already taken"));
                }
            }
        }

        if let Some(email) = email.filter(|e| EMAIL_RE.is_match(e)) {
            if let Some(existing) = self.credential_store.find_by_email(email).await? {
                if is_other(existing.id) {
                    errors.push(FieldError::new("email", "is already taken"));
                }
            }
        }

        Ok(())
    }

    /// Validate a user registration; `email` must already be normalized
    pub async fn validate_new_user(&self, new_user: &NewUser) -> Result<Vec<FieldError>, InternalError> {
        let mut errors = Vec::new();

        Self::check_name(&new_user.name, &mut errors);
        Self::check_email(&new_user.email, &mut errors);
        Self::check_password(&new_user.password, &mut errors);
        self.check_collisions(Some(&new_user.name), Some(&new_user.email), None, &mut errors)
            .await?;

        Ok(errors)
    }

    /// Validate the fields present in a partial user update
    pub async fn validate_user_changes(
        &self,
        user_id: i64,
        changes: &UserChanges,
    ) -> Result<Vec<FieldError>, InternalError> {
        let mut errors = Vec::new();

        if let Some(name) = &changes.name {
            Self::check_name(name, &mut errors);
        }
        if let Some(email) = &changes.email {
            Self::check_email(email, &mut errors);
        }
        if let Some(password) = &changes.password {
            Self::check_password(password, &mut errors);
        }
        self.check_collisions(
            changes.name.as_deref(),
            changes.email.as_deref(),
            Some(user_id),
            &mut errors,
        )
        .await?;

        Ok(errors)
    }

    /// Validate a game payload
    pub fn validate_new_game(&self, new_game: &NewGame) -> Vec<FieldError> {
        let mut errors = Vec::new();

        Self::check_name(&new_game.name, &mut errors);
        if new_game.designers.is_empty() {
            errors.push(FieldError::new("designers", "must contain at least one designer"));
        } else if new_game.designers.iter().any(|d| d.trim().is_empty()) {
            errors.push(FieldError::new("designers", "must not contain empty names"));
        }
        if new_game.cover.trim().is_empty() {
            errors.push(FieldError::new("cover", "must not be empty"));
        }

        errors
    }

    /// Validate a play payload
    ///
    /// The game reference is checked first so it always leads the list.
    pub async fn validate_new_play(
        &self,
        name: &str,
        game_id: Option<i64>,
        played_at: Option<i64>,
        additional_data: Option<&serde_json::Value>,
    ) -> Result<Vec<FieldError>, InternalError> {
        let mut errors = Vec::new();

        match game_id {
            None => errors.push(FieldError::new("game_id", "is required")),
            Some(id) if !self.game_store.game_exists(id).await? => {
                errors.push(FieldError::new("game_id", "must reference an existing game"));
            }
            Some(_) => {}
        }
        if played_at.is_none() {
            errors.push(FieldError::new("played_at", "is required"));
        }
        Self::check_name(name, &mut errors);
        match additional_data {
            None | Some(serde_json::Value::Null) => {
                errors.push(FieldError::new("additional_data", "is required"));
            }
            Some(serde_json::Value::String(s)) if s.trim().is_empty() => {
                errors.push(FieldError::new("additional_data", "must not be empty"));
            }
            Some(_) => {}
        }

        Ok(errors)
    }

    /// Build a play listing query from raw request parameters
    pub fn play_query(
        &self,
        order: Option<&str>,
        order_type: Option<&str>,
        game_id: Option<i64>,
        from_date: Option<i64>,
        to_date: Option<i64>,
        search: Option<String>,
    ) -> Result<PlayQuery, Vec<FieldError>> {
        let mut errors = Vec::new();

        let order = match order {
            Some(raw) => raw.parse::<PlaySortField>().unwrap_or_else(|e| {
                errors.push(e);
                PlaySortField::default()
            }),
            None => PlaySortField::default(),
        };
        if let (Some(from), Some(to)) = (from_date, to_date) {
            if from > to {
                errors.push(FieldError::new("from_date", "must not be after to_date"));
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(PlayQuery {
            order,
            direction: SortDirection::parse_lenient(order_type),
            game_id,
            from_date,
            to_date,
            search,
        })
    }

    /// Build a game listing query from raw request parameters
    pub fn game_query(
        &self,
        order: Option<&str>,
        order_type: Option<&str>,
        search: Option<String>,
    ) -> Result<GameQuery, Vec<FieldError>> {
        let order = match order {
            Some(raw) => raw.parse::<GameSortField>().map_err(|e| vec![e])?,
            None => GameSortField::default(),
        };

        Ok(GameQuery {
            order,
            direction: SortDirection::parse_lenient(order_type),
            search,
        })
    }
}
