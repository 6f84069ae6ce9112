use std::str::FromStr;

use super::validation::FieldError;

/// Sort direction for list queries
///
/// Anything other than `desc` is ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

/// Sortable columns of a play listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaySortField {
    Id,
    GameId,
    PlayedAt,
    Name,
    #[default]
    CreatedAt,
}

impl FromStr for PlaySortField {
    type Err = FieldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "id" => Ok(PlaySortField::Id),
            "game_id" => Ok(PlaySortField::GameId),
            "played_at" => Ok(PlaySortField::PlayedAt),
            "name" => Ok(PlaySortField::Name),
            "created_at" => Ok(PlaySortField::CreatedAt),
            other => Err(FieldError::new(
                "order",
                format!(
                    "'{}' is not sortable, expected one of id, game_id, played_at, name, created_at",
                    other
                ),
            )),
        }
    }
}

/// Sortable columns of a game listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameSortField {
    Id,
    Name,
    #[default]
    CreatedAt,
}

impl FromStr for GameSortField {
    type Err = FieldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "id" => Ok(GameSortField::Id),
            "name" => Ok(GameSortField::Name),
            "created_at" => Ok(GameSortField::CreatedAt),
            other => Err(FieldError::new(
                "order",
                format!("'{}' is not sortable, expected one of id, name, created_at", other),
            )),
        }
    }
}

/// Validated parameters for listing a user's plays
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayQuery {
    pub order: PlaySortField,
    pub direction: SortDirection,
    /// Only plays of this game
    pub game_id: Option<i64>,
    /// Inclusive lower bound on `played_at`
    pub from_date: Option<i64>,
    /// Inclusive upper bound on `played_at`
    pub to_date: Option<i64>,
    /// Substring match on the play name
    pub search: Option<String>,
}

/// Validated parameters for listing games
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameQuery {
    pub order: GameSortField,
    pub direction: SortDirection,
    pub search: Option<String>,
}
