use std::fmt;

use super::auth::Role;

/// Kind of resource an action targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    User,
    Game,
    Play,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::User => f.write_str("user"),
            ResourceKind::Game => f.write_str("game"),
            ResourceKind::Play => f.write_str("play"),
        }
    }
}

/// Verb of a request, with the payload facts the policy needs
///
/// `role` carries a requested role assignment, if the payload contains one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create { role: Option<Role> },
    Read,
    Update { role: Option<Role> },
    Delete,
    Login,
}

impl Action {
    pub const CREATE: Action = Action::Create { role: None };
    pub const UPDATE: Action = Action::Update { role: None };

    pub fn requested_role(&self) -> Option<Role> {
        match self {
            Action::Create { role } | Action::Update { role } => *role,
            _ => None,
        }
    }
}

/// Target of an action together with its ownership facts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// A single user (`Some`) or the user collection (`None`)
    User { user_id: Option<i64> },
    Game { game_id: Option<i64> },
    /// Plays always live under their owning user
    Play { owner_id: i64, play_id: Option<i64> },
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::User { .. } => ResourceKind::User,
            Resource::Game { .. } => ResourceKind::Game,
            Resource::Play { .. } => ResourceKind::Play,
        }
    }

    /// User id that owns this resource, if ownership applies
    pub fn owner_id(&self) -> Option<i64> {
        match self {
            Resource::User { user_id } => *user_id,
            Resource::Game { .. } => None,
            Resource::Play { owner_id, .. } => Some(*owner_id),
        }
    }
}

/// Why the policy refused a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// The capability does not exist for this resource kind
    MethodNotSupported,
    /// The action needs a known identity and the actor has none
    Unauthenticated,
    /// The actor is known but lacks the role or ownership
    Forbidden(&'static str),
}

/// Outcome of a policy evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}
