use crate::types::internal::access::{Action, Decision, DenyReason, Resource, ResourceKind};
use crate::types::internal::auth::{Actor, Role};

/// Fixed two-tier access policy
///
/// Pure function of (actor, action, resource); it never touches storage.
/// Evaluation order gives 405 before 401 before 403, and the coordinators
/// run `precheck` before resolving the target so a 404 lands between 401
/// and 403.
#[derive(Debug, Default, Clone, Copy)]
pub struct AuthorizationProvider;

impl AuthorizationProvider {
    pub fn new() -> Self {
        Self
    }

    /// Capabilities that exist at all for a resource kind
    fn is_supported(action: &Action, kind: ResourceKind) -> bool {
        match action {
            Action::Create { .. } | Action::Read => true,
            Action::Update { .. } | Action::Delete | Action::Login => kind == ResourceKind::User,
        }
    }

    /// Whether the action can only be performed by a known user
    fn requires_identity(action: &Action, kind: ResourceKind) -> bool {
        match action {
            Action::Read | Action::Login => false,
            // Registration is open, but not registration as a power user
            Action::Create { role } if kind == ResourceKind::User => *role == Some(Role::Power),
            _ => true,
        }
    }

    /// Checks that need no knowledge of the target: support, then identity
    pub fn precheck(&self, actor: &Actor, action: &Action, kind: ResourceKind) -> Decision {
        if !Self::is_supported(action, kind) {
            return Decision::Deny(DenyReason::MethodNotSupported);
        }
        if actor.is_anonymous() && Self::requires_identity(action, kind) {
            return Decision::Deny(DenyReason::Unauthenticated);
        }
        Decision::Allow
    }

    /// Full decision for an action on a resolved target
    pub fn decide(&self, actor: &Actor, action: &Action, resource: &Resource) -> Decision {
        let pre = self.precheck(actor, action, resource.kind());
        if !pre.is_allowed() {
            return pre;
        }

        if matches!(action, Action::Read | Action::Login) {
            return Decision::Allow;
        }

        let is_power = actor.user().is_some_and(|u| u.is_power());
        let is_owner = match (actor.user(), resource.owner_id()) {
            (Some(user), Some(owner_id)) => user.user_id == owner_id,
            _ => false,
        };

        match (action, resource) {
            (Action::Create { .. }, Resource::User { .. }) => {}
            (Action::Create { .. }, Resource::Game { .. }) => {
                if !is_power {
                    return Decision::Deny(DenyReason::Forbidden("only power users may create games"));
                }
            }
            (_, Resource::User { .. }) | (Action::Create { .. }, Resource::Play { .. }) => {
                if !is_owner && !is_power {
                    return Decision::Deny(DenyReason::Forbidden("not the owner of this resource"));
                }
            }
            // Unsupported combinations were rejected by precheck
            _ => return Decision::Deny(DenyReason::MethodNotSupported),
        }

        if action.requested_role() == Some(Role::Power) && !is_power {
            return Decision::Deny(DenyReason::Forbidden("only power users may grant the power role"));
        }

        Decision::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::internal::auth::AuthenticatedUser;
    use rstest::rstest;

    const OWNER: i64 = 1;
    const OTHER: i64 = 2;

    fn normal(user_id: i64) -> Actor {
        Actor::User(AuthenticatedUser { user_id, role: Role::Normal })
    }

    fn power(user_id: i64) -> Actor {
        Actor::User(AuthenticatedUser { user_id, role: Role::Power })
    }

    fn user(user_id: i64) -> Resource {
        Resource::User { user_id: Some(user_id) }
    }

    fn play(owner_id: i64) -> Resource {
        Resource::Play { owner_id, play_id: Some(10) }
    }

    fn game() -> Resource {
        Resource::Game { game_id: Some(5) }
    }

    fn forbidden(decision: Decision) -> bool {
        matches!(decision, Decision::Deny(DenyReason::Forbidden(_)))
    }

    #[rstest]
    #[case::update_game(Action::UPDATE, game())]
    #[case::delete_game(Action::Delete, game())]
    #[case::update_play(Action::UPDATE, play(OWNER))]
    #[case::delete_play(Action::Delete, play(OWNER))]
    fn unsupported_capabilities_are_405_for_everyone(#[case] action: Action, #[case] resource: Resource) {
        let policy = AuthorizationProvider::new();
        for actor in [Actor::Anonymous, normal(OWNER), power(OTHER)] {
            assert_eq!(
                policy.decide(&actor, &action, &resource),
                Decision::Deny(DenyReason::MethodNotSupported),
                "{} on {:?}",
                actor,
                resource
            );
        }
    }

    #[rstest]
    #[case::update_user(Action::UPDATE, user(OWNER))]
    #[case::delete_user(Action::Delete, user(OWNER))]
    #[case::create_game(Action::CREATE, Resource::Game { game_id: None })]
    #[case::create_play(Action::CREATE, Resource::Play { owner_id: OWNER, play_id: None })]
    #[case::create_power_user(Action::Create { role: Some(Role::Power) }, Resource::User { user_id: None })]
    fn anonymous_mutations_are_unauthenticated(#[case] action: Action, #[case] resource: Resource) {
        let policy = AuthorizationProvider::new();
        assert_eq!(
            policy.decide(&Actor::Anonymous, &action, &resource),
            Decision::Deny(DenyReason::Unauthenticated)
        );
    }

    #[rstest]
    #[case::list_users(Resource::User { user_id: None })]
    #[case::get_user(user(OWNER))]
    #[case::get_game(game())]
    #[case::list_plays(Resource::Play { owner_id: OWNER, play_id: None })]
    #[case::get_play(play(OWNER))]
    fn reads_are_open_to_everyone(#[case] resource: Resource) {
        let policy = AuthorizationProvider::new();
        for actor in [Actor::Anonymous, normal(OTHER), power(OTHER)] {
            assert!(policy.decide(&actor, &Action::Read, &resource).is_allowed());
        }
    }

    #[test]
    fn test_login_and_registration_are_open() {
        let policy = AuthorizationProvider::new();
        let users = Resource::User { user_id: None };

        assert!(policy.decide(&Actor::Anonymous, &Action::Login, &users).is_allowed());
        assert!(policy.decide(&Actor::Anonymous, &Action::CREATE, &users).is_allowed());
        assert!(
            policy
                .decide(&Actor::Anonymous, &Action::Create { role: Some(Role::Normal) }, &users)
                .is_allowed()
        );
    }

    #[rstest]
    #[case::update(Action::UPDATE)]
    #[case::delete(Action::Delete)]
    fn user_mutations_need_owner_or_power(#[case] action: Action) {
        let policy = AuthorizationProvider::new();

        assert!(policy.decide(&normal(OWNER), &action, &user(OWNER)).is_allowed());
        assert!(forbidden(policy.decide(&normal(OTHER), &action, &user(OWNER))));
        assert!(policy.decide(&power(OTHER), &action, &user(OWNER)).is_allowed());
    }

    #[test]
    fn test_normal_user_cannot_grant_power_even_to_self() {
        let policy = AuthorizationProvider::new();
        let grant = Action::Update { role: Some(Role::Power) };

        assert!(forbidden(policy.decide(&normal(OWNER), &grant, &user(OWNER))));
        assert!(forbidden(policy.decide(
            &normal(OWNER),
            &Action::Create { role: Some(Role::Power) },
            &Resource::User { user_id: None }
        )));
    }

    #[test]
    fn test_normal_user_may_keep_normal_role() {
        let policy = AuthorizationProvider::new();
        let keep = Action::Update { role: Some(Role::Normal) };

        assert!(policy.decide(&normal(OWNER), &keep, &user(OWNER)).is_allowed());
    }

    #[test]
    fn test_power_user_may_grant_and_revoke_power() {
        let policy = AuthorizationProvider::new();

        assert!(
            policy
                .decide(&power(OWNER), &Action::Update { role: Some(Role::Power) }, &user(OTHER))
                .is_allowed()
        );
        // Demoting another power user and deleting oneself are both allowed
        assert!(
            policy
                .decide(&power(OWNER), &Action::Update { role: Some(Role::Normal) }, &user(OTHER))
                .is_allowed()
        );
        assert!(policy.decide(&power(OWNER), &Action::Delete, &user(OWNER)).is_allowed());
    }

    #[test]
    fn test_only_power_users_create_games() {
        let policy = AuthorizationProvider::new();
        let games = Resource::Game { game_id: None };

        assert!(policy.decide(&power(OWNER), &Action::CREATE, &games).is_allowed());
        assert!(forbidden(policy.decide(&normal(OWNER), &Action::CREATE, &games)));
    }

    #[test]
    fn test_plays_are_created_by_owner_or_power() {
        let policy = AuthorizationProvider::new();
        let plays = Resource::Play { owner_id: OWNER, play_id: None };

        assert!(policy.decide(&normal(OWNER), &Action::CREATE, &plays).is_allowed());
        assert!(forbidden(policy.decide(&normal(OTHER), &Action::CREATE, &plays)));
        assert!(policy.decide(&power(OTHER), &Action::CREATE, &plays).is_allowed());
    }

    #[test]
    fn test_precheck_ignores_ownership() {
        let policy = AuthorizationProvider::new();

        assert!(policy.precheck(&normal(OTHER), &Action::Delete, ResourceKind::User).is_allowed());
        assert_eq!(
            policy.precheck(&Actor::Anonymous, &Action::Delete, ResourceKind::User),
            Decision::Deny(DenyReason::Unauthenticated)
        );
        assert_eq!(
            policy.precheck(&Actor::Anonymous, &Action::Delete, ResourceKind::Game),
            Decision::Deny(DenyReason::MethodNotSupported)
        );
    }
}
