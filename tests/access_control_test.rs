// End-to-end policy checks through the coordinators

mod common;

use boardplay_backend::coordinators::{
    GameCoordinator, PlayCoordinator, PlayListParams, UserCoordinator,
};
use boardplay_backend::errors::AccessError;
use boardplay_backend::types::dto::auth::LoginRequest;
use boardplay_backend::types::dto::play::CreatePlayRequest;
use boardplay_backend::types::dto::user::{CreateUserRequest, UpdateUserRequest};
use boardplay_backend::types::internal::RequestContext;
use boardplay_backend::types::internal::auth::Role;
use common::{bearer_for, context_for, seed_game, seed_user, setup_app};
use serde_json::json;

fn registration(name: &str) -> CreateUserRequest {
    CreateUserRequest {
        name: name.to_string(),
        email: format!("{}@example.com", name),
        password: "secret".to_string(),
        role: None,
    }
}

fn play_request(game_id: i64, name: &str) -> CreatePlayRequest {
    CreatePlayRequest {
        game_id: Some(game_id),
        name: name.to_string(),
        additional_data: Some(json!({ "score": 10 })),
        played_at: Some(1_700_000_000),
    }
}

#[tokio::test]
async fn test_created_user_reads_back_without_password() {
    let app = setup_app().await;
    let users = UserCoordinator::new(app.clone());
    let anon = RequestContext::anonymous();

    let created = users.create_user(&anon, registration("alice")).await.unwrap();
    let fetched = users.get_user(&anon, created.id).await.unwrap();

    assert_eq!(fetched.name, "alice");
    assert_eq!(fetched.email, "alice@example.com");
    assert_eq!(fetched.role, Role::Normal);

    let body = serde_json::to_value(&fetched).unwrap();
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_duplicate_email_and_name_are_unprocessable() {
    let app = setup_app().await;
    let users = UserCoordinator::new(app.clone());
    let anon = RequestContext::anonymous();
    users.create_user(&anon, registration("alice")).await.unwrap();

    let mut same_email = registration("alicia");
    same_email.email = "ALICE@example.com".to_string();
    match users.create_user(&anon, same_email).await {
        Err(AccessError::UnprocessableEntity(errors)) => assert_eq!(errors[0].param, "email"),
        other => panic!("expected 422, got {:?}", other),
    }

    let mut same_name = registration("alice");
    same_name.email = "other@example.com".to_string();
    match users.create_user(&anon, same_name).await {
        Err(AccessError::UnprocessableEntity(errors)) => assert_eq!(errors[0].param, "name"),
        other => panic!("expected 422, got {:?}", other),
    }
}

#[tokio::test]
async fn test_concurrent_duplicate_registrations_admit_one() {
    let app = setup_app().await;
    let users = UserCoordinator::new(app.clone());
    let anon = RequestContext::anonymous();

    let (first, second) = tokio::join!(
        users.create_user(&anon, registration("racer")),
        users.create_user(&anon, registration("racer")),
    );

    let successes = [&first, &second].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    let failure = if first.is_err() { first } else { second };
    assert!(matches!(failure, Err(AccessError::UnprocessableEntity(_))));

    assert_eq!(users.list_users(&anon).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_deleted_user_token_is_unauthenticated() {
    let app = setup_app().await;
    let users = UserCoordinator::new(app.clone());
    let alice = seed_user(&app, "alice", Role::Normal).await;
    let bob = seed_user(&app, "bob", Role::Normal).await;
    let token = bearer_for(&app, alice.id);

    let ctx = RequestContext::from_bearer(Some(&token), &app.token_provider).await.unwrap();
    users.delete_user(&ctx, alice.id).await.unwrap();

    let zombie = RequestContext::from_bearer(Some(&token), &app.token_provider).await.unwrap();
    assert!(zombie.actor.is_anonymous());

    let update = UpdateUserRequest {
        name: Some("bobby".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        users.update_user(&zombie, bob.id, update).await,
        Err(AccessError::Unauthenticated)
    ));
    assert!(matches!(
        users.delete_user(&zombie, alice.id).await,
        Err(AccessError::Unauthenticated)
    ));
}

#[tokio::test]
async fn test_normal_user_may_only_edit_self() {
    let app = setup_app().await;
    let users = UserCoordinator::new(app.clone());
    let alice = seed_user(&app, "alice", Role::Normal).await;
    let bob = seed_user(&app, "bob", Role::Normal).await;
    let ctx = context_for(&app, alice.id).await;

    let rename = |name: &str| UpdateUserRequest {
        name: Some(name.to_string()),
        ..Default::default()
    };

    let updated = users.update_user(&ctx, alice.id, rename("alice2")).await.unwrap();
    assert_eq!(updated.name, "alice2");

    assert!(matches!(
        users.update_user(&ctx, bob.id, rename("bobby")).await,
        Err(AccessError::Forbidden)
    ));
    assert!(matches!(
        users.delete_user(&ctx, bob.id).await,
        Err(AccessError::Forbidden)
    ));

    // A missing target is reported as such, never as a permission failure
    assert!(matches!(
        users.delete_user(&ctx, 9_999).await,
        Err(AccessError::NotFound)
    ));
}

#[tokio::test]
async fn test_power_user_may_edit_and_delete_anyone() {
    let app = setup_app().await;
    let users = UserCoordinator::new(app.clone());
    let root = seed_user(&app, "root", Role::Power).await;
    let other_power = seed_user(&app, "admin2", Role::Power).await;
    let bob = seed_user(&app, "bob", Role::Normal).await;
    let ctx = context_for(&app, root.id).await;

    let demote = UpdateUserRequest {
        role: Some(Role::Normal),
        ..Default::default()
    };
    let demoted = users.update_user(&ctx, other_power.id, demote).await.unwrap();
    assert_eq!(demoted.role, Role::Normal);

    let deleted = users.delete_user(&ctx, bob.id).await.unwrap();
    assert_eq!(deleted.id, bob.id);
    assert!(matches!(users.get_user(&ctx, bob.id).await, Err(AccessError::NotFound)));

    // Self-deletion is permitted
    users.delete_user(&ctx, root.id).await.unwrap();
}

#[tokio::test]
async fn test_role_escalation_requires_power() {
    let app = setup_app().await;
    let users = UserCoordinator::new(app.clone());
    let alice = seed_user(&app, "alice", Role::Normal).await;
    let root = seed_user(&app, "root", Role::Power).await;

    let promote = || UpdateUserRequest {
        role: Some(Role::Power),
        ..Default::default()
    };

    let alice_ctx = context_for(&app, alice.id).await;
    assert!(matches!(
        users.update_user(&alice_ctx, alice.id, promote()).await,
        Err(AccessError::Forbidden)
    ));

    let root_ctx = context_for(&app, root.id).await;
    let promoted = users.update_user(&root_ctx, alice.id, promote()).await.unwrap();
    assert_eq!(promoted.role, Role::Power);

    // Role is re-read on every validation, so the next request sees it
    let fresh = context_for(&app, alice.id).await;
    assert!(fresh.actor.user().is_some_and(|u| u.is_power()));
}

#[tokio::test]
async fn test_power_registration_needs_power_token() {
    let app = setup_app().await;
    let users = UserCoordinator::new(app.clone());
    let alice = seed_user(&app, "alice", Role::Normal).await;
    let root = seed_user(&app, "root", Role::Power).await;

    let mut request = registration("mallory");
    request.role = Some(Role::Power);
    assert!(matches!(
        users.create_user(&RequestContext::anonymous(), request).await,
        Err(AccessError::Unauthenticated)
    ));

    let mut request = registration("mallory");
    request.role = Some(Role::Power);
    assert!(matches!(
        users.create_user(&context_for(&app, alice.id).await, request).await,
        Err(AccessError::Forbidden)
    ));

    let mut request = registration("carol");
    request.role = Some(Role::Power);
    let carol = users.create_user(&context_for(&app, root.id).await, request).await.unwrap();
    assert_eq!(carol.role, Role::Power);
}

#[tokio::test]
async fn test_login_issues_working_token() {
    let app = setup_app().await;
    let users = UserCoordinator::new(app.clone());
    let anon = RequestContext::anonymous();
    let alice = seed_user(&app, "alice", Role::Normal).await;

    let issued = users
        .login(
            &anon,
            LoginRequest {
                email: "Alice@Example.com".to_string(),
                password: "password".to_string(),
            },
        )
        .await
        .unwrap();
    let ctx = RequestContext::from_bearer(Some(&issued.token), &app.token_provider)
        .await
        .unwrap();
    assert_eq!(ctx.actor.user().map(|u| u.user_id), Some(alice.id));

    let wrong = LoginRequest {
        email: "alice@example.com".to_string(),
        password: "nope!".to_string(),
    };
    assert!(matches!(
        users.login(&anon, wrong).await,
        Err(AccessError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_game_creation_by_role() {
    let app = setup_app().await;
    let games = GameCoordinator::new(app.clone());
    let alice = seed_user(&app, "alice", Role::Normal).await;
    let root = seed_user(&app, "root", Role::Power).await;

    let request = || boardplay_backend::types::dto::game::CreateGameRequest {
        name: "Agricola".to_string(),
        designers: vec!["Uwe Rosenberg".to_string()],
        cover: "aGVsbG8=".to_string(),
    };

    assert!(matches!(
        games.create_game(&RequestContext::anonymous(), request()).await,
        Err(AccessError::Unauthenticated)
    ));
    assert!(matches!(
        games.create_game(&context_for(&app, alice.id).await, request()).await,
        Err(AccessError::Forbidden)
    ));
    let created = games.create_game(&context_for(&app, root.id).await, request()).await.unwrap();
    assert_eq!(created.designers, vec!["Uwe Rosenberg".to_string()]);
}

#[tokio::test]
async fn test_unsupported_game_actions_ignore_identity() {
    let app = setup_app().await;
    let games = GameCoordinator::new(app.clone());
    let game = seed_game(&app, "Catan").await;
    let root = seed_user(&app, "root", Role::Power).await;
    let alice = seed_user(&app, "alice", Role::Normal).await;

    let actors = [
        RequestContext::anonymous(),
        context_for(&app, alice.id).await,
        context_for(&app, root.id).await,
    ];
    for ctx in &actors {
        assert!(matches!(
            games.delete_game(ctx, game.id).await,
            Err(AccessError::MethodNotSupported)
        ));
        assert!(matches!(
            games.update_game(ctx, 9_999).await,
            Err(AccessError::MethodNotSupported)
        ));
    }
}

#[tokio::test]
async fn test_play_requires_existing_game() {
    let app = setup_app().await;
    let plays = PlayCoordinator::new(app.clone());
    let alice = seed_user(&app, "alice", Role::Normal).await;
    let ctx = context_for(&app, alice.id).await;

    match plays.create_play(&ctx, alice.id, play_request(-1, "ghost game")).await {
        Err(AccessError::UnprocessableEntity(errors)) => assert_eq!(errors[0].param, "game_id"),
        other => panic!("expected 422, got {:?}", other),
    }
}

#[tokio::test]
async fn test_play_ownership() {
    let app = setup_app().await;
    let plays = PlayCoordinator::new(app.clone());
    let game = seed_game(&app, "Catan").await;
    let alice = seed_user(&app, "alice", Role::Normal).await;
    let bob = seed_user(&app, "bob", Role::Normal).await;
    let root = seed_user(&app, "root", Role::Power).await;

    let bob_ctx = context_for(&app, bob.id).await;
    assert!(matches!(
        plays.create_play(&bob_ctx, alice.id, play_request(game.id, "sneaky")).await,
        Err(AccessError::Forbidden)
    ));
    assert!(matches!(
        plays.create_play(&RequestContext::anonymous(), alice.id, play_request(game.id, "anon")).await,
        Err(AccessError::Unauthenticated)
    ));

    let root_ctx = context_for(&app, root.id).await;
    let play = plays
        .create_play(&root_ctx, alice.id, play_request(game.id, "on behalf"))
        .await
        .unwrap();
    assert_eq!(play.user_id, alice.id);

    // Reads are open, but a play is only addressable under its owner
    let anon = RequestContext::anonymous();
    assert!(plays.get_play(&anon, alice.id, play.id).await.is_ok());
    assert!(matches!(
        plays.get_play(&anon, bob.id, play.id).await,
        Err(AccessError::NotFound)
    ));
}

#[tokio::test]
async fn test_list_plays_sorted_by_game_id() {
    let app = setup_app().await;
    let plays = PlayCoordinator::new(app.clone());
    let alice = seed_user(&app, "alice", Role::Normal).await;
    let bob = seed_user(&app, "bob", Role::Normal).await;
    let catan = seed_game(&app, "Catan").await;
    let azul = seed_game(&app, "Azul").await;
    let ctx = context_for(&app, alice.id).await;
    let bob_ctx = context_for(&app, bob.id).await;

    for (game_id, name) in [(azul.id, "a1"), (catan.id, "c1"), (azul.id, "a2"), (catan.id, "c2")] {
        plays.create_play(&ctx, alice.id, play_request(game_id, name)).await.unwrap();
    }
    plays.create_play(&bob_ctx, bob.id, play_request(catan.id, "bob's")).await.unwrap();

    let params = |direction: &str| PlayListParams {
        order: Some("game_id".to_string()),
        order_type: Some(direction.to_string()),
        ..Default::default()
    };
    let anon = RequestContext::anonymous();
    let desc = plays.list_plays(&anon, alice.id, params("desc")).await.unwrap();
    let asc = plays.list_plays(&anon, alice.id, params("asc")).await.unwrap();

    assert_eq!(desc.len(), 4);
    assert!(desc.windows(2).all(|w| w[0].game_id >= w[1].game_id));
    assert!(asc.windows(2).all(|w| w[0].game_id <= w[1].game_id));
    assert!(desc.iter().all(|p| p.user_id == alice.id));

    let mut desc_ids: Vec<i64> = desc.iter().map(|p| p.id).collect();
    let mut asc_ids: Vec<i64> = asc.iter().map(|p| p.id).collect();
    desc_ids.sort();
    asc_ids.sort();
    assert_eq!(desc_ids, asc_ids);

    // Ties keep insertion order
    let azul_names: Vec<&str> = asc
        .iter()
        .filter(|p| p.game_id == azul.id)
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(azul_names, vec!["a1", "a2"]);
}

#[tokio::test]
async fn test_unknown_sort_field_is_unprocessable() {
    let app = setup_app().await;
    let plays = PlayCoordinator::new(app.clone());
    let alice = seed_user(&app, "alice", Role::Normal).await;

    let params = PlayListParams {
        order: Some("password".to_string()),
        ..Default::default()
    };
    match plays.list_plays(&RequestContext::anonymous(), alice.id, params).await {
        Err(AccessError::UnprocessableEntity(errors)) => assert_eq!(errors[0].param, "order"),
        other => panic!("expected 422, got {:?}", other),
    }
}

#[tokio::test]
async fn test_play_without_played_at_is_unprocessable() {
    let app = setup_app().await;
    let plays = PlayCoordinator::new(app.clone());
    let game = seed_game(&app, "Catan").await;
    let alice = seed_user(&app, "alice", Role::Normal).await;
    let ctx = context_for(&app, alice.id).await;

    let mut request = play_request(game.id, "undated");
    request.played_at = None;
    match plays.create_play(&ctx, alice.id, request).await {
        Err(AccessError::UnprocessableEntity(errors)) => assert_eq!(errors[0].param, "played_at"),
        other => panic!("expected 422, got {:?}", other),
    }
}

#[tokio::test]
async fn test_update_into_taken_name_or_email_is_unprocessable() {
    let app = setup_app().await;
    let users = UserCoordinator::new(app.clone());
    seed_user(&app, "alice", Role::Normal).await;
    let bob = seed_user(&app, "bob", Role::Normal).await;
    let ctx = context_for(&app, bob.id).await;

    let take_name = UpdateUserRequest {
        name: Some("alice".to_string()),
        ..Default::default()
    };
    match users.update_user(&ctx, bob.id, take_name).await {
        Err(AccessError::UnprocessableEntity(errors)) => assert_eq!(errors[0].param, "name"),
        other => panic!("expected 422, got {:?}", other),
    }

    let take_email = UpdateUserRequest {
        email: Some("Alice@Example.com".to_string()),
        ..Default::default()
    };
    match users.update_user(&ctx, bob.id, take_email).await {
        Err(AccessError::UnprocessableEntity(errors)) => assert_eq!(errors[0].param, "email"),
        other => panic!("expected 422, got {:?}", other),
    }

    let unchanged = users.get_user(&ctx, bob.id).await.unwrap();
    assert_eq!(unchanged.name, "bob");
    assert_eq!(unchanged.email, "bob@example.com");
}
