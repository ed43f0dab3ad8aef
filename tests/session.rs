mod common;

use common::Harness;
use gamesync::auth::{AuthError, SecureString};
use gamesync::interactor::{logout, InteractorError, Pipeline, RestoreSession};
use gamesync::state::{Game, GameStatus, GlobalAction, User};

#[tokio::test]
async fn test_restore_without_token_never_hits_the_network() {
    let harness = Harness::new();

    let err = Pipeline::global_only(RestoreSession::new(harness.env.auth.clone()), &harness.env)
        .execute()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        InteractorError::Unauthenticated(AuthError::MissingCredential)
    ));
    assert!(harness.transport.requests().is_empty());
    assert!(harness.entries().is_empty());
}

#[tokio::test]
async fn test_restore_sends_bearer_and_reauthenticates_events() {
    let harness = Harness::new();
    harness.env.auth.save_token(SecureString::new("tok-ada")).unwrap();
    harness
        .transport
        .respond(200, r#"{"id": "u1", "name": "ada"}"#);

    Pipeline::global_only(RestoreSession::new(harness.env.auth.clone()), &harness.env)
        .execute()
        .await
        .unwrap();

    let requests = harness.transport.requests();
    assert_eq!(requests[0].path, "/users/me");
    assert_eq!(requests[0].credential.as_ref().unwrap().expose(), "tok-ada");
    assert!(requests[0].body.is_none());

    assert_eq!(
        harness.entries(),
        vec![
            "save_token tok-ada".to_string(),
            "user ada".to_string(),
            r#"event {"token":"tok-ada"}"#.to_string(),
        ]
    );
}

#[tokio::test]
async fn test_rejected_token_leaves_user_signed_out() {
    let harness = Harness::new();
    harness.env.auth.save_token(SecureString::new("stale")).unwrap();
    harness.transport.respond(401, r#"{"message": "invalid token"}"#);

    let err = Pipeline::global_only(RestoreSession::new(harness.env.auth.clone()), &harness.env)
        .execute()
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "invalid token");
    assert!(!harness.env.global.state().is_signed_in());
}

#[tokio::test]
async fn test_logout_clears_user_game_and_token() {
    let harness = Harness::new();
    harness.env.auth.save_token(SecureString::new("tok-ada")).unwrap();
    harness.env.global.dispatch(GlobalAction::SetCurrentUser(User {
        id: "u1".to_string(),
        name: "ada".to_string(),
    }));
    harness.env.global.dispatch(GlobalAction::SetCurrentGame(Game {
        id: "g1".to_string(),
        status: GameStatus::Waiting,
        players: Vec::new(),
    }));

    logout(&harness.env.global, &harness.env.side_effects())
        .await
        .unwrap();

    let state = harness.env.global.state();
    assert!(state.current_user.is_none());
    assert!(state.current_game.is_none());
    assert!(harness.env.auth.current_token().is_none());
    assert_eq!(
        harness.entries()[harness.entries().len() - 2..],
        ["no user".to_string(), "clear_token".to_string()]
    );
}
