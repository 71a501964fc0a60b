use super::*;
use crate::server::controller::options::{
    get_guild_options, get_user_options, update_guild_options, update_user_options,
};

/// Tests anonymous reads never reach option callbacks.
///
/// Expected: 401 for user and guild options, no getter called
#[tokio::test]
async fn reads_require_login() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_session().build().await.unwrap();
    let session = test.session().await.unwrap();
    let store = MemoryStore::new();
    let state = AppState::for_test(registry(&store), DISCORD_API_URL);

    let user = get_user_options(State(state.clone()), session.clone())
        .await
        .into_response();
    let guild = get_guild_options(State(state), session.clone(), Path("abc".to_string()))
        .await
        .into_response();

    assert_eq!(user.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(guild.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(store.reads(), 0);

    Ok(())
}

/// Tests anonymous writes never reach option callbacks.
///
/// Expected: 401, nothing stored
#[tokio::test]
async fn writes_require_login() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_session().build().await.unwrap();
    let session = test.session().await.unwrap();
    let store = MemoryStore::new();
    let state = AppState::for_test(registry(&store), DISCORD_API_URL);

    let response = update_user_options(
        State(state),
        session.clone(),
        body(vec![update("profile", "nickname", json!("alice"))]),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(store.writes(), 0);

    Ok(())
}

/// Tests the user options body shape.
///
/// Expected: 200, `profile` editable with its value, `premium` disabled with the
/// `bool` flag and its options carrying the group sentinel
#[tokio::test]
async fn returns_user_options() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_session().build().await.unwrap();
    let session = test.session().await.unwrap();
    log_in(session).await?;
    let store = MemoryStore::new().with_value("user:nickname", json!("alice"));
    let state = AppState::for_test(registry(&store), DISCORD_API_URL);

    let response = get_user_options(State(state), session.clone())
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    assert_eq!(body[0]["id"], "profile");
    assert!(body[0].get("disabled").is_none());
    assert_eq!(body[0]["options"][0]["id"], "nickname");
    assert_eq!(body[0]["options"][0]["type"], "TextInput");
    assert_eq!(body[0]["options"][0]["value"], "alice");
    assert_eq!(body[0]["options"][0]["meta"]["label"], "nickname");

    assert_eq!(body[1]["id"], "premium");
    assert_eq!(body[1]["disabled"], json!({ "bool": true, "message": "Premium only" }));
    assert_eq!(
        body[1]["options"][0]["disabled"]["message"],
        "NOT_ALLOWED_GROUP_DISALLOWED"
    );

    Ok(())
}

/// Tests a successful user update answers with an empty map.
///
/// Expected: 200 with `{}`, value stored
#[tokio::test]
async fn updates_user_options() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_session().build().await.unwrap();
    let session = test.session().await.unwrap();
    log_in(session).await?;
    let store = MemoryStore::new();
    let state = AppState::for_test(registry(&store), DISCORD_API_URL);

    let response = update_user_options(
        State(state),
        session.clone(),
        body(vec![update("profile", "nickname", json!("bob"))]),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({}));
    assert_eq!(store.peek("user:nickname"), json!("bob"));

    Ok(())
}

/// Tests failed updates are reported per group with a 200.
///
/// Expected: `premium` entry for the denied option and `missing` group entry
/// without an option id, the allowed update still applied
#[tokio::test]
async fn reports_failed_updates() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_session().build().await.unwrap();
    let session = test.session().await.unwrap();
    log_in(session).await?;
    let store = MemoryStore::new();
    let state = AppState::for_test(registry(&store), DISCORD_API_URL);

    let response = update_user_options(
        State(state),
        session.clone(),
        body(vec![
            update("profile", "nickname", json!("carol")),
            update("premium", "badge", json!("gold")),
            GroupUpdateDto {
                id: "missing".to_string(),
                options: vec![],
            },
        ]),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    assert!(body.get("profile").is_none());
    assert_eq!(body["premium"][0]["id"], "badge");
    assert_eq!(body["premium"][0]["error"], "Premium only");
    assert!(body["missing"][0].get("id").is_none());
    assert_eq!(store.peek("user:nickname"), json!("carol"));
    assert_eq!(store.peek("user:badge"), Value::Null);

    Ok(())
}

/// Tests guild options are resolved for the guild in the path.
///
/// Expected: 200 with the value stored for guild 7 only
#[tokio::test]
async fn returns_guild_options() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_session().build().await.unwrap();
    let session = test.session().await.unwrap();
    log_in(session).await?;
    let store = MemoryStore::new()
        .with_value("7:prefix", json!("?"))
        .with_value("8:prefix", json!("!"));
    let state = AppState::for_test(registry(&store), DISCORD_API_URL);

    let response = get_guild_options(State(state), session.clone(), Path("7".to_string()))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body[0]["id"], "general");
    assert_eq!(body[0]["options"][0]["value"], "?");

    Ok(())
}

/// Tests guild updates are scoped to the guild in the path.
///
/// Expected: 200 with `{}`, value stored under guild 7
#[tokio::test]
async fn updates_guild_options() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_session().build().await.unwrap();
    let session = test.session().await.unwrap();
    log_in(session).await?;
    let store = MemoryStore::new();
    let state = AppState::for_test(registry(&store), DISCORD_API_URL);

    let response = update_guild_options(
        State(state),
        session.clone(),
        Path("7".to_string()),
        body(vec![update("general", "prefix", json!("$"))]),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({}));
    assert_eq!(store.peek("7:prefix"), json!("$"));

    Ok(())
}

/// Tests malformed guild ids are rejected before any callback runs.
///
/// Expected: 400 for "abc" and "0", no getter or setter called
#[tokio::test]
async fn rejects_invalid_guild_id() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_session().build().await.unwrap();
    let session = test.session().await.unwrap();
    log_in(session).await?;
    let store = MemoryStore::new();
    let state = AppState::for_test(registry(&store), DISCORD_API_URL);

    let read = get_guild_options(State(state.clone()), session.clone(), Path("abc".to_string()))
        .await
        .into_response();
    let write = update_guild_options(
        State(state),
        session.clone(),
        Path("0".to_string()),
        body(vec![update("general", "prefix", json!("$"))]),
    )
    .await
    .into_response();

    assert_eq!(read.status(), StatusCode::BAD_REQUEST);
    assert_eq!(write.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.reads(), 0);
    assert_eq!(store.writes(), 0);

    Ok(())
}

/// Tests the login is checked before the body is parsed.
///
/// Expected: 401 for user and guild writes with a malformed body, nothing stored
#[tokio::test]
async fn malformed_body_without_login_is_unauthorized() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_session().build().await.unwrap();
    let session = test.session().await.unwrap();
    let store = MemoryStore::new();
    let state = AppState::for_test(registry(&store), DISCORD_API_URL);

    let user = update_user_options(State(state.clone()), session.clone(), raw_body("{not json").await)
        .await
        .into_response();
    let guild = update_guild_options(
        State(state),
        session.clone(),
        Path("7".to_string()),
        raw_body("[{\"options\": 1}]").await,
    )
    .await
    .into_response();

    assert_eq!(user.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(guild.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(store.writes(), 0);

    Ok(())
}

/// Tests a logged in user sending a malformed body gets the extractor's status.
///
/// Expected: 400 for invalid JSON, 422 for the wrong shape, JSON error body, nothing stored
#[tokio::test]
async fn rejects_malformed_body() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_session().build().await.unwrap();
    let session = test.session().await.unwrap();
    log_in(session).await?;
    let store = MemoryStore::new();
    let state = AppState::for_test(registry(&store), DISCORD_API_URL);

    let syntax = update_user_options(State(state.clone()), session.clone(), raw_body("{not json").await)
        .await
        .into_response();
    let shape = update_user_options(State(state), session.clone(), raw_body("{\"id\": 1}").await)
        .await
        .into_response();

    assert_eq!(syntax.status(), StatusCode::BAD_REQUEST);
    assert_eq!(shape.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_json(shape).await["error"].is_string());
    assert_eq!(store.writes(), 0);

    Ok(())
}
