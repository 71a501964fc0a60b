use super::*;

/// Tests building a text option with every field set.
///
/// Expected: Ok(FormOption) exposing the configured id, type and meta
#[test]
fn builds_text_input() -> Result<(), BuildError> {
    let option = FormOptionBuilder::text_input()
        .id("nickname")
        .meta(json!({ "label": "Nickname" }))
        .on_request(|_| async { Ok(json!("bob")) })
        .on_update(|_, _| async { Ok(OptionSetResult::ok()) })
        .build()?;

    assert_eq!(option.id(), "nickname");
    assert_eq!(option.option_type(), TEXT_INPUT);
    assert_eq!(option.meta().get("label"), Some(&json!("Nickname")));

    Ok(())
}

/// Tests custom option types are carried verbatim.
///
/// Expected: option_type() returns the given type
#[test]
fn keeps_custom_type() -> Result<(), BuildError> {
    let option = FormOptionBuilder::new("ColorPicker")
        .id("color")
        .on_request(|_| async { Ok(Value::Null) })
        .on_update(|_, _| async { Ok(OptionSetResult::ok()) })
        .build()?;

    assert_eq!(option.option_type(), "ColorPicker");
    assert!(option.meta().is_empty());

    Ok(())
}

/// Tests a missing or empty id is rejected.
///
/// Expected: Err(BuildError::MissingOptionId)
#[test]
fn rejects_missing_id() {
    let missing = FormOptionBuilder::text_input()
        .on_request(|_| async { Ok(Value::Null) })
        .on_update(|_, _| async { Ok(OptionSetResult::ok()) })
        .build();
    let empty = FormOptionBuilder::text_input()
        .id("")
        .on_request(|_| async { Ok(Value::Null) })
        .on_update(|_, _| async { Ok(OptionSetResult::ok()) })
        .build();

    assert_eq!(missing.unwrap_err(), BuildError::MissingOptionId);
    assert_eq!(empty.unwrap_err(), BuildError::MissingOptionId);
}

/// Tests meta must be a JSON object.
///
/// Expected: Err(BuildError::InvalidMeta) naming the option
#[test]
fn rejects_non_object_meta() {
    let result = FormOptionBuilder::text_input()
        .id("nickname")
        .meta(json!(["label"]))
        .on_request(|_| async { Ok(Value::Null) })
        .on_update(|_, _| async { Ok(OptionSetResult::ok()) })
        .build();

    assert_eq!(
        result.unwrap_err(),
        BuildError::InvalidMeta("nickname".to_string())
    );
}

/// Tests both the getter and the setter are mandatory.
///
/// Expected: Err(BuildError::MissingCallback) naming the missing callback
#[test]
fn rejects_missing_callbacks() {
    let no_get = FormOptionBuilder::text_input()
        .id("nickname")
        .on_update(|_, _| async { Ok(OptionSetResult::ok()) })
        .build();
    let no_set = FormOptionBuilder::text_input()
        .id("nickname")
        .on_request(|_| async { Ok(Value::Null) })
        .build();

    assert_eq!(
        no_get.unwrap_err(),
        BuildError::MissingCallback {
            option: "nickname".to_string(),
            callback: "on_request",
        }
    );
    assert_eq!(
        no_set.unwrap_err(),
        BuildError::MissingCallback {
            option: "nickname".to_string(),
            callback: "on_update",
        }
    );
}

/// Tests an option without an access check is allowed.
///
/// Expected: AccessControlResult::Allowed
#[tokio::test]
async fn access_defaults_to_allowed() -> Result<(), BuildError> {
    let access = option("a").can_access(ctx()).await;

    assert_eq!(access.ok(), Some(AccessControlResult::Allowed));

    Ok(())
}

/// Tests callbacks receive the request context.
///
/// Expected: getter sees the guild id it was called with
#[tokio::test]
async fn getter_receives_context() -> Result<(), BuildError> {
    let option = FormOptionBuilder::text_input()
        .id("guild")
        .on_request(|ctx: OptionContext| async move {
            Ok(json!(ctx.guild_id.map(|id| id.get())))
        })
        .on_update(|_, _| async { Ok(OptionSetResult::ok()) })
        .build()?;
    let ctx = OptionContext::guild(UserId::new(1), serenity::all::GuildId::new(77));

    let value = option.get(ctx).await;

    assert_eq!(value.ok(), Some(json!(77)));

    Ok(())
}

/// Tests a panicking callback is turned into an error.
///
/// Expected: Err from get(), the panic does not propagate
#[tokio::test]
async fn panicking_getter_is_an_error() -> Result<(), BuildError> {
    let option = FormOptionBuilder::text_input()
        .id("boom")
        .on_request(|_| async {
            if true {
                panic!("storage unavailable");
            }
            Ok(Value::Null)
        })
        .on_update(|_, _| async { Ok(OptionSetResult::ok()) })
        .build()?;

    let result = option.get(ctx()).await;

    assert!(result.is_err());

    Ok(())
}
