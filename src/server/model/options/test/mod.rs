use crate::server::{
    error::build::BuildError,
    model::options::{
        access::{AccessControlResult, OptionSetResult},
        callback::OptionContext,
        group::{FormGroup, FormGroupBuilder},
        option::{FormOption, FormOptionBuilder, TEXT_INPUT},
        registry::OptionRegistry,
    },
};
use serde_json::{json, Value};
use serenity::all::UserId;

mod option;

fn ctx() -> OptionContext {
    OptionContext::user(UserId::new(1))
}

/// Builds a text option with no-op callbacks.
fn option(id: &str) -> FormOption {
    FormOptionBuilder::text_input()
        .id(id)
        .on_request(|_| async { Ok(Value::Null) })
        .on_update(|_, _| async { Ok(OptionSetResult::ok()) })
        .build()
        .expect("valid option")
}

fn group(id: &str) -> FormGroup {
    FormGroupBuilder::new()
        .id(id)
        .option(option("a"))
        .build()
        .expect("valid group")
}
