use crate::server::{
    error::options::{OptionError, NOT_ALLOWED_GROUP_DISALLOWED},
    model::options::{
        access::{AccessControlResult, OptionSetResult},
        callback::OptionContext,
        group::{FormGroup, FormGroupBuilder},
        option::{FormOption, FormOptionBuilder},
        update::{UpdateFailure, UpdateGroupParam, UpdateOptionParam},
        view::Disabled,
    },
    service::options::OptionsService,
};
use serde_json::{json, Value};
use serenity::all::{GuildId, UserId};
use test_utils::store::MemoryStore;


const USER_ID: u64 = 1000;

fn ctx() -> OptionContext {
    OptionContext::user(UserId::new(USER_ID))
}

/// Builds a text option reading and writing `store` under its own id.
fn stored_option(id: &str, store: &MemoryStore) -> FormOptionBuilder {
    let key = id.to_string();
    let get_store = store.clone();
    let set_store = store.clone();
    let set_key = key.clone();

    FormOptionBuilder::text_input()
        .id(id)
        .on_request(move |_| {
            let value = get_store.get(&key);
            async move { Ok(value) }
        })
        .on_update(move |_, value| {
            set_store.set(set_key.clone(), value);
            async { Ok(OptionSetResult::ok()) }
        })
}

fn denied(display_in_api: bool, message: Option<&'static str>) -> AccessControlResult {
    match message {
        Some(message) => AccessControlResult::disallowed_with(display_in_api, message),
        None => AccessControlResult::disallowed(display_in_api),
    }
}

fn build(option: FormOptionBuilder) -> FormOption {
    option.build().expect("valid option")
}

fn group(id: &str, options: impl IntoIterator<Item = FormOption>) -> FormGroupBuilder {
    FormGroupBuilder::new().id(id).options(options)
}

fn finish(group: FormGroupBuilder) -> FormGroup {
    group.build().expect("valid group")
}

fn update(group_id: &str, options: &[(&str, Value)]) -> UpdateGroupParam {
    UpdateGroupParam {
        id: group_id.to_string(),
        options: options
            .iter()
            .map(|(id, value)| UpdateOptionParam {
                id: id.to_string(),
                value: value.clone(),
            })
            .collect(),
    }
}
