//! Read-side results: what a user is allowed to see of the configured options.

use serde_json::{Map, Value};

use crate::model::options::{DisabledDto, GroupResponseDto, OptionResponseDto};

/// Marks a visible item as read-only, with the reason if one was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disabled {
    pub message: Option<String>,
}

impl Disabled {
    pub fn new(message: Option<String>) -> Self {
        Self { message }
    }

    pub fn into_dto(self) -> DisabledDto {
        DisabledDto {
            disabled: true,
            message: self.message,
        }
    }
}

/// A group as resolved for one user, with its visible options in configured order.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupView {
    pub id: String,
    pub meta: Map<String, Value>,
    pub disabled: Option<Disabled>,
    pub options: Vec<OptionView>,
}

impl GroupView {
    pub fn into_dto(self) -> GroupResponseDto {
        GroupResponseDto {
            id: self.id,
            meta: self.meta,
            disabled: self.disabled.map(Disabled::into_dto),
            options: self.options.into_iter().map(OptionView::into_dto).collect(),
        }
    }
}

/// An option as resolved for one user, carrying its current value.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionView {
    pub id: String,
    pub option_type: String,
    pub meta: Map<String, Value>,
    pub value: Value,
    pub disabled: Option<Disabled>,
}

impl OptionView {
    pub fn into_dto(self) -> OptionResponseDto {
        OptionResponseDto {
            id: self.id,
            option_type: self.option_type,
            meta: self.meta,
            value: self.value,
            disabled: self.disabled.map(Disabled::into_dto),
        }
    }
}
