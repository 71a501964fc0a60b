//! Write-side parameters and the aggregated failure report.

use serde_json::Value;
use std::collections::HashMap;

use crate::{
    model::options::{GroupUpdateDto, OptionErrorDto, OptionUpdateDto, UpdateErrorsDto},
    server::error::options::OptionError,
};

/// Requested new values for options of one group.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateGroupParam {
    pub id: String,
    pub options: Vec<UpdateOptionParam>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOptionParam {
    pub id: String,
    pub value: Value,
}

impl From<GroupUpdateDto> for UpdateGroupParam {
    fn from(dto: GroupUpdateDto) -> Self {
        Self {
            id: dto.id,
            options: dto.options.into_iter().map(UpdateOptionParam::from).collect(),
        }
    }
}

impl From<OptionUpdateDto> for UpdateOptionParam {
    fn from(dto: OptionUpdateDto) -> Self {
        Self {
            id: dto.id,
            value: dto.value,
        }
    }
}

/// One update that was not applied. `option_id` is `None` for group-level failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateFailure {
    pub option_id: Option<String>,
    pub reason: OptionError,
}

impl UpdateFailure {
    pub fn group(reason: OptionError) -> Self {
        Self {
            option_id: None,
            reason,
        }
    }

    pub fn option(option_id: impl Into<String>, reason: OptionError) -> Self {
        Self {
            option_id: Some(option_id.into()),
            reason,
        }
    }

    pub fn into_dto(self) -> OptionErrorDto {
        OptionErrorDto {
            id: self.option_id,
            error: self.reason.to_string(),
        }
    }
}

/// Failures of a write batch keyed by group id. Groups that fully succeeded are absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateReport {
    failures: HashMap<String, Vec<UpdateFailure>>,
}

impl UpdateReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends failures for a group, keeping any recorded earlier in the batch.
    pub fn extend(&mut self, group_id: &str, failures: Vec<UpdateFailure>) {
        if failures.is_empty() {
            return;
        }

        self.failures
            .entry(group_id.to_string())
            .or_default()
            .extend(failures);
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self, group_id: &str) -> Option<&[UpdateFailure]> {
        self.failures.get(group_id).map(Vec::as_slice)
    }

    pub fn into_dto(self) -> UpdateErrorsDto {
        self.failures
            .into_iter()
            .map(|(group_id, failures)| {
                (
                    group_id,
                    failures.into_iter().map(UpdateFailure::into_dto).collect(),
                )
            })
            .collect()
    }
}
