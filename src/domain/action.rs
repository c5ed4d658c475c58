use super::transaction::TransactionResponse;
use crate::error::SubmitError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Where the last submission stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    /// Nothing submitted yet, or explicitly reset.
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

/// What happens to the previous successful payload when a submission fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorDataPolicy {
    /// Drop `data` so an error banner never sits next to a stale receipt.
    #[default]
    Clear,
    /// Keep whatever `data` held before the failed attempt.
    Retain,
}

impl FromStr for ErrorDataPolicy {
    type Err = SubmitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clear" => Ok(ErrorDataPolicy::Clear),
            "retain" => Ok(ErrorDataPolicy::Retain),
            other => Err(SubmitError::Config(format!(
                "Unknown error data policy '{other}'"
            ))),
        }
    }
}

/// The record UI layers render from.
///
/// Only the transition methods below mutate it:
/// - `Success` always carries `data` and no `error_string`.
/// - `Error` always carries `error_string`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionState {
    pub status: ActionStatus,
    pub data: Option<TransactionResponse>,
    pub error_string: Option<String>,
}

impl ActionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch: mark in flight and drop any stale error.
    pub fn pending(&mut self) {
        self.status = ActionStatus::Pending;
        self.error_string = None;
    }

    /// Resolution with a result.
    pub fn fulfilled(&mut self, data: TransactionResponse) {
        self.status = ActionStatus::Success;
        self.data = Some(data);
        self.error_string = None;
    }

    /// Resolution with a formatted error.
    pub fn rejected(&mut self, error_string: String, policy: ErrorDataPolicy) {
        self.status = ActionStatus::Error;
        self.error_string = Some(error_string);
        if policy == ErrorDataPolicy::Clear {
            self.data = None;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_pending(&self) -> bool {
        self.status == ActionStatus::Pending
    }
}
