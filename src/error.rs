use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result codes attached to a failed Horizon submission.
///
/// Mirrors the `extras.result_codes` object of a Horizon problem response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResultCodes {
    pub transaction: String,
    #[serde(default)]
    pub operations: Vec<String>,
}

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request timed out after {0} ms")]
    Timeout(u64),
    #[error("Signing error: {0}")]
    Signing(String),
    #[error("Horizon error ({status}): {title}")]
    Horizon {
        status: u16,
        title: String,
        detail: Option<String>,
        result_codes: Option<ResultCodes>,
    },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SubmitError {
    /// Builds a Horizon `transaction_failed` problem carrying the given result codes.
    pub fn transaction_failed(transaction: &str, operations: &[&str]) -> Self {
        Self::Horizon {
            status: 400,
            title: "Transaction Failed".to_string(),
            detail: Some(
                "The transaction failed when submitted to the Stellar network.".to_string(),
            ),
            result_codes: Some(ResultCodes {
                transaction: transaction.to_string(),
                operations: operations.iter().map(|op| op.to_string()).collect(),
            }),
        }
    }
}

pub type Result<T> = std::result::Result<T, SubmitError>;
