use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The Horizon response for a submitted transaction.
///
/// Only the fields the slice and its callers look at are typed; everything else
/// Horizon returns is carried through untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub hash: String,
    #[serde(default)]
    pub ledger: u32,
    #[serde(default = "default_successful")]
    pub successful: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_successful() -> bool {
    true
}

impl TransactionResponse {
    pub fn new(hash: impl Into<String>, ledger: u32) -> Self {
        Self {
            hash: hash.into(),
            ledger,
            successful: true,
            extra: Map::new(),
        }
    }
}
