use crate::domain::action::ErrorDataPolicy;
use crate::domain::payment::AuthType;
use crate::error::{Result, SubmitError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::Path;

/// Minimum per-operation fee on the public network, in stroops.
pub const BASE_FEE: u32 = 100;

/// Settings for a `SendTxSlice`.
///
/// Every field has a default, so an empty JSON object is a valid config file.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SliceConfig {
    /// Used for payments that do not name their own auth type.
    pub auth_type: AuthType,
    pub error_data_policy: ErrorDataPolicy,
    pub simulation: SimulationConfig,
}

/// Settings for the in-memory ledger used by the CLI and tests.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Balance given to any account the ledger has not seen before.
    pub starting_balance: Decimal,
    pub base_fee: u32,
    /// Artificial delay before each submission resolves.
    pub latency_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            starting_balance: dec!(10000),
            base_fee: BASE_FEE,
            latency_ms: 0,
        }
    }
}

impl SliceConfig {
    /// Reads a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that serde alone cannot reject. Run again after any
    /// field is overridden in code.
    pub fn validate(&self) -> Result<()> {
        if self.simulation.starting_balance < Decimal::ZERO {
            return Err(SubmitError::Config(
                "simulation.starting_balance must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
