use super::payment::{AuthType, PaymentParams};
use super::transaction::TransactionResponse;
use crate::error::{Result, SubmitError};
use async_trait::async_trait;

/// Builds, signs and submits a payment to the ledger.
///
/// Retries, backoff and timeouts are the implementor's business.
#[async_trait]
pub trait PaymentSubmitter: Send + Sync {
    async fn submit(
        &self,
        params: &PaymentParams,
        auth_type: AuthType,
    ) -> Result<TransactionResponse>;
}

/// Turns any submission failure into a message fit for an error banner.
pub trait ErrorFormatter: Send + Sync {
    fn format(&self, error: &SubmitError) -> String;
}

pub type PaymentSubmitterBox = Box<dyn PaymentSubmitter>;
pub type ErrorFormatterBox = Box<dyn ErrorFormatter>;
