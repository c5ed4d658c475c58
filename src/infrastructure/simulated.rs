use crate::config::SimulationConfig;
use crate::domain::payment::{AccountId, AuthType, Memo, PaymentParams};
use crate::domain::ports::PaymentSubmitter;
use crate::domain::transaction::TransactionResponse;
use crate::error::{Result, SubmitError};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

/// Number of decimal places in one stroop.
const STROOP_SCALE: u32 = 7;

/// An in-memory stand-in for Horizon.
///
/// Keeps native balances in `Arc<RwLock<HashMap<AccountId, Decimal>>>` and closes
/// one ledger per accepted payment. Rejections carry the same result codes
/// Horizon would send back. Clones share the same ledger.
#[derive(Clone)]
pub struct SimulatedLedger {
    balances: Arc<RwLock<HashMap<AccountId, Decimal>>>,
    ledger: Arc<AtomicU32>,
    starting_balance: Decimal,
    base_fee: u32,
    latency: Duration,
}

impl SimulatedLedger {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            balances: Arc::default(),
            ledger: Arc::new(AtomicU32::new(0)),
            starting_balance: config.starting_balance,
            base_fee: config.base_fee,
            latency: Duration::from_millis(config.latency_ms),
        }
    }

    /// Current balance, or the starting balance for an unseen account.
    pub async fn balance(&self, account: &AccountId) -> Decimal {
        let balances = self.balances.read().await;
        balances
            .get(account)
            .copied()
            .unwrap_or(self.starting_balance)
    }

    /// Sets an account's balance outright.
    pub async fn fund(&self, account: AccountId, balance: Decimal) {
        let mut balances = self.balances.write().await;
        balances.insert(account, balance);
    }

    fn check_envelope(&self, params: &PaymentParams, auth_type: AuthType) -> Result<()> {
        if params.fee < self.base_fee {
            return Err(SubmitError::transaction_failed("tx_insufficient_fee", &[]));
        }
        if auth_type.requires_secret() && params.secret.is_none() {
            return Err(SubmitError::transaction_failed("tx_bad_auth", &[]));
        }
        if params.public_key == params.to_account_id {
            return Err(SubmitError::transaction_failed("tx_failed", &["op_malformed"]));
        }
        Ok(())
    }
}

#[async_trait]
impl PaymentSubmitter for SimulatedLedger {
    async fn submit(
        &self,
        params: &PaymentParams,
        auth_type: AuthType,
    ) -> Result<TransactionResponse> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.check_envelope(params, auth_type)?;

        let amount = params.amount.value();
        let fee = Decimal::new(i64::from(params.fee), STROOP_SCALE);

        let debit = amount
            .checked_add(fee)
            .ok_or_else(|| SubmitError::transaction_failed("tx_failed", &["op_underfunded"]))?;

        let mut balances = self.balances.write().await;
        let source = balances
            .get(&params.public_key)
            .copied()
            .unwrap_or(self.starting_balance);
        if source < debit {
            return Err(SubmitError::transaction_failed("tx_failed", &["op_underfunded"]));
        }
        let destination = balances
            .get(&params.to_account_id)
            .copied()
            .unwrap_or(self.starting_balance);
        // the destination cannot hold more than Decimal::MAX
        let credited = destination
            .checked_add(amount)
            .ok_or_else(|| SubmitError::transaction_failed("tx_failed", &["op_line_full"]))?;
        balances.insert(params.public_key.clone(), source - debit);
        balances.insert(params.to_account_id.clone(), credited);
        drop(balances);

        let ledger = self.ledger.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::trace!(
            from = %params.public_key,
            to = %params.to_account_id,
            %amount,
            ledger,
            "payment applied"
        );

        let mut response = TransactionResponse::new(transaction_hash(params, ledger), ledger);
        response.extra = horizon_fields(params);
        Ok(response)
    }
}

/// 64-hex-character hash for a payment closed in `ledger`.
///
/// Built on `DefaultHasher`, so it is stable within one build but may change
/// across Rust releases.
fn transaction_hash(params: &PaymentParams, ledger: u32) -> String {
    (0u8..4)
        .map(|lane| {
            let mut hasher = DefaultHasher::new();
            lane.hash(&mut hasher);
            ledger.hash(&mut hasher);
            params.public_key.hash(&mut hasher);
            params.to_account_id.hash(&mut hasher);
            params.amount.value().hash(&mut hasher);
            params.fee.hash(&mut hasher);
            format!("{:016x}", hasher.finish())
        })
        .collect()
}

fn horizon_fields(params: &PaymentParams) -> Map<String, Value> {
    let (memo_type, memo) = match &params.memo {
        Memo::None => ("none", Value::Null),
        Memo::Text(text) => ("text", json!(text)),
        Memo::Id(id) => ("id", json!(id.to_string())),
        Memo::Hash(hash) => ("hash", json!(hash)),
        Memo::Return(hash) => ("return", json!(hash)),
    };

    let mut fields = Map::new();
    fields.insert("source_account".to_string(), json!(params.public_key));
    fields.insert("fee_charged".to_string(), json!(params.fee.to_string()));
    fields.insert("memo_type".to_string(), json!(memo_type));
    if !memo.is_null() {
        fields.insert("memo".to_string(), memo);
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::SecretKey;
    use crate::domain::payment::tests::{ALICE, ALICE_SECRET, BOB, payment};
    use crate::domain::ports::ErrorFormatter;
    use crate::infrastructure::formatter::HorizonErrorFormatter;
    use rust_decimal_macros::dec;

    fn ledger() -> SimulatedLedger {
        SimulatedLedger::new(&SimulationConfig {
            starting_balance: dec!(100),
            ..Default::default()
        })
    }

    fn rejection(result: Result<TransactionResponse>) -> String {
        HorizonErrorFormatter.format(&result.unwrap_err())
    }

    #[tokio::test]
    async fn test_payment_moves_balances() {
        let ledger = ledger();
        let params = payment(dec!(10)).with_auth_type(AuthType::Ledger);

        let response = ledger.submit(&params, AuthType::Ledger).await.unwrap();

        assert_eq!(response.ledger, 1);
        assert_eq!(response.hash.len(), 64);
        assert!(response.successful);
        assert_eq!(response.extra["fee_charged"], "100");
        assert_eq!(response.extra["memo_type"], "none");

        let alice = AccountId::new(ALICE).unwrap();
        let bob = AccountId::new(BOB).unwrap();
        assert_eq!(ledger.balance(&alice).await, dec!(89.99999));
        assert_eq!(ledger.balance(&bob).await, dec!(110));
    }

    #[tokio::test]
    async fn test_hashes_differ_per_ledger() {
        let ledger = ledger();
        let params = payment(dec!(1));

        let first = ledger.submit(&params, AuthType::Freighter).await.unwrap();
        let second = ledger.submit(&params, AuthType::Freighter).await.unwrap();

        assert_eq!(second.ledger, 2);
        assert_ne!(first.hash, second.hash);
    }

    #[tokio::test]
    async fn test_underfunded() {
        let ledger = ledger();
        let result = ledger.submit(&payment(dec!(100)), AuthType::Ledger).await;
        assert_eq!(
            rejection(result),
            "Transaction Failed: tx_failed (op_underfunded)"
        );

        let alice = AccountId::new(ALICE).unwrap();
        assert_eq!(ledger.balance(&alice).await, dec!(100));
    }

    #[tokio::test]
    async fn test_insufficient_fee() {
        let ledger = ledger();
        let mut params = payment(dec!(1));
        params.fee = 99;
        let result = ledger.submit(&params, AuthType::Ledger).await;
        assert_eq!(
            rejection(result),
            "Transaction Failed: tx_insufficient_fee"
        );
    }

    #[tokio::test]
    async fn test_private_key_requires_secret() {
        let ledger = ledger();
        let params = payment(dec!(1));
        let result = ledger.submit(&params, AuthType::PrivateKey).await;
        assert_eq!(rejection(result), "Transaction Failed: tx_bad_auth");

        let signed = params.with_secret(SecretKey::new(ALICE_SECRET).unwrap());
        assert!(ledger.submit(&signed, AuthType::PrivateKey).await.is_ok());
    }

    #[tokio::test]
    async fn test_self_payment_is_malformed() {
        let ledger = ledger();
        let mut params = payment(dec!(1));
        params.to_account_id = params.public_key.clone();
        let result = ledger.submit(&params, AuthType::Ledger).await;
        assert_eq!(
            rejection(result),
            "Transaction Failed: tx_failed (op_malformed)"
        );
    }

    #[tokio::test]
    async fn test_memo_is_echoed() {
        let ledger = ledger();
        let params = payment(dec!(1)).with_memo(Memo::Id(42));
        let response = ledger.submit(&params, AuthType::Ledger).await.unwrap();
        assert_eq!(response.extra["memo_type"], "id");
        assert_eq!(response.extra["memo"], "42");
    }

    #[tokio::test]
    async fn test_destination_overflow_is_line_full() {
        let ledger = SimulatedLedger::new(&SimulationConfig {
            starting_balance: Decimal::MAX,
            ..Default::default()
        });
        let alice = AccountId::new(ALICE).unwrap();
        let bob = AccountId::new(BOB).unwrap();

        let result = ledger
            .submit(&payment(Decimal::MAX - dec!(1000)), AuthType::Ledger)
            .await;

        assert_eq!(
            rejection(result),
            "Transaction Failed: tx_failed (op_line_full)"
        );
        assert_eq!(ledger.balance(&alice).await, Decimal::MAX);
        assert_eq!(ledger.balance(&bob).await, Decimal::MAX);
    }

    #[tokio::test]
    async fn test_fund_overrides_starting_balance() {
        let ledger = ledger();
        let alice = AccountId::new(ALICE).unwrap();
        ledger.fund(alice.clone(), dec!(5)).await;

        let result = ledger.submit(&payment(dec!(10)), AuthType::Ledger).await;
        assert!(result.is_err());
        assert_eq!(ledger.balance(&alice).await, dec!(5));
    }
}
