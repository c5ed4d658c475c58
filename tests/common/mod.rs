#![allow(dead_code)]

use async_trait::async_trait;
use rust_decimal::Decimal;
use sendtx::domain::payment::{AccountId, Amount, AuthType, PaymentParams};
use sendtx::domain::ports::PaymentSubmitter;
use sendtx::domain::transaction::TransactionResponse;
use sendtx::error::{Result, SubmitError};
use std::collections::VecDeque;
use std::fs::File;
use std::io::Error;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

pub const ALICE: &str = "GALICEAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
pub const BOB: &str = "GBOBAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
pub const ALICE_SECRET: &str = "SALICEAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

pub fn payment(amount: Decimal) -> PaymentParams {
    PaymentParams::new(
        AccountId::new(ALICE).unwrap(),
        AccountId::new(BOB).unwrap(),
        Amount::new(amount).unwrap(),
        100,
    )
    .with_auth_type(AuthType::Ledger)
}

/// A submitter whose calls only resolve when the test says so.
///
/// The n-th call waits on the n-th gate, so tests control resolution order
/// independently of dispatch order.
pub struct GatedSubmitter {
    gates: Mutex<VecDeque<oneshot::Receiver<Result<TransactionResponse>>>>,
    calls: Arc<AtomicUsize>,
}

pub type Gate = oneshot::Sender<Result<TransactionResponse>>;

impl GatedSubmitter {
    pub fn new(count: usize) -> (Self, Vec<Gate>, Arc<AtomicUsize>) {
        let (senders, receivers): (Vec<_>, VecDeque<_>) =
            (0..count).map(|_| oneshot::channel()).unzip();
        let calls = Arc::new(AtomicUsize::new(0));
        let submitter = Self {
            gates: Mutex::new(receivers),
            calls: calls.clone(),
        };
        (submitter, senders, calls)
    }
}

#[async_trait]
impl PaymentSubmitter for GatedSubmitter {
    async fn submit(
        &self,
        _params: &PaymentParams,
        _auth_type: AuthType,
    ) -> Result<TransactionResponse> {
        let gate = self.gates.lock().unwrap().pop_front();
        self.calls.fetch_add(1, Ordering::SeqCst);
        match gate {
            Some(gate) => gate
                .await
                .unwrap_or_else(|_| Err(SubmitError::Network("gate dropped".to_string()))),
            None => Err(SubmitError::Network("no gate left".to_string())),
        }
    }
}

/// Yields until the submitter has been entered `count` times.
pub async fn wait_for_calls(calls: &AtomicUsize, count: usize) {
    while calls.load(Ordering::SeqCst) < count {
        tokio::task::yield_now().await;
    }
}

pub fn generate_csv(path: &Path, rows: usize) -> std::result::Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["public_key", "to_account_id", "amount", "fee", "auth_type"])?;

    for i in 1..=rows {
        let amount = i.to_string();
        wtr.write_record([ALICE, BOB, amount.as_str(), "100", "LEDGER"])?;
    }

    wtr.flush()?;
    Ok(())
}
