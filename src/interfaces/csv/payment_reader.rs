use crate::domain::payment::{AccountId, Amount, AuthType, Memo, PaymentParams, SecretKey};
use crate::error::{Result, SubmitError};
use serde::Deserialize;
use std::io::Read;

/// One CSV row as the form would post it: memo split into type and content.
#[derive(Debug, Deserialize)]
struct PaymentRow {
    public_key: String,
    to_account_id: String,
    amount: String,
    fee: u32,
    memo_type: Option<String>,
    memo_content: Option<String>,
    auth_type: Option<String>,
    secret: Option<String>,
}

impl TryFrom<PaymentRow> for PaymentParams {
    type Error = SubmitError;

    fn try_from(row: PaymentRow) -> Result<Self> {
        let memo = Memo::parse(
            row.memo_type.as_deref().unwrap_or_default(),
            row.memo_content.as_deref().unwrap_or_default(),
        )?;
        let mut params = PaymentParams::new(
            AccountId::new(row.public_key)?,
            AccountId::new(row.to_account_id)?,
            row.amount.parse::<Amount>()?,
            row.fee,
        )
        .with_memo(memo);
        if let Some(auth_type) = row.auth_type {
            params = params.with_auth_type(auth_type.parse::<AuthType>()?);
        }
        if let Some(secret) = row.secret {
            params = params.with_secret(SecretKey::new(secret)?);
        }
        Ok(params)
    }
}

/// Reads payment requests from a CSV source.
///
/// Expected header:
/// `public_key, to_account_id, amount, fee, memo_type, memo_content, auth_type, secret`.
/// Trailing optional columns may be omitted, and whitespace around fields is trimmed.
pub struct PaymentReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> PaymentReader<R> {
    /// Wraps a CSV source of payment rows. Nothing is read until iteration.
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and validates payments.
    ///
    /// A bad row yields an `Err` and the iterator carries on with the next one.
    pub fn payments(self) -> impl Iterator<Item = Result<PaymentParams>> {
        self.reader
            .into_deserialize::<PaymentRow>()
            .map(|row| PaymentParams::try_from(row?))
    }
}
