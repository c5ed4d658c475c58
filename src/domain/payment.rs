use crate::error::{Result, SubmitError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length of a StrKey-encoded Stellar key.
const STRKEY_LEN: usize = 56;
/// Stellar amounts carry at most seven fractional digits (one stroop).
const MAX_AMOUNT_SCALE: u32 = 7;
/// Text memos are limited to 28 bytes.
const MAX_MEMO_TEXT_BYTES: usize = 28;

fn validate_strkey(value: &str, prefix: char, what: &str) -> Result<()> {
    let well_formed = value.len() == STRKEY_LEN
        && value.starts_with(prefix)
        && value
            .bytes()
            .all(|b| b.is_ascii_uppercase() || (b'2'..=b'7').contains(&b));
    if well_formed {
        Ok(())
    } else {
        Err(SubmitError::Validation(format!(
            "{what} must be a {STRKEY_LEN}-character key starting with '{prefix}'"
        )))
    }
}

/// A Stellar account identifier (`G...` public key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        validate_strkey(&value, 'G', "Account id")?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AccountId {
    type Error = SubmitError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A Stellar secret seed (`S...`). Never printed.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct SecretKey(String);

impl SecretKey {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        validate_strkey(&value, 'S', "Secret key")?;
        Ok(Self(value))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SecretKey {
    type Error = SubmitError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

/// A positive payment amount in whole units of the asset.
///
/// Rejects zero, negative values and anything finer than one stroop.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value <= Decimal::ZERO {
            return Err(SubmitError::Validation(
                "Amount must be positive".to_string(),
            ));
        }
        if value.normalize().scale() > MAX_AMOUNT_SCALE {
            return Err(SubmitError::Validation(format!(
                "Amount supports at most {MAX_AMOUNT_SCALE} decimal places"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = SubmitError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl FromStr for Amount {
    type Err = SubmitError;

    fn from_str(s: &str) -> Result<Self> {
        let value = Decimal::from_str(s.trim())
            .map_err(|e| SubmitError::Validation(format!("Invalid amount '{s}': {e}")))?;
        Self::new(value)
    }
}

/// An optional note attached to the transaction.
///
/// Deserialization applies the same length and hash checks as [`Memo::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "MemoRepr", into = "MemoRepr")]
pub enum Memo {
    #[default]
    None,
    Text(String),
    Id(u64),
    /// 32-byte hash as 64 lowercase hex characters.
    Hash(String),
    /// 32-byte hash of the transaction being returned.
    Return(String),
}

impl Memo {
    /// Builds a memo from its form representation: a type name and a content string.
    ///
    /// An empty or missing type means no memo.
    pub fn parse(memo_type: &str, content: &str) -> Result<Self> {
        match memo_type.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Memo::None),
            "text" => Ok(Memo::Text(check_text(content)?)),
            "id" => content
                .trim()
                .parse::<u64>()
                .map(Memo::Id)
                .map_err(|e| SubmitError::Validation(format!("Invalid id memo: {e}"))),
            "hash" => Ok(Memo::Hash(parse_hash(content)?)),
            "return" => Ok(Memo::Return(parse_hash(content)?)),
            other => Err(SubmitError::Validation(format!(
                "Unknown memo type '{other}'"
            ))),
        }
    }
}

/// Wire shape of [`Memo`]; unchecked until converted.
#[derive(Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
enum MemoRepr {
    None,
    Text(String),
    Id(u64),
    Hash(String),
    Return(String),
}

impl TryFrom<MemoRepr> for Memo {
    type Error = SubmitError;

    fn try_from(repr: MemoRepr) -> Result<Self> {
        Ok(match repr {
            MemoRepr::None => Memo::None,
            MemoRepr::Text(text) => Memo::Text(check_text(&text)?),
            MemoRepr::Id(id) => Memo::Id(id),
            MemoRepr::Hash(hash) => Memo::Hash(parse_hash(&hash)?),
            MemoRepr::Return(hash) => Memo::Return(parse_hash(&hash)?),
        })
    }
}

impl From<Memo> for MemoRepr {
    fn from(memo: Memo) -> Self {
        match memo {
            Memo::None => MemoRepr::None,
            Memo::Text(text) => MemoRepr::Text(text),
            Memo::Id(id) => MemoRepr::Id(id),
            Memo::Hash(hash) => MemoRepr::Hash(hash),
            Memo::Return(hash) => MemoRepr::Return(hash),
        }
    }
}

fn check_text(content: &str) -> Result<String> {
    if content.len() > MAX_MEMO_TEXT_BYTES {
        return Err(SubmitError::Validation(format!(
            "Text memo exceeds {MAX_MEMO_TEXT_BYTES} bytes"
        )));
    }
    Ok(content.to_string())
}

fn parse_hash(content: &str) -> Result<String> {
    let content = content.trim();
    if content.len() == 64 && content.bytes().all(|b| b.is_ascii_hexdigit()) {
        Ok(content.to_ascii_lowercase())
    } else {
        Err(SubmitError::Validation(
            "Hash memo must be 64 hex characters".to_string(),
        ))
    }
}

/// How the transaction gets authorized before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthType {
    #[default]
    PrivateKey,
    Ledger,
    Trezor,
    Freighter,
    Albedo,
    WalletConnect,
}

impl AuthType {
    /// Hardware and extension wallets hold the key themselves.
    pub fn requires_secret(&self) -> bool {
        matches!(self, AuthType::PrivateKey)
    }
}

impl FromStr for AuthType {
    type Err = SubmitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "private_key" => Ok(AuthType::PrivateKey),
            "ledger" => Ok(AuthType::Ledger),
            "trezor" => Ok(AuthType::Trezor),
            "freighter" => Ok(AuthType::Freighter),
            "albedo" => Ok(AuthType::Albedo),
            "wallet_connect" | "walletconnect" => Ok(AuthType::WalletConnect),
            other => Err(SubmitError::Validation(format!(
                "Unknown auth type '{other}'"
            ))),
        }
    }
}

/// Everything needed for a single payment attempt.
///
/// Built fresh by the caller for each submission and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentParams {
    /// The sender.
    pub public_key: AccountId,
    /// Only used by the private-key flow.
    pub secret: Option<SecretKey>,
    pub to_account_id: AccountId,
    pub amount: Amount,
    /// Fee in stroops.
    pub fee: u32,
    #[serde(default)]
    pub memo: Memo,
    /// Falls back to the slice's configured auth type when absent.
    pub auth_type: Option<AuthType>,
}

impl PaymentParams {
    pub fn new(public_key: AccountId, to_account_id: AccountId, amount: Amount, fee: u32) -> Self {
        Self {
            public_key,
            secret: None,
            to_account_id,
            amount,
            fee,
            memo: Memo::None,
            auth_type: None,
        }
    }

    pub fn with_secret(mut self, secret: SecretKey) -> Self {
        self.secret = Some(secret);
        self
    }

    pub fn with_memo(mut self, memo: Memo) -> Self {
        self.memo = memo;
        self
    }

    pub fn with_auth_type(mut self, auth_type: AuthType) -> Self {
        self.auth_type = Some(auth_type);
        self
    }
}
