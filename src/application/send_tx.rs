use crate::config::SliceConfig;
use crate::domain::action::{ActionState, ErrorDataPolicy};
use crate::domain::payment::{AuthType, PaymentParams};
use crate::domain::ports::{ErrorFormatterBox, PaymentSubmitterBox};
use crate::domain::transaction::TransactionResponse;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::instrument;

/// How a single `submit` call ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    Fulfilled(TransactionResponse),
    Rejected { error_string: String },
}

impl Settlement {
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Settlement::Fulfilled(_))
    }

    pub fn response(&self) -> Option<&TransactionResponse> {
        match self {
            Settlement::Fulfilled(response) => Some(response),
            Settlement::Rejected { .. } => None,
        }
    }
}

/// Tracks the lifecycle of "send a payment" for the UI.
///
/// `SendTxSlice` owns the submission collaborator and the error formatter, and
/// holds the single `ActionState` record. Every transition is published on a
/// `watch` channel so renderers can follow along without polling.
///
/// Calls are not serialized: overlapping submissions each move the state to
/// `Pending`, and whichever resolves last decides the final state.
pub struct SendTxSlice {
    submitter: PaymentSubmitterBox,
    formatter: ErrorFormatterBox,
    auth_type: AuthType,
    error_data_policy: ErrorDataPolicy,
    state: watch::Sender<ActionState>,
    next_request: AtomicU64,
}

impl SendTxSlice {
    /// Creates a new slice in the `Idle` state.
    ///
    /// # Arguments
    ///
    /// * `submitter` - Builds, signs and submits the payment.
    /// * `formatter` - Turns submission failures into display strings.
    /// * `config` - Default auth type and the error-data policy.
    pub fn new(
        submitter: PaymentSubmitterBox,
        formatter: ErrorFormatterBox,
        config: &SliceConfig,
    ) -> Self {
        let (state, _) = watch::channel(ActionState::default());
        Self {
            submitter,
            formatter,
            auth_type: config.auth_type,
            error_data_policy: config.error_data_policy,
            state,
            next_request: AtomicU64::new(1),
        }
    }

    /// Submits a payment and records the outcome.
    ///
    /// The state is `Pending` before the submitter is awaited. Failures are
    /// absorbed into the state, so this never returns an error.
    #[instrument(skip_all, fields(request_id, to = %params.to_account_id, amount = %params.amount.value()))]
    pub async fn submit(&self, params: PaymentParams) -> Settlement {
        let request_id = self.next_request.fetch_add(1, Ordering::Relaxed);
        tracing::Span::current().record("request_id", request_id);

        self.state.send_modify(|state| {
            if state.is_pending() {
                tracing::debug!("overlaps a submission still in flight");
            }
            state.pending();
        });
        tracing::debug!("payment pending");

        let auth_type = params.auth_type.unwrap_or(self.auth_type);
        match self.submitter.submit(&params, auth_type).await {
            Ok(response) => {
                tracing::debug!(hash = %response.hash, ledger = response.ledger, "payment succeeded");
                self.state
                    .send_modify(|state| state.fulfilled(response.clone()));
                Settlement::Fulfilled(response)
            }
            Err(error) => {
                let error_string = self.formatter.format(&error);
                tracing::warn!(%error, "payment failed: {}", error_string);
                let policy = self.error_data_policy;
                self.state
                    .send_modify(|state| state.rejected(error_string.clone(), policy));
                Settlement::Rejected { error_string }
            }
        }
    }

    /// Puts the slice back to its initial `Idle` state.
    ///
    /// A submission still in flight will overwrite this when it resolves.
    pub fn reset(&self) {
        self.state.send_replace(ActionState::default());
        tracing::debug!("state reset");
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ActionState {
        self.state.borrow().clone()
    }

    /// A receiver that sees every transition from now on.
    pub fn subscribe(&self) -> watch::Receiver<ActionState> {
        self.state.subscribe()
    }
}
