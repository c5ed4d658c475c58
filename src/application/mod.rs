//! Application layer orchestrating a payment submission.
//!
//! This module defines the `SendTxSlice`, the single entry point that submits a
//! payment through the `PaymentSubmitter` port and maps its outcome onto the
//! `ActionState` record read by UI layers.

pub mod send_tx;
