//! Domain types: payment inputs, the ledger's response, the action state record
//! and the ports the slice talks to.

pub mod action;
pub mod payment;
pub mod ports;
pub mod transaction;
