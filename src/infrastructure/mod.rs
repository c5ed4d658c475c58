//! Adapters behind the domain ports.

pub mod formatter;
pub mod simulated;
