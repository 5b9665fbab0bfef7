//! Application layer orchestrating the payment record lifecycle.
//!
//! `PaymentLedger` owns the storage backend and is the only place records
//! are created or identifiers generated. `ChannelGateway` puts the channel
//! wire shapes in front of it, and `BatchRunner` drives the gateway from
//! JSON Lines commands.

pub mod batch;
pub mod gateway;
pub mod ledger;
