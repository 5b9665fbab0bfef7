//! Domain types: the canonical payment record, the channel table and the
//! storage port.

pub mod channel;
pub mod payment;
pub mod ports;
