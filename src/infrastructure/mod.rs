//! Storage backends implementing [`crate::domain::ports::PaymentStore`].

pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
