use super::payment::{PaymentId, PaymentRecord, PaymentUpdate};
use crate::error::Result;
use async_trait::async_trait;

/// Persistence port for payment records.
///
/// Implementations must make `update` and `remove` atomic with respect to
/// other operations on the same id. Operations on different ids may run in
/// parallel.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Persists a new record. Fails if the id is already taken.
    async fn insert(&self, record: PaymentRecord) -> Result<()>;
    async fn get(&self, id: &PaymentId) -> Result<Option<PaymentRecord>>;
    /// Applies `changes` and returns the updated record, or `None` if absent.
    async fn update(&self, id: &PaymentId, changes: &PaymentUpdate)
    -> Result<Option<PaymentRecord>>;
    /// Deletes the record and returns what was stored, or `None` if absent.
    async fn remove(&self, id: &PaymentId) -> Result<Option<PaymentRecord>>;
    async fn get_all(&self) -> Result<Vec<PaymentRecord>>;
}

pub type PaymentStoreBox = Box<dyn PaymentStore>;
pub type PaymentStoreFactory = Box<dyn Fn() -> PaymentStoreBox + Send + Sync>;
