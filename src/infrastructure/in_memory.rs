use crate::domain::payment::{PaymentId, PaymentRecord, PaymentUpdate};
use crate::domain::ports::PaymentStore;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::{DefaultHasher, Entry};
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tokio::sync::RwLock;

pub const DEFAULT_SHARDS: usize = 16;

type Shard = RwLock<HashMap<PaymentId, PaymentRecord>>;

/// A thread-safe in-memory store for payment records.
///
/// Records are spread over a fixed number of shards, each behind its own
/// `RwLock`. An id always maps to the same shard, so writes to one id are
/// serialized while ids in other shards proceed independently. Reads share
/// the lock.
#[derive(Clone)]
pub struct InMemoryPaymentStore {
    shards: Arc<[Shard]>,
}

impl Default for InMemoryPaymentStore {
    fn default() -> Self {
        Self::with_shards(DEFAULT_SHARDS)
    }
}

impl InMemoryPaymentStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with `count` shards (at least one).
    pub fn with_shards(count: usize) -> Self {
        let shards = (0..count.max(1))
            .map(|_| RwLock::new(HashMap::new()))
            .collect::<Vec<_>>();
        Self {
            shards: shards.into(),
        }
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn shard(&self, id: &PaymentId) -> &Shard {
        let mut hasher = DefaultHasher::new();
        id.hash(&mut hasher);
        let index = (hasher.finish() % self.shards.len() as u64) as usize;
        &self.shards[index]
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn insert(&self, record: PaymentRecord) -> Result<()> {
        let mut records = self.shard(&record.id).write().await;
        match records.entry(record.id.clone()) {
            Entry::Occupied(_) => Err(PaymentError::persistence(format!(
                "payment {} already exists",
                record.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    async fn get(&self, id: &PaymentId) -> Result<Option<PaymentRecord>> {
        let records = self.shard(id).read().await;
        Ok(records.get(id).cloned())
    }

    async fn update(
        &self,
        id: &PaymentId,
        changes: &PaymentUpdate,
    ) -> Result<Option<PaymentRecord>> {
        let mut records = self.shard(id).write().await;
        Ok(records.get_mut(id).map(|record| {
            changes.apply(record);
            record.clone()
        }))
    }

    async fn remove(&self, id: &PaymentId) -> Result<Option<PaymentRecord>> {
        let mut records = self.shard(id).write().await;
        Ok(records.remove(id))
    }

    async fn get_all(&self) -> Result<Vec<PaymentRecord>> {
        let mut all = Vec::new();
        for shard in self.shards.iter() {
            let records = shard.read().await;
            all.extend(records.values().cloned());
        }
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::channel::Channel;
    use crate::domain::payment::{NewPayment, PaymentStatus};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn record() -> PaymentRecord {
        NewPayment::new(Channel::Cash, "user-1")
            .amount(dec!(100.0))
            .currency("USD")
            .into_record(Utc::now())
            .unwrap()
    }

    #[tokio::test]
    async fn test_in_memory_store_roundtrip() {
        let store = InMemoryPaymentStore::new();
        let record = record();

        store.insert(record.clone()).await.unwrap();
        let retrieved = store.get(&record.id).await.unwrap().unwrap();
        assert_eq!(retrieved, record);

        assert!(store.get(&PaymentId::from("missing")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_rejects_taken_id() {
        let store = InMemoryPaymentStore::new();
        let record = record();
        store.insert(record.clone()).await.unwrap();

        let result = store.insert(record).await;
        assert!(matches!(result, Err(PaymentError::PersistenceError(_))));
    }

    #[tokio::test]
    async fn test_update_and_remove() {
        let store = InMemoryPaymentStore::with_shards(1);
        let record = record();
        store.insert(record.clone()).await.unwrap();

        let updated = store
            .update(&record.id, &PaymentUpdate::status(PaymentStatus::Failed))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.payment_status, PaymentStatus::Failed);

        let removed = store.remove(&record.id).await.unwrap().unwrap();
        assert_eq!(removed, updated);
        assert!(store.remove(&record.id).await.unwrap().is_none());
        assert!(
            store
                .update(&record.id, &PaymentUpdate::default())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_get_all_spans_shards() {
        let store = InMemoryPaymentStore::with_shards(4);
        for _ in 0..50 {
            store.insert(record()).await.unwrap();
        }
        assert_eq!(store.get_all().await.unwrap().len(), 50);
    }

    #[test]
    fn test_zero_shards_is_clamped() {
        assert_eq!(InMemoryPaymentStore::with_shards(0).shard_count(), 1);
    }
}
