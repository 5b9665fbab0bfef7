use crate::domain::payment::{PaymentId, PaymentRecord, PaymentUpdate};
use crate::domain::ports::PaymentStore;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Options};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family holding one JSON document per payment, keyed by id.
pub const CF_PAYMENTS: &str = "payments";

const WRITE_STRIPES: usize = 64;

/// A persistent store implementation using RocksDB.
///
/// All channels share the `payments` column family; the channel is part of
/// the stored document. Read-modify-write operations take a striped lock
/// keyed by id, so concurrent updates to one payment never interleave.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    stripes: Arc<[Mutex<()>]>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the `payments` column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_payments = ColumnFamilyDescriptor::new(CF_PAYMENTS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_payments])?;

        let stripes = (0..WRITE_STRIPES)
            .map(|_| Mutex::new(()))
            .collect::<Vec<_>>();

        Ok(Self {
            db: Arc::new(db),
            stripes: stripes.into(),
        })
    }

    fn payments(&self) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(CF_PAYMENTS)
            .ok_or_else(|| PaymentError::persistence("Payments column family not found"))
    }

    fn stripe(&self, id: &PaymentId) -> &Mutex<()> {
        let mut hasher = DefaultHasher::new();
        id.hash(&mut hasher);
        &self.stripes[(hasher.finish() % self.stripes.len() as u64) as usize]
    }

    fn read(&self, id: &PaymentId) -> Result<Option<PaymentRecord>> {
        let cf = self.payments()?;
        match self.db.get_cf(cf, id.as_str().as_bytes())? {
            Some(bytes) => decode(&bytes).map(Some),
            None => Ok(None),
        }
    }

    fn write(&self, record: &PaymentRecord) -> Result<()> {
        let cf = self.payments()?;
        let value = serde_json::to_vec(record).map_err(|e| {
            PaymentError::PersistenceError(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization error: {}", e),
            )))
        })?;
        self.db.put_cf(cf, record.id.as_str().as_bytes(), value)?;
        Ok(())
    }
}

fn decode(bytes: &[u8]) -> Result<PaymentRecord> {
    serde_json::from_slice(bytes).map_err(|e| {
        PaymentError::PersistenceError(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Deserialization error: {}", e),
        )))
    })
}

#[async_trait]
impl PaymentStore for RocksDBStore {
    async fn insert(&self, record: PaymentRecord) -> Result<()> {
        let _guard = self.stripe(&record.id).lock().await;
        let cf = self.payments()?;
        if self.db.get_pinned_cf(cf, record.id.as_str().as_bytes())?.is_some() {
            return Err(PaymentError::persistence(format!(
                "payment {} already exists",
                record.id
            )));
        }
        self.write(&record)
    }

    async fn get(&self, id: &PaymentId) -> Result<Option<PaymentRecord>> {
        self.read(id)
    }

    async fn update(
        &self,
        id: &PaymentId,
        changes: &PaymentUpdate,
    ) -> Result<Option<PaymentRecord>> {
        let _guard = self.stripe(id).lock().await;
        let Some(mut record) = self.read(id)? else {
            return Ok(None);
        };
        changes.apply(&mut record);
        self.write(&record)?;
        Ok(Some(record))
    }

    async fn remove(&self, id: &PaymentId) -> Result<Option<PaymentRecord>> {
        let _guard = self.stripe(id).lock().await;
        let Some(record) = self.read(id)? else {
            return Ok(None);
        };
        let cf = self.payments()?;
        self.db.delete_cf(cf, id.as_str().as_bytes())?;
        Ok(Some(record))
    }

    async fn get_all(&self) -> Result<Vec<PaymentRecord>> {
        let cf = self.payments()?;
        let mut records = Vec::new();
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            records.push(decode(&value)?);
        }
        Ok(records)
    }
}
