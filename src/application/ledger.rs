use crate::domain::payment::{NewPayment, PaymentId, PaymentRecord, PaymentUpdate};
use crate::domain::ports::PaymentStoreBox;
use crate::error::{PaymentError, Result};
use chrono::Utc;
use tracing::{debug, info};

/// Sole authority over the payment record lifecycle.
///
/// `PaymentLedger` generates identifiers, validates input and forwards every
/// mutation to the storage backend it owns. It is built once at start-up and
/// shared by reference.
pub struct PaymentLedger {
    store: PaymentStoreBox,
}

impl PaymentLedger {
    pub fn new(store: PaymentStoreBox) -> Self {
        Self { store }
    }

    /// Creates and persists a new record.
    ///
    /// Fails with `ValidationError` before touching the store if the amount
    /// or currency is missing.
    pub async fn create(&self, new: NewPayment) -> Result<PaymentRecord> {
        let record = new.into_record(Utc::now())?;
        self.store.insert(record.clone()).await?;
        info!(
            payment_id = %record.id,
            channel = %record.channel,
            status = %record.payment_status,
            "payment created"
        );
        Ok(record)
    }

    pub async fn get(&self, id: &PaymentId) -> Result<PaymentRecord> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| PaymentError::NotFound(id.to_string()))
    }

    /// Overwrites the supplied fields of an existing record.
    pub async fn update(&self, id: &PaymentId, changes: PaymentUpdate) -> Result<PaymentRecord> {
        changes.validate()?;
        if changes.is_empty() {
            debug!(payment_id = %id, "empty update");
        }
        let record = self
            .store
            .update(id, &changes)
            .await?
            .ok_or_else(|| PaymentError::NotFound(id.to_string()))?;
        info!(payment_id = %id, status = %record.payment_status, "payment updated");
        Ok(record)
    }

    /// Hard-deletes a record and returns its last stored value.
    pub async fn delete(&self, id: &PaymentId) -> Result<PaymentRecord> {
        let record = self
            .store
            .remove(id)
            .await?
            .ok_or_else(|| PaymentError::NotFound(id.to_string()))?;
        info!(payment_id = %id, "payment deleted");
        Ok(record)
    }

    /// Every stored record, oldest first.
    pub async fn records(&self) -> Result<Vec<PaymentRecord>> {
        let mut records = self.store.get_all().await?;
        records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
        Ok(records)
    }
}
