use super::ledger::PaymentLedger;
use crate::domain::channel::Channel;
use crate::domain::payment::{PaymentId, PaymentRecord};
use crate::error::{PaymentError, Result};
use crate::interfaces::json::{ChannelRequest, ChannelResponse};
use serde_json::Value;
use tracing::debug;

/// Channel-facing entry point.
///
/// Translates a channel's wire request into the canonical ledger call and
/// the resulting record back into the channel's response shape. Records are
/// scoped to the channel they were created through: addressing one through
/// another channel reports `NotFound` and changes nothing.
pub struct ChannelGateway {
    ledger: PaymentLedger,
}

impl ChannelGateway {
    pub fn new(ledger: PaymentLedger) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &PaymentLedger {
        &self.ledger
    }

    pub async fn create(&self, channel: Channel, body: Value) -> Result<ChannelResponse> {
        let request = ChannelRequest::for_create(channel, body)?;
        let record = self.ledger.create(request.into_new_payment(channel)).await?;
        Ok(record.into())
    }

    pub async fn read(&self, channel: Channel, id: &PaymentId) -> Result<ChannelResponse> {
        Ok(self.scoped(channel, id).await?.into())
    }

    pub async fn update(
        &self,
        channel: Channel,
        id: &PaymentId,
        body: Value,
    ) -> Result<ChannelResponse> {
        let request = ChannelRequest::for_update(channel, body)?;
        self.scoped(channel, id).await?;
        let record = self.ledger.update(id, request.into_update()).await?;
        Ok(record.into())
    }

    pub async fn delete(&self, channel: Channel, id: &PaymentId) -> Result<ChannelResponse> {
        self.scoped(channel, id).await?;
        let record = self.ledger.delete(id).await?;
        Ok(record.into())
    }

    /// Fetches a record, treating one owned by another channel as absent.
    /// The channel of a record never changes, so the check stays valid for
    /// the operation that follows it.
    async fn scoped(&self, channel: Channel, id: &PaymentId) -> Result<PaymentRecord> {
        let record = self.ledger.get(id).await?;
        if record.channel != channel {
            debug!(payment_id = %id, owner = %record.channel, requested = %channel, "channel mismatch");
            return Err(PaymentError::NotFound(id.to_string()));
        }
        Ok(record)
    }
}
