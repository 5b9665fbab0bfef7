use crate::domain::channel::Channel;
use crate::domain::payment::{PaymentId, PaymentRecord, PaymentStatus};
use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A stored record re-expressed in a channel's response shape.
///
/// Serializes as `{ <id_field>: id, "status": ..., "timestamp": ... }`, where
/// `id_field` comes from the channel table (`card_payment_id`,
/// `transfer_id`, `bank_account_id`, ...).
#[derive(Debug, PartialEq, Clone)]
pub struct ChannelResponse {
    pub channel: Channel,
    pub id: PaymentId,
    pub status: PaymentStatus,
    pub timestamp: DateTime<Utc>,
}

impl From<&PaymentRecord> for ChannelResponse {
    fn from(record: &PaymentRecord) -> Self {
        Self {
            channel: record.channel,
            id: record.id.clone(),
            status: record.payment_status,
            timestamp: record.timestamp,
        }
    }
}

impl From<PaymentRecord> for ChannelResponse {
    fn from(record: PaymentRecord) -> Self {
        Self::from(&record)
    }
}

impl Serialize for ChannelResponse {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry(self.channel.id_field(), &self.id)?;
        map.serialize_entry("status", &self.status)?;
        map.serialize_entry("timestamp", &self.timestamp)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::NewPayment;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_response_uses_channel_id_field() {
        let record = NewPayment::new(Channel::BankAccount, "user-1")
            .amount(dec!(1))
            .currency("NGN")
            .into_record(Utc::now())
            .unwrap();

        let value = serde_json::to_value(ChannelResponse::from(&record)).unwrap();

        assert_eq!(value["bank_account_id"], json!(record.id.as_str()));
        assert_eq!(value["status"], json!("pending"));
        assert!(value.get("id").is_none());
        assert_eq!(value.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_timestamp_is_rfc3339() {
        let record = NewPayment::new(Channel::Eft, "user-1")
            .amount(dec!(1))
            .currency("ZAR")
            .into_record(Utc::now())
            .unwrap();
        let value = serde_json::to_value(ChannelResponse::from(record.clone())).unwrap();
        let parsed: DateTime<Utc> = value["timestamp"].as_str().unwrap().parse().unwrap();
        assert_eq!(parsed, record.timestamp);
    }
}
