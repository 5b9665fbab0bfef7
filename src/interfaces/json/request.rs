use crate::domain::channel::Channel;
use crate::domain::payment::{NewPayment, PaymentStatus, PaymentUpdate};
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// A channel request body reduced to the canonical payment fields.
///
/// Keys that are not canonical (`card_number`, `account_number`, `qr_code`,
/// the channel's own id field, ...) land in `extras`. They are only used for
/// the channel's structural check and are never persisted.
///
/// `amount` is read from the raw body before the rest is deserialized, so a
/// JSON number keeps its exact text and scale.
#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
pub struct ChannelRequest {
    pub user_id: Option<String>,
    #[serde(skip)]
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub status: Option<PaymentStatus>,
    pub description: Option<String>,
    pub payment_id: Option<String>,
    pub payment_reference: Option<String>,
    pub transaction_reference: Option<String>,
    #[serde(flatten)]
    pub extras: Map<String, Value>,
}

impl ChannelRequest {
    /// Parses a create body and runs the channel's checks with every
    /// required field enforced.
    pub fn for_create(channel: Channel, body: Value) -> Result<Self> {
        let request = Self::parse(body)?;
        channel.check(&request.extras, true)?;
        Ok(request)
    }

    /// Parses an update body. Channel checks cover only the fields sent.
    pub fn for_update(channel: Channel, body: Value) -> Result<Self> {
        let request = Self::parse(body)?;
        channel.check(&request.extras, false)?;
        Ok(request)
    }

    fn parse(body: Value) -> Result<Self> {
        let mut fields = match body {
            Value::Null => Map::new(),
            Value::Object(fields) => fields,
            _ => return Err(PaymentError::validation("request body must be a JSON object")),
        };
        let amount = fields.remove("amount").map(parse_amount).transpose()?.flatten();
        let mut request: Self = serde_json::from_value(Value::Object(fields))
            .map_err(|e| PaymentError::validation(format!("invalid request: {e}")))?;
        request.amount = amount;
        Ok(request)
    }

    /// Canonical create input. An absent owner gets a fresh id and an absent
    /// status defaults to `pending`.
    pub fn into_new_payment(self, channel: Channel) -> NewPayment {
        NewPayment {
            channel,
            user_id: self
                .user_id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            amount: self.amount,
            currency: self.currency,
            status: self.status.unwrap_or_default(),
            description: self.description,
            payment_id: self.payment_id,
            payment_reference: self.payment_reference,
            transaction_reference: self.transaction_reference,
        }
    }

    pub fn into_update(self) -> PaymentUpdate {
        PaymentUpdate {
            amount: self.amount,
            currency: self.currency,
            status: self.status,
        }
    }
}

/// Decodes an amount from its JSON text. Numbers keep their literal digits
/// (serde_json is built with `arbitrary_precision`), so no value passes
/// through `f64`.
fn parse_amount(value: Value) -> Result<Option<Decimal>> {
    let text = match value {
        Value::Null => return Ok(None),
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        _ => return Err(PaymentError::validation("amount must be a decimal string or number")),
    };
    let text = text.trim();
    let parsed = if text.contains(['e', 'E']) {
        Decimal::from_scientific(text)
    } else {
        Decimal::from_str_exact(text)
    };
    parsed
        .map(Some)
        .map_err(|e| PaymentError::validation(format!("invalid amount '{text}': {e}")))
}
