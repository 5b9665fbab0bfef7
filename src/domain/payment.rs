use super::channel::Channel;
use crate::error::{PaymentError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Server-generated identifier of a payment record.
///
/// Opaque to callers. New values are UUID v4 text, so an identifier is never
/// handed out twice, even after the record it named has been deleted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(String);

impl PaymentId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PaymentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PaymentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Disposition of a payment. Any status may be overwritten by any other;
/// the value is declared by the caller, not computed.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Confirmed,
    #[default]
    Pending,
    Failed,
    Refunded,
    Disputed,
    Cancelled,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 6] = [
        PaymentStatus::Confirmed,
        PaymentStatus::Pending,
        PaymentStatus::Failed,
        PaymentStatus::Refunded,
        PaymentStatus::Disputed,
        PaymentStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Confirmed => "confirmed",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
            PaymentStatus::Disputed => "disputed",
            PaymentStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| PaymentError::validation(format!("unknown payment status '{s}'")))
    }
}

/// The canonical stored payment entity.
///
/// Every channel persists this same shape; `channel` records which one the
/// payment was submitted through.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub channel: Channel,
    pub user_id: String,
    pub amount: Decimal,
    pub currency: String,
    /// Internal payment identifier.
    pub payment_id: String,
    /// External-facing reference.
    pub payment_reference: String,
    /// Reconciliation reference.
    pub transaction_reference: String,
    pub payment_status: PaymentStatus,
    pub description: Option<String>,
    /// Creation time. Never touched by updates.
    pub timestamp: DateTime<Utc>,
}

/// Input for creating a record. References left as `None` are generated.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub channel: Channel,
    pub user_id: String,
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub status: PaymentStatus,
    pub description: Option<String>,
    pub payment_id: Option<String>,
    pub payment_reference: Option<String>,
    pub transaction_reference: Option<String>,
}

impl NewPayment {
    pub fn new(channel: Channel, user_id: impl Into<String>) -> Self {
        Self {
            channel,
            user_id: user_id.into(),
            amount: None,
            currency: None,
            status: PaymentStatus::default(),
            description: None,
            payment_id: None,
            payment_reference: None,
            transaction_reference: None,
        }
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn status(mut self, status: PaymentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builds the full record, generating the id and any missing reference.
    ///
    /// Each identifier comes from its own generator call; none is derived
    /// from another.
    pub fn into_record(self, now: DateTime<Utc>) -> Result<PaymentRecord> {
        let amount = self
            .amount
            .ok_or_else(|| PaymentError::validation("amount is required"))?;
        let currency = required_text("currency", self.currency)?;

        Ok(PaymentRecord {
            id: PaymentId::generate(),
            channel: self.channel,
            user_id: self.user_id,
            amount,
            currency,
            payment_id: reference_or_generate("payment_id", self.payment_id)?,
            payment_reference: reference_or_generate("payment_reference", self.payment_reference)?,
            transaction_reference: reference_or_generate(
                "transaction_reference",
                self.transaction_reference,
            )?,
            payment_status: self.status,
            description: self.description,
            timestamp: now,
        })
    }
}

/// Fields a caller may overwrite on an existing record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PaymentUpdate {
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub status: Option<PaymentStatus>,
}

impl PaymentUpdate {
    pub fn status(status: PaymentStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.currency.is_none() && self.status.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(currency) = &self.currency
            && currency.trim().is_empty()
        {
            return Err(PaymentError::validation("currency must not be blank"));
        }
        Ok(())
    }

    /// Overwrites the supplied fields. Identifiers and the timestamp are
    /// left as they are.
    pub fn apply(&self, record: &mut PaymentRecord) {
        if let Some(amount) = self.amount {
            record.amount = amount;
        }
        if let Some(currency) = &self.currency {
            record.currency = currency.clone();
        }
        if let Some(status) = self.status {
            record.payment_status = status;
        }
    }
}

fn required_text(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(PaymentError::validation(format!("{field} is required"))),
    }
}

fn reference_or_generate(field: &str, supplied: Option<String>) -> Result<String> {
    match supplied {
        Some(v) if v.trim().is_empty() => Err(PaymentError::validation(format!(
            "{field} must not be blank"
        ))),
        Some(v) => Ok(v),
        None => Ok(Uuid::new_v4().to_string()),
    }
}
