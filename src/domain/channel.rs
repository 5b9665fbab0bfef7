use crate::error::{PaymentError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// A nominal payment method. Every channel stores the same canonical record;
/// only the wire field names and the structural checks differ.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum Channel {
    Card,
    BankTransfer,
    Bank,
    Cash,
    Link,
    MobileMoney,
    Mpesa,
    AirtelMoney,
    VodafoneCash,
    TigoCash,
    Eft,
    #[serde(rename = "snapscan")]
    SnapScan,
    ApplePay,
    GooglePay,
    SamsungPay,
    MtnMobileMoney,
    BankAccount,
    Wallet,
    Qr,
    Pos,
    #[serde(rename = "paypal")]
    PayPal,
    Stripe,
    AirtelTigoMoney,
    DedicatedVirtualAccount,
}

/// Structural check a channel applies to its request before anything is
/// stored.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FieldRule {
    None,
    /// Card number, expiry, CVV and cardholder name.
    Card,
    /// A field that must be exactly `len` characters long.
    FixedLength { field: &'static str, len: usize },
    /// A field that must be present and non-blank.
    Present { field: &'static str },
}

/// Wire naming for one channel.
#[derive(Debug, PartialEq, Eq)]
pub struct ChannelSpec {
    pub channel: Channel,
    pub name: &'static str,
    /// Path segment the channel is conventionally served under.
    pub path: &'static str,
    /// Response field carrying the record id.
    pub id_field: &'static str,
    pub rule: FieldRule,
}

const ACCOUNT_NUMBER_LEN: usize = 10;

const fn spec(
    channel: Channel,
    name: &'static str,
    path: &'static str,
    id_field: &'static str,
    rule: FieldRule,
) -> ChannelSpec {
    ChannelSpec {
        channel,
        name,
        path,
        id_field,
        rule,
    }
}

const fn fixed(field: &'static str) -> FieldRule {
    FieldRule::FixedLength {
        field,
        len: ACCOUNT_NUMBER_LEN,
    }
}

/// Indexed by `Channel as usize`.
pub static CHANNELS: [ChannelSpec; 24] = [
    spec(Channel::Card, "card", "card-payments", "card_payment_id", FieldRule::Card),
    spec(Channel::BankTransfer, "bank-transfer", "bank-transfers", "transfer_id", fixed("account_number")),
    spec(Channel::Bank, "bank", "bank-payments", "bank_payment_id", fixed("bank_number")),
    spec(Channel::Cash, "cash", "cash-payments", "cash_payment_id", FieldRule::None),
    spec(Channel::Link, "link", "link-payments", "link_payment_id", FieldRule::None),
    spec(Channel::MobileMoney, "mobile-money", "mobile-money-payments", "mobile_money_payment_id", FieldRule::None),
    spec(Channel::Mpesa, "mpesa", "mpesa-payments", "mpesa_payment_id", FieldRule::None),
    spec(Channel::AirtelMoney, "airtel-money", "airtel-money-payments", "airtel_money_payment_id", FieldRule::None),
    spec(Channel::VodafoneCash, "vodafone-cash", "vodafone-cash-payments", "vodafone_cash_payment_id", FieldRule::None),
    spec(Channel::TigoCash, "tigo-cash", "tigo-cash-payments", "tigo_cash_payment_id", FieldRule::None),
    spec(Channel::Eft, "eft", "eft-payments", "eft_payment_id", FieldRule::None),
    spec(Channel::SnapScan, "snapscan", "snapscan-payments", "snapscan_payment_id", FieldRule::None),
    spec(Channel::ApplePay, "apple-pay", "apple-pay-payments", "applepay_payment_id", FieldRule::None),
    spec(Channel::GooglePay, "google-pay", "google-pay-payments", "googlepay_payment_id", FieldRule::None),
    spec(Channel::SamsungPay, "samsung-pay", "samsung-pay-payments", "samsungpay_payment_id", FieldRule::None),
    spec(Channel::MtnMobileMoney, "mtn-mobile-money", "mtn-mobile-money-payments", "mtn_mobile_money_payment_id", FieldRule::None),
    spec(Channel::BankAccount, "bank-account", "bank-accounts", "bank_account_id", fixed("account_number")),
    spec(Channel::Wallet, "wallet", "wallet-payments", "wallet_payment_id", fixed("wallet_number")),
    spec(Channel::Qr, "qr", "qr-payments", "qr_payment_id", FieldRule::Present { field: "qr_code" }),
    spec(Channel::Pos, "pos", "pos-payments", "pos_payment_id", fixed("pos_number")),
    spec(Channel::PayPal, "paypal", "paypal-payments", "paypal_payment_id", FieldRule::None),
    spec(Channel::Stripe, "stripe", "stripe-payments", "stripe_payment_id", FieldRule::None),
    spec(Channel::AirtelTigoMoney, "airtel-tigo-money", "airteltigo-money-payments", "airteltigo_payment_id", FieldRule::None),
    spec(
        Channel::DedicatedVirtualAccount,
        "dedicated-virtual-account",
        "dedicated-virtual-accounts",
        "virtual_payment_id",
        fixed("virtual_account_number"),
    ),
];

impl Channel {
    pub fn spec(self) -> &'static ChannelSpec {
        &CHANNELS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn id_field(self) -> &'static str {
        self.spec().id_field
    }

    pub fn all() -> impl Iterator<Item = Channel> {
        CHANNELS.iter().map(|spec| spec.channel)
    }

    /// Runs the channel's structural check over the request's extra fields.
    ///
    /// On create every field the rule names must be present. On update only
    /// the fields that were sent are checked.
    pub fn check(self, extras: &Map<String, Value>, creating: bool) -> Result<()> {
        match self.spec().rule {
            FieldRule::None => Ok(()),
            FieldRule::FixedLength { field, len } => {
                if let Some(value) = text_field(extras, field, creating)?
                    && value.chars().count() != len
                {
                    return Err(PaymentError::validation(format!(
                        "{field} must be exactly {len} characters"
                    )));
                }
                Ok(())
            }
            FieldRule::Present { field } => {
                if let Some(value) = text_field(extras, field, creating)?
                    && value.trim().is_empty()
                {
                    return Err(PaymentError::validation(format!("{field} must not be blank")));
                }
                Ok(())
            }
            FieldRule::Card => check_card(extras, creating),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = PaymentError;

    /// Accepts the channel name, its path segment or its id field.
    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().trim_matches('/');
        CHANNELS
            .iter()
            .find(|spec| spec.name == key || spec.path == key || spec.id_field == key)
            .map(|spec| spec.channel)
            .ok_or_else(|| PaymentError::validation(format!("unknown channel '{s}'")))
    }
}

fn text_field<'a>(
    extras: &'a Map<String, Value>,
    field: &str,
    required: bool,
) -> Result<Option<&'a str>> {
    match extras.get(field) {
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Null) | None if !required => Ok(None),
        Some(Value::Null) | None => Err(PaymentError::validation(format!("{field} is required"))),
        Some(_) => Err(PaymentError::validation(format!("{field} must be a string"))),
    }
}

fn all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn check_card(extras: &Map<String, Value>, creating: bool) -> Result<()> {
    if let Some(number) = text_field(extras, "card_number", creating)?
        && !(all_digits(number) && (16..=19).contains(&number.len()))
    {
        return Err(PaymentError::validation(
            "card_number must be 16 to 19 digits",
        ));
    }

    if let Some(cvv) = text_field(extras, "cvv", creating)?
        && !(all_digits(cvv) && (3..=4).contains(&cvv.len()))
    {
        return Err(PaymentError::validation("cvv must be 3 or 4 digits"));
    }

    if let Some(expiry) = text_field(extras, "card_expiry", creating)?
        && !valid_expiry(expiry)
    {
        return Err(PaymentError::validation("card_expiry must be MM/YY"));
    }

    if let Some(name) = text_field(extras, "customer_name", creating)?
        && name.trim().is_empty()
    {
        return Err(PaymentError::validation("customer_name must not be blank"));
    }

    Ok(())
}

fn valid_expiry(expiry: &str) -> bool {
    let Some((month, year)) = expiry.split_once('/') else {
        return false;
    };
    if month.len() != 2 || year.len() != 2 || !all_digits(month) || !all_digits(year) {
        return false;
    }
    matches!(month.parse::<u8>(), Ok(1..=12))
}
