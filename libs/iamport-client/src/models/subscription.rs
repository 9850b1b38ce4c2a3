use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Billing key holder registered under a `customer_uid`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub customer_uid: String,
    #[serde(default)]
    pub pg_provider: Option<String>,
    #[serde(default)]
    pub card_name: Option<String>,
    #[serde(default)]
    pub card_number: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default, with = "super::unix_timestamp")]
    pub inserted: Option<OffsetDateTime>,
    #[serde(default, with = "super::unix_timestamp")]
    pub updated: Option<OffsetDateTime>,
}

/// Body of `POST /subscribe/payments/again`: charge a stored billing key.
#[derive(Debug, Clone, Serialize)]
pub struct AgainPaymentRequest {
    pub customer_uid: String,
    pub merchant_uid: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_email: Option<String>,
}

impl AgainPaymentRequest {
    #[must_use]
    pub fn new(
        customer_uid: impl Into<String>,
        merchant_uid: impl Into<String>,
        amount: Decimal,
        name: impl Into<String>,
    ) -> Self {
        Self {
            customer_uid: customer_uid.into(),
            merchant_uid: merchant_uid.into(),
            amount,
            name: name.into(),
            buyer_name: None,
            buyer_email: None,
        }
    }

    #[must_use]
    pub fn with_buyer(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.buyer_name = Some(name.into());
        self.buyer_email = Some(email.into());
        self
    }
}
