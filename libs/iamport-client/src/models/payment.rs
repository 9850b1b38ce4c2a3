use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Lifecycle state of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Ready,
    Paid,
    Cancelled,
    Failed,
    #[serde(other)]
    Unknown,
}

/// Payment record as returned by the `/payments` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub imp_uid: String,
    pub merchant_uid: String,
    #[serde(default)]
    pub pay_method: Option<String>,
    #[serde(default)]
    pub pg_provider: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub cancel_amount: Decimal,
    #[serde(default)]
    pub currency: Option<String>,
    pub status: PaymentStatus,
    #[serde(default)]
    pub buyer_name: Option<String>,
    #[serde(default)]
    pub buyer_email: Option<String>,
    #[serde(default, with = "super::unix_timestamp")]
    pub paid_at: Option<OffsetDateTime>,
    #[serde(default, with = "super::unix_timestamp")]
    pub cancelled_at: Option<OffsetDateTime>,
    #[serde(default, with = "super::unix_timestamp")]
    pub failed_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub fail_reason: Option<String>,
    #[serde(default)]
    pub receipt_url: Option<String>,
}

impl Payment {
    /// Amount still refundable.
    #[must_use]
    pub fn refundable_amount(&self) -> Decimal {
        (self.amount - self.cancel_amount).max(Decimal::ZERO)
    }
}

/// Body of `POST /payments/cancel`.
///
/// Identifies the payment by `imp_uid` or `merchant_uid`; omitting `amount`
/// cancels the full remaining amount.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CancelPaymentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imp_uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_uid: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CancelPaymentRequest {
    #[must_use]
    pub fn by_imp_uid(imp_uid: impl Into<String>) -> Self {
        Self {
            imp_uid: Some(imp_uid.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn by_merchant_uid(merchant_uid: impl Into<String>) -> Self {
        Self {
            merchant_uid: Some(merchant_uid.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}
