use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::options::ClientOptions;
use crate::secret::{Secret, serialize_exposed};

/// Credentials sent to `/users/getToken`.
///
/// `Debug` redacts the secret.
#[derive(Debug, Clone, Serialize)]
pub struct TokenRequest {
    #[serde(rename = "imp_id")]
    pub account_id: String,
    #[serde(rename = "imp_key")]
    pub api_key: String,
    #[serde(rename = "imp_secret", serialize_with = "serialize_exposed")]
    pub api_secret: Secret,
}

impl TokenRequest {
    #[must_use]
    pub fn new(
        account_id: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            api_key: api_key.into(),
            api_secret: Secret::new(api_secret),
        }
    }

    #[must_use]
    pub fn from_options(options: &ClientOptions) -> Self {
        Self {
            account_id: options.account_id().to_owned(),
            api_key: options.api_key().to_owned(),
            api_secret: options.api_secret().clone(),
        }
    }
}

/// Access token issued by the gateway.
///
/// Deserialize-only: the token value stays inside a [`Secret`].
#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    access_token: Secret,
    #[serde(with = "time::serde::timestamp")]
    expired_at: OffsetDateTime,
    #[serde(default, with = "time::serde::timestamp::option")]
    now: Option<OffsetDateTime>,
}

impl Token {
    #[must_use]
    pub fn new(access_token: impl Into<String>, expired_at: OffsetDateTime) -> Self {
        Self {
            access_token: Secret::new(access_token),
            expired_at,
            now: None,
        }
    }

    #[must_use]
    pub fn access_token(&self) -> &Secret {
        &self.access_token
    }

    #[must_use]
    pub fn expired_at(&self) -> OffsetDateTime {
        self.expired_at
    }

    /// Gateway clock at issuance, when reported.
    #[must_use]
    pub fn issued_at(&self) -> Option<OffsetDateTime> {
        self.now
    }

    #[must_use]
    pub fn is_expired_at(&self, at: OffsetDateTime) -> bool {
        at >= self.expired_at
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(OffsetDateTime::now_utc())
    }
}
