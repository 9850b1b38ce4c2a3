//! Request and response payloads of the gateway endpoints.

pub mod payment;
pub mod subscription;
pub mod token;

pub use payment::{CancelPaymentRequest, Payment, PaymentStatus};
pub use subscription::{AgainPaymentRequest, Customer};
pub use token::{Token, TokenRequest};

/// Unix-seconds timestamps where the gateway uses `0` for "not set".
pub(crate) mod unix_timestamp {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use time::OffsetDateTime;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<i64>::deserialize(deserializer)? {
            None | Some(0) => Ok(None),
            Some(secs) => OffsetDateTime::from_unix_timestamp(secs)
                .map(Some)
                .map_err(D::Error::custom),
        }
    }

    #[allow(clippy::ref_option)]
    pub fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(value.map_or(0, OffsetDateTime::unix_timestamp))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use serde::{Deserialize, Serialize};
    use time::OffsetDateTime;

    #[derive(Serialize, Deserialize)]
    struct Stamped {
        #[serde(default, with = "super::unix_timestamp")]
        at: Option<OffsetDateTime>,
    }

    #[test]
    fn zero_and_missing_are_none() {
        let zero: Stamped = serde_json::from_str(r#"{"at":0}"#).unwrap();
        let missing: Stamped = serde_json::from_str("{}").unwrap();
        assert!(zero.at.is_none());
        assert!(missing.at.is_none());
    }

    #[test]
    fn seconds_round_trip() {
        let stamped: Stamped = serde_json::from_str(r#"{"at":1700000000}"#).unwrap();
        assert_eq!(stamped.at.unwrap().unix_timestamp(), 1_700_000_000);
        assert_eq!(serde_json::to_string(&stamped).unwrap(), r#"{"at":1700000000}"#);
    }
}
