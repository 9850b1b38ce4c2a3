use std::fmt;
use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use http::header::HeaderName;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;
use crate::secret::Secret;

/// Header that carries the access token unless configured otherwise.
pub const DEFAULT_AUTHORIZATION_HEADER_NAME: &str = "Authorization";

/// Production gateway host.
pub const DEFAULT_BASE_URL: &str = "https://api.iamport.kr";

/// Prefix for environment variable overrides (`IAMPORT_API_KEY`, ...).
pub const ENV_PREFIX: &str = "IAMPORT_";

/// Raw client options as read from a key/value configuration source.
///
/// Nothing is validated here; pass it to [`ClientOptions::from_config`].
/// Missing keys fall back to [`Default`]: empty credentials, the default
/// header name and the production base URL.
///
/// `Debug` is manually implemented to redact `api_secret`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientOptionsConfig {
    /// Merchant account identifier (`imp` code).
    pub account_id: String,
    /// REST API key.
    pub api_key: String,
    /// REST API secret.
    pub api_secret: String,
    /// Header that carries the access token.
    pub authorization_header_name: String,
    /// Gateway base URL (`http` or `https`).
    pub base_url: String,
}

impl ClientOptionsConfig {
    /// Credentials with default header name and base URL.
    pub fn new(
        account_id: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            ..Self::default()
        }
    }

    /// Layered configuration source: defaults, then the optional YAML file,
    /// then `IAMPORT_*` environment variables.
    #[must_use]
    pub fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = config_path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }
}

impl Default for ClientOptionsConfig {
    fn default() -> Self {
        Self {
            account_id: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            authorization_header_name: DEFAULT_AUTHORIZATION_HEADER_NAME.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }
}

impl fmt::Debug for ClientOptionsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptionsConfig")
            .field("account_id", &self.account_id)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("authorization_header_name", &self.authorization_header_name)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Validated, immutable client options.
#[derive(Clone, Debug)]
pub struct ClientOptions {
    account_id: String,
    api_key: String,
    api_secret: Secret,
    authorization_header_name: HeaderName,
    base_url: Url,
}

impl ClientOptions {
    /// Validate raw configuration.
    ///
    /// Checks run in a fixed order and the first failure wins: `account_id`,
    /// `api_key`, `api_secret`, `authorization_header_name` and `base_url`
    /// must be non-blank; then `base_url` must parse as an absolute URL with
    /// an `http` or `https` scheme; then the header name must be a valid HTTP
    /// header name.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyArgument`] naming the first blank field
    /// - [`ConfigError::InvalidUrlFormat`] if `base_url` does not parse
    /// - [`ConfigError::InvalidValue`] for a wrong scheme, a query or
    ///   fragment in `base_url`, or a bad header name
    pub fn from_config(config: ClientOptionsConfig) -> Result<Self, ConfigError> {
        require_non_empty("account_id", &config.account_id)?;
        require_non_empty("api_key", &config.api_key)?;
        require_non_empty("api_secret", &config.api_secret)?;
        require_non_empty("authorization_header_name", &config.authorization_header_name)?;
        require_non_empty("base_url", &config.base_url)?;

        let base_url = Url::parse(config.base_url.trim()).map_err(|e| {
            ConfigError::InvalidUrlFormat {
                url: config.base_url.clone(),
                reason: e.to_string(),
            }
        })?;

        match base_url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "base_url",
                    reason: format!("scheme '{other}' is not supported, expected http or https"),
                });
            }
        }

        if base_url.query().is_some() || base_url.fragment().is_some() {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                reason: "must not carry a query or fragment".to_owned(),
            });
        }

        let authorization_header_name =
            HeaderName::from_bytes(config.authorization_header_name.trim().as_bytes()).map_err(
                |e| ConfigError::InvalidValue {
                    field: "authorization_header_name",
                    reason: e.to_string(),
                },
            )?;

        Ok(Self {
            account_id: config.account_id,
            api_key: config.api_key,
            api_secret: Secret::new(config.api_secret),
            authorization_header_name,
            base_url,
        })
    }

    /// Extract [`ClientOptionsConfig`] from a figment and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Extract`] if extraction fails, otherwise the
    /// same errors as [`from_config`](Self::from_config).
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: ClientOptionsConfig = figment.extract().map_err(Box::new)?;
        Self::from_config(config)
    }

    #[must_use]
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[must_use]
    pub fn api_secret(&self) -> &Secret {
        &self.api_secret
    }

    #[must_use]
    pub fn authorization_header_name(&self) -> &HeaderName {
        &self.authorization_header_name
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::EmptyArgument { field });
    }
    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn valid_config() -> ClientOptionsConfig {
        ClientOptionsConfig {
            account_id: "abcd".into(),
            api_key: "1234".into(),
            api_secret: "5678".into(),
            authorization_header_name: "xxxx".into(),
            base_url: "https://api.iamport.kr".into(),
        }
    }

    fn assert_empty_argument(config: ClientOptionsConfig, expected: &str) {
        let err = ClientOptions::from_config(config).unwrap_err();
        assert!(
            matches!(err, ConfigError::EmptyArgument { field } if field == expected),
            "expected EmptyArgument({expected}), got: {err}"
        );
    }

    // ---- emptiness ----------------------------------------------------------

    #[test]
    fn each_empty_field_is_reported_by_name() {
        let cases: [(&str, fn(&mut ClientOptionsConfig)); 5] = [
            ("account_id", |c| c.account_id.clear()),
            ("api_key", |c| c.api_key.clear()),
            ("api_secret", |c| c.api_secret.clear()),
            ("authorization_header_name", |c| {
                c.authorization_header_name.clear();
            }),
            ("base_url", |c| c.base_url.clear()),
        ];

        for (field, clear) in cases {
            let mut config = valid_config();
            clear(&mut config);
            assert_empty_argument(config, field);
        }
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        let config = ClientOptionsConfig {
            api_key: "   ".into(),
            ..valid_config()
        };
        assert_empty_argument(config, "api_key");
    }

    #[test]
    fn first_empty_field_wins() {
        // An unparseable base URL must not mask the earlier empty field.
        let config = ClientOptionsConfig {
            account_id: String::new(),
            base_url: "uuuu".into(),
            ..valid_config()
        };
        assert_empty_argument(config, "account_id");
    }

    #[test]
    fn empty_base_url_is_empty_argument_not_url_format() {
        let config = ClientOptionsConfig {
            base_url: String::new(),
            ..valid_config()
        };
        assert_empty_argument(config, "base_url");
    }

    // ---- base URL -----------------------------------------------------------

    #[test]
    fn malformed_base_url_is_invalid_url_format() {
        for value in ["uuu", "a/b/c/d"] {
            let config = ClientOptionsConfig {
                base_url: value.into(),
                ..valid_config()
            };
            let err = ClientOptions::from_config(config).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidUrlFormat { ref url, .. } if url == value),
                "expected InvalidUrlFormat for {value}, got: {err}"
            );
        }
    }

    #[test]
    fn unsupported_scheme_is_invalid_value() {
        for value in ["files://abcd", "app://abcd"] {
            let config = ClientOptionsConfig {
                base_url: value.into(),
                ..valid_config()
            };
            let err = ClientOptions::from_config(config).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue { field: "base_url", .. }),
                "expected InvalidValue for {value}, got: {err}"
            );
        }
    }

    #[test]
    fn base_url_with_query_or_fragment_is_invalid_value() {
        for value in ["https://api.iamport.kr/?lang=ko", "https://api.iamport.kr#x"] {
            let config = ClientOptionsConfig {
                base_url: value.into(),
                ..valid_config()
            };
            let err = ClientOptions::from_config(config).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue { field: "base_url", .. }),
                "expected InvalidValue for {value}, got: {err}"
            );
        }
    }

    #[test]
    fn accepted_base_url_builds_endpoint_path() {
        let config = ClientOptionsConfig {
            base_url: "https://api.iamport.kr/v1/".into(),
            ..valid_config()
        };
        let options = ClientOptions::from_config(config).unwrap();
        let built = crate::api_path::build(options.base_url(), "/users/getToken").unwrap();
        assert_eq!(built.path(), "/v1/users/getToken");
        assert!(built.query().is_none());
    }

    #[test]
    fn http_and_https_are_accepted() {
        for value in ["http://localhost:8080", "https://api.iamport.kr/"] {
            let config = ClientOptionsConfig {
                base_url: value.into(),
                ..valid_config()
            };
            assert!(ClientOptions::from_config(config).is_ok(), "{value}");
        }
    }

    #[test]
    fn invalid_header_name_is_invalid_value() {
        let config = ClientOptionsConfig {
            authorization_header_name: "bad header".into(),
            ..valid_config()
        };
        let err = ClientOptions::from_config(config).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "authorization_header_name",
                ..
            }
        ));
    }

    // ---- defaults and accessors ---------------------------------------------

    #[test]
    fn new_uses_defaults() {
        let options =
            ClientOptions::from_config(ClientOptionsConfig::new("abcd", "1234", "5678")).unwrap();
        assert_eq!(options.account_id(), "abcd");
        assert_eq!(options.api_key(), "1234");
        assert_eq!(options.api_secret().expose(), "5678");
        assert_eq!(options.authorization_header_name(), "authorization");
        assert_eq!(options.base_url().as_str(), "https://api.iamport.kr/");
    }

    #[test]
    fn debug_redacts_secret() {
        let config = ClientOptionsConfig::new("abcd", "1234", "super-secret");
        assert!(!format!("{config:?}").contains("super-secret"));

        let options = ClientOptions::from_config(config).unwrap();
        assert!(!format!("{options:?}").contains("super-secret"));
    }

    // ---- figment ------------------------------------------------------------

    #[test]
    fn from_figment_applies_defaults_for_missing_keys() {
        let figment = Figment::from(Serialized::defaults(ClientOptionsConfig::default()))
            .merge(("account_id", "abcd"))
            .merge(("api_key", "1234"))
            .merge(("api_secret", "5678"));

        let options = ClientOptions::from_figment(&figment).unwrap();
        assert_eq!(options.base_url().as_str(), "https://api.iamport.kr/");
        assert_eq!(options.authorization_header_name(), "authorization");
    }

    #[test]
    fn from_figment_without_defaults_layer_still_defaults() {
        let figment = Figment::new()
            .merge(("account_id", "abcd"))
            .merge(("api_key", "1234"))
            .merge(("api_secret", "5678"));

        let options = ClientOptions::from_figment(&figment).unwrap();
        assert_eq!(options.base_url().as_str(), "https://api.iamport.kr/");
    }

    #[test]
    fn from_figment_explicit_empty_header_name_fails() {
        let figment = Figment::new()
            .merge(("account_id", "abcd"))
            .merge(("api_key", "1234"))
            .merge(("api_secret", "5678"))
            .merge(("authorization_header_name", ""));

        let err = ClientOptions::from_figment(&figment).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EmptyArgument {
                field: "authorization_header_name"
            }
        ));
    }

    #[test]
    fn from_figment_missing_credentials_fail() {
        let err = ClientOptions::from_figment(&Figment::new()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EmptyArgument {
                field: "account_id"
            }
        ));
    }

    #[test]
    fn from_figment_wrong_type_is_extract_error() {
        let figment = Figment::new().merge(("account_id", vec![1, 2, 3]));
        let err = ClientOptions::from_figment(&figment).unwrap_err();
        assert!(matches!(err, ConfigError::Extract(_)), "got: {err}");
    }
}
