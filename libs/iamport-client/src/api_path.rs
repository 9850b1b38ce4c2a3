//! Absolute URL composition for gateway endpoints.

use url::Url;

use crate::error::IamportError;

/// Join the gateway base URL with an endpoint path (and optional query).
///
/// One trailing `/` is stripped from `base` and `path_and_query` is appended
/// verbatim, so a base with a path prefix (`https://host/v1/`) keeps it. The
/// result is parsed, which normalizes it. Pure: the same inputs always give
/// the same URL.
///
/// # Errors
///
/// - [`IamportError::InvalidArgument`] if `path_and_query` does not start
///   with `/`
/// - [`IamportError::InvalidUrl`] if the joined string does not parse
pub fn build(base: &Url, path_and_query: &str) -> Result<Url, IamportError> {
    if !path_and_query.starts_with('/') {
        return Err(IamportError::InvalidArgument {
            name: "path_and_query",
            reason: format!("'{path_and_query}' must start with '/'"),
        });
    }

    let base = base.as_str();
    let base = base.strip_suffix('/').unwrap_or(base);
    let joined = format!("{base}{path_and_query}");

    Url::parse(&joined).map_err(|e| IamportError::InvalidUrl {
        url: joined.clone(),
        reason: e.to_string(),
    })
}
