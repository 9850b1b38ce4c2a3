//! Typed resource APIs over [`IamportClient`].
//!
//! Each API checks the envelope code of its endpoint and returns the decoded
//! content, so callers see [`IamportError::Gateway`] instead of raw envelopes.

use std::sync::Arc;

use crate::client::IamportClient;
use crate::error::IamportError;

mod payments;
mod subscriptions;
mod users;

pub use payments::PaymentsApi;
pub use subscriptions::SubscriptionsApi;
pub use users::UsersApi;

/// Entry point bundling every resource API over one shared client.
#[derive(Debug, Clone)]
pub struct Iamport {
    pub users: UsersApi,
    pub payments: PaymentsApi,
    pub subscriptions: SubscriptionsApi,
    client: Arc<IamportClient>,
}

impl Iamport {
    #[must_use]
    pub fn new(client: Arc<IamportClient>) -> Self {
        Self {
            users: UsersApi::new(Arc::clone(&client)),
            payments: PaymentsApi::new(Arc::clone(&client)),
            subscriptions: SubscriptionsApi::new(Arc::clone(&client)),
            client,
        }
    }

    #[must_use]
    pub fn client(&self) -> &Arc<IamportClient> {
        &self.client
    }
}

/// Percent-encode a caller-supplied identifier for use as one path segment.
///
/// # Errors
///
/// Returns [`IamportError::InvalidArgument`] for a blank value.
fn path_segment(name: &'static str, value: &str) -> Result<String, IamportError> {
    if value.trim().is_empty() {
        return Err(IamportError::InvalidArgument {
            name,
            reason: "must not be empty".to_owned(),
        });
    }
    Ok(urlencoding::encode(value).into_owned())
}
