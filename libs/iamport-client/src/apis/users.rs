use std::sync::Arc;

use crate::client::{IamportClient, TOKEN_PATH};
use crate::error::IamportError;
use crate::models::token::{Token, TokenRequest};
use crate::request::IamportRequest;
use crate::response::IamportResponse;

/// `/users` endpoints.
#[derive(Debug, Clone)]
pub struct UsersApi {
    client: Arc<IamportClient>,
}

impl UsersApi {
    #[must_use]
    pub fn new(client: Arc<IamportClient>) -> Self {
        Self { client }
    }

    /// Issue a token for arbitrary credentials.
    ///
    /// Unlike [`IamportClient::authorize`], the token is returned only and
    /// never stored on the client.
    ///
    /// # Errors
    ///
    /// Returns [`IamportError::Gateway`] when the gateway rejects the
    /// credentials, plus transport and decoding errors.
    pub async fn get_token(&self, request: &TokenRequest) -> Result<Token, IamportError> {
        let request = IamportRequest::post(TOKEN_PATH, request).without_authorization();
        let envelope: IamportResponse<Token> = self.client.request(&request).await?;
        envelope.into_content()
    }
}
