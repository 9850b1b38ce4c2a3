use std::sync::Arc;

use super::path_segment;
use crate::client::IamportClient;
use crate::error::IamportError;
use crate::models::payment::{CancelPaymentRequest, Payment};
use crate::request::IamportRequest;
use crate::response::IamportResponse;

/// `/payments` endpoints.
#[derive(Debug, Clone)]
pub struct PaymentsApi {
    client: Arc<IamportClient>,
}

impl PaymentsApi {
    #[must_use]
    pub fn new(client: Arc<IamportClient>) -> Self {
        Self { client }
    }

    /// Look up a payment by the gateway-assigned `imp_uid`.
    ///
    /// # Errors
    ///
    /// [`IamportError::InvalidArgument`] for a blank id, otherwise gateway,
    /// transport and decoding errors.
    pub async fn get(&self, imp_uid: &str) -> Result<Payment, IamportError> {
        let path = format!("/payments/{}", path_segment("imp_uid", imp_uid)?);
        self.fetch(&IamportRequest::get(path)).await
    }

    /// Look up a payment by the merchant-assigned order id.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn find_by_merchant_uid(&self, merchant_uid: &str) -> Result<Payment, IamportError> {
        let path = format!(
            "/payments/find/{}",
            path_segment("merchant_uid", merchant_uid)?
        );
        self.fetch(&IamportRequest::get(path)).await
    }

    /// Cancel a payment fully or partially.
    ///
    /// # Errors
    ///
    /// [`IamportError::InvalidArgument`] when neither `imp_uid` nor
    /// `merchant_uid` is set, otherwise gateway, transport and decoding
    /// errors.
    pub async fn cancel(&self, request: &CancelPaymentRequest) -> Result<Payment, IamportError> {
        let has_id = |id: Option<&str>| id.is_some_and(|v| !v.trim().is_empty());
        if !has_id(request.imp_uid.as_deref()) && !has_id(request.merchant_uid.as_deref()) {
            return Err(IamportError::InvalidArgument {
                name: "imp_uid",
                reason: "either imp_uid or merchant_uid is required".to_owned(),
            });
        }
        self.fetch(&IamportRequest::post("/payments/cancel", request))
            .await
    }

    async fn fetch<B>(&self, request: &IamportRequest<B>) -> Result<Payment, IamportError>
    where
        B: serde::Serialize + Sync,
    {
        let envelope: IamportResponse<Payment> = self.client.request(request).await?;
        envelope.into_content()
    }
}
