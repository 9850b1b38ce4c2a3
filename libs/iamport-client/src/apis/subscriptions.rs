use std::sync::Arc;

use super::path_segment;
use crate::client::IamportClient;
use crate::error::IamportError;
use crate::models::payment::Payment;
use crate::models::subscription::{AgainPaymentRequest, Customer};
use crate::request::IamportRequest;
use crate::response::IamportResponse;

/// `/subscribe` endpoints: billing keys and recurring charges.
#[derive(Debug, Clone)]
pub struct SubscriptionsApi {
    client: Arc<IamportClient>,
}

impl SubscriptionsApi {
    #[must_use]
    pub fn new(client: Arc<IamportClient>) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// [`IamportError::InvalidArgument`] for a blank id, otherwise gateway,
    /// transport and decoding errors.
    pub async fn get_customer(&self, customer_uid: &str) -> Result<Customer, IamportError> {
        let request = IamportRequest::get(customer_path(customer_uid)?);
        let envelope: IamportResponse<Customer> = self.client.request(&request).await?;
        envelope.into_content()
    }

    /// Delete the billing key; returns the removed customer.
    ///
    /// # Errors
    ///
    /// Same as [`get_customer`](Self::get_customer).
    pub async fn delete_customer(&self, customer_uid: &str) -> Result<Customer, IamportError> {
        let request = IamportRequest::delete(customer_path(customer_uid)?);
        let envelope: IamportResponse<Customer> = self.client.request(&request).await?;
        envelope.into_content()
    }

    /// Charge the billing key registered under `customer_uid`.
    ///
    /// # Errors
    ///
    /// [`IamportError::InvalidArgument`] for a blank `customer_uid` or
    /// `merchant_uid`, otherwise gateway, transport and decoding errors.
    pub async fn pay_again(&self, request: &AgainPaymentRequest) -> Result<Payment, IamportError> {
        path_segment("customer_uid", &request.customer_uid)?;
        path_segment("merchant_uid", &request.merchant_uid)?;

        let request = IamportRequest::post("/subscribe/payments/again", request);
        let envelope: IamportResponse<Payment> = self.client.request(&request).await?;
        envelope.into_content()
    }
}

fn customer_path(customer_uid: &str) -> Result<String, IamportError> {
    Ok(format!(
        "/subscribe/customers/{}",
        path_segment("customer_uid", customer_uid)?
    ))
}
