#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(warnings)]

//! Client for the Iamport payment gateway REST API
//!
//! The crate is organized around [`IamportClient`], which owns the transport
//! handle and the current access token:
//! - [`ClientOptions`] carries credentials and the gateway base URL, validated
//!   once at construction
//! - [`IamportRequest`] describes a call (path, method, body, whether it needs
//!   a token)
//! - [`IamportResponse`] is the gateway's `{code, message, response}` envelope
//! - [`apis`] holds the resource APIs that turn envelopes into typed results
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use iamport_client::{ClientOptions, ClientOptionsConfig, IamportClient, apis::Iamport};
//!
//! let options = ClientOptions::from_config(ClientOptionsConfig::new(
//!     "imp12345678",
//!     "api-key",
//!     "api-secret",
//! ))?;
//! let iamport = Iamport::new(Arc::new(IamportClient::new(options)?));
//!
//! let payment = iamport.payments.get("imp_448280090638").await?;
//! println!("{} {}", payment.merchant_uid, payment.amount);
//! ```

pub mod api_path;
pub mod apis;
mod client;
mod error;
pub mod models;
mod options;
mod request;
mod response;
mod secret;

pub use client::IamportClient;
pub use error::{ConfigError, IamportError};
pub use models::token::{Token, TokenRequest};
pub use options::{
    ClientOptions, ClientOptionsConfig, DEFAULT_AUTHORIZATION_HEADER_NAME, DEFAULT_BASE_URL,
    ENV_PREFIX,
};
pub use request::IamportRequest;
pub use response::IamportResponse;
pub use secret::Secret;

pub use iamport_http::{
    HttpError, HyperTransport, RecordedRequest, RecordingTransport, Transport, TransportConfig,
    TransportRequest, TransportResponse, TransportSecurity,
};
