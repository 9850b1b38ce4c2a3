#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(warnings)]

//! HTTP transport boundary for the Iamport client
//!
//! The client core never talks to the network directly. It hands a fully
//! built `http::Request<Bytes>` to a [`Transport`] and gets a buffered
//! `http::Response<Bytes>` back. This crate provides:
//! - The [`Transport`] capability trait
//! - [`HyperTransport`], a hyper + rustls implementation with per-request
//!   timeout, User-Agent injection and a response body size limit
//! - [`RecordingTransport`], an in-memory double that records outgoing
//!   requests and answers from a scripted queue
//!
//! # Example
//!
//! ```ignore
//! use iamport_http::{HyperTransport, Transport, TransportConfig};
//!
//! let transport = HyperTransport::new(TransportConfig::default())?;
//! let request = http::Request::get("https://api.iamport.kr/payments/imp_123")
//!     .body(bytes::Bytes::new())?;
//! let response = transport.send(request).await?;
//! ```

mod config;
mod error;
mod hyper_transport;
mod recording;
mod transport;

pub use config::{DEFAULT_USER_AGENT, TransportConfig, TransportSecurity};
pub use error::HttpError;
pub use hyper_transport::HyperTransport;
pub use recording::{RecordedRequest, RecordingTransport};
pub use transport::{Transport, TransportRequest, TransportResponse};
