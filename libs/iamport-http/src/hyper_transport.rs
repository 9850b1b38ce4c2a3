use crate::config::{TransportConfig, TransportSecurity};
use crate::error::HttpError;
use crate::transport::{Transport, TransportRequest, TransportResponse};
use async_trait::async_trait;
use bytes::Bytes;
use http::header::{HeaderValue, USER_AGENT};
use http::{Request, Response};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Incoming;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::{TokioExecutor, TokioTimer};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tower::timeout::TimeoutLayer;
use tower::util::BoxCloneSyncService;
use tower::{Service, ServiceBuilder, ServiceExt};

/// Type-erased service stack: Timeout → hyper client.
type InnerService = BoxCloneSyncService<Request<Full<Bytes>>, Response<Incoming>, HttpError>;

/// Production [`Transport`] backed by hyper and rustls
///
/// Connections are pooled inside the hyper client; cloning the inner service
/// per call is cheap. The transport is `Send + Sync` and meant to be shared
/// behind an `Arc` by every call of one client instance.
pub struct HyperTransport {
    service: InnerService,
    user_agent: HeaderValue,
    max_body_size: usize,
    security: TransportSecurity,
}

impl fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HyperTransport")
            .field("user_agent", &self.user_agent)
            .field("max_body_size", &self.max_body_size)
            .field("security", &self.security)
            .finish_non_exhaustive()
    }
}

impl HyperTransport {
    /// Build the transport from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidHeaderValue`] if the User-Agent is not a
    /// valid header value, or [`HttpError::Tls`] if the TLS connector cannot
    /// be initialized.
    pub fn new(config: TransportConfig) -> Result<Self, HttpError> {
        if config.security == TransportSecurity::AllowInsecureHttp {
            tracing::warn!(
                "insecure HTTP enabled (TransportSecurity::AllowInsecureHttp); \
                 use only against sandboxes or mock servers"
            );
        }

        let user_agent = HeaderValue::try_from(config.user_agent)?;
        let https = build_https_connector(config.security)?;

        let mut client_builder = Client::builder(TokioExecutor::new());
        // pool_idle_timeout has no effect without a pool timer
        client_builder.pool_timer(TokioTimer::new());
        if let Some(idle_timeout) = config.pool_idle_timeout {
            client_builder.pool_idle_timeout(idle_timeout);
        }
        let hyper_client = client_builder.build::<_, Full<Bytes>>(https);

        let timeout = config.request_timeout;
        let service = ServiceBuilder::new()
            .layer(TimeoutLayer::new(timeout))
            .service(hyper_client)
            .map_err(move |e: tower::BoxError| map_tower_error(e, timeout));

        Ok(Self {
            service: BoxCloneSyncService::new(service),
            user_agent,
            max_body_size: config.max_body_size,
            security: config.security,
        })
    }

    fn validate_scheme(&self, uri: &http::Uri) -> Result<(), HttpError> {
        match uri.scheme_str() {
            Some("https") => Ok(()),
            Some("http") if self.security == TransportSecurity::AllowInsecureHttp => Ok(()),
            Some("http") => Err(HttpError::InvalidScheme {
                scheme: "http".to_owned(),
                reason: "HTTPS required (transport security is TlsOnly)".to_owned(),
            }),
            Some(scheme) => Err(HttpError::InvalidScheme {
                scheme: scheme.to_owned(),
                reason: "only http:// and https:// schemes are supported".to_owned(),
            }),
            None => Err(HttpError::InvalidScheme {
                scheme: String::new(),
                reason: "request URI must be absolute".to_owned(),
            }),
        }
    }
}

#[async_trait]
impl Transport for HyperTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, HttpError> {
        self.validate_scheme(request.uri())?;

        let (mut parts, body) = request.into_parts();
        parts
            .headers
            .entry(USER_AGENT)
            .or_insert_with(|| self.user_agent.clone());

        tracing::debug!(method = %parts.method, uri = %parts.uri, "dispatching HTTP request");

        let request = Request::from_parts(parts, Full::new(body));
        let mut service = self.service.clone();
        let response = service.ready().await?.call(request).await?;

        let (parts, body) = response.into_parts();
        tracing::debug!(status = %parts.status, "HTTP response head received");

        let limit = self.max_body_size;
        let collected = Limited::new(body, limit)
            .collect()
            .await
            .map_err(|e| map_body_error(e, limit))?;

        Ok(Response::from_parts(parts, collected.to_bytes()))
    }
}

fn map_tower_error(err: tower::BoxError, timeout: Duration) -> HttpError {
    if err.is::<tower::timeout::error::Elapsed>() {
        return HttpError::Timeout(timeout);
    }

    match err.downcast::<hyper_util::client::legacy::Error>() {
        Ok(hyper_err) => HttpError::from(*hyper_err),
        Err(other) => HttpError::Transport(other),
    }
}

fn map_body_error(err: Box<dyn std::error::Error + Send + Sync>, limit: usize) -> HttpError {
    if err.is::<LengthLimitError>() {
        HttpError::BodyTooLarge { limit }
    } else {
        HttpError::Transport(err)
    }
}

fn build_https_connector(
    security: TransportSecurity,
) -> Result<HttpsConnector<HttpConnector>, HttpError> {
    // Respect a process-wide provider if the host application installed one.
    let provider = rustls::crypto::CryptoProvider::get_default()
        .cloned()
        .unwrap_or_else(|| Arc::new(rustls::crypto::aws_lc_rs::default_provider()));

    let builder = hyper_rustls::HttpsConnectorBuilder::new()
        .with_provider_and_webpki_roots(provider)
        .map_err(|e| HttpError::Tls(Box::new(e)))?;

    let connector = match security {
        TransportSecurity::AllowInsecureHttp => {
            builder.https_or_http().enable_all_versions().build()
        }
        TransportSecurity::TlsOnly => builder.https_only().enable_all_versions().build(),
    };
    Ok(connector)
}
