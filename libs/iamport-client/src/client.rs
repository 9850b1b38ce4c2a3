use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderValue, StatusCode};
use iamport_http::{
    HttpError, HyperTransport, Transport, TransportConfig, TransportRequest, TransportSecurity,
};
use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api_path;
use crate::error::IamportError;
use crate::models::token::{Token, TokenRequest};
use crate::options::ClientOptions;
use crate::request::IamportRequest;
use crate::response::IamportResponse;

/// Endpoint that exchanges credentials for an access token.
pub const TOKEN_PATH: &str = "/users/getToken";

/// Longest body excerpt carried by [`IamportError::HttpStatus`].
const BODY_PREVIEW_LIMIT: usize = 256;

const APPLICATION_JSON: &str = "application/json";

enum ClientState {
    Active(Arc<dyn Transport>),
    Disposed,
}

/// Gateway client: validated options, a shared transport and the most recent
/// access token.
///
/// Share one instance behind an `Arc`; every method takes `&self`. After
/// [`dispose`](Self::dispose) all operations fail with
/// [`IamportError::Disposed`].
pub struct IamportClient {
    options: ClientOptions,
    state: Mutex<ClientState>,
    token: ArcSwapOption<Token>,
}

impl fmt::Debug for IamportClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IamportClient")
            .field("options", &self.options)
            .field("disposed", &self.is_disposed())
            .field("has_token", &self.token.load().is_some())
            .finish_non_exhaustive()
    }
}

impl IamportClient {
    /// Client over a [`HyperTransport`] with default transport settings.
    ///
    /// # Errors
    ///
    /// Returns [`IamportError::Transport`] if the transport cannot be built.
    pub fn new(options: ClientOptions) -> Result<Self, IamportError> {
        Self::with_transport_config(options, TransportConfig::default())
    }

    /// Client over a [`HyperTransport`] built from `config`.
    ///
    /// A plain `http` base URL switches the transport to
    /// [`TransportSecurity::AllowInsecureHttp`].
    ///
    /// # Errors
    ///
    /// Returns [`IamportError::Transport`] if the transport cannot be built.
    pub fn with_transport_config(
        options: ClientOptions,
        mut config: TransportConfig,
    ) -> Result<Self, IamportError> {
        if options.base_url().scheme() == "http" {
            config.security = TransportSecurity::AllowInsecureHttp;
        }
        let transport = HyperTransport::new(config)?;
        Ok(Self::with_transport(options, Arc::new(transport)))
    }

    /// Client over a caller-provided transport.
    #[must_use]
    pub fn with_transport(options: ClientOptions, transport: Arc<dyn Transport>) -> Self {
        Self {
            options,
            state: Mutex::new(ClientState::Active(transport)),
            token: ArcSwapOption::empty(),
        }
    }

    #[must_use]
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        matches!(*self.state.lock(), ClientState::Disposed)
    }

    /// Token stored by the last successful [`authorize`](Self::authorize).
    #[must_use]
    pub fn current_token(&self) -> Option<Arc<Token>> {
        self.token.load_full()
    }

    /// Send a fully built request and decode the gateway envelope.
    ///
    /// The envelope `code` is not inspected.
    ///
    /// # Errors
    ///
    /// - [`IamportError::Disposed`] after [`dispose`](Self::dispose)
    /// - [`IamportError::Transport`] if no response was received
    /// - [`IamportError::HttpStatus`] for a non-2xx status whose body is not
    ///   an envelope
    /// - [`IamportError::Json`] for a 2xx status whose body is not an
    ///   envelope
    pub async fn send<T>(&self, request: TransportRequest) -> Result<IamportResponse<T>, IamportError>
    where
        T: DeserializeOwned,
    {
        let transport = self.transport()?;
        send_with(transport.as_ref(), request).await
    }

    /// Execute a described call, fetching a token first when the request
    /// requires authorization.
    ///
    /// The token is attached as the raw value of the configured
    /// authorization header. A failed authorization aborts the call before
    /// the primary request is sent.
    ///
    /// # Errors
    ///
    /// Everything [`authorize`](Self::authorize) and [`send`](Self::send)
    /// return, plus [`IamportError::InvalidArgument`] /
    /// [`IamportError::InvalidUrl`] for an unusable path.
    pub async fn request<B, T>(
        &self,
        request: &IamportRequest<B>,
    ) -> Result<IamportResponse<T>, IamportError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let token = if request.require_authorization() {
            Some(self.authorize().await?)
        } else {
            None
        };
        let transport = self.transport()?;
        self.dispatch(transport.as_ref(), request, token.as_deref())
            .await
    }

    /// Exchange the configured credentials for an access token and store it.
    ///
    /// Concurrent calls each fetch a token; the last one stored wins.
    ///
    /// # Errors
    ///
    /// - [`IamportError::Gateway`] if the gateway rejects the credentials
    /// - [`IamportError::InvalidResponse`] if a successful envelope carries
    ///   no token
    /// - transport and decoding errors as for [`send`](Self::send)
    pub async fn authorize(&self) -> Result<Arc<Token>, IamportError> {
        let transport = self.transport()?;
        let request = IamportRequest::post(TOKEN_PATH, TokenRequest::from_options(&self.options))
            .without_authorization();

        let envelope: IamportResponse<Token> =
            self.dispatch(transport.as_ref(), &request, None).await?;
        let token = Arc::new(envelope.into_content()?);

        self.token.store(Some(Arc::clone(&token)));
        tracing::info!(expired_at = %token.expired_at(), "gateway access token acquired");
        Ok(token)
    }

    /// Release the transport and forget the token. Idempotent.
    pub fn dispose(&self) {
        let previous = std::mem::replace(&mut *self.state.lock(), ClientState::Disposed);
        if let ClientState::Active(transport) = previous {
            drop(transport);
            self.token.store(None);
            tracing::debug!("gateway client disposed");
        }
    }

    fn transport(&self) -> Result<Arc<dyn Transport>, IamportError> {
        match &*self.state.lock() {
            ClientState::Active(transport) => Ok(Arc::clone(transport)),
            ClientState::Disposed => Err(IamportError::Disposed),
        }
    }

    async fn dispatch<B, T>(
        &self,
        transport: &dyn Transport,
        request: &IamportRequest<B>,
        token: Option<&Token>,
    ) -> Result<IamportResponse<T>, IamportError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = api_path::build(self.options.base_url(), request.path_and_query())?;

        let mut builder = http::Request::builder()
            .method(request.method().clone())
            .uri(url.as_str())
            .header(ACCEPT, APPLICATION_JSON);

        let body = match request.body() {
            Some(body) => {
                builder = builder.header(CONTENT_TYPE, APPLICATION_JSON);
                Bytes::from(serde_json::to_vec(body)?)
            }
            None => Bytes::new(),
        };

        if let Some(token) = token {
            let mut value = HeaderValue::from_str(token.access_token().expose()).map_err(|_| {
                IamportError::InvalidResponse(
                    "access token is not a valid header value".to_owned(),
                )
            })?;
            value.set_sensitive(true);
            builder = builder.header(self.options.authorization_header_name().clone(), value);
        }

        let http_request = builder.body(body).map_err(HttpError::from)?;
        send_with(transport, http_request).await
    }
}

async fn send_with<T>(
    transport: &dyn Transport,
    request: TransportRequest,
) -> Result<IamportResponse<T>, IamportError>
where
    T: DeserializeOwned,
{
    tracing::debug!(method = %request.method(), url = %request.uri(), "sending gateway request");
    let response = transport.send(request).await?;
    let status = response.status();
    tracing::debug!(status = status.as_u16(), "gateway response received");
    decode_envelope(status, response.body())
}

fn decode_envelope<T>(status: StatusCode, body: &[u8]) -> Result<IamportResponse<T>, IamportError>
where
    T: DeserializeOwned,
{
    match serde_json::from_slice(body) {
        Ok(envelope) => Ok(envelope),
        Err(_) if !status.is_success() => Err(IamportError::HttpStatus {
            status,
            body_preview: body_preview(body),
        }),
        Err(e) => Err(e.into()),
    }
}

fn body_preview(body: &[u8]) -> String {
    let end = body.len().min(BODY_PREVIEW_LIMIT);
    String::from_utf8_lossy(&body[..end]).into_owned()
}
