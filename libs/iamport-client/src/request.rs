use http::Method;

/// Description of one gateway call, before it becomes a transport request.
///
/// Built per call by the resource APIs. Requests require authorization unless
/// [`without_authorization`](Self::without_authorization) is applied.
#[derive(Debug, Clone)]
#[must_use]
pub struct IamportRequest<B = ()> {
    path_and_query: String,
    method: Method,
    body: Option<B>,
    require_authorization: bool,
}

impl IamportRequest<()> {
    /// Authorized `GET` without a body.
    pub fn get(path_and_query: impl Into<String>) -> Self {
        Self::new(Method::GET, path_and_query)
    }

    /// Authorized `DELETE` without a body.
    pub fn delete(path_and_query: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path_and_query)
    }
}

impl<B> IamportRequest<B> {
    /// Authorized request without a body.
    pub fn new(method: Method, path_and_query: impl Into<String>) -> Self {
        Self {
            path_and_query: path_and_query.into(),
            method,
            body: None,
            require_authorization: true,
        }
    }

    /// Authorized `POST` with a JSON body.
    pub fn post(path_and_query: impl Into<String>, body: B) -> Self {
        Self::new(Method::POST, path_and_query).with_body(body)
    }

    pub fn with_body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    /// Send without fetching a token first and without the authorization
    /// header.
    pub fn without_authorization(mut self) -> Self {
        self.require_authorization = false;
        self
    }

    #[must_use]
    pub fn path_and_query(&self) -> &str {
        &self.path_and_query
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    #[must_use]
    pub fn require_authorization(&self) -> bool {
        self.require_authorization
    }
}
