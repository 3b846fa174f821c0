//! Request sources the binder reads from.
//!
//! [`RequestSource`] is the binder's only view of an inbound request: the
//! multi-valued query mapping, route path parameters, the live body stream
//! and the decoded multipart form. [`HttpRequest`] is the stock
//! implementation over the `http` crate's types.

use bytes::Bytes;
use http::{header, HeaderMap, Method, Uri};
use std::fmt;
use std::io::{self, Cursor, Read};
use tracing::trace;

use crate::error::{BindError, BindResult};
use crate::multipart::{
    parse_form, read_limited, FilePart, MemoryPart, MultipartForm, MultipartLimits,
};
use crate::params::{Params, QueryMap};

/// Read access to the parts of a request that can be bound.
///
/// The body stream is single-consumer: once it has been read to the end,
/// further reads yield nothing.
pub trait RequestSource {
    /// File part type of the decoded multipart form.
    type Part: FilePart;

    /// The multi-valued query mapping.
    fn query(&self) -> &QueryMap;

    /// Looks up a route path parameter.
    fn path_value(&self, key: &str) -> Option<&str>;

    /// The live body stream, if the request has one.
    fn body(&mut self) -> Option<&mut (dyn Read + '_)>;

    /// Whether the request declares a `multipart/form-data` body.
    fn is_multipart(&self) -> bool;

    /// Decodes the multipart body, consuming the body stream.
    ///
    /// Calling this again after a successful decode is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::InvalidMultipart`] if the request is not
    /// multipart, or any transport error from decoding.
    fn parse_multipart_form(&mut self, limits: MultipartLimits) -> BindResult<()>;

    /// The decoded multipart form, once [`parse_multipart_form`] succeeded.
    ///
    /// [`parse_multipart_form`]: RequestSource::parse_multipart_form
    fn multipart_form(&self) -> Option<&MultipartForm<Self::Part>>;
}

/// A body reader that stays empty once it has reached the end.
pub struct BodyStream {
    inner: Box<dyn Read + Send>,
    exhausted: bool,
}

impl BodyStream {
    /// Wraps a reader.
    pub fn new(reader: impl Read + Send + 'static) -> Self {
        Self {
            inner: Box::new(reader),
            exhausted: false,
        }
    }

    /// Returns true once a read has hit the end of the stream.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

impl Read for BodyStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.exhausted {
            return Ok(0);
        }
        let n = self.inner.read(buf)?;
        if n == 0 && !buf.is_empty() {
            self.exhausted = true;
        }
        Ok(n)
    }
}

impl fmt::Debug for BodyStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BodyStream")
            .field("exhausted", &self.exhausted)
            .finish_non_exhaustive()
    }
}

/// An inbound HTTP request with its matched route parameters.
///
/// # Example
///
/// ```rust
/// use reqbind_extract::{HttpRequest, RequestSource};
/// use http::{Method, Uri};
///
/// let req = HttpRequest::builder()
///     .method(Method::GET)
///     .uri(Uri::from_static("/users/42?active=true"))
///     .path_param("id", "42")
///     .build();
///
/// assert_eq!(req.path_value("id"), Some("42"));
/// assert_eq!(req.query().get("active"), Some(&["true".to_string()][..]));
/// ```
#[derive(Debug)]
pub struct HttpRequest {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    query: QueryMap,
    path_params: Params,
    body: Option<BodyStream>,
    form: Option<MultipartForm>,
}

impl HttpRequest {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> HttpRequestBuilder {
        HttpRequestBuilder::new()
    }

    /// Wraps an `http::Request` whose body is a reader.
    pub fn from_http<B>(request: http::Request<B>, path_params: Params) -> Self
    where
        B: Read + Send + 'static,
    {
        let (parts, body) = request.into_parts();
        Self::from_parts(
            parts.method,
            parts.uri,
            parts.headers,
            path_params,
            Some(BodyStream::new(body)),
        )
    }

    fn from_parts(
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        path_params: Params,
        body: Option<BodyStream>,
    ) -> Self {
        let query = uri.query().map(QueryMap::parse).unwrap_or_default();
        Self {
            method,
            uri,
            headers,
            query,
            path_params,
            body,
            form: None,
        }
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request URI.
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a specific header value as a string.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the Content-Type header value.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header(header::CONTENT_TYPE.as_str())
    }

    /// Returns the route path parameters.
    #[must_use]
    pub fn path_params(&self) -> &Params {
        &self.path_params
    }

    /// Returns a mutable reference to the route path parameters.
    pub fn path_params_mut(&mut self) -> &mut Params {
        &mut self.path_params
    }

    fn multipart_boundary(&self) -> Option<String> {
        let content_type = self.content_type()?;
        let mime: mime::Mime = content_type.parse().ok()?;
        if mime.type_() != mime::MULTIPART || mime.subtype() != mime::FORM_DATA {
            return None;
        }
        multer::parse_boundary(content_type).ok()
    }
}

impl RequestSource for HttpRequest {
    type Part = MemoryPart;

    fn query(&self) -> &QueryMap {
        &self.query
    }

    fn path_value(&self, key: &str) -> Option<&str> {
        self.path_params.get(key)
    }

    fn body(&mut self) -> Option<&mut (dyn Read + '_)> {
        self.body.as_mut().map(|b| b as &mut (dyn Read + '_))
    }

    fn is_multipart(&self) -> bool {
        self.multipart_boundary().is_some()
    }

    fn parse_multipart_form(&mut self, limits: MultipartLimits) -> BindResult<()> {
        if self.form.is_some() {
            return Ok(());
        }
        let boundary = self.multipart_boundary().ok_or(BindError::InvalidMultipart)?;
        let body = match self.body.as_mut() {
            Some(stream) => read_limited(stream, limits.max_bytes)?,
            None => Bytes::new(),
        };
        trace!(size = body.len(), "decoding multipart body");
        self.form = Some(parse_form(body, boundary, limits)?);
        Ok(())
    }

    fn multipart_form(&self) -> Option<&MultipartForm> {
        self.form.as_ref()
    }
}

/// Builder for constructing an [`HttpRequest`].
///
/// Method defaults to `GET` and the URI to `/`.
#[derive(Debug, Default)]
pub struct HttpRequestBuilder {
    method: Option<Method>,
    uri: Option<Uri>,
    headers: HeaderMap,
    body: Option<BodyStream>,
    path_params: Params,
}

impl HttpRequestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the URI.
    #[must_use]
    pub fn uri(mut self, uri: Uri) -> Self {
        self.uri = Some(uri);
        self
    }

    /// Sets the headers.
    #[must_use]
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Adds a single header. Values that are not valid header values are ignored.
    #[must_use]
    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        if let Ok(value) = value.parse() {
            self.headers.insert(name, value);
        }
        self
    }

    /// Sets an in-memory body.
    #[must_use]
    pub fn body(self, body: impl Into<Bytes>) -> Self {
        self.body_reader(Cursor::new(body.into()))
    }

    /// Sets a streaming body.
    #[must_use]
    pub fn body_reader(mut self, reader: impl Read + Send + 'static) -> Self {
        self.body = Some(BodyStream::new(reader));
        self
    }

    /// Sets the path parameters.
    #[must_use]
    pub fn path_params(mut self, params: Params) -> Self {
        self.path_params = params;
        self
    }

    /// Adds a single path parameter.
    #[must_use]
    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.push(name, value);
        self
    }

    /// Builds the request.
    #[must_use]
    pub fn build(self) -> HttpRequest {
        HttpRequest::from_parts(
            self.method.unwrap_or_default(),
            self.uri.unwrap_or_else(|| Uri::from_static("/")),
            self.headers,
            self.path_params,
            self.body,
        )
    }
}
