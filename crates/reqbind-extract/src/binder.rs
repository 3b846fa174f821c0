//! The per-request binder.
//!
//! A [`Binder`] wraps one [`RequestSource`] and exposes every binding
//! operation twice: a `Result`-returning form and a `must_*` form that aborts
//! the current thread with the original [`BindError`] as the panic payload.
//!
//! # Example
//!
//! ```rust
//! use reqbind_extract::{Binder, HttpRequest};
//! use http::Uri;
//!
//! let mut req = HttpRequest::builder()
//!     .uri(Uri::from_static("/users/7?tags=a&tags=b"))
//!     .path_param("id", "7")
//!     .build();
//! let binder = Binder::new(&mut req, None, 32);
//!
//! let mut id = 0u64;
//! binder.path_value("id", &mut id).unwrap();
//!
//! let mut tags: Vec<String> = Vec::new();
//! binder.query("tags", &mut tags).unwrap();
//!
//! assert_eq!(id, 7);
//! assert_eq!(tags, ["a", "b"]);
//! ```

use bytes::Bytes;
use reqbind_config::BinderConfig;
use serde::de::DeserializeOwned;
use std::io::{BufReader, Read};
use std::panic::panic_any;
use tracing::{debug, trace};

use crate::bind::BindUrl;
use crate::convert::ParamTarget;
use crate::error::{BindError, BindResult, BindSource};
use crate::file::UploadedFile;
use crate::multipart::{FilePart, MultipartLimits};
use crate::request::RequestSource;

/// Binds request data into caller-owned destinations.
///
/// Constructed per request. An optional pre-buffered payload replaces the
/// live body for `text`, `json` and `xml`, and disables multipart access.
pub struct Binder<'r, R: RequestSource> {
    request: &'r mut R,
    payload: Option<Bytes>,
    limits: MultipartLimits,
}

impl<'r, R: RequestSource> Binder<'r, R> {
    /// Creates a binder with a multipart limit in megabytes.
    ///
    /// A limit of `0` selects the default limit. An empty payload is treated
    /// as no payload.
    pub fn new(request: &'r mut R, payload: Option<Bytes>, multipart_limit_mb: u64) -> Self {
        Self::with_limits(
            request,
            payload,
            MultipartLimits::from_megabytes(multipart_limit_mb),
        )
    }

    /// Creates a binder from a loaded [`BinderConfig`].
    pub fn with_config(request: &'r mut R, payload: Option<Bytes>, config: &BinderConfig) -> Self {
        Self::with_limits(request, payload, MultipartLimits::from(config))
    }

    /// Creates a binder with explicit multipart limits.
    pub fn with_limits(
        request: &'r mut R,
        payload: Option<Bytes>,
        limits: MultipartLimits,
    ) -> Self {
        Self {
            request,
            payload: payload.filter(|p| !p.is_empty()),
            limits,
        }
    }

    /// The pre-buffered payload, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&Bytes> {
        self.payload.as_ref()
    }

    /// The multipart limits in effect.
    #[must_use]
    pub fn limits(&self) -> MultipartLimits {
        self.limits
    }

    /// The underlying request.
    #[must_use]
    pub fn request(&self) -> &R {
        self.request
    }

    /// Binds the query parameter `key` into `target`.
    ///
    /// One value is converted as a scalar, several as a sequence.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::QueryMissing`] if the key is absent, or a
    /// conversion error.
    pub fn query<T: ParamTarget + ?Sized>(&self, key: &str, target: &mut T) -> BindResult<()> {
        let values = self
            .request
            .query()
            .get(key)
            .ok_or_else(|| BindError::query_missing(key))?;
        trace!(key, count = values.len(), "binding query parameter");
        set_values(BindSource::Query, key, values, target)
    }

    /// Binds the path parameter `key` into `target`.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::PathValueMissing`] if the parameter is absent or
    /// empty, or a conversion error.
    pub fn path_value<T: ParamTarget + ?Sized>(&self, key: &str, target: &mut T) -> BindResult<()> {
        let value = self
            .request
            .path_value(key)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| BindError::path_value_missing(key))?;
        trace!(key, "binding path parameter");
        target
            .set_one(value)
            .map_err(|e| BindError::convert(BindSource::Path, key, e))
    }

    /// Binds every annotated field of `target` from the query and path.
    ///
    /// For each field the query key is applied first and the path key
    /// second, so a path value overwrites a query value. Keys absent from
    /// the request leave the field untouched.
    ///
    /// # Errors
    ///
    /// Stops at the first failing field. Fields bound before it keep their
    /// new values.
    pub fn url<T: BindUrl>(&self, target: &mut T) -> BindResult<()> {
        for (index, field) in T::url_fields().iter().enumerate() {
            if let Some(key) = field.query_key() {
                if let Some(values) = self.request.query().get(key).filter(|v| !v.is_empty()) {
                    trace!(field = field.name(), key, "binding field from query");
                    let slot = target.url_target(index).ok_or(BindError::PointerTarget)?;
                    set_values(BindSource::Query, key, values, slot)?;
                }
            }
            if let Some(key) = field.path_key() {
                if let Some(value) = self.request.path_value(key).filter(|v| !v.is_empty()) {
                    trace!(field = field.name(), key, "binding field from path");
                    let slot = target.url_target(index).ok_or(BindError::PointerTarget)?;
                    slot.set_one(value)
                        .map_err(|e| BindError::convert(BindSource::Path, key, e))?;
                }
            }
        }
        Ok(())
    }

    /// Returns the body as text.
    ///
    /// The payload is returned as-is on every call. A live body is read to
    /// the end, so a second call returns an empty string. No body at all is
    /// an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::Io`] if reading fails, or
    /// [`BindError::InvalidUtf8`] if the body is not UTF-8.
    pub fn text(&mut self) -> BindResult<String> {
        if let Some(payload) = &self.payload {
            return Ok(String::from_utf8(payload.to_vec())?);
        }
        let Some(body) = self.request.body() else {
            return Ok(String::new());
        };
        let mut buf = Vec::new();
        body.read_to_end(&mut buf)?;
        debug!(size = buf.len(), "read text body");
        Ok(String::from_utf8(buf)?)
    }

    /// Decodes a JSON body into `target`.
    ///
    /// Only the first JSON value of a live body is read. An empty body
    /// leaves `target` unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::Json`] if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&mut self, target: &mut T) -> BindResult<()> {
        if let Some(payload) = &self.payload {
            debug!(size = payload.len(), "decoding JSON payload");
            *target = serde_json::from_slice(payload)?;
            return Ok(());
        }
        let Some(body) = self.request.body() else {
            return Ok(());
        };
        match serde_json::Deserializer::from_reader(BufReader::new(body))
            .into_iter::<T>()
            .next()
        {
            Some(value) => {
                *target = value?;
                debug!("decoded JSON body");
            }
            None => trace!("empty JSON body"),
        }
        Ok(())
    }

    /// Decodes an XML body into `target`.
    ///
    /// No body at all leaves `target` unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::Xml`] if the body is not valid XML for `T`,
    /// including when a live body is empty.
    pub fn xml<T: DeserializeOwned>(&mut self, target: &mut T) -> BindResult<()> {
        if let Some(payload) = &self.payload {
            debug!(size = payload.len(), "decoding XML payload");
            *target = quick_xml::de::from_reader(&payload[..])?;
            return Ok(());
        }
        let Some(body) = self.request.body() else {
            return Ok(());
        };
        *target = quick_xml::de::from_reader(BufReader::new(body))?;
        debug!("decoded XML body");
        Ok(())
    }

    /// Returns the first file uploaded under the form field `name`.
    ///
    /// Returns [`UploadedFile::default`] if no part matches, or if the
    /// binder was given a payload.
    ///
    /// # Errors
    ///
    /// See [`Binder::files`].
    pub fn file(&mut self, name: &str) -> BindResult<UploadedFile> {
        Ok(self.files(&[name])?.into_iter().next().unwrap_or_default())
    }

    /// Returns uploaded files.
    ///
    /// With no names every file part of the form is returned. Otherwise
    /// only parts of the field named by the first entry are returned.
    /// Returns an empty list if the binder was given a payload.
    ///
    /// # Errors
    ///
    /// - [`BindError::InvalidMultipart`] if the request is not multipart
    /// - any transport error from decoding the form
    /// - [`BindError::OpenFile`] / [`BindError::ReadData`] if a part cannot
    ///   be read; files collected before the failure are discarded
    pub fn files(&mut self, names: &[&str]) -> BindResult<Vec<UploadedFile>> {
        if self.payload.is_some() {
            return Ok(Vec::new());
        }
        if !self.request.is_multipart() {
            return Err(BindError::InvalidMultipart);
        }
        self.request.parse_multipart_form(self.limits)?;

        let Some(form) = self.request.multipart_form() else {
            return Ok(Vec::new());
        };
        let only = names.first().copied().filter(|n| !n.is_empty());

        let files = form
            .iter_files()
            .filter(|(field, _)| only.map_or(true, |name| name == *field))
            .map(|(field, part)| read_part(field, part))
            .collect::<BindResult<Vec<_>>>()?;
        debug!(count = files.len(), "collected uploaded files");
        Ok(files)
    }

    /// Like [`Binder::query`], aborting on error.
    ///
    /// # Panics
    ///
    /// Panics with the [`BindError`] as payload.
    pub fn must_query<T: ParamTarget + ?Sized>(&self, key: &str, target: &mut T) {
        or_abort(self.query(key, target));
    }

    /// Like [`Binder::path_value`], aborting on error.
    ///
    /// # Panics
    ///
    /// Panics with the [`BindError`] as payload.
    pub fn must_path_value<T: ParamTarget + ?Sized>(&self, key: &str, target: &mut T) {
        or_abort(self.path_value(key, target));
    }

    /// Like [`Binder::url`], aborting on error.
    ///
    /// # Panics
    ///
    /// Panics with the [`BindError`] as payload.
    pub fn must_url<T: BindUrl>(&self, target: &mut T) {
        or_abort(self.url(target));
    }

    /// Like [`Binder::text`], aborting on error.
    ///
    /// # Panics
    ///
    /// Panics with the [`BindError`] as payload.
    pub fn must_text(&mut self) -> String {
        or_abort(self.text())
    }

    /// Like [`Binder::json`], aborting on error.
    ///
    /// # Panics
    ///
    /// Panics with the [`BindError`] as payload.
    pub fn must_json<T: DeserializeOwned>(&mut self, target: &mut T) {
        or_abort(self.json(target));
    }

    /// Like [`Binder::xml`], aborting on error.
    ///
    /// # Panics
    ///
    /// Panics with the [`BindError`] as payload.
    pub fn must_xml<T: DeserializeOwned>(&mut self, target: &mut T) {
        or_abort(self.xml(target));
    }

    /// Like [`Binder::file`], aborting on error.
    ///
    /// # Panics
    ///
    /// Panics with the [`BindError`] as payload.
    pub fn must_file(&mut self, name: &str) -> UploadedFile {
        or_abort(self.file(name))
    }

    /// Like [`Binder::files`], aborting on error.
    ///
    /// # Panics
    ///
    /// Panics with the [`BindError`] as payload.
    pub fn must_files(&mut self, names: &[&str]) -> Vec<UploadedFile> {
        or_abort(self.files(names))
    }
}

impl<R: RequestSource> std::fmt::Debug for Binder<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binder")
            .field("payload_len", &self.payload.as_ref().map(Bytes::len))
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}

fn set_values<T: ParamTarget + ?Sized>(
    source: BindSource,
    key: &str,
    values: &[String],
    target: &mut T,
) -> BindResult<()> {
    let result = match values {
        [one] => target.set_one(one),
        many => target.set_many(many),
    };
    result.map_err(|e| BindError::convert(source, key, e))
}

fn read_part<P: FilePart>(field: &str, part: &P) -> BindResult<UploadedFile> {
    let mut reader = part.open().map_err(|source| BindError::OpenFile {
        field: field.to_string(),
        file: part.file_name().to_string(),
        source,
    })?;
    let mut data = Vec::new();
    reader
        .read_to_end(&mut data)
        .map_err(|source| BindError::ReadData {
            field: field.to_string(),
            file: part.file_name().to_string(),
            source,
        })?;
    Ok(UploadedFile::new(field, part.file_name(), data))
}

#[track_caller]
fn or_abort<T>(result: BindResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic_any(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bind::UrlField;
    use crate::request::HttpRequest;
    use http::Uri;
    use serde::Deserialize;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    fn request(uri: &'static str) -> HttpRequest {
        HttpRequest::builder().uri(Uri::from_static(uri)).build()
    }

    #[derive(Debug, Default)]
    struct Listing {
        id: i64,
        tags: Vec<String>,
        untagged: u8,
    }

    impl BindUrl for Listing {
        fn url_fields() -> &'static [UrlField] {
            const FIELDS: &[UrlField] = &[
                UrlField::new("id").query("id").path("id"),
                UrlField::new("tags").query("tags"),
                UrlField::new("untagged"),
            ];
            FIELDS
        }

        fn url_target(&mut self, index: usize) -> Option<&mut dyn ParamTarget> {
            match index {
                0 => Some(&mut self.id),
                1 => Some(&mut self.tags),
                2 => Some(&mut self.untagged),
                _ => None,
            }
        }
    }

    #[test]
    fn test_query_scalar_and_sequence() {
        let mut req = request("/?id=42&tags=a&tags=b");
        let binder = Binder::new(&mut req, None, 32);

        let mut id = 0i64;
        let mut tags: Vec<String> = Vec::new();
        binder.query("id", &mut id).unwrap();
        binder.query("tags", &mut tags).unwrap();

        assert_eq!(id, 42);
        assert_eq!(tags, ["a", "b"]);
    }

    #[test]
    fn test_query_missing() {
        let mut req = request("/?other=1");
        let binder = Binder::new(&mut req, None, 32);

        let mut id = 5i64;
        let err = binder.query("id", &mut id).unwrap_err();

        assert!(matches!(err, BindError::QueryMissing { ref key } if key == "id"));
        assert_eq!(id, 5);
    }

    #[test]
    fn test_query_multiple_values_into_scalar() {
        let mut req = request("/?id=1&id=2");
        let binder = Binder::new(&mut req, None, 32);

        let mut id = 0i64;
        let err = binder.query("id", &mut id).unwrap_err();
        assert!(matches!(
            err,
            BindError::Convert {
                origin: BindSource::Query,
                error: crate::ConvertError::NotASequence { count: 2 },
                ..
            }
        ));
    }

    #[test]
    fn test_path_value() {
        let mut req = HttpRequest::builder()
            .path_param("id", "7")
            .path_param("empty", "")
            .build();
        let binder = Binder::new(&mut req, None, 32);

        let mut id = 0u32;
        binder.path_value("id", &mut id).unwrap();
        assert_eq!(id, 7);

        assert!(matches!(
            binder.path_value("empty", &mut id),
            Err(BindError::PathValueMissing { .. })
        ));
        assert!(matches!(
            binder.path_value("nope", &mut id),
            Err(BindError::PathValueMissing { .. })
        ));
    }

    #[test]
    fn test_path_value_invalid_literal() {
        let mut req = HttpRequest::builder().path_param("id", "abc").build();
        let binder = Binder::new(&mut req, None, 32);

        let mut id = 0u32;
        let err = binder.path_value("id", &mut id).unwrap_err();
        assert_eq!(err.bind_source(), Some(BindSource::Path));
        assert_eq!(err.key(), Some("id"));
    }

    #[test]
    fn test_url_path_overrides_query() {
        let mut req = HttpRequest::builder()
            .uri(Uri::from_static("/?id=3&tags=x"))
            .path_param("id", "7")
            .build();
        let binder = Binder::new(&mut req, None, 32);

        let mut listing = Listing {
            untagged: 9,
            ..Listing::default()
        };
        binder.url(&mut listing).unwrap();

        assert_eq!(listing.id, 7);
        assert_eq!(listing.tags, ["x"]);
        assert_eq!(listing.untagged, 9);
    }

    #[test]
    fn test_url_leaves_absent_fields_untouched() {
        let mut req = request("/");
        let binder = Binder::new(&mut req, None, 32);

        let mut listing = Listing {
            id: 11,
            tags: vec!["keep".into()],
            untagged: 1,
        };
        binder.url(&mut listing).unwrap();

        assert_eq!(listing.id, 11);
        assert_eq!(listing.tags, ["keep"]);
    }

    #[test]
    fn test_url_stops_at_first_error() {
        let mut req = request("/?id=oops&tags=t");
        let binder = Binder::new(&mut req, None, 32);

        let mut listing = Listing::default();
        let err = binder.url(&mut listing).unwrap_err();

        assert_eq!(err.key(), Some("id"));
        assert!(listing.tags.is_empty());
    }

    #[test]
    fn test_url_missing_slot_is_pointer_target() {
        struct Broken;

        impl BindUrl for Broken {
            fn url_fields() -> &'static [UrlField] {
                const FIELDS: &[UrlField] = &[UrlField::new("id").query("id")];
                FIELDS
            }

            fn url_target(&mut self, _index: usize) -> Option<&mut dyn ParamTarget> {
                None
            }
        }

        let mut req = request("/?id=1");
        let binder = Binder::new(&mut req, None, 32);
        assert!(matches!(
            binder.url(&mut Broken),
            Err(BindError::PointerTarget)
        ));
    }

    #[test]
    fn test_text_prefers_payload() {
        let mut req = HttpRequest::builder().body("from stream").build();
        let mut binder = Binder::new(&mut req, Some(Bytes::from_static(b"buffered")), 32);

        assert_eq!(binder.text().unwrap(), "buffered");
        assert_eq!(binder.text().unwrap(), "buffered");
    }

    #[test]
    fn test_empty_payload_counts_as_absent() {
        let mut req = HttpRequest::builder().body("from stream").build();
        let mut binder = Binder::new(&mut req, Some(Bytes::new()), 32);

        assert!(binder.payload().is_none());
        assert_eq!(binder.text().unwrap(), "from stream");
    }

    #[test]
    fn test_text_stream_reads_once() {
        let mut req = HttpRequest::builder().body("hello").build();
        let mut binder = Binder::new(&mut req, None, 32);

        assert_eq!(binder.text().unwrap(), "hello");
        assert_eq!(binder.text().unwrap(), "");
    }

    #[test]
    fn test_text_without_body() {
        let mut req = HttpRequest::builder().build();
        let mut binder = Binder::new(&mut req, None, 32);
        assert_eq!(binder.text().unwrap(), "");
    }

    #[test]
    fn test_text_invalid_utf8() {
        let mut req = HttpRequest::builder().body(vec![0xFF, 0xFE]).build();
        let mut binder = Binder::new(&mut req, None, 32);
        assert!(matches!(binder.text(), Err(BindError::InvalidUtf8(_))));
    }

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct User {
        name: String,
        age: u32,
    }

    #[test]
    fn test_json_from_stream() {
        let mut req = HttpRequest::builder()
            .body(r#"{"name":"Alice","age":30} trailing"#)
            .build();
        let mut binder = Binder::new(&mut req, None, 32);

        let mut user = User::default();
        binder.json(&mut user).unwrap();
        assert_eq!(user.name, "Alice");
        assert_eq!(user.age, 30);
    }

    /// Counts `read` calls made against the wrapped bytes.
    struct CountingReader {
        inner: &'static [u8],
        reads: std::sync::Arc<std::sync::atomic::AtomicUsize>,
    }

    impl Read for CountingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.reads
                .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            self.inner.read(buf)
        }
    }

    #[test]
    fn test_json_stream_is_buffered() {
        let reads = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let mut req = HttpRequest::builder()
            .body_reader(CountingReader {
                inner: br#"{"name":"Alice","age":30}"#,
                reads: reads.clone(),
            })
            .build();
        let mut binder = Binder::new(&mut req, None, 32);

        let mut user = User::default();
        binder.json(&mut user).unwrap();
        assert_eq!(user.name, "Alice");
        assert!(reads.load(std::sync::atomic::Ordering::Relaxed) <= 2);
    }

    #[test]
    fn test_json_empty_stream_is_noop() {
        let mut req = HttpRequest::builder().body("  \n").build();
        let mut binder = Binder::new(&mut req, None, 32);

        let mut user = User {
            name: "kept".into(),
            age: 1,
        };
        binder.json(&mut user).unwrap();
        assert_eq!(user.name, "kept");
    }

    #[test]
    fn test_json_payload_error() {
        let mut req = HttpRequest::builder().build();
        let mut binder = Binder::new(&mut req, Some(Bytes::from_static(b"{not json")), 32);

        let mut user = User::default();
        let err = binder.json(&mut user).unwrap_err();
        assert!(matches!(err, BindError::Json(_)));
        assert_eq!(err.bind_source(), Some(BindSource::Body));
    }

    #[test]
    fn test_xml_from_payload_and_stream() {
        let doc = "<user><name>Bob</name><age>41</age></user>";

        let mut req = HttpRequest::builder().build();
        let mut binder = Binder::new(&mut req, Some(Bytes::from_static(doc.as_bytes())), 32);
        let mut user = User::default();
        binder.xml(&mut user).unwrap();
        assert_eq!(user, User { name: "Bob".into(), age: 41 });

        let mut req = HttpRequest::builder().body(doc).build();
        let mut binder = Binder::new(&mut req, None, 32);
        let mut user = User::default();
        binder.xml(&mut user).unwrap();
        assert_eq!(user.age, 41);
    }

    #[test]
    fn test_xml_empty_stream_is_error() {
        let mut req = HttpRequest::builder().body("").build();
        let mut binder = Binder::new(&mut req, None, 32);

        let mut user = User::default();
        assert!(matches!(binder.xml(&mut user), Err(BindError::Xml(_))));
    }

    #[test]
    fn test_xml_without_body_is_noop() {
        let mut req = HttpRequest::builder().build();
        let mut binder = Binder::new(&mut req, None, 32);

        let mut user = User::default();
        binder.xml(&mut user).unwrap();
        assert_eq!(user, User::default());
    }

    #[test]
    fn test_files_require_multipart() {
        let mut req = HttpRequest::builder()
            .header("content-type", "application/json")
            .body("{}")
            .build();
        let mut binder = Binder::new(&mut req, None, 32);

        assert!(matches!(binder.files(&[]), Err(BindError::InvalidMultipart)));
        assert!(matches!(binder.file("a"), Err(BindError::InvalidMultipart)));
    }

    #[test]
    fn test_files_with_payload_short_circuit() {
        let mut req = HttpRequest::builder()
            .header("content-type", "application/json")
            .build();
        let mut binder = Binder::new(&mut req, Some(Bytes::from_static(b"x")), 32);

        assert!(binder.files(&[]).unwrap().is_empty());
        assert!(binder.file("avatar").unwrap().is_empty());
    }

    #[test]
    fn test_must_query_panics_with_bind_error() {
        let mut req = request("/");
        let binder = Binder::new(&mut req, None, 32);

        let payload = catch_unwind(AssertUnwindSafe(|| {
            let mut id = 0i64;
            binder.must_query("id", &mut id);
        }))
        .unwrap_err();

        let err = payload.downcast::<BindError>().unwrap();
        assert!(matches!(*err, BindError::QueryMissing { ref key } if key == "id"));
    }

    #[test]
    fn test_must_text_returns_value() {
        let mut req = HttpRequest::builder().body("ok").build();
        let mut binder = Binder::new(&mut req, None, 32);
        assert_eq!(binder.must_text(), "ok");
    }

    #[test]
    fn test_with_config_limits() {
        let mut req = HttpRequest::builder().build();
        let config = BinderConfig {
            multipart_limit_mb: 1,
            max_multipart_parts: 3,
        };
        let binder = Binder::with_config(&mut req, None, &config);

        assert_eq!(binder.limits().max_bytes, 1 << 20);
        assert_eq!(binder.limits().max_parts, 3);
    }

    #[test]
    fn test_zero_limit_selects_default() {
        let body = "--XX\r\n\
            Content-Disposition: form-data; name=\"doc\"; filename=\"a.txt\"\r\n\r\n\
            hello\r\n\
            --XX--\r\n";
        let mut req = HttpRequest::builder()
            .header("content-type", "multipart/form-data; boundary=XX")
            .body(body)
            .build();
        let mut binder = Binder::new(&mut req, None, 0);

        assert_eq!(binder.limits(), MultipartLimits::default());
        assert_eq!(binder.files(&[]).unwrap().len(), 1);
    }
}
