//! Multipart form data transport.
//!
//! A `multipart/form-data` body is decoded once into a [`MultipartForm`]:
//! text fields go to the value mapping, parts that carry a filename go to the
//! file mapping. Decoding is bounded by [`MultipartLimits`].
//!
//! The decoder is [`multer`], driven to completion on the calling thread over
//! an in-memory body.
//!
//! # Example
//!
//! ```rust
//! use reqbind_extract::{parse_form, FilePart, MultipartLimits};
//!
//! let body = "--XX\r\n\
//!     Content-Disposition: form-data; name=\"title\"\r\n\r\n\
//!     Holiday\r\n\
//!     --XX\r\n\
//!     Content-Disposition: form-data; name=\"photo\"; filename=\"beach.jpg\"\r\n\
//!     Content-Type: image/jpeg\r\n\r\n\
//!     JPEGDATA\r\n\
//!     --XX--\r\n";
//!
//! let form = parse_form(body.into(), "XX", MultipartLimits::default()).unwrap();
//! assert_eq!(form.value("title"), Some("Holiday"));
//! assert_eq!(form.files("photo").unwrap()[0].file_name(), "beach.jpg");
//! ```

use bytes::Bytes;
use futures::executor::block_on;
use indexmap::IndexMap;
use reqbind_config::BinderConfig;
use std::io::{self, Read};
use tracing::{debug, trace};

use crate::error::{BindError, BindResult};

/// Bounds applied while decoding a multipart body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultipartLimits {
    /// Maximum total body size in bytes.
    pub max_bytes: u64,
    /// Maximum number of parts (files and text fields).
    pub max_parts: usize,
}

impl Default for MultipartLimits {
    fn default() -> Self {
        Self::from(&BinderConfig::default())
    }
}

impl From<&BinderConfig> for MultipartLimits {
    fn from(config: &BinderConfig) -> Self {
        Self {
            max_bytes: config.multipart_limit_bytes(),
            max_parts: config.max_multipart_parts,
        }
    }
}

impl MultipartLimits {
    /// Limits with the body size given in megabytes (`limit_mb × 2^20` bytes).
    ///
    /// A limit of `0` selects the default limit.
    #[must_use]
    pub fn from_megabytes(limit_mb: u64) -> Self {
        if limit_mb == 0 {
            return Self::default();
        }
        Self::from(&BinderConfig::with_multipart_limit_mb(limit_mb))
    }

    /// Set the maximum number of parts.
    #[must_use]
    pub fn max_parts(mut self, count: usize) -> Self {
        self.max_parts = count;
        self
    }
}

/// One uploaded file part of a decoded multipart form.
///
/// Implemented by [`MemoryPart`]; request sources that spool uploads
/// elsewhere (disk, object storage) provide their own part type.
pub trait FilePart {
    /// The client-supplied filename.
    fn file_name(&self) -> &str;

    /// The client-declared content type of the part, if any.
    fn content_type(&self) -> Option<&str>;

    /// Opens the part's content for reading.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the content cannot be opened.
    fn open(&self) -> io::Result<Box<dyn Read + '_>>;
}

/// A file part held entirely in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryPart {
    file_name: String,
    content_type: Option<String>,
    data: Bytes,
}

impl MemoryPart {
    /// Creates an in-memory part.
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        content_type: Option<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            data: data.into(),
        }
    }

    /// Get the part's raw bytes.
    #[must_use]
    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

impl FilePart for MemoryPart {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(&self.data[..]))
    }
}

/// A decoded multipart form: text values and file parts keyed by field name.
///
/// Both mappings keep fields in the order they first appeared in the body,
/// and parts within a field in body order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartForm<P = MemoryPart> {
    values: IndexMap<String, Vec<String>>,
    files: IndexMap<String, Vec<P>>,
}

impl<P> Default for MultipartForm<P> {
    fn default() -> Self {
        Self {
            values: IndexMap::new(),
            files: IndexMap::new(),
        }
    }
}

impl<P> MultipartForm<P> {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a text value under `field`.
    pub fn insert_value(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.entry(field.into()).or_default().push(value.into());
    }

    /// Appends a file part under `field`.
    pub fn insert_file(&mut self, field: impl Into<String>, part: P) {
        self.files.entry(field.into()).or_default().push(part);
    }

    /// Returns the first text value of `field`.
    #[must_use]
    pub fn value(&self, field: &str) -> Option<&str> {
        self.values
            .get(field)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// Returns every text value of `field`.
    #[must_use]
    pub fn values(&self, field: &str) -> Option<&[String]> {
        self.values.get(field).map(Vec::as_slice)
    }

    /// Returns every file part of `field`.
    #[must_use]
    pub fn files(&self, field: &str) -> Option<&[P]> {
        self.files.get(field).map(Vec::as_slice)
    }

    /// Iterates over all file parts as `(field, part)` pairs.
    pub fn iter_files(&self) -> impl Iterator<Item = (&str, &P)> {
        self.files
            .iter()
            .flat_map(|(field, parts)| parts.iter().map(move |p| (field.as_str(), p)))
    }

    /// Returns the total number of file parts.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }
}

/// Reads at most `limit` bytes from `reader`.
///
/// # Errors
///
/// Returns [`BindError::MultipartTooLarge`] if the reader holds more than
/// `limit` bytes, or [`BindError::Io`] if reading fails.
pub fn read_limited(reader: &mut dyn Read, limit: u64) -> BindResult<Bytes> {
    let mut buf = Vec::new();
    reader.take(limit.saturating_add(1)).read_to_end(&mut buf)?;
    if buf.len() as u64 > limit {
        debug!(limit, "multipart body over limit");
        return Err(BindError::MultipartTooLarge { limit });
    }
    Ok(Bytes::from(buf))
}

/// Decodes a multipart body delimited by `boundary`.
///
/// Parts with a non-empty filename become [`MemoryPart`]s; all other parts
/// become text values (invalid UTF-8 is replaced).
///
/// # Errors
///
/// - [`BindError::MultipartTooLarge`] if the body exceeds `limits.max_bytes`
/// - [`BindError::TooManyParts`] if it carries more than `limits.max_parts`
/// - [`BindError::Multipart`] if the body is malformed
pub fn parse_form(
    body: Bytes,
    boundary: impl Into<String>,
    limits: MultipartLimits,
) -> BindResult<MultipartForm> {
    if body.len() as u64 > limits.max_bytes {
        return Err(BindError::MultipartTooLarge {
            limit: limits.max_bytes,
        });
    }

    let stream = futures::stream::once(async move { Ok::<_, io::Error>(body) });
    block_on(collect_form(
        multer::Multipart::new(stream, boundary),
        limits,
    ))
}

async fn collect_form(
    mut multipart: multer::Multipart<'_>,
    limits: MultipartLimits,
) -> BindResult<MultipartForm> {
    let mut form = MultipartForm::new();
    let mut count = 0usize;

    while let Some(field) = multipart.next_field().await? {
        count += 1;
        if count > limits.max_parts {
            debug!(limit = limits.max_parts, "too many multipart parts");
            return Err(BindError::TooManyParts {
                limit: limits.max_parts,
            });
        }

        let name = field.name().unwrap_or_default().to_string();
        let file_name = field
            .file_name()
            .filter(|f| !f.is_empty())
            .map(str::to_string);
        let content_type = field.content_type().map(ToString::to_string);
        let data = field.bytes().await?;

        match file_name {
            Some(file_name) => {
                trace!(field = %name, file = %file_name, size = data.len(), "multipart file part");
                form.insert_file(name, MemoryPart::new(file_name, content_type, data));
            }
            None => form.insert_value(name, String::from_utf8_lossy(&data).into_owned()),
        }
    }

    debug!(files = form.file_count(), parts = count, "decoded multipart body");
    Ok(form)
}
