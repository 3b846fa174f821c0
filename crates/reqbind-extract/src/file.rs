//! Uploaded file values.

use bytes::Bytes;

use crate::sniff::detect_content_type;

/// A file that has been uploaded via a multipart form.
///
/// Value object: the form field it came from, the client-supplied filename,
/// the content type sniffed from its bytes, the filename suffix and the raw
/// payload. [`UploadedFile::default`] is the empty value returned when a
/// lookup matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadedFile {
    key: String,
    name: String,
    content_type: String,
    suffix: String,
    data: Bytes,
}

impl UploadedFile {
    /// Create a new uploaded file, deriving the content type and suffix.
    ///
    /// # Example
    ///
    /// ```rust
    /// use reqbind_extract::UploadedFile;
    ///
    /// let file = UploadedFile::new("avatar", "me.png", &b"\x89PNG\r\n\x1a\n"[..]);
    /// assert_eq!(file.content_type(), "image/png");
    /// assert_eq!(file.suffix(), "png");
    /// ```
    #[must_use]
    pub fn new(key: impl Into<String>, name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let name = name.into();
        let data = data.into();
        Self {
            key: key.into(),
            content_type: detect_content_type(&data).to_string(),
            suffix: filename_suffix(&name).to_string(),
            name,
            data,
        }
    }

    /// Get the form field name.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get the original file name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the content type detected from the file's bytes.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Get the filename suffix, without the dot.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Get the file data as bytes.
    #[must_use]
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Consumes the file and returns its data.
    #[must_use]
    pub fn into_data(self) -> Bytes {
        self.data
    }

    /// Get the file size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the file is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Returns the text after the last `.` of a filename, or `""` when there is none.
///
/// Only the final path component is considered, so `dir.v2/README` has no suffix.
#[must_use]
pub fn filename_suffix(name: &str) -> &str {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    base.rsplit_once('.').map_or("", |(_, ext)| ext)
}
