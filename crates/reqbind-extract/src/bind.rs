//! Struct binding from query and path parameters.
//!
//! A type implements [`BindUrl`] by describing its bindable fields as a
//! static table of [`UrlField`]s and handing out a mutable destination for
//! each field index. The derive macro in `reqbind-macros` generates both from
//! `#[bind(query = "...", path = "...")]` attributes.
//!
//! # Example
//!
//! ```rust
//! use reqbind_extract::{BindUrl, ParamTarget, UrlField};
//!
//! #[derive(Default)]
//! struct Page {
//!     id: u64,
//!     tags: Vec<String>,
//! }
//!
//! impl BindUrl for Page {
//!     fn url_fields() -> &'static [UrlField] {
//!         const FIELDS: &[UrlField] = &[
//!             UrlField::new("id").query("id").path("id"),
//!             UrlField::new("tags").query("tags"),
//!         ];
//!         FIELDS
//!     }
//!
//!     fn url_target(&mut self, index: usize) -> Option<&mut dyn ParamTarget> {
//!         match index {
//!             0 => Some(&mut self.id),
//!             1 => Some(&mut self.tags),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! assert_eq!(Page::url_fields()[0].path_key(), Some("id"));
//! ```

use crate::convert::ParamTarget;

/// Source annotation of one bindable field.
///
/// An empty key counts as no key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlField {
    name: &'static str,
    query: Option<&'static str>,
    path: Option<&'static str>,
}

impl UrlField {
    /// A field fed by neither source.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            query: None,
            path: None,
        }
    }

    /// Sets the query key feeding this field.
    #[must_use]
    pub const fn query(mut self, key: &'static str) -> Self {
        self.query = if key.is_empty() { None } else { Some(key) };
        self
    }

    /// Sets the path key feeding this field.
    #[must_use]
    pub const fn path(mut self, key: &'static str) -> Self {
        self.path = if key.is_empty() { None } else { Some(key) };
        self
    }

    /// The Rust field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The query key, if the field has one.
    #[must_use]
    pub const fn query_key(&self) -> Option<&'static str> {
        self.query
    }

    /// The path key, if the field has one.
    #[must_use]
    pub const fn path_key(&self) -> Option<&'static str> {
        self.path
    }
}

/// A record whose fields can be populated from query and path parameters.
///
/// Path values override query values for a field that names both. Fields
/// whose keys are absent from the request are left untouched.
pub trait BindUrl {
    /// The bindable fields, in declaration order.
    fn url_fields() -> &'static [UrlField];

    /// The destination for the field at `index` of [`url_fields`].
    ///
    /// [`url_fields`]: BindUrl::url_fields
    fn url_target(&mut self, index: usize) -> Option<&mut dyn ParamTarget>;
}
