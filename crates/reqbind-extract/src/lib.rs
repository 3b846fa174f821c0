//! # reqbind extract
//!
//! Binding of HTTP request data into caller-owned, typed destinations.
//!
//! A [`Binder`] is built per request over any [`RequestSource`] and offers:
//!
//! | Operation | Source | Description |
//! |-----------|--------|-------------|
//! | [`Binder::query`] | Query string | Convert one key, scalar or sequence |
//! | [`Binder::path_value`] | Route path | Convert one path parameter |
//! | [`Binder::url`] | Query + path | Fill every annotated field of a [`BindUrl`] record |
//! | [`Binder::text`] | Body | Read the body as UTF-8 text |
//! | [`Binder::json`] | Body | Decode a JSON body |
//! | [`Binder::xml`] | Body | Decode an XML body |
//! | [`Binder::file`] / [`Binder::files`] | Multipart | Read uploaded files |
//!
//! Each has a `must_*` twin that panics with the [`BindError`] as payload.
//!
//! ## Example
//!
//! ```rust
//! use reqbind_extract::{Binder, BindUrl, HttpRequest, ParamTarget, UrlField};
//! use http::Uri;
//!
//! #[derive(Default)]
//! struct Article {
//!     id: u64,
//!     tags: Vec<String>,
//! }
//!
//! impl BindUrl for Article {
//!     fn url_fields() -> &'static [UrlField] {
//!         const FIELDS: &[UrlField] = &[
//!             UrlField::new("id").query("id").path("id"),
//!             UrlField::new("tags").query("tag"),
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
//! let mut req = HttpRequest::builder()
//!     .uri(Uri::from_static("/articles/7?id=3&tag=rust&tag=http"))
//!     .path_param("id", "7")
//!     .build();
//!
//! let binder = Binder::new(&mut req, None, 32);
//! let mut article = Article::default();
//! binder.url(&mut article).unwrap();
//!
//! assert_eq!(article.id, 7); // path wins over query
//! assert_eq!(article.tags, ["rust", "http"]);
//! ```
//!
//! ## Error Handling
//!
//! Every error knows which part of the request it came from and maps to an
//! HTTP status:
//!
//! ```rust
//! use reqbind_extract::{BindError, BindSource};
//!
//! let err = BindError::query_missing("limit");
//!
//! assert_eq!(err.bind_source(), Some(BindSource::Query));
//! assert_eq!(err.status_code(), http::StatusCode::BAD_REQUEST);
//! ```

#![doc(html_root_url = "https://docs.rs/reqbind-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bind;
mod binder;
mod convert;
mod error;
mod file;
mod multipart;
mod params;
mod request;
pub mod sniff;

pub use bind::{BindUrl, UrlField};
pub use binder::Binder;
pub use convert::{convert_value, convert_values, FromParam, ParamTarget};
pub use error::{BindError, BindResult, BindSource, ConvertError};
pub use file::{filename_suffix, UploadedFile};
pub use multipart::{
    parse_form, read_limited, FilePart, MemoryPart, MultipartForm, MultipartLimits,
};
pub use params::{Params, QueryMap};
pub use request::{BodyStream, HttpRequest, HttpRequestBuilder, RequestSource};

// Re-export useful types from dependencies
pub use bytes::Bytes;
pub use reqbind_config::BinderConfig;
