//! Procedural macros for reqbind.
//!
//! This crate provides `#[derive(BindUrl)]`, which turns field annotations
//! into the field table and slot lookup that `Binder::url` walks.
//!
//! # Example
//!
//! ```rust
//! use reqbind_extract::{Binder, HttpRequest};
//! use reqbind_macros::BindUrl;
//! use http::Uri;
//!
//! #[derive(Debug, Default, BindUrl)]
//! struct ListUsers {
//!     #[bind(query = "id", path = "id")]
//!     id: u64,
//!     #[bind(query = "tag")]
//!     tags: Vec<String>,
//!     #[bind(query = "limit")]
//!     limit: Option<u32>,
//! }
//!
//! let mut req = HttpRequest::builder()
//!     .uri(Uri::from_static("/orgs/7/users?id=3&tag=a&tag=b"))
//!     .path_param("id", "7")
//!     .build();
//!
//! let mut params = ListUsers::default();
//! Binder::new(&mut req, None, 32).url(&mut params).unwrap();
//!
//! assert_eq!(params.id, 7);
//! assert_eq!(params.tags, ["a", "b"]);
//! assert_eq!(params.limit, None);
//! ```
//!
//! # Macro Expansion
//!
//! For every field carrying `#[bind(...)]`, in declaration order, the derive:
//!
//! 1. Adds a `UrlField` entry with the field name and its query/path keys
//! 2. Adds a `match` arm handing out `&mut self.<field>` as a `ParamTarget`
//!
//! Fields without the attribute are never touched.

mod derive;
mod parse;

use proc_macro::TokenStream;

/// Derives `BindUrl` for a struct.
///
/// # Attributes
///
/// On fields:
///
/// - `query`: the query key feeding the field
/// - `path`: the path key feeding the field; applied after `query`, so it wins
///
/// On the struct:
///
/// - `crate`: path to `reqbind_extract` when it is used through a re-export,
///   e.g. `#[bind(crate = "reqbind::extract")]`
///
/// Every annotated field's type must implement `ParamTarget`.
///
/// # Generated Code
///
/// The macro generates approximately:
///
/// ```rust,ignore
/// impl ::reqbind_extract::BindUrl for ListUsers {
///     fn url_fields() -> &'static [::reqbind_extract::UrlField] {
///         const FIELDS: &[::reqbind_extract::UrlField] = &[
///             ::reqbind_extract::UrlField::new("id").query("id").path("id"),
///             ::reqbind_extract::UrlField::new("tags").query("tag"),
///         ];
///         FIELDS
///     }
///
///     fn url_target(&mut self, index: usize) -> Option<&mut dyn ::reqbind_extract::ParamTarget> {
///         match index {
///             0usize => Some(&mut self.id),
///             1usize => Some(&mut self.tags),
///             _ => None,
///         }
///     }
/// }
/// ```
#[proc_macro_derive(BindUrl, attributes(bind))]
pub fn derive_bind_url(input: TokenStream) -> TokenStream {
    derive::expand_bind_url(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
