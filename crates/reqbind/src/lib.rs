//! # reqbind
//!
//! **Typed binding of HTTP request data**
//!
//! reqbind takes an inbound request and writes its parts into destinations
//! you own:
//!
//! - **Query and path parameters** – single keys or whole annotated structs
//! - **Bodies** – raw text, JSON and XML
//! - **Uploads** – multipart files with sniffed content types
//!
//! ## Quick Start
//!
//! ```rust
//! use reqbind::prelude::*;
//! use http::Uri;
//!
//! #[derive(Debug, Default, BindUrl)]
//! #[bind(crate = "reqbind::extract")]
//! struct GetOrder {
//!     #[bind(path = "order_id")]
//!     order_id: u64,
//!     #[bind(query = "expand")]
//!     expand: Vec<String>,
//! }
//!
//! let mut req = HttpRequest::builder()
//!     .uri(Uri::from_static("/orders/12?expand=items&expand=customer"))
//!     .path_param("order_id", "12")
//!     .build();
//!
//! let config = BinderConfig::default();
//! let binder = Binder::with_config(&mut req, None, &config);
//!
//! let mut params = GetOrder::default();
//! binder.must_url(&mut params);
//!
//! assert_eq!(params.order_id, 12);
//! assert_eq!(params.expand, ["items", "customer"]);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! RequestSource ─→ Binder ─→ ParamTarget   (query / path_value / url)
//!                    │
//!                    ├──→ serde            (text / json / xml)
//!                    └──→ MultipartForm ─→ UploadedFile (file / files)
//! ```

#![doc(html_root_url = "https://docs.rs/reqbind/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export configuration types
pub use reqbind_config as config;

// Re-export binding types
pub use reqbind_extract as extract;

// Re-export macros - the BindUrl derive
pub use reqbind_macros::BindUrl;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use reqbind::prelude::*;
/// ```
pub mod prelude {
    pub use reqbind_config::{BinderConfig, ConfigLoader};

    // Re-export the binder and its request sources
    pub use reqbind_extract::{
        BindError, BindResult, BindSource, Binder, HttpRequest, Params, QueryMap,
        RequestSource, UploadedFile,
    };

    // Re-export conversion traits
    pub use reqbind_extract::{BindUrl, FromParam, ParamTarget, UrlField};

    // Re-export the derive
    pub use reqbind_macros::BindUrl;
}
