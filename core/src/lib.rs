//! Synchronous client for the Designer News v1 REST API.
//!
//! # Overview
//! One method per remote endpoint (stories, comments, message of the day,
//! search), each returning the decoded JSON body as a `serde_json::Value`.
//!
//! ```no_run
//! use designer_news_core::{ClientConfig, DesignerNewsClient};
//!
//! let client = DesignerNewsClient::new(ClientConfig::new("my-access-token")?);
//! let story = client.get_story(42)?;
//! println!("{}", story["story"]["title"]);
//! # Ok::<(), designer_news_core::ApiError>(())
//! ```
//!
//! # Design
//! - `DesignerNewsClient` is stateless beyond its immutable `ClientConfig`.
//! - Every call goes through one dispatcher, itself split into `build_request`
//!   (produces an `HttpRequest`) and `parse_response` (consumes an
//!   `HttpResponse`), so the I/O boundary is explicit.
//! - The network sits behind the `Transport` trait. `UreqTransport` is the
//!   default; tests substitute recording or failing transports.
//! - Non-2xx responses are not errors. The remote API's JSON error envelope is
//!   returned to the caller unchanged.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::DesignerNewsClient;
pub use config::ClientConfig;
pub use error::{ApiError, TransportError, TransportErrorKind};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use transport::UreqTransport;
pub use types::{CommentBody, Identifier, IntoIdentifier};
